//! Meeting summary and action item extraction.
//!
//! Both come from an OpenAI-compatible chat model (Groq by default). The model is
//! treated as a plain text-in, text-out service.

use crate::config::{InsightSettings, Prompts};
use crate::error::{DebriefError, Result};
use crate::openai::create_compatible_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Summary and action items for one meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingInsights {
    /// Short prose summary.
    pub summary: String,
    /// Extracted action items, without bullet markers.
    pub action_items: Vec<String>,
}

/// Generates [`MeetingInsights`] from a transcript.
pub struct InsightGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_action_items: usize,
    prompts: Prompts,
}

impl InsightGenerator {
    /// Create a generator, reading the API key from the configured environment variable.
    pub fn from_settings(settings: &InsightSettings, prompts: Prompts) -> Result<Self> {
        let api_key = settings.api_key().ok_or_else(|| {
            DebriefError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                settings.api_key_env, settings.api_key_env
            ))
        })?;
        Ok(Self::with_api_key(settings, &api_key, prompts))
    }

    /// Create a generator with an explicit API key.
    pub fn with_api_key(settings: &InsightSettings, api_key: &str, prompts: Prompts) -> Self {
        Self {
            client: create_compatible_client(&settings.base_url, api_key),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            max_action_items: settings.max_action_items,
            prompts,
        }
    }

    /// Summarize a transcript and extract its action items.
    #[instrument(skip(self, transcript), fields(model = %self.model))]
    pub async fn generate(&self, transcript: &str) -> Result<MeetingInsights> {
        if transcript.trim().is_empty() {
            return Err(DebriefError::EmptyInput("transcript is empty".to_string()));
        }

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());

        info!("Generating meeting summary");
        let summary_prompt = self
            .prompts
            .render_with_custom(&self.prompts.insights.summary, &vars);
        let summary = self.complete(summary_prompt).await?.trim().to_string();

        info!("Extracting action items");
        let actions_prompt = self
            .prompts
            .render_with_custom(&self.prompts.insights.action_items, &vars);
        let raw_actions = self.complete(actions_prompt).await?;
        let action_items = parse_action_items(&raw_actions, self.max_action_items);

        debug!("Extracted {} action items", action_items.len());

        Ok(MeetingInsights {
            summary,
            action_items,
        })
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| DebriefError::Insights(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens)
            .build()
            .map_err(|e| DebriefError::Insights(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            DebriefError::OpenAI(format!("Failed to generate insights: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| DebriefError::Insights("Empty response from LLM".to_string()))
    }
}

/// Turn a bullet-list completion into at most `max` action items.
///
/// Blank lines are skipped and a leading `-`, `*` or `•` marker is removed.
pub fn parse_action_items(raw: &str, max: usize) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix('-')
                .or_else(|| line.strip_prefix('•'))
                .or_else(|| line.strip_prefix("* "))
                .map(str::trim)
                .unwrap_or(line)
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .take(max)
        .collect()
}
