//! Prompt templates for Debrief.
//!
//! Prompts can be customized by placing an `insights.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub insights: InsightPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for meeting summary and action item extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightPrompts {
    pub summary: String,
    pub action_items: String,
}

impl Default for InsightPrompts {
    fn default() -> Self {
        Self {
            summary: r#"Provide a concise 5-7 line professional meeting summary.

Transcript:
{{transcript}}"#
                .to_string(),
            action_items: r#"Extract clear action items from this transcript.
Return only bullet points.

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let insights_path = custom_path.join("insights.toml");
            if insights_path.exists() {
                let content = std::fs::read_to_string(&insights_path)?;
                prompts.insights = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.insights.summary.contains("{{transcript}}"));
        assert!(prompts.insights.action_items.contains("bullet points"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("team".to_string(), "Platform".to_string());
        custom.insert("transcript".to_string(), "stale".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), "fresh".to_string());

        let rendered = prompts.render_with_custom("{{team}}: {{transcript}}", &vars);
        assert_eq!(rendered, "Platform: fresh");
    }

    #[test]
    fn test_custom_dir_overrides_insight_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("insights.toml"),
            "summary = \"Summarize for {{team}}: {{transcript}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.insights.summary, "Summarize for {{team}}: {{transcript}}");
        assert!(prompts.insights.action_items.contains("action items"));
    }
}
