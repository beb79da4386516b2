//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{DebriefError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Summaries and action items need the chat API key.
    Insights,
    /// Indexing and querying need the embedding provider.
    Index,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Insights => check_api_key(&settings.insights.api_key_env),
        Operation::Index => {
            if settings.embedding.provider.eq_ignore_ascii_case("openai") {
                check_api_key("OPENAI_API_KEY")
            } else {
                // Local models download on first use
                Ok(())
            }
        }
    }
}

/// Check that an API key variable is set and non-empty.
fn check_api_key(var: &str) -> Result<()> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        Ok(_) => Err(DebriefError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            var, var
        ))),
        Err(_) => Err(DebriefError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_index_has_no_requirements() {
        assert!(check(Operation::Index, &Settings::default()).is_ok());
    }

    #[test]
    fn test_insights_require_configured_key() {
        let mut settings = Settings::default();
        settings.insights.api_key_env = "DEBRIEF_PREFLIGHT_UNSET".to_string();
        assert!(matches!(
            check(Operation::Insights, &settings),
            Err(DebriefError::Config(_))
        ));
    }
}
