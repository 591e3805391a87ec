//! Display settings shared by every presentation layer.

use crate::codec::DEFAULT_LANGUAGE;
use crate::utils::DEFAULT_DECIMALS;
use serde::{Deserialize, Serialize};

/// Text shown for questions that have no answer yet
pub const DEFAULT_NO_ANSWER_TEXT: &str = "Not answered yet";

/// How decoded answers and amounts are rendered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Placeholder for unanswered questions and unknown outcome indices
    pub no_answer_text: String,
    /// Language tag appended to posted questions
    pub language: String,
    /// Decimals of outcome token amounts
    pub decimals: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            no_answer_text: DEFAULT_NO_ANSWER_TEXT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: DisplayConfig =
            serde_json::from_str(r#"{"no_answer_text": "Pending"}"#).unwrap();
        assert_eq!(config.no_answer_text, "Pending");
        assert_eq!(config.language, "en_US");
        assert_eq!(config.decimals, 18);
    }
}
