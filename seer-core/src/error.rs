//! Error types for seer-core

use thiserror::Error;

/// Result type alias for seer operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Error types for answer encoding and market operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// Hex decoding errors
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Serde JSON errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// No outcome was chosen before encoding
    #[error("Empty selection: choose at least one outcome")]
    EmptySelection,

    /// Template id outside the known set
    #[error("Unrecognized template: {0}")]
    UnrecognizedTemplate(u64),

    /// Question type tag disagrees with the template id
    #[error("Question type {question_type} does not use template {template_id}")]
    TemplateMismatch {
        template_id: u64,
        question_type: crate::template::QuestionType,
    },

    /// Selection shape does not fit the answer kind
    #[error("Selection does not match answer kind: {0}")]
    SelectionMismatch(String),

    /// Outcome index cannot be represented in a 256-bit mask
    #[error("Outcome index {0} does not fit in a 256-bit answer mask")]
    BitmaskOverflow(usize),

    /// Doubling the bond left the 256-bit range
    #[error("Bond overflow: {0} cannot be doubled")]
    BondOverflow(alloy_primitives::U256),

    /// Answer value errors
    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    /// Market validation errors
    #[error("Invalid market: {0}")]
    InvalidMarket(String),

    /// Generic error for other cases
    #[error("Market error: {0}")]
    Other(String),
}

impl From<&str> for MarketError {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}

impl From<String> for MarketError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
