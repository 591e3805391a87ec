//! # Answer Templates
//!
//! Reality.eth questions declare a template that fixes how their 32-byte
//! answer is read. This module maps template ids to the closed set of
//! answer interpretations the codec understands.

use crate::{error::Result, MarketError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default Reality.eth template for yes/no questions
pub const REALITY_TEMPLATE_BOOL: u64 = 0;

/// Default Reality.eth template for unsigned integer answers
pub const REALITY_TEMPLATE_UINT: u64 = 1;

/// Default Reality.eth template for single-select answers
pub const REALITY_TEMPLATE_SINGLE_SELECT: u64 = 2;

/// Default Reality.eth template for multiple-select answers
pub const REALITY_TEMPLATE_MULTIPLE_SELECT: u64 = 3;

/// Default Reality.eth template for datetime answers
pub const REALITY_TEMPLATE_DATETIME: u64 = 4;

/// Question type tag used when posting a question.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Bool,
    SingleSelect,
    MultipleSelect,
    Uint,
    Datetime,
}

impl QuestionType {
    /// Default template id for this question type
    pub const fn template_id(self) -> u64 {
        match self {
            Self::Bool => REALITY_TEMPLATE_BOOL,
            Self::Uint => REALITY_TEMPLATE_UINT,
            Self::SingleSelect => REALITY_TEMPLATE_SINGLE_SELECT,
            Self::MultipleSelect => REALITY_TEMPLATE_MULTIPLE_SELECT,
            Self::Datetime => REALITY_TEMPLATE_DATETIME,
        }
    }

    /// Whether the question text carries an outcome list
    pub const fn is_select(self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultipleSelect)
    }

    /// Tag as written in Reality.eth template definitions
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::SingleSelect => "single-select",
            Self::MultipleSelect => "multiple-select",
            Self::Uint => "uint",
            Self::Datetime => "datetime",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bool" => Ok(Self::Bool),
            "single-select" => Ok(Self::SingleSelect),
            "multiple-select" => Ok(Self::MultipleSelect),
            "uint" => Ok(Self::Uint),
            "datetime" => Ok(Self::Datetime),
            other => Err(MarketError::Other(format!("Unknown question type: {other}"))),
        }
    }
}

/// How a stored answer value is interpreted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerKind {
    /// Yes/no, read as an index into the outcome labels
    Boolean,
    /// A single 18-decimal fixed-point number
    UnsignedInteger,
    /// One outcome index
    SingleSelect,
    /// Bitmask over outcome indices
    MultiSelect,
    /// One unsigned-integer question per outcome
    MultiScalar,
}

impl AnswerKind {
    /// Whether the answer is a fixed-point number rather than an outcome index
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::UnsignedInteger | Self::MultiScalar)
    }

    /// Market badge shown for this kind of answer
    pub const fn market_type(self) -> MarketType {
        match self {
            Self::Boolean | Self::SingleSelect | Self::MultiSelect => MarketType::Categorical,
            Self::UnsignedInteger => MarketType::Scalar,
            Self::MultiScalar => MarketType::MultiScalar,
        }
    }
}

/// Market categories as presented to users
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarketType {
    Categorical,
    Scalar,
    MultiScalar,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Categorical => "Categorical",
            Self::Scalar => "Scalar",
            Self::MultiScalar => "Multi Scalar",
        };
        f.write_str(text)
    }
}

/// Classify a template id into an answer kind.
///
/// Uint markets with several questions carry one question per outcome and
/// are classified as [`AnswerKind::MultiScalar`]. The datetime template and
/// any custom template id are not interpreted by the codec and yield
/// [`MarketError::UnrecognizedTemplate`].
pub fn classify(template_id: u64, question_count: usize) -> Result<AnswerKind> {
    match template_id {
        REALITY_TEMPLATE_BOOL => Ok(AnswerKind::Boolean),
        REALITY_TEMPLATE_UINT if question_count > 1 => Ok(AnswerKind::MultiScalar),
        REALITY_TEMPLATE_UINT => Ok(AnswerKind::UnsignedInteger),
        REALITY_TEMPLATE_SINGLE_SELECT => Ok(AnswerKind::SingleSelect),
        REALITY_TEMPLATE_MULTIPLE_SELECT => Ok(AnswerKind::MultiSelect),
        other => Err(MarketError::UnrecognizedTemplate(other)),
    }
}

/// Classify a template id, checking it against the question type tag when
/// one is known.
///
/// A tag whose default template differs from `template_id` yields
/// [`MarketError::TemplateMismatch`]. Without a tag this is [`classify`].
pub fn classify_question(
    template_id: u64,
    question_count: usize,
    question_type: Option<QuestionType>,
) -> Result<AnswerKind> {
    if let Some(question_type) = question_type {
        if question_type.template_id() != template_id {
            return Err(MarketError::TemplateMismatch {
                template_id,
                question_type,
            });
        }
    }
    classify(template_id, question_count)
}
