//! # Answer Codec
//!
//! Converts between user selections and the 32-byte big-endian answer slot
//! of the Reality.eth oracle, and renders stored answers as outcome text.
//!
//! Two answer values are reserved by the oracle and never carry a payload:
//! [`INVALID_RESULT`] (all bits set) and [`ANSWERED_TOO_SOON`] (all bits set
//! except bit 0). A stored value equal to either one is always read as that
//! sentinel, whatever the template says.

use crate::market::Question;
use crate::template::{AnswerKind, QuestionType};
use crate::utils::{format_units, parse_units, DEFAULT_DECIMALS};
use crate::{error::Result, MarketError};
use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Answer marking the question as invalid
pub const INVALID_RESULT: B256 = B256::repeat_byte(0xff);

/// Answer marking the question as asked before it could be answered
pub const ANSWERED_TOO_SOON: B256 = {
    let mut bytes = [0xff; 32];
    bytes[31] = 0xfe;
    B256::new(bytes)
};

/// Separator between the fields of an encoded question text (U+241F)
pub const QUESTION_DELIMITER: char = '\u{241f}';

/// Language tag used when none is given
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// Width of the answer mask in bits
const MASK_BITS: usize = 256;

/// Reserved answers with a fixed meaning.
///
/// Variants are declared in priority order: the smallest wins when a
/// multi-select set holds more than one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Sentinel {
    InvalidResult,
    AnsweredTooSoon,
}

impl Sentinel {
    /// Canonical 32-byte value of this sentinel
    pub const fn value(self) -> B256 {
        match self {
            Self::InvalidResult => INVALID_RESULT,
            Self::AnsweredTooSoon => ANSWERED_TOO_SOON,
        }
    }

    /// Sentinel matching a stored answer, if any
    pub fn from_value(value: &B256) -> Option<Self> {
        if *value == INVALID_RESULT {
            Some(Self::InvalidResult)
        } else if *value == ANSWERED_TOO_SOON {
            Some(Self::AnsweredTooSoon)
        } else {
            None
        }
    }

    /// Display text for a decoded sentinel
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidResult => "Invalid result",
            Self::AnsweredTooSoon => "Answered too soon",
        }
    }

    /// Token accepted by [`parse_selection`]
    pub const fn token(self) -> &'static str {
        match self {
            Self::InvalidResult => "invalid",
            Self::AnsweredTooSoon => "too-soon",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "invalid" => Some(Self::InvalidResult),
            "too-soon" => Some(Self::AnsweredTooSoon),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One member of a multi-select answer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomePick {
    Outcome(usize),
    Sentinel(Sentinel),
}

/// An answer chosen by the user, before encoding.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Selection {
    /// One of the reserved answers
    Sentinel(Sentinel),
    /// Outcome index, boolean or uint payload
    Value(U256),
    /// Set of outcomes for multiple-select questions
    Outcomes(Vec<OutcomePick>),
}

impl Selection {
    /// Single outcome index
    pub fn index(index: usize) -> Self {
        Self::Value(U256::from(index))
    }

    /// Multi-select set of concrete outcome indices
    pub fn outcomes<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self::Outcomes(indices.into_iter().map(OutcomePick::Outcome).collect())
    }
}

/// A multi-select set after sentinel priority has been applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Sentinel(Sentinel),
    Concrete(BTreeSet<usize>),
}

/// Apply sentinel priority to a multi-select set.
///
/// `INVALID_RESULT` wins over `ANSWERED_TOO_SOON`, which wins over any
/// concrete outcome. Concrete indices next to a sentinel are dropped.
pub fn resolve_picks(picks: &[OutcomePick]) -> Result<Resolved> {
    if picks.is_empty() {
        return Err(MarketError::EmptySelection);
    }

    let sentinel = picks
        .iter()
        .filter_map(|pick| match pick {
            OutcomePick::Sentinel(sentinel) => Some(*sentinel),
            OutcomePick::Outcome(_) => None,
        })
        .min();

    let indices: BTreeSet<usize> = picks
        .iter()
        .filter_map(|pick| match pick {
            OutcomePick::Outcome(index) => Some(*index),
            OutcomePick::Sentinel(_) => None,
        })
        .collect();

    match sentinel {
        Some(sentinel) => {
            if !indices.is_empty() {
                debug!(?sentinel, ?indices, "sentinel overrides selected outcomes");
            }
            Ok(Resolved::Sentinel(sentinel))
        }
        None => Ok(Resolved::Concrete(indices)),
    }
}

/// Encode a selection into the oracle's 32-byte answer value.
pub fn encode_answer(selection: &Selection, kind: AnswerKind) -> Result<B256> {
    match (selection, kind) {
        (Selection::Sentinel(sentinel), _) => Ok(sentinel.value()),
        (Selection::Outcomes(picks), AnswerKind::MultiSelect) => match resolve_picks(picks)? {
            Resolved::Sentinel(sentinel) => Ok(sentinel.value()),
            Resolved::Concrete(indices) => encode_mask(&indices),
        },
        (Selection::Value(_), AnswerKind::MultiSelect) => Err(MarketError::SelectionMismatch(
            "multiple-select answers take a set of outcomes".to_string(),
        )),
        (Selection::Outcomes(_), kind) => Err(MarketError::SelectionMismatch(format!(
            "{kind:?} answers take a single value"
        ))),
        (Selection::Value(value), _) => Ok(B256::from(value.to_be_bytes::<32>())),
    }
}

fn encode_mask(indices: &BTreeSet<usize>) -> Result<B256> {
    let mut mask = U256::ZERO;
    for &index in indices {
        if index >= MASK_BITS {
            return Err(MarketError::BitmaskOverflow(index));
        }
        mask.set_bit(index, true);
    }

    let encoded = B256::from(mask.to_be_bytes::<32>());
    if let Some(sentinel) = Sentinel::from_value(&encoded) {
        return Err(MarketError::SelectionMismatch(format!(
            "outcome set encodes to the reserved {sentinel:?} answer"
        )));
    }
    Ok(encoded)
}

/// Decode a question's best answer into display text.
///
/// Unanswered questions, and outcome indices without a label, render as
/// `placeholder`.
pub fn decode_answer(
    question: &Question,
    kind: AnswerKind,
    outcomes: &[String],
    placeholder: &str,
) -> String {
    if question.finalize_ts == 0 {
        return placeholder.to_string();
    }
    decode_value(&question.best_answer, kind, outcomes, placeholder)
}

/// Decode a raw answer value, without checking whether it was ever posted.
pub fn decode_value(value: &B256, kind: AnswerKind, outcomes: &[String], placeholder: &str) -> String {
    if let Some(sentinel) = Sentinel::from_value(value) {
        return sentinel.label().to_string();
    }

    let value = U256::from_be_bytes(value.0);

    match kind {
        AnswerKind::UnsignedInteger | AnswerKind::MultiScalar => {
            format_units(value, DEFAULT_DECIMALS)
        }
        AnswerKind::MultiSelect => selected_indices(value)
            .into_iter()
            .map(|index| outcome_label(outcomes, index, placeholder))
            .collect::<Vec<_>>()
            .join(", "),
        AnswerKind::Boolean | AnswerKind::SingleSelect => {
            match usize::try_from(value) {
                Ok(index) => outcome_label(outcomes, index, placeholder),
                Err(_) => {
                    debug!(%value, "answer does not fit an outcome index");
                    placeholder.to_string()
                }
            }
        }
    }
}

/// Outcome indices set in a multi-select mask, lowest first
pub fn selected_indices(mask: U256) -> Vec<usize> {
    (0..MASK_BITS).filter(|&bit| mask.bit(bit)).collect()
}

fn outcome_label(outcomes: &[String], index: usize, placeholder: &str) -> String {
    match outcomes.get(index) {
        Some(label) => label.clone(),
        None => {
            debug!(index, outcomes = outcomes.len(), "answer index has no outcome label");
            placeholder.to_string()
        }
    }
}

/// Parse user input into a selection for the given answer kind.
///
/// Accepts the sentinel tokens `invalid` and `too-soon`, comma-separated
/// indices for multiple-select questions, decimal numbers with up to 18
/// decimals for uint questions, and a plain index otherwise.
pub fn parse_selection(input: &str, kind: AnswerKind) -> Result<Selection> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MarketError::EmptySelection);
    }
    if let Some(sentinel) = Sentinel::from_token(input) {
        return Ok(Selection::Sentinel(sentinel));
    }

    match kind {
        AnswerKind::MultiSelect => {
            let picks = input
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(parse_pick)
                .collect::<Result<Vec<_>>>()?;
            if picks.is_empty() {
                return Err(MarketError::EmptySelection);
            }
            Ok(Selection::Outcomes(picks))
        }
        AnswerKind::UnsignedInteger | AnswerKind::MultiScalar => {
            Ok(Selection::Value(parse_units(input, DEFAULT_DECIMALS)?))
        }
        AnswerKind::Boolean | AnswerKind::SingleSelect => {
            let index = input.parse::<usize>().map_err(|_| {
                MarketError::InvalidAnswer(format!("Invalid outcome index: {input:?}"))
            })?;
            Ok(Selection::index(index))
        }
    }
}

fn parse_pick(token: &str) -> Result<OutcomePick> {
    if let Some(sentinel) = Sentinel::from_token(token) {
        return Ok(OutcomePick::Sentinel(sentinel));
    }
    token
        .parse::<usize>()
        .map(OutcomePick::Outcome)
        .map_err(|_| MarketError::InvalidAnswer(format!("Invalid outcome index: {token:?}")))
}

/// Parse a `0x`-prefixed 32-byte hex answer
pub fn answer_from_hex(text: &str) -> Result<B256> {
    let text = text.trim();
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits)?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        MarketError::InvalidAnswer(format!("Answer must be 32 bytes, got {}", bytes.len()))
    })?;
    Ok(B256::new(bytes))
}

/// Build the question text posted to the oracle.
///
/// Fields are joined with [`QUESTION_DELIMITER`]: the JSON-escaped text,
/// the outcome list (select questions only), the category and the language.
pub fn encode_question_text(
    qtype: QuestionType,
    text: &str,
    outcomes: Option<&[String]>,
    category: &str,
    language: Option<&str>,
) -> Result<String> {
    let escaped = serde_json::to_string(text)?;
    let mut fields = vec![strip_wrapping(&escaped, '"', '"').to_string()];

    if qtype.is_select() {
        let list = serde_json::to_string(&outcomes)?;
        fields.push(strip_wrapping(&list, '[', ']').to_string());
    }

    fields.push(category.to_string());
    fields.push(language.unwrap_or(DEFAULT_LANGUAGE).to_string());

    Ok(fields.join(&QUESTION_DELIMITER.to_string()))
}

fn strip_wrapping(text: &str, open: char, close: char) -> &str {
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}
