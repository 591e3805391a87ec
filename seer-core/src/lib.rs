//! # Seer Core
//!
//! Answer codec and market lifecycle engine for prediction markets resolved
//! by the Reality.eth oracle.
//!
//! This library provides the pure building blocks a frontend needs once the
//! on-chain state has been fetched:
//! - Answers are encoded into the oracle's 32-byte big-endian answer slot
//! - Stored answers are decoded into outcome text using the question template
//! - A market's lifecycle stage is derived from its questions and the time
//!
//! ## Features
//!
//! - **Template Classification**: Map Reality.eth template ids to answer kinds
//! - **Answer Codec**: Single-select, multi-select bitmask, uint and sentinel answers
//! - **Bonds**: Minimum bond for the next answer to a question
//! - **Lifecycle**: Finalization and market status with an explicit clock
//! - **Countdown**: Remaining challenge time as text
//!
//! Nothing here reads the system clock or performs I/O; every function that
//! depends on time takes `now` as a Unix timestamp.
//!
//! ## Examples
//!
//! ```rust
//! use seer_core::{encode_answer, decode_value, AnswerKind, Selection};
//!
//! let outcomes = vec!["A".to_string(), "B".to_string(), "C".to_string()];
//! let answer = encode_answer(&Selection::outcomes([0, 2]), AnswerKind::MultiSelect)?;
//! let text = decode_value(&answer, AnswerKind::MultiSelect, &outcomes, "Not answered yet");
//! assert_eq!(text, "A, C");
//! Ok::<(), seer_core::MarketError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod market;
pub mod template;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub use codec::{
    answer_from_hex, decode_answer, decode_value, encode_answer, encode_question_text,
    parse_selection, OutcomePick, Resolved, Selection, Sentinel, ANSWERED_TOO_SOON,
    INVALID_RESULT,
};
pub use config::DisplayConfig;
pub use error::{MarketError, Result};
pub use market::{Market, MarketStatus, Question, QuestionSummary};
pub use template::{classify, classify_question, AnswerKind, MarketType, QuestionType};
pub use utils::*;

pub use alloy_primitives::{Address, B256, U256};
