//! Common test utilities for seer-core tests.
//!
//! Shared fixtures for questions and markets so each module's tests start
//! from the same known state.

use crate::market::{Market, Question};
use alloy_primitives::{Address, B256, U256};

/// Standard market opening time (Jan 1, 2025)
pub const TEST_OPENING_TIME: u64 = 1735689600;

/// Standard finalize time, one week after opening
pub const TEST_FINALIZE_TS: u64 = TEST_OPENING_TIME + 7 * 86_400;

/// Market JSON as produced by the indexer
pub const TEST_MARKET_JSON: &str = r#"{
    "id": "0x00000000000000000000000000000000000000aa",
    "marketName": "Will it rain?",
    "outcomes": ["Yes", "No", "Maybe"],
    "templateId": 2,
    "openingTime": 1735689600,
    "questions": [{
        "id": "0x0000000000000000000000000000000000000000000000000000000000000001",
        "finalize_ts": 1736294400,
        "best_answer": "0x0000000000000000000000000000000000000000000000000000000000000001",
        "min_bond": "0x3e8"
    }]
}"#;

/// Owned outcome labels
pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Answer value selecting a single outcome index
pub fn answer_index(index: u64) -> B256 {
    B256::from(U256::from(index).to_be_bytes::<32>())
}

/// Question with no answer posted
pub fn create_unanswered_question(id: u8) -> Question {
    Question::new(B256::with_last_byte(id))
}

/// Question with an answer that becomes final at `finalize_ts`
pub fn create_answered_question(id: u8, best_answer: B256, finalize_ts: u64) -> Question {
    Question {
        best_answer,
        finalize_ts,
        opening_ts: TEST_OPENING_TIME,
        timeout: 86_400,
        ..Question::new(B256::with_last_byte(id))
    }
}

/// Single-select market with three outcomes and no answer yet
pub fn create_categorical_market() -> Market {
    Market::new(
        Address::with_last_byte(0xaa),
        "Will it rain?".to_string(),
        labels(&["Yes", "No", "Maybe"]),
        vec![create_unanswered_question(1)],
        2,
        TEST_OPENING_TIME,
    )
    .unwrap()
}

/// Uint market with one question per outcome, none answered
pub fn create_multi_scalar_market() -> Market {
    Market::new(
        Address::with_last_byte(0xbb),
        "Votes per candidate".to_string(),
        labels(&["Alice", "Bob"]),
        vec![create_unanswered_question(1), create_unanswered_question(2)],
        1,
        TEST_OPENING_TIME,
    )
    .unwrap()
}
