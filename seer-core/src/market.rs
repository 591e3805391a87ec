//! # Market Lifecycle
//!
//! Markets own one or more oracle questions. Their lifecycle stage is never
//! stored: [`Market::status`] derives it from the questions and an explicit
//! `now` every time it is asked.

use crate::codec::decode_answer;
use crate::template::{classify, AnswerKind, MarketType};
use crate::utils::{next_bond, time_left};
use crate::{error::Result, MarketError};
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A Reality.eth question as read from the oracle contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// Oracle question id
    pub id: B256,

    /// Earliest time the question may be answered (Unix timestamp)
    #[serde(default)]
    pub opening_ts: u64,

    /// Challenge window in seconds
    #[serde(default)]
    pub timeout: u64,

    /// Time the current answer becomes final, 0 while unanswered
    pub finalize_ts: u64,

    /// Whether arbitration has been requested
    #[serde(default)]
    pub is_pending_arbitration: bool,

    /// Current best answer
    pub best_answer: B256,

    /// Bond posted with the current answer
    #[serde(default)]
    pub bond: U256,

    /// Bond required for the first answer
    #[serde(default)]
    pub min_bond: U256,
}

impl Question {
    /// Creates an unanswered question
    pub fn new(id: B256) -> Self {
        Self {
            id,
            opening_ts: 0,
            timeout: 0,
            finalize_ts: 0,
            is_pending_arbitration: false,
            best_answer: B256::ZERO,
            bond: U256::ZERO,
            min_bond: U256::ZERO,
        }
    }

    /// Whether the oracle accepts answers at `now`
    pub fn is_open(&self, now: u64) -> bool {
        now >= self.opening_ts
    }

    /// Time a new answer posted at `now` would become final if nobody
    /// corrects it, or `None` when the challenge window is unknown
    pub fn challenge_deadline(&self, now: u64) -> Option<u64> {
        (self.timeout > 0)
            .then(|| now.checked_add(self.timeout))
            .flatten()
    }

    /// Whether any answer has been posted
    pub fn is_answered(&self) -> bool {
        self.finalize_ts > 0
    }

    /// Whether the current answer is final at `now`.
    ///
    /// An unanswered question or one under arbitration is never final. The
    /// answer is final strictly after `finalize_ts`.
    pub fn is_finalized(&self, now: u64) -> bool {
        self.is_answered() && !self.is_pending_arbitration && now > self.finalize_ts
    }

    /// Bond required to post the next answer
    pub fn next_bond(&self) -> Result<U256> {
        next_bond(self.bond, self.min_bond)
    }

    /// Display text of the current answer
    pub fn answer_text(&self, kind: AnswerKind, outcomes: &[String], placeholder: &str) -> String {
        decode_answer(self, kind, outcomes, placeholder)
    }
}

/// Market lifecycle stage, in the order a market moves through them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    NotOpen,
    Open,
    AnswerNotFinal,
    PendingExecution,
    Closed,
}

impl MarketStatus {
    /// Short status line shown on market cards
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotOpen => "Market not open yet",
            Self::Open => "Market open",
            Self::AnswerNotFinal => "Waiting for answer",
            Self::PendingExecution => "Pending execution",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A prediction market resolved by one or more oracle questions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market contract address
    pub id: Address,

    /// Market title
    #[serde(default)]
    pub market_name: String,

    /// Outcome labels, the position of each label is its answer index
    pub outcomes: Vec<String>,

    /// Oracle questions resolving the market
    pub questions: Vec<Question>,

    /// Reality.eth template shared by all questions
    pub template_id: u64,

    /// Time trading opens and questions can be answered (Unix timestamp)
    pub opening_time: u64,

    /// Display ordinal
    #[serde(default)]
    pub index: u64,

    /// Total outcome tokens minted, in base units
    #[serde(default)]
    pub outcomes_supply: U256,

    /// Question id shown in explorer links
    #[serde(default)]
    pub question_id: B256,

    /// Whether the payout has been reported on-chain
    #[serde(default)]
    pub payout_reported: bool,
}

/// Per-question view of a market.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QuestionSummary {
    pub id: B256,
    /// Outcome this question prices, for multi-scalar markets
    pub label: Option<String>,
    pub finalized: bool,
    /// Decoded answer, once one has been posted
    pub answer: Option<String>,
    /// Whether a new answer can still be posted
    pub can_answer: bool,
    /// Time left to correct the current answer
    pub time_left: Option<String>,
}

impl Market {
    /// Creates a new market after validating its outcomes and questions.
    ///
    /// # Arguments
    /// * `id` - Market contract address
    /// * `market_name` - Market title
    /// * `outcomes` - Outcome labels, unique, in answer order
    /// * `questions` - Oracle questions, at least one
    /// * `template_id` - Reality.eth template of the questions
    /// * `opening_time` - When the market opens (Unix timestamp)
    pub fn new(
        id: Address,
        market_name: String,
        outcomes: Vec<String>,
        questions: Vec<Question>,
        template_id: u64,
        opening_time: u64,
    ) -> Result<Self> {
        let question_id = questions.first().map(|q| q.id).unwrap_or_default();
        let market = Self {
            id,
            market_name,
            outcomes,
            questions,
            template_id,
            opening_time,
            index: 0,
            outcomes_supply: U256::ZERO,
            question_id,
            payout_reported: false,
        };
        market.validate()?;
        Ok(market)
    }

    /// Parse a market from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let market: Self = serde_json::from_str(json)?;
        market.validate()?;
        Ok(market)
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(MarketError::InvalidMarket(
                "Market must have at least one question".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.outcomes.len());
        for outcome in &self.outcomes {
            if !seen.insert(outcome.as_str()) {
                return Err(MarketError::InvalidMarket(format!(
                    "Duplicate outcome label: {outcome}"
                )));
            }
        }

        Ok(())
    }

    /// Interpretation of this market's answers
    pub fn answer_kind(&self) -> Result<AnswerKind> {
        classify(self.template_id, self.questions.len())
    }

    /// Market category shown to users
    pub fn market_type(&self) -> Result<MarketType> {
        Ok(self.answer_kind()?.market_type())
    }

    /// Lifecycle stage at `now`.
    ///
    /// Checked in priority order: not open yet, no answer on any question,
    /// some answer not final, payout not reported, closed.
    pub fn status(&self, now: u64) -> MarketStatus {
        if now < self.opening_time {
            return MarketStatus::NotOpen;
        }
        if self.questions.iter().all(|q| !q.is_answered()) {
            return MarketStatus::Open;
        }
        if self.questions.iter().any(|q| !q.is_finalized(now)) {
            return MarketStatus::AnswerNotFinal;
        }
        if !self.payout_reported {
            return MarketStatus::PendingExecution;
        }
        MarketStatus::Closed
    }

    /// Display text of the market's main answer
    pub fn answer_text(&self, placeholder: &str) -> Result<String> {
        let kind = self.answer_kind()?;
        // validated markets always have a first question
        Ok(self
            .questions
            .first()
            .map(|q| q.answer_text(kind, &self.outcomes, placeholder))
            .unwrap_or_else(|| placeholder.to_string()))
    }

    /// One summary row per question at `now`
    pub fn question_summaries(&self, now: u64, placeholder: &str) -> Result<Vec<QuestionSummary>> {
        let kind = self.answer_kind()?;

        Ok(self
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let finalized = question.is_finalized(now);
                let label = match kind {
                    AnswerKind::MultiScalar => self.outcomes.get(i).cloned(),
                    _ => None,
                };
                let answer = question
                    .is_answered()
                    .then(|| question.answer_text(kind, &self.outcomes, placeholder));
                let time_left = (question.is_answered() && !finalized)
                    .then(|| time_left(question.finalize_ts, now));

                QuestionSummary {
                    id: question.id,
                    label,
                    finalized,
                    answer,
                    can_answer: question.is_open(now) && !finalized,
                    time_left,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::INVALID_RESULT;
    use crate::test_utils::*;

    #[test]
    fn test_is_finalized_boundaries() {
        let question = create_answered_question(1, B256::ZERO, TEST_FINALIZE_TS);
        assert!(!question.is_finalized(TEST_FINALIZE_TS - 1));
        assert!(!question.is_finalized(TEST_FINALIZE_TS));
        assert!(question.is_finalized(TEST_FINALIZE_TS + 1));
    }

    #[test]
    fn test_is_finalized_unanswered_or_arbitrated() {
        let question = create_unanswered_question(1);
        assert!(!question.is_finalized(u64::MAX));

        let mut question = create_answered_question(1, B256::ZERO, TEST_FINALIZE_TS);
        question.is_pending_arbitration = true;
        assert!(!question.is_finalized(u64::MAX));
    }

    #[test]
    fn test_status_priority_chain() {
        let mut market = create_categorical_market();
        assert_eq!(market.status(TEST_OPENING_TIME - 1), MarketStatus::NotOpen);
        assert_eq!(market.status(TEST_OPENING_TIME + 1), MarketStatus::Open);

        market.questions[0].finalize_ts = TEST_FINALIZE_TS;
        assert_eq!(market.status(TEST_FINALIZE_TS - 1), MarketStatus::AnswerNotFinal);
        assert_eq!(market.status(TEST_FINALIZE_TS + 1), MarketStatus::PendingExecution);

        market.payout_reported = true;
        assert_eq!(market.status(TEST_FINALIZE_TS + 1), MarketStatus::Closed);

        // opening time dominates everything else
        assert_eq!(market.status(TEST_OPENING_TIME - 1), MarketStatus::NotOpen);
    }

    #[test]
    fn test_status_opening_time_is_open() {
        let market = create_categorical_market();
        assert_eq!(market.status(TEST_OPENING_TIME), MarketStatus::Open);
    }

    #[test]
    fn test_status_waits_for_every_question() {
        let mut market = create_multi_scalar_market();
        market.questions[0].finalize_ts = TEST_FINALIZE_TS;
        assert_eq!(market.status(TEST_FINALIZE_TS + 1), MarketStatus::AnswerNotFinal);

        for question in &mut market.questions {
            question.finalize_ts = TEST_FINALIZE_TS;
        }
        assert_eq!(market.status(TEST_FINALIZE_TS + 1), MarketStatus::PendingExecution);

        market.questions[1].is_pending_arbitration = true;
        assert_eq!(market.status(u64::MAX), MarketStatus::AnswerNotFinal);
    }

    #[test]
    fn test_status_labels_ordered() {
        assert!(MarketStatus::NotOpen < MarketStatus::Closed);
        assert_eq!(MarketStatus::AnswerNotFinal.to_string(), "Waiting for answer");
        assert_eq!(
            serde_json::to_string(&MarketStatus::PendingExecution).unwrap(),
            "\"PENDING_EXECUTION\""
        );
    }

    #[test]
    fn test_new_rejects_invalid_markets() {
        let result = Market::new(
            Address::ZERO,
            "No questions".to_string(),
            labels(&["Yes", "No"]),
            vec![],
            2,
            TEST_OPENING_TIME,
        );
        assert!(matches!(result, Err(MarketError::InvalidMarket(_))));

        let result = Market::new(
            Address::ZERO,
            "Duplicate outcomes".to_string(),
            labels(&["Yes", "Yes"]),
            vec![create_unanswered_question(1)],
            2,
            TEST_OPENING_TIME,
        );
        assert!(matches!(result, Err(MarketError::InvalidMarket(_))));
    }

    #[test]
    fn test_new_uses_first_question_id() {
        let market = create_categorical_market();
        assert_eq!(market.question_id, market.questions[0].id);
    }

    #[test]
    fn test_from_json() {
        let market = Market::from_json(TEST_MARKET_JSON).unwrap();
        assert_eq!(market.outcomes, labels(&["Yes", "No", "Maybe"]));
        assert_eq!(market.template_id, 2);
        assert_eq!(market.questions[0].finalize_ts, TEST_FINALIZE_TS);
        assert_eq!(market.questions[0].min_bond, U256::from(1_000u64));
        assert_eq!(market.answer_text("-").unwrap(), "No");

        assert!(matches!(Market::from_json("{"), Err(MarketError::Json(_))));
    }

    #[test]
    fn test_answer_text_unrecognized_template() {
        let mut market = create_categorical_market();
        market.template_id = 4;
        assert!(matches!(
            market.answer_text("-"),
            Err(MarketError::UnrecognizedTemplate(4))
        ));
    }

    #[test]
    fn test_question_opening_and_challenge_window() {
        let mut question = create_answered_question(1, B256::ZERO, TEST_FINALIZE_TS);
        assert!(!question.is_open(TEST_OPENING_TIME - 1));
        assert!(question.is_open(TEST_OPENING_TIME));
        assert_eq!(
            question.challenge_deadline(TEST_OPENING_TIME),
            Some(TEST_OPENING_TIME + 86_400)
        );
        assert_eq!(question.challenge_deadline(u64::MAX), None);

        question.timeout = 0;
        assert_eq!(question.challenge_deadline(TEST_OPENING_TIME), None);
    }

    #[test]
    fn test_question_summaries_before_question_opens() {
        let mut market = create_categorical_market();
        market.questions[0].opening_ts = TEST_OPENING_TIME + 3_600;

        let rows = market.question_summaries(TEST_OPENING_TIME + 60, "-").unwrap();
        assert!(!rows[0].can_answer);
        let rows = market.question_summaries(TEST_OPENING_TIME + 3_600, "-").unwrap();
        assert!(rows[0].can_answer);
    }

    #[test]
    fn test_question_next_bond() {
        let mut question = create_unanswered_question(1);
        question.min_bond = U256::from(10u64);
        assert_eq!(question.next_bond().unwrap(), U256::from(10u64));
        question.bond = U256::from(10u64);
        assert_eq!(question.next_bond().unwrap(), U256::from(20u64));
    }

    #[test]
    fn test_question_summaries_multi_scalar() {
        let mut market = create_multi_scalar_market();
        let now = TEST_FINALIZE_TS - 2 * 3_600;
        market.questions[0].finalize_ts = TEST_FINALIZE_TS;
        market.questions[0].best_answer = INVALID_RESULT;

        let rows = market.question_summaries(now, "Not answered yet").unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].label.as_deref(), Some("Alice"));
        assert_eq!(rows[0].answer.as_deref(), Some("Invalid result"));
        assert_eq!(rows[0].time_left.as_deref(), Some("2 hours"));
        assert!(rows[0].can_answer);

        assert_eq!(rows[1].label.as_deref(), Some("Bob"));
        assert_eq!(rows[1].answer, None);
        assert_eq!(rows[1].time_left, None);
        assert!(rows[1].can_answer);
    }

    #[test]
    fn test_question_summaries_finalized() {
        let mut market = create_categorical_market();
        market.questions[0].finalize_ts = TEST_FINALIZE_TS;
        market.questions[0].best_answer = answer_index(1);

        let rows = market.question_summaries(TEST_FINALIZE_TS + 1, "-").unwrap();
        assert!(rows[0].finalized);
        assert!(!rows[0].can_answer);
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[0].answer.as_deref(), Some("No"));
        assert_eq!(rows[0].time_left, None);
    }
}
