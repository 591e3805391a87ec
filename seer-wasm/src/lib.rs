//! # Seer WASM
//!
//! WebAssembly bindings for the seer answer codec and lifecycle engine.
//! Markets come in as plain JS objects or JSON; 32-byte answers and 256-bit
//! amounts cross the boundary as `0x` hex or decimal strings.

use seer_core::{
    answer_from_hex, classify_question, decode_value, encode_question_text, next_bond as core_next_bond,
    parse_selection, time_left as core_time_left, DisplayConfig, Market, QuestionType, U256,
};
use std::str::FromStr;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Browser clock in seconds, used when the caller passes no `now`
fn now_or_clock(now: Option<u64>) -> u64 {
    now.unwrap_or_else(|| (js_sys::Date::now() / 1000.0) as u64)
}

fn placeholder_or_default(placeholder: Option<String>) -> String {
    placeholder.unwrap_or_else(|| DisplayConfig::default().no_answer_text)
}

/// A market with its questions, as fetched by the frontend
#[wasm_bindgen]
pub struct WasmMarket {
    inner: Market,
}

#[wasm_bindgen]
impl WasmMarket {
    /// Build a market from a JS object with the indexer's field names
    #[wasm_bindgen(constructor)]
    pub fn new(market: JsValue) -> Result<WasmMarket, JsValue> {
        let inner: Market = serde_wasm_bindgen::from_value(market)
            .map_err(|e| JsValue::from_str(&format!("Invalid market: {}", e)))?;
        inner.validate().map_err(js_error)?;
        Ok(WasmMarket { inner })
    }

    /// Build a market from its JSON representation
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmMarket, JsValue> {
        let inner = Market::from_json(json).map_err(js_error)?;
        Ok(WasmMarket { inner })
    }

    /// Lifecycle stage, e.g. `"ANSWER_NOT_FINAL"`
    #[wasm_bindgen]
    pub fn status(&self, now: Option<u64>) -> Result<JsValue, JsValue> {
        let status = self.inner.status(now_or_clock(now));
        serde_wasm_bindgen::to_value(&status).map_err(js_error)
    }

    /// Lifecycle stage as display text
    #[wasm_bindgen(js_name = statusText)]
    pub fn status_text(&self, now: Option<u64>) -> String {
        self.inner.status(now_or_clock(now)).label().to_string()
    }

    /// Market category display text
    #[wasm_bindgen(js_name = marketType)]
    pub fn market_type(&self) -> Result<String, JsValue> {
        self.inner
            .market_type()
            .map(|market_type| market_type.to_string())
            .map_err(js_error)
    }

    /// Decoded answer of the market's first question
    #[wasm_bindgen(js_name = answerText)]
    pub fn answer_text(&self, placeholder: Option<String>) -> Result<String, JsValue> {
        self.inner
            .answer_text(&placeholder_or_default(placeholder))
            .map_err(js_error)
    }

    /// Per-question rows for the market header
    #[wasm_bindgen(js_name = questionSummaries)]
    pub fn question_summaries(
        &self,
        now: Option<u64>,
        placeholder: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let rows = self
            .inner
            .question_summaries(now_or_clock(now), &placeholder_or_default(placeholder))
            .map_err(js_error)?;
        serde_wasm_bindgen::to_value(&rows).map_err(js_error)
    }

    /// Encode user input for this market's template
    #[wasm_bindgen(js_name = encodeAnswer)]
    pub fn encode_answer(&self, answer: &str) -> Result<String, JsValue> {
        let kind = self.inner.answer_kind().map_err(js_error)?;
        let selection = parse_selection(answer, kind).map_err(js_error)?;
        let encoded = seer_core::encode_answer(&selection, kind).map_err(js_error)?;
        Ok(encoded.to_string())
    }

    /// Bond required to answer question `index`, in base units
    #[wasm_bindgen(js_name = nextBond)]
    pub fn next_bond(&self, index: usize) -> Result<String, JsValue> {
        let question = self
            .inner
            .questions
            .get(index)
            .ok_or_else(|| JsValue::from_str(&format!("No question #{}", index)))?;
        question
            .next_bond()
            .map(|bond| bond.to_string())
            .map_err(js_error)
    }

    /// Number of questions resolving the market
    #[wasm_bindgen(getter, js_name = questionCount)]
    pub fn question_count(&self) -> usize {
        self.inner.questions.len()
    }

    /// Outcome labels in answer order
    #[wasm_bindgen(getter)]
    pub fn outcomes(&self) -> Vec<String> {
        self.inner.outcomes.clone()
    }
}

fn kind_for(
    template_id: u64,
    question_count: usize,
    question_type: Option<String>,
) -> Result<seer_core::AnswerKind, JsValue> {
    let question_type = question_type
        .as_deref()
        .map(QuestionType::from_str)
        .transpose()
        .map_err(js_error)?;
    classify_question(template_id, question_count, question_type).map_err(js_error)
}

/// Encode an answer for a template
#[wasm_bindgen(js_name = encodeAnswer)]
pub fn encode_answer(
    template_id: u64,
    question_count: usize,
    answer: &str,
    question_type: Option<String>,
) -> Result<String, JsValue> {
    let kind = kind_for(template_id, question_count, question_type)?;
    let selection = parse_selection(answer, kind).map_err(js_error)?;
    let encoded = seer_core::encode_answer(&selection, kind).map_err(js_error)?;
    Ok(encoded.to_string())
}

/// Decode a 32-byte hex answer into outcome text
#[wasm_bindgen(js_name = decodeAnswer)]
pub fn decode_answer(
    template_id: u64,
    question_count: usize,
    answer: &str,
    outcomes: Vec<String>,
    placeholder: Option<String>,
    question_type: Option<String>,
) -> Result<String, JsValue> {
    let kind = kind_for(template_id, question_count, question_type)?;
    let value = answer_from_hex(answer).map_err(js_error)?;
    Ok(decode_value(&value, kind, &outcomes, &placeholder_or_default(placeholder)))
}

/// Bond required for the next answer, amounts as decimal or hex strings
#[wasm_bindgen(js_name = nextBond)]
pub fn next_bond(current_bond: &str, min_bond: &str) -> Result<String, JsValue> {
    let current = U256::from_str(current_bond).map_err(js_error)?;
    let min = U256::from_str(min_bond).map_err(js_error)?;
    core_next_bond(current, min)
        .map(|bond| bond.to_string())
        .map_err(js_error)
}

/// Remaining time until `target` as text
#[wasm_bindgen(js_name = timeLeft)]
pub fn time_left(target: u64, now: Option<u64>) -> String {
    core_time_left(target, now_or_clock(now))
}

/// Question text for posting a new question to the oracle
#[wasm_bindgen(js_name = encodeQuestionText)]
pub fn encode_question(
    qtype: &str,
    text: &str,
    outcomes: Option<Vec<String>>,
    category: &str,
    lang: Option<String>,
) -> Result<String, JsValue> {
    let qtype = QuestionType::from_str(qtype).map_err(js_error)?;
    encode_question_text(qtype, text, outcomes.as_deref(), category, lang.as_deref())
        .map_err(js_error)
}
