//! Interactive answer selection.

use anyhow::Result;
use inquire::{MultiSelect, Select, Text};
use seer_core::{parse_selection, AnswerKind, OutcomePick, Selection, Sentinel};
use std::fmt;

/// Entry in the outcome picker
#[derive(Clone)]
struct Choice {
    label: String,
    pick: OutcomePick,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn choices(outcomes: &[String]) -> Vec<Choice> {
    let mut choices: Vec<Choice> = outcomes
        .iter()
        .enumerate()
        .map(|(i, label)| Choice {
            label: label.clone(),
            pick: OutcomePick::Outcome(i),
        })
        .collect();
    for sentinel in [Sentinel::InvalidResult, Sentinel::AnsweredTooSoon] {
        choices.push(Choice {
            label: sentinel.label().to_string(),
            pick: OutcomePick::Sentinel(sentinel),
        });
    }
    choices
}

/// Ask the user for an answer suited to `kind`
pub fn prompt_selection(kind: AnswerKind, outcomes: &[String]) -> Result<Selection> {
    match kind {
        AnswerKind::MultiSelect => {
            let picked = MultiSelect::new("Select the correct outcomes:", choices(outcomes)).prompt()?;
            Ok(Selection::Outcomes(picked.into_iter().map(|c| c.pick).collect()))
        }
        kind if kind.is_scalar() => {
            let input = Text::new("Answer value:")
                .with_help_message("decimal number, or `invalid` / `too-soon`")
                .prompt()?;
            Ok(parse_selection(&input, kind)?)
        }
        _ => {
            let picked = Select::new("Select the correct outcome:", choices(outcomes)).prompt()?;
            Ok(match picked.pick {
                OutcomePick::Outcome(index) => Selection::index(index),
                OutcomePick::Sentinel(sentinel) => Selection::Sentinel(sentinel),
            })
        }
    }
}
