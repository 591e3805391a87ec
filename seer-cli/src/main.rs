//! # Seer CLI
//!
//! Command-line interface for inspecting and answering Reality.eth-resolved
//! prediction markets from already-fetched market data.

mod config;
mod prompt;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use config::Config;
use seer_core::{
    answer_from_hex, classify_question, decode_value, encode_answer, encode_question_text,
    parse_selection, utils::*, Market, MarketStatus, QuestionSummary, QuestionType, B256, U256,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "seer")]
#[command(about = "Answer codec and lifecycle tools for Reality.eth prediction markets")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./seer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the lifecycle status of a market
    Status {
        /// Market JSON file
        #[arg(short, long)]
        market: PathBuf,
        /// Current time (Unix timestamp, defaults to the system clock)
        #[arg(long)]
        now: Option<u64>,
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a 32-byte answer into outcome text
    Decode {
        /// Reality.eth template id
        #[arg(short, long)]
        template: u64,
        /// Answer value (0x-prefixed hex)
        #[arg(short, long, value_parser = parse_answer)]
        answer: B256,
        /// Outcome labels in answer order
        #[arg(short, long, value_delimiter = ',')]
        outcomes: Vec<String>,
        /// Number of questions in the market
        #[arg(short, long, default_value = "1")]
        questions: usize,
        /// Question type the template is expected to have
        #[arg(short = 'y', long = "type")]
        qtype: Option<QuestionType>,
    },
    /// Encode an answer into the 32-byte oracle format
    Encode {
        /// Reality.eth template id
        #[arg(short, long)]
        template: u64,
        /// Index, comma-separated indices, decimal value, `invalid` or `too-soon`
        #[arg(short, long)]
        answer: String,
        /// Number of questions in the market
        #[arg(short, long, default_value = "1")]
        questions: usize,
        /// Question type the template is expected to have
        #[arg(short = 'y', long = "type")]
        qtype: Option<QuestionType>,
    },
    /// Prepare an answer for one of a market's questions
    Answer {
        /// Market JSON file
        #[arg(short, long)]
        market: PathBuf,
        /// Question position in the market
        #[arg(short, long, default_value = "0")]
        question: usize,
        /// Answer text; prompts interactively when omitted
        #[arg(short, long)]
        answer: Option<String>,
        /// Current time (Unix timestamp, defaults to the system clock)
        #[arg(long)]
        now: Option<u64>,
    },
    /// Compute the bond required for the next answer
    Bond {
        /// Current bond in base units (decimal or 0x hex)
        #[arg(short, long, value_parser = parse_amount)]
        current: U256,
        /// Minimum bond in base units (decimal or 0x hex)
        #[arg(short, long, value_parser = parse_amount)]
        min: U256,
    },
    /// Build the question text posted to the oracle
    QuestionText {
        /// Question type: bool, single-select, multiple-select, uint, datetime
        #[arg(short = 'y', long = "type")]
        qtype: QuestionType,
        /// Question wording
        #[arg(short, long)]
        text: String,
        /// Outcome label, repeat for each outcome
        #[arg(short, long)]
        outcome: Vec<String>,
        /// Category tag
        #[arg(short, long)]
        category: String,
        /// Language tag (defaults to the configured language)
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Show the time left until a timestamp
    TimeLeft {
        /// Target time (Unix timestamp)
        #[arg(short, long)]
        target: u64,
        /// Current time (Unix timestamp, defaults to the system clock)
        #[arg(long)]
        now: Option<u64>,
    },
}

/// Machine-readable market status
#[derive(Serialize)]
struct StatusReport {
    status: MarketStatus,
    label: &'static str,
    market_type: String,
    answer: Option<String>,
    questions: Vec<QuestionSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    config.logging.init();

    match cli.command {
        Commands::Status { market, now, json } => {
            let market = load_market(&market)?;
            let now = resolve_now(now);
            let status = market.status(now);
            let placeholder = &config.display.no_answer_text;
            info!(market = %market.id, ?status, now, "derived market status");

            let answer = matches!(status, MarketStatus::PendingExecution | MarketStatus::Closed)
                .then(|| market.answer_text(placeholder))
                .transpose()?;
            let report = StatusReport {
                status,
                label: status.label(),
                market_type: market.market_type()?.to_string(),
                answer,
                questions: market.question_summaries(now, placeholder)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_status(&market, &report, &config);
            }
        }

        Commands::Decode {
            template,
            answer,
            outcomes,
            questions,
            qtype,
        } => {
            let kind = classify_question(template, questions, qtype)?;
            let text = decode_value(&answer, kind, &outcomes, &config.display.no_answer_text);
            println!("{}: {}", "Answer".green().bold(), text);
        }

        Commands::Encode {
            template,
            answer,
            questions,
            qtype,
        } => {
            let kind = classify_question(template, questions, qtype)?;
            let selection = parse_selection(&answer, kind)?;
            debug!(?kind, ?selection, "encoding answer");
            let encoded = encode_answer(&selection, kind)?;
            println!("{}: {}", "Encoded Answer".green().bold(), encoded);
        }

        Commands::Answer {
            market,
            question,
            answer,
            now,
        } => {
            let market = load_market(&market)?;
            let now = resolve_now(now);
            answer_question(&market, question, answer.as_deref(), now, &config)?;
        }

        Commands::Bond { current, min } => {
            let bond = next_bond(current, min)?;
            println!(
                "{}: {} ({} base units)",
                "Next Bond".green().bold(),
                format_units(bond, config.display.decimals).cyan(),
                bond
            );
        }

        Commands::QuestionText {
            qtype,
            text,
            outcome,
            category,
            lang,
        } => {
            let outcomes = (!outcome.is_empty()).then_some(outcome.as_slice());
            let language = lang.as_deref().unwrap_or(&config.display.language);
            let encoded = encode_question_text(qtype, &text, outcomes, &category, Some(language))?;
            println!("{encoded}");
        }

        Commands::TimeLeft { target, now } => {
            let now = resolve_now(now);
            println!("{}: {}", "Time Left".green().bold(), time_left(target, now).cyan());
        }
    }

    Ok(())
}

fn answer_question(
    market: &Market,
    index: usize,
    answer: Option<&str>,
    now: u64,
    config: &Config,
) -> Result<()> {
    let question = market
        .questions
        .get(index)
        .with_context(|| format!("market has no question #{index}"))?;

    let status = market.status(now);
    if status == MarketStatus::NotOpen {
        bail!(
            "market opens at {}",
            format_timestamp(market.opening_time)
        );
    }
    if !question.is_open(now) {
        bail!(
            "question #{index} opens at {}",
            format_timestamp(question.opening_ts)
        );
    }
    if question.is_finalized(now) {
        bail!("question #{index} is already final");
    }

    let kind = market.answer_kind()?;
    let selection = match answer {
        Some(answer) => parse_selection(answer, kind)?,
        None => prompt::prompt_selection(kind, &market.outcomes)?,
    };
    let encoded = encode_answer(&selection, kind)?;
    let bond = question.next_bond()?;
    let decoded = decode_value(&encoded, kind, &market.outcomes, &config.display.no_answer_text);
    info!(question = %question.id, answer = %encoded, "prepared answer");

    println!("{}", "Answer Ready".green().bold());
    println!("{}", "═".repeat(50).bright_black());
    println!("{}: {}", "Question ID".yellow().bold(), question.id);
    println!("{}: {}", "Answer".yellow().bold(), decoded);
    println!("{}: {}", "Encoded Answer".cyan().bold(), encoded);
    println!(
        "{}: {} ({} base units)",
        "Required Bond".yellow().bold(),
        format_units(bond, config.display.decimals),
        bond
    );
    if let Some(deadline) = question.challenge_deadline(now) {
        println!(
            "{}: {} ({})",
            "Final If Unchallenged".yellow().bold(),
            format_timestamp(deadline),
            time_left(deadline, now)
        );
    }
    if question.is_answered() {
        println!(
            "{}: {}",
            "Current Answer".yellow().bold(),
            question.answer_text(kind, &market.outcomes, &config.display.no_answer_text)
        );
        println!(
            "{}: {}",
            "Correctable For".yellow().bold(),
            time_left(question.finalize_ts, now)
        );
    }
    println!("{}", "═".repeat(50).bright_black());

    Ok(())
}

fn print_status(market: &Market, report: &StatusReport, config: &Config) {
    println!("{}", market.market_name.green().bold());
    println!("{}", "═".repeat(50).bright_black());
    println!("{}: {}", "Status".yellow().bold(), report.label);
    println!("{}: {}", "Market Type".yellow().bold(), report.market_type);
    if market.index > 0 {
        println!("{}: #{}", "Index".yellow().bold(), market.index);
    }
    println!(
        "{}: {}",
        "Open Interest".yellow().bold(),
        format_units(market.outcomes_supply, config.display.decimals)
    );

    match report.status {
        MarketStatus::NotOpen => {
            println!(
                "{}: {}",
                "Opening At".yellow().bold(),
                format_timestamp(market.opening_time)
            );
        }
        MarketStatus::Open => {
            println!("{}", "Answer on Reality.eth!".bright_blue());
        }
        MarketStatus::AnswerNotFinal => {
            for (i, row) in report.questions.iter().enumerate() {
                print_question_row(i, row);
            }
        }
        MarketStatus::PendingExecution | MarketStatus::Closed => {
            if let Some(answer) = &report.answer {
                println!("{}: {}", "Answer".cyan().bold(), answer);
            }
            if report.status == MarketStatus::PendingExecution {
                println!("{}", "Payout can now be reported.".bright_blue());
            } else if let Some(reality) = &config.reality {
                println!(
                    "{}: {}",
                    "Check it on Reality.eth".yellow().bold(),
                    reality_link(reality.chain_id, &reality.address, &market.question_id)
                );
            }
        }
    }
    println!("{}", "═".repeat(50).bright_black());
}

fn print_question_row(i: usize, row: &QuestionSummary) {
    let marker = if row.finalized { "✔".green() } else { "⧗".yellow() };
    let mut line = format!("{marker} #{i}");
    if let Some(label) = &row.label {
        line.push_str(&format!(" {label} |"));
    }
    if let Some(answer) = &row.answer {
        line.push_str(&format!(" Answer: {answer}"));
    }
    match (&row.answer, &row.time_left) {
        (None, _) if row.can_answer => line.push_str(" (not answered, answer on Reality.eth)"),
        (Some(_), Some(left)) => {
            line.push_str(&format!(" | correctable within {left}"));
        }
        _ => {}
    }
    println!("{line}");
}

fn load_market(path: &Path) -> Result<Market> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read market file {}", path.display()))?;
    let market = Market::from_json(&json)
        .with_context(|| format!("invalid market file {}", path.display()))?;
    debug!(market = %market.id, questions = market.questions.len(), "loaded market");
    Ok(market)
}

fn resolve_now(now: Option<u64>) -> u64 {
    now.unwrap_or_else(|| u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default())
}

fn parse_answer(value: &str) -> std::result::Result<B256, String> {
    answer_from_hex(value).map_err(|e| e.to_string())
}

fn parse_amount(value: &str) -> std::result::Result<U256, String> {
    U256::from_str(value.trim()).map_err(|e| format!("invalid amount {value:?}: {e}"))
}
