//! # Utility Functions
//!
//! Bond arithmetic, fixed-point conversion and time formatting helpers.

use crate::{error::Result, MarketError};
use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, TimeDelta};

/// Decimals used by the oracle for uint answers and by outcome tokens
pub const DEFAULT_DECIMALS: u8 = 18;

/// Bond required to post the next answer to a question.
///
/// The first answer needs the question's minimum bond. Every later answer
/// must at least double the current one.
pub fn next_bond(current_bond: U256, min_bond: U256) -> Result<U256> {
    if current_bond.is_zero() {
        return Ok(min_bond);
    }
    current_bond
        .checked_mul(U256::from(2u64))
        .ok_or(MarketError::BondOverflow(current_bond))
}

/// Render a base-unit amount as a fixed-point decimal string.
///
/// Trailing zeros of the fraction are dropped, so `1.5e18` with 18 decimals
/// renders as `"1.5"` and `2e18` as `"2"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let integer = value / scale;
    let fraction = value % scale;
    if fraction.is_zero() {
        return integer.to_string();
    }
    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

/// Parse a decimal string into base units with the given number of decimals.
pub fn parse_units(text: &str, decimals: u8) -> Result<U256> {
    let text = text.trim();
    let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));

    if integer.is_empty() && fraction.is_empty() {
        return Err(MarketError::InvalidAnswer(format!(
            "Invalid number: {text:?}"
        )));
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(MarketError::InvalidAnswer(format!(
            "Invalid number: {text:?}"
        )));
    }
    if fraction.len() > decimals as usize {
        return Err(MarketError::InvalidAnswer(format!(
            "Too many decimals in {text:?}: at most {decimals} allowed"
        )));
    }

    let digits = format!("{integer}{fraction:0<width$}", width = decimals as usize);
    U256::from_str_radix(&digits, 10)
        .map_err(|e| MarketError::InvalidAnswer(format!("Invalid number {text:?}: {e}")))
}

/// Human-readable time remaining until `target`, in the coarsest unit.
///
/// A target in the past renders as zero minutes.
pub fn time_left(target: u64, now: u64) -> String {
    let seconds = i64::try_from(target.saturating_sub(now)).unwrap_or(i64::MAX);
    let remaining = TimeDelta::try_seconds(seconds).unwrap_or(TimeDelta::MAX);

    if remaining.num_days() > 0 {
        pluralize(remaining.num_days(), "day")
    } else if remaining.num_hours() > 0 {
        pluralize(remaining.num_hours(), "hour")
    } else {
        pluralize(remaining.num_minutes(), "minute")
    }
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Format timestamp as human-readable string.
///
/// Timestamps chrono cannot represent render as `out of range (<ts>)`.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("out of range ({timestamp})"))
}

/// Link to a question on the Reality.eth dapp
pub fn reality_link(chain_id: u64, reality: &Address, question_id: &B256) -> String {
    format!("https://reality.eth.limo/app/#!/network/{chain_id}/question/{reality}-{question_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHER: u64 = 1_000_000_000_000_000_000;

    #[test]
    fn test_next_bond_doubling() {
        let min = U256::from(1_000u64);
        assert_eq!(next_bond(U256::ZERO, min).unwrap(), min);
        assert_eq!(next_bond(min, min).unwrap(), U256::from(2_000u64));
        assert_eq!(next_bond(U256::from(2_000u64), min).unwrap(), U256::from(4_000u64));
    }

    #[test]
    fn test_next_bond_ignores_min_after_first_answer() {
        let bond = next_bond(U256::from(5u64), U256::from(1_000u64)).unwrap();
        assert_eq!(bond, U256::from(10u64));
    }

    #[test]
    fn test_next_bond_overflow() {
        let result = next_bond(U256::MAX, U256::from(1u64));
        assert!(matches!(result, Err(MarketError::BondOverflow(_))));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(2 * ETHER), 18), "2");
        assert_eq!(format_units(U256::from(ETHER + ETHER / 2), 18), "1.5");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(1234u64), 2), "12.34");
        assert_eq!(format_units(U256::from(7u64), 0), "7");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 18).unwrap(), U256::from(ETHER + ETHER / 2));
        assert_eq!(parse_units("2", 18).unwrap(), U256::from(2 * ETHER));
        assert_eq!(parse_units(".25", 2).unwrap(), U256::from(25u64));
        assert_eq!(parse_units("3.", 2).unwrap(), U256::from(300u64));
        assert!(parse_units("", 18).is_err());
        assert!(parse_units(".", 18).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1.234", 2).is_err());
        assert!(parse_units("1e18", 18).is_err());
    }

    #[test]
    fn test_parse_format_units_inverse() {
        for text in ["0.1", "42", "123456789.000000000000000001"] {
            let value = parse_units(text, 18).unwrap();
            assert_eq!(format_units(value, 18), text);
        }
    }

    #[test]
    fn test_time_left_units() {
        let now = 1_700_000_000;
        assert_eq!(time_left(now + 3 * 86_400 + 5, now), "3 days");
        assert_eq!(time_left(now + 86_400, now), "1 day");
        assert_eq!(time_left(now + 5 * 3_600 + 59, now), "5 hours");
        assert_eq!(time_left(now + 3_600, now), "1 hour");
        assert_eq!(time_left(now + 61, now), "1 minute");
        assert_eq!(time_left(now + 30, now), "0 minutes");
    }

    #[test]
    fn test_time_left_clamps_past_targets() {
        assert_eq!(time_left(100, 200), "0 minutes");
        assert_eq!(time_left(200, 200), "0 minutes");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1735689600), "2025-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(u64::MAX), format!("out of range ({})", u64::MAX));
        // fits in i64 but is past chrono's last representable date
        let far = i64::MAX as u64;
        assert_eq!(format_timestamp(far), format!("out of range ({far})"));
    }

    #[test]
    fn test_reality_link() {
        let link = reality_link(100, &Address::ZERO, &B256::ZERO);
        assert_eq!(
            link,
            format!(
                "https://reality.eth.limo/app/#!/network/100/question/{}-0x{}",
                Address::ZERO,
                "0".repeat(64)
            )
        );
    }
}
