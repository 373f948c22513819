//! Money display helpers.

use crate::core::services::{ServiceError, ServiceResult};
use crate::settlement::round_cents;

/// Formats a currency amount with the configured symbol, sign first:
/// `R12.34`, `-R5.00`.
pub fn money(symbol: &str, value: f64) -> String {
    let value = round_cents(value);
    if value < 0.0 {
        format!("-{}{:.2}", symbol, -value)
    } else {
        format!("{}{:.2}", symbol, value)
    }
}

/// Parses a user-supplied amount, accepting an optional leading symbol.
pub fn parse_amount(input: &str) -> ServiceResult<f64> {
    let trimmed = input.trim().trim_start_matches(|c: char| c.is_alphabetic());
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ServiceError::Invalid(format!("`{}` is not a valid amount", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sign_before_symbol() {
        assert_eq!(money("R", 12.345), "R12.35");
        assert_eq!(money("R", -5.0), "-R5.00");
        assert_eq!(money("$", 0.0), "$0.00");
    }

    #[test]
    fn parses_plain_and_prefixed_amounts() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("R12.5").unwrap(), 12.5);
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("NaN").is_err());
    }
}
