//! Cent rounding and dollar formatting.
//!
//! Every stage of reconciliation rounds its dollar output to the cent so
//! that floating error never compounds across composed stages.

use num_format::{Locale, ToFormattedString};

/// Rounds a dollar amount to the nearest cent, half away from zero.
///
/// Values such as `1412.955` are stored slightly below their decimal
/// spelling; the nudge keeps them on the decimal half-way rule.
///
/// # Examples
///
/// ```
/// use taxrecon_core::round_cents;
///
/// assert_eq!(round_cents(1192.5), 1192.5);
/// assert_eq!(round_cents(10.005), 10.01);
/// assert_eq!(round_cents(-3.14159), -3.14);
/// ```
#[inline]
pub fn round_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    let scaled = amount * 100.0;
    let nudged = scaled + scaled.signum() * 1e-7;
    let rounded = nudged.round() / 100.0;
    // Normalize -0.0 so equal outcomes compare bit-identical.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a dollar amount as whole dollars with thousands separators.
///
/// # Examples
///
/// ```
/// use taxrecon_core::money::format_dollars;
///
/// assert_eq!(format_dollars(15_000.0), "$15,000");
/// assert_eq!(format_dollars(3_299.5), "$3,300");
/// assert_eq!(format_dollars(-1_250.0), "-$1,250");
/// ```
pub fn format_dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_formatted_string(&Locale::en);
    if whole < 0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Formats the magnitude of an amount with cents, e.g. `$3,986.00`.
pub fn format_cents(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_formatted_string(&Locale::en);
    format!("${dollars}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_cents(1412.955), 1412.96);
        assert_eq!(round_cents(-1412.955), -1412.96);
        assert_eq!(round_cents(0.004), 0.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let r = round_cents(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(round_cents(f64::NAN), 0.0);
        assert_eq!(round_cents(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(3_986.0), "$3,986.00");
        assert_eq!(format_cents(-1_029.06), "$1,029.06");
        assert_eq!(format_cents(0.5), "$0.50");
        assert_eq!(format_cents(1_958.33), "$1,958.33");
    }
}
