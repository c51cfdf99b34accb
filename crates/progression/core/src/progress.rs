//! Number parsing and progress rendering for threshold requirements.
//!
//! Two policies coexist. Integral units (island level, power level) are parsed
//! as integers and rendered without a decimal point. Fractional units (faction
//! power, balances) render the current value with at most two decimals and
//! trailing zeros trimmed, and the threshold as a floating-point literal that
//! always carries a decimal point.

use crate::error::ConfigError;

/// Unit policy of a numeric requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericUnit {
    Integral,
    Fractional,
}

impl NumericUnit {
    /// Parses a configured threshold token under this unit's rules.
    ///
    /// Integral units reject anything `i64` cannot parse (including `"5.0"`);
    /// fractional units reject non-finite values. Sign is not checked here.
    pub fn parse(self, raw: &str) -> Result<f64, ConfigError> {
        let invalid = || ConfigError::InvalidNumber {
            value: raw.to_string(),
        };

        match self {
            Self::Integral => raw.parse::<i64>().map(|v| v as f64).map_err(|_| invalid()),
            Self::Fractional => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid),
        }
    }

    /// Renders a fetched fact.
    pub fn render_value(self, value: f64) -> String {
        match self {
            Self::Integral => format!("{}", value.trunc() as i64),
            Self::Fractional => format_fractional(value),
        }
    }

    /// Renders a configured threshold.
    pub fn render_threshold(self, threshold: f64) -> String {
        match self {
            Self::Integral => format!("{}", threshold.trunc() as i64),
            Self::Fractional => format_threshold(threshold),
        }
    }
}

/// Formats `value` with at most two decimals, trailing zeros trimmed.
///
/// `7.333333` renders as `7.33`, `7.5` as `7.5` and `7.0` as `7`.
pub fn format_fractional(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a threshold so it always reads as a floating-point literal.
///
/// `10` renders as `10.0`, `2.5` as `2.5`.
pub fn format_threshold(value: f64) -> String {
    let rendered = value.to_string();
    if !value.is_finite() || rendered.contains('.') {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_values_round_to_two_decimals() {
        assert_eq!(format_fractional(7.333333), "7.33");
        assert_eq!(format_fractional(7.336), "7.34");
        assert_eq!(format_fractional(7.5), "7.5");
        assert_eq!(format_fractional(7.0), "7");
        assert_eq!(format_fractional(0.0), "0");
        assert_eq!(format_fractional(100.0), "100");
        assert_eq!(format_fractional(-0.001), "0");
        assert_eq!(format_fractional(-3.25), "-3.25");
    }

    #[test]
    fn thresholds_always_carry_a_decimal_point() {
        assert_eq!(format_threshold(10.0), "10.0");
        assert_eq!(format_threshold(2.5), "2.5");
        assert_eq!(format_threshold(0.0), "0.0");
    }

    #[test]
    fn integral_units_reject_decimal_tokens() {
        assert_eq!(NumericUnit::Integral.parse("5"), Ok(5.0));
        assert!(NumericUnit::Integral.parse("5.0").is_err());
        assert!(NumericUnit::Integral.parse("abc").is_err());
    }

    #[test]
    fn fractional_units_reject_non_finite_tokens() {
        assert_eq!(NumericUnit::Fractional.parse("10"), Ok(10.0));
        assert_eq!(NumericUnit::Fractional.parse("2.25"), Ok(2.25));
        assert!(NumericUnit::Fractional.parse("NaN").is_err());
        assert!(NumericUnit::Fractional.parse("inf").is_err());
    }

    #[test]
    fn integral_rendering_has_no_decimal_point() {
        assert_eq!(NumericUnit::Integral.render_value(5.0), "5");
        assert_eq!(NumericUnit::Integral.render_threshold(5.0), "5");
    }
}
