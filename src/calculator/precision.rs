//! Significant-figure formatting for calculator output.

/// Formats `value` with `digits` significant figures.
///
/// Uses fixed notation when the decimal exponent lies in `-6..digits`, and
/// `d.ddde±x` notation otherwise (`1.5e-10`, `1.2e+3`).
#[must_use]
pub fn to_precision(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);

    let scientific = format!("{value:.prec$e}", prec = digits - 1);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return scientific;
    };
    let limit = i64::try_from(digits).unwrap_or(i64::MAX);

    if exponent < -6 || exponent >= limit {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{}", exponent.unsigned_abs())
    } else {
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        format!("{value:.decimals$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_use_exponent() {
        assert_eq!(to_precision(1.5176e-10, 2), "1.5e-10");
        assert_eq!(to_precision(1e-7, 2), "1.0e-7");
    }

    #[test]
    fn large_values_use_exponent() {
        assert_eq!(to_precision(1234.0, 2), "1.2e+3");
    }

    #[test]
    fn fixed_notation_in_range() {
        assert_eq!(to_precision(0.5, 2), "0.50");
        assert_eq!(to_precision(12.0, 2), "12");
        assert_eq!(to_precision(0.000_123, 2), "0.00012");
        assert_eq!(to_precision(-0.5, 2), "-0.50");
    }

    #[test]
    fn rounding_can_carry_into_next_exponent() {
        assert_eq!(to_precision(9.96, 2), "10");
        assert_eq!(to_precision(99.6, 2), "1.0e+2");
    }

    #[test]
    fn zero() {
        assert_eq!(to_precision(0.0, 2), "0.0");
    }

    #[test]
    fn non_finite_passes_through() {
        assert_eq!(to_precision(f64::NAN, 2), "NaN");
        assert_eq!(to_precision(f64::INFINITY, 2), "inf");
    }
}
