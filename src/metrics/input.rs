//! Lenient numeric input parsing
//!
//! Form inputs are read the way a browser's `parseFloat` reads them: leading
//! whitespace is skipped and the longest numeric prefix wins. Anything that
//! yields no number, or a non-finite one, is stored as 0.

/// Parse raw text into a metric value, coercing failures to 0.
pub fn parse_metric_input(raw: &str) -> f64 {
    let s = raw.trim_start();
    let end = numeric_prefix_len(s.as_bytes());
    if end == 0 {
        return 0.0;
    }

    match s[..end].parse::<f64>() {
        // -0 collapses to 0
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Length of the longest prefix of `b` forming a decimal float literal.
fn numeric_prefix_len(b: &[u8]) -> usize {
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_metric_input("45.2"), 45.2);
        assert_eq!(parse_metric_input("0.3"), 0.3);
        assert_eq!(parse_metric_input("  68"), 68.0);
        assert_eq!(parse_metric_input(".5"), 0.5);
        assert_eq!(parse_metric_input("-3"), -3.0);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(parse_metric_input(""), 0.0);
        assert_eq!(parse_metric_input("   "), 0.0);
        assert_eq!(parse_metric_input("abc"), 0.0);
        assert_eq!(parse_metric_input("."), 0.0);
        assert_eq!(parse_metric_input("-"), 0.0);
    }

    #[test]
    fn test_numeric_prefix_wins() {
        assert_eq!(parse_metric_input("12ms"), 12.0);
        assert_eq!(parse_metric_input("4.5.6"), 4.5);
        assert_eq!(parse_metric_input("1e3x"), 1000.0);
        assert_eq!(parse_metric_input("7e"), 7.0);
        assert_eq!(parse_metric_input("7e+"), 7.0);
    }

    #[test]
    fn test_non_finite_and_negative_zero() {
        assert_eq!(parse_metric_input("1e400"), 0.0);
        assert_eq!(parse_metric_input("inf"), 0.0);
        assert_eq!(parse_metric_input("NaN"), 0.0);
        let z = parse_metric_input("-0");
        assert_eq!(z, 0.0);
        assert!(z.is_sign_positive());
    }
}
