// Number humanization for chart labels, findings text, and console output.
//
// Percentage values flow through the pipeline as fractions (0.05 = 5%) and
// only become percent strings here, at presentation time.
use num_format::{Locale, ToFormattedString};

/// Compact magnitude-scaled rendering used on chart value labels:
/// `1_234_567` -> `"1.2M"`, `45_300` -> `"45K"`, `999` -> `"999"`.
///
/// Rounding at the K threshold follows the half-to-even rule of `{:.0}`,
/// so `999_999` renders as `"1000K"` rather than promoting to `M`.
pub fn human_format(n: f64) -> String {
    if n.is_nan() {
        return String::new();
    }
    let abs = n.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}K", n / 1_000.0)
    } else {
        format!("{}", n.trunc() as i64)
    }
}

/// `human_format` over an optional value; undefined renders as blank.
pub fn human_format_opt(n: Option<f64>) -> String {
    n.map(human_format).unwrap_or_default()
}

/// Currency variant of [`human_format`]: identical thresholds, prefixed with
/// the configured symbol, and sub-thousand amounts rendered with no decimals.
pub fn human_currency(n: f64, symbol: &str) -> String {
    if n.is_nan() {
        return String::new();
    }
    let abs = n.abs();
    if abs >= 1_000_000.0 {
        format!("{symbol}{:.1}M", n / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{symbol}{:.0}K", n / 1_000.0)
    } else {
        format!("{symbol}{n:.0}")
    }
}

/// Render a fraction as a percentage with a fixed number of decimals:
/// `format_pct(0.125, 2)` -> `"12.50%"`.
pub fn format_pct(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Optional-fraction variant; undefined values render as blank.
pub fn format_pct_opt(fraction: Option<f64>, decimals: usize) -> String {
    fraction.map(|f| format_pct(f, decimals)).unwrap_or_default()
}

/// Signed percentage used for share-change labels: `"+5%"`, `"-3%"`.
pub fn format_pct_signed(fraction: f64, decimals: usize) -> String {
    format!("{:+.*}%", decimals, fraction * 100.0)
}

/// Format a floating-point value with a fixed number of decimal places and
/// locale-aware thousands separators (e.g., `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Thin wrapper around `num-format` for integer-like values. Used for row
/// counts in console messages (e.g., `1,234 rows loaded`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn magnitude_thresholds() {
        assert_eq!(human_format(999.0), "999");
        assert_eq!(human_format(1_000.0), "1K");
        assert_eq!(human_format(45_300.0), "45K");
        assert_eq!(human_format(999_999.0), "1000K");
        assert_eq!(human_format(1_000_000.0), "1.0M");
        assert_eq!(human_format(2_512_772.12), "2.5M");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(human_format(-1_500.0), "-2K");
        assert_eq!(human_format(-2_400_000.0), "-2.4M");
        assert_eq!(human_format(-12.7), "-12");
    }

    #[test]
    fn undefined_renders_blank() {
        assert_eq!(human_format(f64::NAN), "");
        assert_eq!(human_format_opt(None), "");
    }

    #[test]
    fn currency_prefixes_symbol() {
        assert_eq!(human_currency(2_146_039.02, "R"), "R2.1M");
        assert_eq!(human_currency(40_101.0, "R"), "R40K");
        assert_eq!(human_currency(842.4, "R"), "R842");
    }

    #[test]
    fn percent_from_fraction() {
        assert_eq!(format_pct(0.125, 2), "12.50%");
        assert_eq!(format_pct(0.0, 2), "0.00%");
        assert_eq!(format_pct_signed(0.05, 0), "+5%");
        assert_eq!(format_pct_signed(-0.03, 0), "-3%");
        assert_eq!(format_pct_opt(None, 2), "");
    }

    #[test]
    fn thousands_separated_numbers() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-42.0, 2), "-42.00");
        assert_eq!(format_int(9855_i64), "9,855");
    }
}
