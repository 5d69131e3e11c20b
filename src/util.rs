// Small numeric helpers shared by the loader and the aggregators.
//
// Parsing lives here so the rest of the code can assume clean, typed values
// even when a spreadsheet export stores numbers as text.

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports (commas, spaces,
/// stray text).
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

/// Arithmetic mean; returns 0 for an empty slice to avoid NaNs.
pub fn average(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Mean over the defined entries only. `None` when every entry is undefined,
/// so a column of blanks stays blank instead of becoming 0%.
pub fn mean_defined(v: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = v.iter().copied().flatten().collect();
    if defined.is_empty() {
        None
    } else {
        Some(average(&defined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separated_numbers() {
        assert_eq!(parse_f64_safe("1,234.5"), Some(1234.5));
        assert_eq!(parse_f64_safe("  42 "), Some(42.0));
        assert_eq!(parse_f64_safe("n/a"), None);
        assert_eq!(parse_f64_safe(""), None);
    }

    #[test]
    fn mean_ignores_undefined() {
        assert_eq!(mean_defined(&[Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean_defined(&[None, None]), None);
    }
}
