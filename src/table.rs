// Generic rectangular-table model behind every dataset load.
//
// Spreadsheet sheets and literal fixture tables both normalize into a
// `RawTable`, so column selection, fuzzy lookup, and row filtering are
// implemented once.
use std::fmt;

use log::warn;

use crate::error::{ReportError, Result};
use crate::util::parse_f64_safe;

/// A single table cell after normalization.
///
/// Anything that is neither text nor a number degrades to `Empty`; the
/// aggregators treat `Empty` as an undefined value, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell. Text that parses cleanly as a number counts;
    /// spreadsheet exports frequently store figures as text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_f64_safe(s),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Empty => Ok(()),
        }
    }
}

/// A rectangular table: trimmed header names plus rows of cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table from raw rows, taking `rows[header_row]` as the header
    /// and everything after it as data. Header whitespace is stripped.
    ///
    /// The dashboard's spreadsheets carry a one-row offset title, so their
    /// header row index is 1.
    pub fn from_rows(mut raw: Vec<Vec<Cell>>, header_row: usize) -> Result<Self> {
        if raw.len() <= header_row {
            return Err(ReportError::SchemaMismatch(format!(
                "table has {} rows, header expected at index {header_row}",
                raw.len()
            )));
        }
        let rows = raw.split_off(header_row + 1);
        let headers = raw
            .pop()
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.to_string().trim().to_string())
            .collect();
        Ok(RawTable { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column whose name matches exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the first column whose name contains `needle`,
    /// case-insensitively. Used for sources whose exact headers drift between
    /// exports (e.g. any column mentioning "Prior Year").
    pub fn find_column(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_uppercase();
        self.headers
            .iter()
            .position(|h| h.to_uppercase().contains(&needle))
    }

    /// Select the expected columns by name, or fall back to the first N
    /// columns positionally when the names do not all match.
    ///
    /// The positional fallback is a deliberate tolerance for inconsistent
    /// spreadsheet exports. It is never silent: the rename is logged and the
    /// returned flag lets callers surface a schema warning. Fails only when
    /// the table is too narrow to recover.
    pub fn select(&self, expected: &[&str]) -> Result<(RawTable, bool)> {
        let exact: Option<Vec<usize>> = expected
            .iter()
            .map(|name| self.column_index(name))
            .collect();
        if let Some(indices) = exact {
            let rows = self
                .rows
                .iter()
                .map(|row| {
                    indices
                        .iter()
                        .map(|&i| row.get(i).cloned().unwrap_or(Cell::Empty))
                        .collect()
                })
                .collect();
            return Ok((
                RawTable {
                    headers: expected.iter().map(|s| s.to_string()).collect(),
                    rows,
                },
                false,
            ));
        }

        if self.headers.len() < expected.len() {
            return Err(ReportError::SchemaMismatch(format!(
                "expected {} columns ({}), found {}",
                expected.len(),
                expected.join(", "),
                self.headers.len()
            )));
        }
        warn!(
            "expected columns not found; mapping first {} columns positionally ({} -> {})",
            expected.len(),
            self.headers[..expected.len()].join(", "),
            expected.join(", ")
        );
        let rows = self
            .rows
            .iter()
            .map(|row| {
                (0..expected.len())
                    .map(|i| row.get(i).cloned().unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();
        Ok((
            RawTable {
                headers: expected.iter().map(|s| s.to_string()).collect(),
                rows,
            },
            true,
        ))
    }

    /// Drop rows whose cell in `col` is not text. This removes the blank,
    /// subtotal, and footer rows that spreadsheet exports append below the
    /// product list.
    pub fn retain_text_rows(&mut self, col: &str) {
        if let Some(idx) = self.column_index(col) {
            self.rows
                .retain(|row| matches!(row.get(idx), Some(Cell::Text(_))));
        }
    }

    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_text()
    }

    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row)?.get(col)?.as_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn sample() -> RawTable {
        RawTable::from_rows(
            vec![
                vec![t("Campaign Report")],
                vec![t(" Product Description "), t("Qty Prior"), t("Qty Campaign")],
                vec![t("SIMBA CHIPS 120G"), n(100.0), n(150.0)],
                vec![Cell::Empty, n(1.0), n(2.0)],
                vec![t("Grand Total"), n(101.0), n(152.0)],
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn headers_are_trimmed() {
        let table = sample();
        assert_eq!(
            table.headers(),
            &["Product Description", "Qty Prior", "Qty Campaign"]
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn select_by_exact_name() {
        let table = sample();
        let (selected, fallback) = table
            .select(&["Product Description", "Qty Campaign"])
            .unwrap();
        assert!(!fallback);
        assert_eq!(selected.number(0, 1), Some(150.0));
    }

    #[test]
    fn select_falls_back_positionally() {
        let table = sample();
        let (selected, fallback) = table.select(&["Name", "Before", "During"]).unwrap();
        assert!(fallback);
        assert_eq!(selected.headers(), &["Name", "Before", "During"]);
        assert_eq!(selected.text(0, 0), Some("SIMBA CHIPS 120G"));
    }

    #[test]
    fn select_fails_when_too_narrow() {
        let table = sample();
        let err = table.select(&["A", "B", "C", "D"]).unwrap_err();
        assert!(matches!(err, ReportError::SchemaMismatch(_)));
    }

    #[test]
    fn retain_text_rows_drops_non_text() {
        let mut table = sample();
        table.rows.push(vec![n(7.0), n(1.0), n(1.0)]);
        table.retain_text_rows("Product Description");
        // numeric and empty name cells are gone, text footers survive
        assert_eq!(table.len(), 2);
        assert_eq!(table.text(1, 0), Some("Grand Total"));
    }

    #[test]
    fn fuzzy_column_lookup() {
        let table = RawTable::from_rows(
            vec![
                vec![t("Product Description"), t("QTY Sold Prior Year AVE"), t("14 Feb - 14 May")],
                vec![t("X"), n(1.0), n(2.0)],
            ],
            0,
        )
        .unwrap();
        assert_eq!(table.find_column("prior year"), Some(1));
        assert_eq!(table.find_column("Feb"), Some(2));
        assert_eq!(table.find_column("CAMPAIGN"), None);
    }

    #[test]
    fn numeric_text_coerces() {
        assert_eq!(t("1,234").as_number(), Some(1234.0));
        assert_eq!(t("total").as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }
}
