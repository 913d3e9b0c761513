//! Decoded 2DA table

use crate::preamble::Version;
use serde::Serialize;
use std::collections::HashMap;

/// The cells of one row, in column order
pub type Row = Vec<String>;

/// Cell text that marks a deliberately empty cell
pub const EMPTY_CELL: &str = "****";

/// A fully decoded 2DA table
///
/// Built by a single decode pass and never modified afterwards, so a loaded
/// table can be shared freely between threads. See the accessor methods for
/// how missing and empty cells resolve.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub(crate) version: Version,
    pub(crate) headers: Vec<String>,
    /// `None` marks a row slot that was never filled
    pub(crate) rows: Vec<Option<Row>>,
    #[serde(skip)]
    pub(crate) header_index: HashMap<String, usize>,
    pub(crate) default_string: String,
    pub(crate) default_int: i32,
    pub(crate) default_float: f32,
}

impl Table {
    /// Assemble a table from decoded parts and build its header index
    pub(crate) fn new(
        version: Version,
        headers: Vec<String>,
        rows: Vec<Option<Row>>,
        default_string: String,
    ) -> Self {
        // Later duplicates overwrite earlier ones
        let header_index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            version,
            headers,
            rows,
            header_index,
            default_int: parse_int(&default_string),
            default_float: parse_float(&default_string),
            default_string,
        }
    }

    /// The encoding this table was decoded from
    pub fn version(&self) -> Version {
        self.version
    }

    /// Fallback for cells that do not exist
    pub fn default_string(&self) -> &str {
        &self.default_string
    }

    /// The default value read as an integer
    pub fn default_int(&self) -> i32 {
        self.default_int
    }

    /// The default value read as a float
    pub fn default_float(&self) -> f32 {
        self.default_float
    }
}

/// Read the leading integer of `s`, or 0 if there is none
pub(crate) fn parse_int(s: &str) -> i32 {
    numeric_prefix(s.trim_start(), false).parse().unwrap_or(0)
}

/// Read the leading decimal number of `s`, or 0.0 if there is none or it
/// is out of range for `f32`
pub(crate) fn parse_float(s: &str) -> f32 {
    numeric_prefix(s.trim_start(), true)
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of `s` shaped like a decimal number. Trailing garbage such
/// as a unit suffix is not an error.
fn numeric_prefix(s: &str, fraction: bool) -> &str {
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits(end);
    end += int_digits;
    if !fraction {
        return &s[..end];
    }

    let mut mantissa = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa += frac_digits;
        }
    }
    if mantissa == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> Table {
        Table::new(
            Version::Text,
            headers.iter().map(|h| h.to_string()).collect(),
            Vec::new(),
            String::new(),
        )
    }

    #[test]
    fn test_header_index_last_duplicate_wins() {
        let t = table(&["A", "B", "A", "C"]);
        assert_eq!(t.header_index.get("A"), Some(&2));
        assert_eq!(t.header_index.get("B"), Some(&1));
        assert_eq!(t.header_index.get("C"), Some(&3));
        assert_eq!(t.header_index.len(), 3);
    }

    #[test]
    fn test_defaults_parsed_once() {
        let t = Table::new(Version::Text, Vec::new(), Vec::new(), "2.5".to_string());
        assert_eq!(t.default_string(), "2.5");
        assert_eq!(t.default_int(), 2);
        assert_eq!(t.default_float(), 2.5);

        let t = Table::new(Version::Text, Vec::new(), Vec::new(), "none".to_string());
        assert_eq!(t.default_int(), 0);
        assert_eq!(t.default_float(), 0.0);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  -7"), -7);
        assert_eq!(parse_int("+3"), 3);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("1.9"), 1);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("99999999999"), 0);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("1.5"), 1.5);
        assert_eq!(parse_float("-0.25"), -0.25);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("3."), 3.0);
        assert_eq!(parse_float("2e3"), 2000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("1.5m"), 1.5);
        assert_eq!(parse_float("."), 0.0);
        assert_eq!(parse_float("****"), 0.0);
        assert_eq!(parse_float("nan"), 0.0);
    }

    #[test]
    fn test_out_of_range_numbers_read_as_zero() {
        assert_eq!(parse_float("1e50"), 0.0);
        assert_eq!(parse_float("-1e50"), 0.0);
        assert_eq!(parse_float("3.4e38"), 3.4e38);

        let t = Table::new(
            Version::Text,
            vec!["A".to_string()],
            vec![Some(vec!["1e50".to_string()])],
            "1e50".to_string(),
        );
        assert_eq!(t.default_float(), 0.0);
        assert_eq!(t.default_int(), 1);
        assert_eq!(t.cell_as_float(0, 0), 0.0);
        assert_eq!(t.cell_as_float(3, 0), 0.0);
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Table>();
    }
}
