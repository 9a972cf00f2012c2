//! Line-based price parser.
//!
//! Accepts `label, value`, `label value` or a bare `value` per line. Blank
//! lines and `#` comments are skipped. Rows whose value does not parse are
//! dropped and reported, except a non-numeric first row which is taken as a
//! header.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseIssue {
    /// 1-based line number in the source text
    pub line: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub issues: Vec<ParseIssue>,
}

impl ParsedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .or_else(|| field.strip_prefix('\'').and_then(|f| f.strip_suffix('\'')))
        .unwrap_or(field)
        .trim()
}

/// Split a row into an optional label and the raw value field
fn split_row(row: &str) -> (Option<&str>, &str) {
    if let Some((label, value)) = row.rsplit_once(',') {
        return (Some(unquote(label)), unquote(value));
    }
    match row.trim_end().rsplit_once(char::is_whitespace) {
        Some((label, value)) => (Some(unquote(label)), unquote(value)),
        None => (None, unquote(row)),
    }
}

pub fn parse_series(text: &str) -> ParsedSeries {
    let mut parsed = ParsedSeries::default();
    let mut seen_row = false;

    for (idx, raw) in text.lines().enumerate() {
        let row = raw.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let is_first_row = !seen_row;
        seen_row = true;

        let (label, value) = split_row(row);
        if value.is_empty() {
            parsed.issues.push(ParseIssue {
                line: idx + 1,
                content: raw.to_string(),
                reason: "missing value".to_string(),
            });
            continue;
        }

        match value.parse::<f64>() {
            Ok(v) => {
                let label = match label {
                    Some(l) if !l.is_empty() => l.to_string(),
                    _ => (parsed.values.len() + 1).to_string(),
                };
                parsed.labels.push(label);
                parsed.values.push(v);
            }
            Err(_) if is_first_row => continue,
            Err(e) => parsed.issues.push(ParseIssue {
                line: idx + 1,
                content: raw.to_string(),
                reason: format!("invalid value {:?}: {}", value, e),
            }),
        }
    }

    parsed
}
