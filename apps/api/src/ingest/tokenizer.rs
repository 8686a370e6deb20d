//! Line-level tokenizing for the candidate source format.
//!
//! The format is loosely comma-delimited: preamble lines may precede the
//! header, fields may be double-quoted to carry commas, and exports often
//! carry a leading empty column that is dropped on both header and rows.

/// Column-name tokens that mark a line as the header. Substring match on the raw line.
pub const HEADER_MARKERS: &[&str] = &["EmployeeID", "Name", "BusinessUnit"];

/// Splits input into trimmed, non-blank lines. Handles `\r\n` and `\n`.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Returns the index of the first line containing any header marker.
pub fn find_header(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| HEADER_MARKERS.iter().any(|m| line.contains(m)))
}

/// Splits a header line on commas. Quotes are not honoured here.
pub fn parse_header(line: &str) -> Vec<String> {
    let mut names: Vec<String> = line.split(',').map(|h| h.trim().to_string()).collect();
    drop_leading_empty(&mut names);
    names
}

/// True for lines made up entirely of delimiters, e.g. `,,,,,,`.
pub fn is_delimiter_only(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == ',')
}

/// Splits a data row on commas outside double quotes.
///
/// A `"` toggles quoted mode and is never emitted; there is no escaped-quote
/// support. Tokens are trimmed and a leading empty token is dropped.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    drop_leading_empty(&mut values);
    values
}

fn drop_leading_empty(values: &mut Vec<String>) {
    if values.first().is_some_and(|v| v.is_empty()) {
        values.remove(0);
    }
}
