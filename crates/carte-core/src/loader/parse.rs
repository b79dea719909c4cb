// crates/carte-core/src/loader/parse.rs
use crate::model::Row;
use ::csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

/// Parses delimiter-separated text into rows.
///
/// The first line holds the column names. Fields are split naively on
/// `delimiter` (no quoting, no escapes) and trimmed.
///
/// - a line with more fields than headers is dropped with a warning;
/// - a line with fewer fields gets `""` for the missing trailing columns;
/// - blank lines, and lines whose fields are all empty, yield nothing.
///
/// Never fails: the worst case is an empty `Vec`.
pub fn parse_rows(text: &str, delimiter: u8) -> Vec<Row> {
    parse_bytes(text.as_bytes(), delimiter)
}

/// Same as [`parse_rows`] over raw bytes. A line that is not valid UTF-8
/// is dropped with a warning; the rest of the file is still parsed.
pub fn parse_bytes(bytes: &[u8], delimiter: u8) -> Vec<Row> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.byte_records() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("line skipped: {e}");
                continue;
            }
        };
        let line = raw.position().map(|p| p.line()).unwrap_or(0);

        let record = match StringRecord::from_byte_record(raw) {
            Ok(record) => record,
            Err(e) => {
                if headers.is_none() {
                    warn!(line, "header line is not valid UTF-8, no rows parsed: {e}");
                    return rows;
                }
                warn!(line, "line skipped: not valid UTF-8 ({e})");
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        let Some(cols) = headers.as_ref() else {
            headers = Some(record.iter().map(str::to_string).collect());
            continue;
        };

        if record.len() > cols.len() {
            warn!(
                line,
                expected = cols.len(),
                found = record.len(),
                "line skipped: too many values"
            );
            continue;
        }

        let row = cols
            .iter()
            .enumerate()
            .map(|(i, col)| (col.as_str(), record.get(i).unwrap_or("")))
            .collect::<Row>();
        rows.push(row);
    }

    debug!(rows = rows.len(), "CSV parsed");
    rows
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_gives_single_row() {
        let rows = parse_rows("A,B\n1,2", b',');
        assert_eq!(rows.len(), 1);
        let expected: Row = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(rows[0], expected);
    }

    #[test]
    fn trailing_newline_adds_nothing() {
        assert_eq!(parse_rows("A,B\n1,2\n", b',').len(), 1);
        assert_eq!(parse_rows("A,B\r\n1,2\r\n\r\n", b',').len(), 1);
    }

    #[test]
    fn values_and_headers_are_trimmed() {
        let rows = parse_rows(" A , B \n  1 ,2  \n", b',');
        assert_eq!(rows[0].get("A"), Some("1"));
        assert_eq!(rows[0].get("B"), Some("2"));
    }

    #[test]
    fn short_line_is_padded() {
        let rows = parse_rows("A,B,C\na,b\n", b',');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("C"), Some(""));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn long_line_is_dropped() {
        let rows = parse_rows("A,B\n1,2\n1,2,3\n4,5\n", b',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("A"), Some("4"));
    }

    #[test]
    fn whitespace_only_lines_are_ignored() {
        let rows = parse_rows("A,B\n   \n1,2\n , \n", b',');
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn quotes_are_not_special() {
        let rows = parse_rows("A,B\n\"x,y\"\n", b',');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("A"), Some("\"x"));
        assert_eq!(rows[0].get("B"), Some("y\""));
    }

    #[test]
    fn other_delimiters() {
        let rows = parse_rows("A;B\n1;2\n", b';');
        assert_eq!(rows[0].get("B"), Some("2"));
    }

    #[test]
    fn invalid_utf8_line_is_dropped() {
        let rows = parse_bytes(b"A,B\n1,2\nOrl\xe9ans,3\n4,5\n", b',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("A"), Some("1"));
        assert_eq!(rows[1].get("A"), Some("4"));
    }

    #[test]
    fn invalid_utf8_header_yields_nothing() {
        assert!(parse_bytes(b"Vill\xe9,B\n1,2\n", b',').is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(parse_rows("", b',').is_empty());
        assert!(parse_rows("A,B\n", b',').is_empty());
    }
}
