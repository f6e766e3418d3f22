// 🏗️ CSV Row Mapper + field coercion
//
// Text in, typed records out. The first line is always a header and is
// skipped; every other line is handed to a caller-supplied mapping function.
// Nothing here validates a schema: a malformed cell coerces to a garbage
// value (NaN, None, "") instead of failing the whole sheet.

use chrono::NaiveDate;
use csv::ReaderBuilder;

// ============================================================================
// ROW MAPPERS
// ============================================================================

/// Parse CSV text with a real CSV reader and map every data row.
///
/// Handles quoted fields, embedded commas and CRLF line endings. Rows may have
/// fewer or more cells than the header.
pub fn parse_csv<T, F>(csv_text: &str, mut map_fn: F) -> Vec<T>
where
    F: FnMut(&[String]) -> T,
{
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes())
        .into_records()
        // In-memory UTF-8 with flexible row lengths leaves the reader nothing to fail on
        .flatten()
        .map(|record| {
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            map_fn(&row)
        })
        .collect()
}

/// Split on newlines and commas, nothing more.
///
/// Quoted cells keep their quotes and embedded commas split the cell, so this
/// is only correct for sheets known to contain plain values.
pub fn parse_csv_naive<T, F>(csv_text: &str, mut map_fn: F) -> Vec<T>
where
    F: FnMut(&[String]) -> T,
{
    csv_text
        .trim()
        .split('\n')
        .skip(1) // header
        .map(|line| {
            let row: Vec<String> = line
                .trim_end_matches('\r')
                .split(',')
                .map(str::to_string)
                .collect();
            map_fn(&row)
        })
        .collect()
}

// ============================================================================
// FIELD COERCION
// ============================================================================

/// Remove one leading and one trailing double quote, if present
pub fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Cell `index` of a row with surrounding quotes removed; missing cells are empty
pub fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .map(|value| strip_quotes(value).to_string())
        .unwrap_or_default()
}

/// Like `cell`, but an empty cell is `None`
pub fn optional(row: &[String], index: usize) -> Option<String> {
    let value = cell(row, index);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Coerce a currency cell.
///
/// Takes the longest numeric prefix ("1500.50", "-3", "12.5 BRL" → 12.5).
/// A cell that does not start with a number becomes NaN.
pub fn parse_currency(value: &str) -> f64 {
    let text = strip_quotes(value).trim();
    let bytes = text.as_bytes();
    let at = |i: usize| bytes.get(i).copied();

    let mut end = 0;
    if matches!(at(0), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while at(end).map_or(false, |b| b.is_ascii_digit()) {
        end += 1;
        digits += 1;
    }
    if at(end) == Some(b'.') {
        end += 1;
        while at(end).map_or(false, |b| b.is_ascii_digit()) {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(at(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(at(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while at(exp_end).map_or(false, |b| b.is_ascii_digit()) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text.get(..end)
        .and_then(|number| number.parse().ok())
        .unwrap_or(f64::NAN)
}

/// Coerce an integer cell: optional sign then leading digits ("12.7" → 12)
pub fn parse_int(value: &str) -> Option<i64> {
    let text = strip_quotes(value).trim();
    let sign_len = usize::from(text.starts_with('+') || text.starts_with('-'));
    let digit_len = text
        .get(sign_len..)?
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return None;
    }

    text.get(..sign_len + digit_len)?.parse().ok()
}

/// Coerce a date cell.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and `MM/DD/YYYY`; anything after the
/// date (a time of day) is ignored. Unparseable dates are `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let text = strip_quotes(value).trim();
    let date_part = text.split(|c: char| c == ' ' || c == 'T').next().unwrap_or(text);

    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
id,nome,valor
1,\"Silva, Ana\",10.5
2,Bruno,20
3,Carla,abc
";

    #[test]
    fn test_parse_csv_skips_header() {
        let rows = parse_csv(FIXTURE, |row| row.to_vec());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[2][0], "3");
    }

    #[test]
    fn test_parse_csv_keeps_quoted_commas() {
        let names = parse_csv(FIXTURE, |row| cell(row, 1));
        assert_eq!(names, vec!["Silva, Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_parse_csv_handles_crlf_and_short_rows() {
        let text = "a,b,c\r\n1,2,3\r\n4\r\n";
        let rows = parse_csv(text, |row| (cell(row, 0), cell(row, 2)));

        assert_eq!(rows, vec![
            ("1".to_string(), "3".to_string()),
            ("4".to_string(), String::new()),
        ]);
    }

    #[test]
    fn test_parse_csv_header_only() {
        let rows = parse_csv("id,nome\n", |row| row.len());
        assert!(rows.is_empty());

        let rows = parse_csv("", |row| row.len());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_csv_tolerates_unterminated_quote() {
        let rows = parse_csv("id,nome\n1,\"Ana\n2,Bruno\n", |row| (cell(row, 0), cell(row, 1)));

        // The open quote swallows the rest of the text into one cell
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "1");
        assert!(rows[0].1.starts_with("Ana"));
    }

    #[test]
    fn test_parse_csv_naive_splits_everything() {
        let rows = parse_csv_naive(FIXTURE, |row| row.to_vec());

        assert_eq!(rows.len(), 3);
        // The naive splitter breaks the quoted name in two
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][1], "\"Silva");
        assert_eq!(rows[1], vec!["2", "Bruno", "20"]);
    }

    #[test]
    fn test_parse_csv_naive_drops_carriage_returns() {
        let rows = parse_csv_naive("h1,h2\r\nx,y\r\n", |row| cell(row, 1));
        assert_eq!(rows, vec!["y"]);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("\"abc"), "abc");
        assert_eq!(strip_quotes("abc"), "abc");
        assert_eq!(strip_quotes("\""), "");
        assert_eq!(strip_quotes("a\"b"), "a\"b");
    }

    #[test]
    fn test_cell_and_optional() {
        let row = vec!["\"x\"".to_string(), String::new()];

        assert_eq!(cell(&row, 0), "x");
        assert_eq!(cell(&row, 5), "");
        assert_eq!(optional(&row, 0), Some("x".to_string()));
        assert_eq!(optional(&row, 1), None);
        assert_eq!(optional(&row, 9), None);
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("1500.50"), 1500.5);
        assert_eq!(parse_currency("-3"), -3.0);
        assert_eq!(parse_currency(" 12.5 BRL"), 12.5);
        assert_eq!(parse_currency("\"250\""), 250.0);
        assert_eq!(parse_currency("1e3"), 1000.0);
        assert_eq!(parse_currency("7e"), 7.0);
        assert_eq!(parse_currency(".5"), 0.5);
        // Brazilian decimal comma stops at the comma
        assert_eq!(parse_currency("1234,56"), 1234.0);
    }

    #[test]
    fn test_parse_currency_garbage_is_nan() {
        assert!(parse_currency("").is_nan());
        assert!(parse_currency("abc").is_nan());
        assert!(parse_currency("-").is_nan());
        assert!(parse_currency("R$ 10").is_nan());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("12.7"), Some(12));
        assert_eq!(parse_int("\"0101\""), Some(101));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("x1"), None);
        assert_eq!(parse_int("+"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1990, 5, 17);

        assert_eq!(parse_date("1990-05-17"), expected);
        assert_eq!(parse_date("1990/05/17"), expected);
        assert_eq!(parse_date("05/17/1990"), expected);
        assert_eq!(parse_date("1990-05-17 00:00:00"), expected);
        assert_eq!(parse_date("1990-05-17T08:30:00Z"), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("1990-13-40"), None);
    }
}
