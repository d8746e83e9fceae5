//! Two-column CSV codec for vault and export files.
//!
//! Comma separator with double-quote escaping: a field is quoted when it
//! contains a comma, a quote or a newline, and embedded quotes are doubled.
//! Alphabet-only strings never need quoting, but the codec stays
//! round-trip-safe for arbitrary field content so the header row and
//! plaintext exports survive unchanged.

use std::fs;
use std::path::Path;

use passkeep_common::{Error, Result};

/// Read a two-column table, header row included.
///
/// Blank lines are skipped. Fails if a non-blank line does not parse into
/// exactly two fields.
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Serialization` on a malformed row
pub fn read_table(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let [first, second]: [String; 2] =
            parse_line(line)?.try_into().map_err(|fields: Vec<String>| {
                Error::Serialization(format!(
                    "Expected 2 fields on line {}, found {}",
                    line_no + 1,
                    fields.len()
                ))
            })?;
        rows.push((first, second));
    }
    Ok(rows)
}

/// Write a two-column table, replacing the file's previous content.
///
/// # Errors
/// - `Io` if the file cannot be written
pub fn write_table(path: &Path, rows: &[(String, String)]) -> Result<()> {
    let mut out = String::new();
    for (first, second) in rows {
        out.push_str(&escape(first));
        out.push(',');
        out.push_str(&escape(second));
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

/// Escape a CSV field.
fn escape(field: &str) -> String {
    let needs_quotes = field.contains(',') || field.contains('"') || field.contains('\n');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parse a CSV line, handling quoted fields.
fn parse_line(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes {
                    // A doubled quote inside a quoted field is a literal quote.
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(Error::Serialization(format!(
            "Unterminated quoted field in line: {}",
            line
        )));
    }
    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_line("abc,def").unwrap(), vec!["abc", "def"]);
    }

    #[test]
    fn test_parse_quoted_field() {
        assert_eq!(
            parse_line("\"a,b\",plain").unwrap(),
            vec!["a,b", "plain"]
        );
    }

    #[test]
    fn test_parse_doubled_quote() {
        assert_eq!(parse_line("\"say \"\"hi\"\"\",x").unwrap(), vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_parse_unterminated_quote_fails() {
        assert!(parse_line("\"open,field").is_err());
    }

    #[test]
    fn test_escape_round_trip() {
        for field in ["plain", "with,comma", "with\"quote", "Service name"] {
            let line = format!("{},{}", escape(field), escape(field));
            assert_eq!(parse_line(&line).unwrap(), vec![field, field]);
        }
    }

    #[test]
    fn test_table_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("table.csv");
        let rows = vec![
            ("Service name".to_string(), "Password".to_string()),
            ("tnanbqkc".to_string(), "X2@aGmAi-9".to_string()),
        ];

        write_table(&path, &rows).unwrap();
        assert_eq!(read_table(&path).unwrap(), rows);
    }

    #[test]
    fn test_read_table_skips_blank_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("table.csv");
        fs::write(&path, "a,b\n\nc,d\n").unwrap();
        assert_eq!(read_table(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_table_rejects_wrong_arity() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("table.csv");
        fs::write(&path, "a,b,c\n").unwrap();
        assert!(read_table(&path).is_err());
    }
}
