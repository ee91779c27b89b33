//! Reader turns a data source (a file or stdin) into a record collection
//!
//! Records are either the elements of a JSON array, one JSON value per line, or plain
//! text lines. Searching never reads anything: this is only used to feed a collection to
//! the search from the command line.
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SearchError};

/// How the records are laid out in the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RecordFormat {
    /// A JSON array when the input starts with `[`, plain lines otherwise
    #[default]
    Auto,
    /// A single JSON array of records
    Json,
    /// One JSON value per line
    JsonLines,
    /// One plain string record per line
    Lines,
}

/// Reads every record from `source`
pub fn read_records<B: BufRead>(mut source: B, format: RecordFormat) -> Result<Vec<Value>> {
    let mut input = String::new();
    source.read_to_string(&mut input)?;

    let format = match format {
        RecordFormat::Auto if input.trim_start().starts_with('[') => RecordFormat::Json,
        RecordFormat::Auto => RecordFormat::Lines,
        other => other,
    };
    debug!("reading records as {:?}", format);

    let records = match format {
        RecordFormat::Json => match serde_json::from_str::<Value>(&input)? {
            Value::Array(records) => records,
            other => {
                return Err(SearchError::InvalidOptions(format!(
                    "expected a JSON array of records, got {}",
                    json_kind(&other)
                )));
            }
        },
        RecordFormat::JsonLines => input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<std::result::Result<Vec<Value>, _>>()?,
        _ => input
            .lines()
            .map(|line| Value::String(line.trim_end_matches('\r').to_string()))
            .collect(),
    };

    debug!("read {} records", records.len());
    Ok(records)
}

/// Reads every record from the file at `path`
pub fn read_records_from_path(path: impl AsRef<Path>, format: RecordFormat) -> Result<Vec<Value>> {
    let file = File::open(path.as_ref())?;
    read_records(BufReader::new(file), format)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_auto_detects_json() {
        let records = read_records(Cursor::new(r#"  [{"title": "a"}, "b"]"#), RecordFormat::Auto).unwrap();
        assert_eq!(records, vec![json!({"title": "a"}), json!("b")]);
    }

    #[test]
    fn test_auto_falls_back_to_lines() {
        let records = read_records(Cursor::new("alpha\r\nbeta\n"), RecordFormat::Auto).unwrap();
        assert_eq!(records, vec![json!("alpha"), json!("beta")]);
    }

    #[test]
    fn test_json_lines() {
        let input = "{\"title\": \"a\"}\n\n{\"title\": \"b\"}\n";
        let records = read_records(Cursor::new(input), RecordFormat::JsonLines).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["title"], "b");
    }

    #[test]
    fn test_json_must_be_an_array() {
        let err = read_records(Cursor::new(r#"{"title": "a"}"#), RecordFormat::Json).unwrap_err();
        assert!(err.to_string().contains("an object"), "{err}");

        let err = read_records(Cursor::new("[1,"), RecordFormat::Json).unwrap_err();
        assert!(matches!(err, SearchError::Json(_)));
    }
}
