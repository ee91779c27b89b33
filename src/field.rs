//! Resolves dotted key paths against structured records.
//!
//! A path like `author.name` walks one object level per segment. Arrays are walked
//! element by element without consuming a segment, so `tags` on `{"tags": ["a", "b"]}`
//! yields two values. Missing keys and `null` simply yield nothing.
use std::borrow::Cow;

use serde_json::Value;

/// One searchable value found at a key path
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<'a> {
    /// The value as text
    pub text: Cow<'a, str>,
    /// Position of the value in the innermost array the path went through
    pub array_index: Option<usize>,
}

impl<'a> FieldValue<'a> {
    /// A value that was not found through an array
    pub fn single(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            array_index: None,
        }
    }
}

/// Every value at `path` in `value`; the empty path designates `value` itself
pub fn extract<'a>(value: &'a Value, path: &str) -> Vec<FieldValue<'a>> {
    let segments: Vec<&str> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    };

    let mut values = Vec::new();
    collect(value, &segments, None, &mut values);
    values
}

fn collect<'a>(value: &'a Value, segments: &[&str], array_index: Option<usize>, out: &mut Vec<FieldValue<'a>>) {
    match value {
        Value::Null => {}
        Value::Array(elements) => {
            for (i, element) in elements.iter().enumerate() {
                collect(element, segments, Some(i), out);
            }
        }
        Value::Object(map) => {
            if let Some((head, rest)) = segments.split_first()
                && let Some(child) = map.get(*head)
            {
                collect(child, rest, array_index, out);
            }
        }
        scalar if segments.is_empty() => out.push(FieldValue {
            text: scalar_text(scalar),
            array_index,
        }),
        _ => {}
    }
}

/// Text form of a scalar, strings are borrowed
fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(values: &[FieldValue]) -> Vec<String> {
        values.iter().map(|v| v.text.to_string()).collect()
    }

    #[test]
    fn test_nested_path() {
        let record = json!({"author": {"name": "Ada", "age": 36}});
        let values = extract(&record, "author.name");
        assert_eq!(values, vec![FieldValue::single("Ada")]);
        assert_eq!(texts(&extract(&record, "author.age")), vec!["36"]);
    }

    #[test]
    fn test_missing_and_null() {
        let record = json!({"author": null, "title": "x"});
        assert!(extract(&record, "author.name").is_empty());
        assert!(extract(&record, "content").is_empty());
        assert!(extract(&record, "title.inner").is_empty());
        assert!(extract(&record, "").is_empty());
    }

    #[test]
    fn test_arrays_are_flattened() {
        let record = json!({
            "tags": ["rust", null, "search"],
            "authors": [{"name": "Ada"}, {"name": "Alan"}, {"nick": "x"}]
        });
        let tags = extract(&record, "tags");
        assert_eq!(texts(&tags), vec!["rust", "search"]);
        assert_eq!(tags[0].array_index, Some(0));
        assert_eq!(tags[1].array_index, Some(2));

        let names = extract(&record, "authors.name");
        assert_eq!(texts(&names), vec!["Ada", "Alan"]);
        assert_eq!(names[0].array_index, Some(0));
        assert_eq!(names[1].array_index, Some(1));
    }

    #[test]
    fn test_array_index_points_at_the_element() {
        let record = json!({
            "authors": [{"nick": "x"}, null, {"name": "Ada"}],
            "matrix": [["a"], [null, "b"]]
        });
        let names = extract(&record, "authors.name");
        assert_eq!(texts(&names), vec!["Ada"]);
        assert_eq!(record["authors"][names[0].array_index.unwrap()]["name"], "Ada");

        let cells = extract(&record, "matrix");
        assert_eq!(texts(&cells), vec!["a", "b"]);
        assert_eq!(cells[0].array_index, Some(0));
        assert_eq!(cells[1].array_index, Some(1));
    }

    #[test]
    fn test_identity_path() {
        let record = json!("plain text");
        assert_eq!(extract(&record, ""), vec![FieldValue::single("plain text")]);
        assert_eq!(texts(&extract(&json!(true), "")), vec!["true"]);
    }

    #[test]
    fn test_strings_are_borrowed() {
        let record = json!({"title": "borrowed"});
        let values = extract(&record, "title");
        assert!(matches!(values[0].text, Cow::Borrowed(_)));
    }
}
