use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use serde_json::Value;

use crate::field::{FieldValue, extract};

/// A `Record` is what gets searched: either a plain string or a structured value whose
/// fields are addressed by dotted key paths.
///
/// Plain records return their text from [`Record::text`] and are searched as a whole, the
/// configured keys are ignored for them. Structured records return `None` there and
/// resolve every configured key through [`Record::field_values`].
///
/// # Example
///
/// ```rust
/// use fzsearch::prelude::*;
///
/// struct Book {
///     title: String,
///     tags: Vec<String>,
/// }
///
/// impl Record for Book {
///     fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
///         match path {
///             "title" => vec![FieldValue::single(self.title.as_str())],
///             "tags" => self
///                 .tags
///                 .iter()
///                 .enumerate()
///                 .map(|(i, tag)| FieldValue { text: tag.as_str().into(), array_index: Some(i) })
///                 .collect(),
///             _ => vec![],
///         }
///     }
/// }
///
/// let books = vec![Book { title: "Old Man's War".into(), tags: vec!["fiction".into()] }];
/// let options = SearchOptionsBuilder::default().keys(vec!["title".into()]).build().unwrap();
/// let hits = fzsearch::search(&books, "old man", &options).unwrap();
/// assert_eq!(hits.len(), 1);
/// ```
pub trait Record {
    /// The whole text of a plain record, `None` for structured records
    fn text(&self) -> Option<&str> {
        None
    }

    /// The values found at `path`, empty when nothing is there
    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>>;
}

//------------------------------------------------------------------------------
// Plain strings

impl Record for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        if path.is_empty() {
            vec![FieldValue::single(self)]
        } else {
            vec![]
        }
    }
}

impl Record for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        self.as_str().field_values(path)
    }
}

impl Record for Cow<'_, str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        self.as_ref().field_values(path)
    }
}

//------------------------------------------------------------------------------
// Structured values

impl Record for Value {
    /// A JSON string is searched like any plain record
    fn text(&self) -> Option<&str> {
        self.as_str()
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        extract(self, path)
    }
}

impl<S: BuildHasher> Record for HashMap<String, String, S> {
    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        self.get(path).map(|v| FieldValue::single(v.as_str())).into_iter().collect()
    }
}

impl Record for BTreeMap<String, String> {
    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        self.get(path).map(|v| FieldValue::single(v.as_str())).into_iter().collect()
    }
}

//------------------------------------------------------------------------------
// Pointers

impl<T: Record + ?Sized> Record for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        (**self).field_values(path)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        (**self).field_values(path)
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }

    fn field_values(&self, path: &str) -> Vec<FieldValue<'_>> {
        (**self).field_values(path)
    }
}
