//! Projects ranked records into the items handed back to the caller.
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::item::{MatchSpan, MatchedRecord};
use crate::options::SearchOptions;
use crate::record::Record;

/// What a result points at: the record itself, or the value of its `id` key
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HitItem<'a, R> {
    /// The matched record, borrowed from the collection
    Record(&'a R),
    /// The value at the configured `id` key, `None` when the record has none
    Id(Option<String>),
}

/// Matched ranges of one field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Inclusive character ranges
    pub indices: Vec<MatchSpan>,
    /// The searched value
    pub value: String,
    /// Key path of the field, omitted for plain string records
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    /// Position of the value when the key went through an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_index: Option<usize>,
}

/// One entry of the search results
#[derive(Debug, PartialEq)]
pub struct SearchHit<'a, R> {
    /// The record or its id
    pub item: HitItem<'a, R>,
    /// Set with `include_score`
    pub score: Option<f64>,
    /// Set with `include_matches`
    pub matches: Option<Vec<MatchInfo>>,
}

impl<'a, R> SearchHit<'a, R> {
    /// The matched record, `None` when the hit was projected to an id
    pub fn record(&self) -> Option<&'a R> {
        match self.item {
            HitItem::Record(record) => Some(record),
            HitItem::Id(_) => None,
        }
    }
}

/// Serializes as the bare item unless a score or matches were requested
impl<R: Serialize> Serialize for SearchHit<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.score.is_none() && self.matches.is_none() {
            return self.item.serialize(serializer);
        }

        let len = 1 + usize::from(self.score.is_some()) + usize::from(self.matches.is_some());
        let mut state = serializer.serialize_struct("SearchHit", len)?;
        state.serialize_field("item", &self.item)?;
        if let Some(score) = self.score {
            state.serialize_field("score", &score)?;
        }
        if let Some(matches) = &self.matches {
            state.serialize_field("matches", matches)?;
        }
        state.end()
    }
}

/// Builds the output items, keeping the order of `matched`
pub fn format_results<'a, R: Record>(matched: Vec<MatchedRecord<'a, R>>, options: &SearchOptions) -> Vec<SearchHit<'a, R>> {
    matched
        .into_iter()
        .map(|record| {
            let item = match &options.id {
                Some(id) => HitItem::Id(
                    record
                        .record
                        .field_values(id)
                        .into_iter()
                        .next()
                        .map(|value| value.text.into_owned()),
                ),
                None => HitItem::Record(record.record),
            };

            let matches = options.include_matches.then(|| {
                record
                    .matches
                    .into_iter()
                    .filter(|field| !field.indices.is_empty())
                    .map(|field| MatchInfo {
                        indices: field.indices,
                        value: field.value,
                        key: field.key,
                        array_index: field.array_index,
                    })
                    .collect()
            });

            SearchHit {
                item,
                score: options.include_score.then_some(record.score),
                matches,
            }
        })
        .collect()
}
