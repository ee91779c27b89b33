use fzsearch::output::{HitItem, SearchHit};
use fzsearch::prelude::MatchSpan;
use serde::Serialize;

/// Wraps every matched range of `value` in brackets
pub fn highlight(value: &str, indices: &[MatchSpan]) -> String {
    let mut out = String::new();
    let mut ranges = indices.iter().peekable();
    for (i, ch) in value.chars().enumerate() {
        if ranges.peek().is_some_and(|&&(start, _)| start == i) {
            out.push('[');
        }
        out.push(ch);
        if ranges.peek().is_some_and(|&&(_, end)| end == i) {
            out.push(']');
            ranges.next();
        }
    }
    out
}

/// One line per hit: the score, then the highlighted matches or the item itself
pub fn render<R: Serialize>(hits: &[SearchHit<'_, R>]) -> String {
    hits.iter()
        .map(|hit| {
            let score = hit.score.map(|s| format!("{s:.4} ")).unwrap_or_default();
            let body = match &hit.matches {
                Some(matches) if !matches.is_empty() => matches
                    .iter()
                    .map(|m| {
                        let key = if m.key.is_empty() { String::new() } else { format!("{}: ", m.key) };
                        format!("{key}{}", highlight(&m.value, &m.indices))
                    })
                    .collect::<Vec<_>>()
                    .join(" | "),
                _ => match &hit.item {
                    HitItem::Id(Some(id)) => id.clone(),
                    HitItem::Id(None) => "<none>".to_string(),
                    HitItem::Record(record) => serde_json::to_string(record).unwrap(),
                },
            };
            format!("{score}{body}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expands to a test running one search and comparing its rendering to an inline snapshot
macro_rules! search_test {
    ($name:ident, $records:expr, $pattern:expr, $options:expr, @$snapshot:literal) => {
        #[test]
        fn $name() {
            let records = $records;
            let options = $options.build().unwrap();
            let hits = fzsearch::search(&records, $pattern, &options).unwrap();
            insta::assert_snapshot!(common::render(&hits), @$snapshot);
        }
    };
}
