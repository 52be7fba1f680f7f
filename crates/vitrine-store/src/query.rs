use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrine_types::{Document, DocumentId, EqualityFilter, CREATED_AT_FIELD};

/// A document together with its store-assigned id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub data: Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering clause of a query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    /// `created_at` descending: the ordering every list uses.
    pub fn created_at_desc() -> Self {
        Self {
            field: CREATED_AT_FIELD.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::created_at_desc()
    }
}

/// A collection query: optional equality filter plus a mandatory ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub filter: Option<EqualityFilter>,
    pub order_by: OrderBy,
}

impl Query {
    /// All documents, newest first.
    pub fn newest_first() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: EqualityFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Returns `true` if the document passes the filter.
    pub fn matches(&self, document: &Document) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(document))
    }

    /// Evaluate the query over documents given in store (insertion) order.
    ///
    /// Filtering happens first; the sort is stable so documents with equal
    /// ordering values keep their store order. Documents missing the
    /// ordering field sort after all others.
    pub fn evaluate<'a, I>(&self, documents: I) -> Vec<StoredDocument>
    where
        I: IntoIterator<Item = &'a StoredDocument>,
    {
        let mut selected: Vec<StoredDocument> = documents
            .into_iter()
            .filter(|doc| self.matches(&doc.data))
            .cloned()
            .collect();

        let field = self.order_by.field.as_str();
        let direction = self.order_by.direction;
        selected.sort_by(|a, b| match (a.data.get(field), b.data.get(field)) {
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        selected
    }
}

/// Total order over the JSON scalars used as sort keys. Values of different
/// types compare as equal so the stable sort leaves them in store order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> StoredDocument {
        StoredDocument {
            id: DocumentId::new(id),
            data: value.as_object().cloned().unwrap(),
        }
    }

    fn ids(docs: &[StoredDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn newest_first_sorts_descending() {
        let docs = vec![
            doc("a", json!({"created_at": "2024-01-01T00:00:00.000Z"})),
            doc("b", json!({"created_at": "2024-03-01T00:00:00.000Z"})),
            doc("c", json!({"created_at": "2024-02-01T00:00:00.000Z"})),
        ];
        let result = Query::newest_first().evaluate(&docs);
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_store_order() {
        let docs = vec![
            doc("first", json!({"created_at": "2024-01-01T00:00:00.000Z"})),
            doc("second", json!({"created_at": "2024-01-01T00:00:00.000Z"})),
        ];
        let result = Query::newest_first().evaluate(&docs);
        assert_eq!(ids(&result), vec!["first", "second"]);
    }

    #[test]
    fn filter_applies_before_ordering() {
        let docs = vec![
            doc("a", json!({"category": "client", "created_at": "2024-01-03T00:00:00.000Z"})),
            doc("b", json!({"category": "partner", "created_at": "2024-01-01T00:00:00.000Z"})),
            doc("c", json!({"category": "partner", "created_at": "2024-01-02T00:00:00.000Z"})),
        ];
        let query = Query::newest_first().with_filter(EqualityFilter::new("category", "partner"));
        assert_eq!(ids(&query.evaluate(&docs)), vec!["c", "b"]);
    }

    #[test]
    fn missing_order_field_sorts_last() {
        let docs = vec![
            doc("bare", json!({})),
            doc("dated", json!({"created_at": "2024-01-01T00:00:00.000Z"})),
        ];
        assert_eq!(ids(&Query::newest_first().evaluate(&docs)), vec!["dated", "bare"]);
    }

    #[test]
    fn ascending_numbers() {
        let docs = vec![doc("x", json!({"n": 10})), doc("y", json!({"n": 2}))];
        let query = Query {
            filter: None,
            order_by: OrderBy {
                field: "n".into(),
                direction: SortDirection::Ascending,
            },
        };
        assert_eq!(ids(&query.evaluate(&docs)), vec!["y", "x"]);
    }
}
