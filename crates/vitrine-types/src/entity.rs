use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::document::{Document, EqualityFilter, CREATED_AT_FIELD};
use crate::error::TypeError;
use crate::id::DocumentId;
use crate::kind::EntityKind;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Domain fields of one entity kind.
///
/// Implementors are plain serde structs; the shared envelope (id, creation
/// time, asset URL) lives in [`Record`]. Field names must not collide with
/// the kind's asset field or with `created_at`.
pub trait EntityFields:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Partial update: every field optional, `None` keeps the current value.
    type Patch: Default + Clone + fmt::Debug + Send + Sync + 'static;

    /// Typed list filter. Kinds without a filterable field use
    /// [`std::convert::Infallible`].
    type Filter: fmt::Debug + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Check the fields before anything is written.
    fn validate(&self) -> Result<(), TypeError>;

    /// Merge a patch into these fields.
    fn apply(&mut self, patch: Self::Patch);

    /// Translate the typed filter into a store predicate.
    fn filter_clause(filter: &Self::Filter) -> EqualityFilter;
}

/// A persisted entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<F> {
    /// Assigned by the document store.
    pub id: DocumentId,
    /// Assigned by the repository when the document is written.
    pub created_at: DateTime<Utc>,
    /// URL of the entity's single asset (logo or image).
    pub asset_url: String,
    pub fields: F,
}

impl<F: EntityFields> Record<F> {
    pub fn kind(&self) -> EntityKind {
        F::KIND
    }

    /// Build the document stored for `fields`, before the store assigns an id.
    pub fn build_document(
        fields: &F,
        asset_url: &str,
        created_at: &DateTime<Utc>,
    ) -> Result<Document, TypeError> {
        let kind = F::KIND;
        let mut document = match serde_json::to_value(fields)
            .map_err(|e| TypeError::Serialization(e.to_string()))?
        {
            Value::Object(map) => map,
            other => {
                return Err(TypeError::Serialization(format!(
                    "{kind} fields must serialize to an object, got {other}"
                )))
            }
        };

        for reserved in [kind.asset_field(), CREATED_AT_FIELD] {
            if document.contains_key(reserved) {
                return Err(TypeError::Serialization(format!(
                    "{kind} fields use reserved name `{reserved}`"
                )));
            }
        }

        document.insert(
            kind.asset_field().to_string(),
            Value::String(asset_url.to_string()),
        );
        document.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(created_at)),
        );
        Ok(document)
    }

    /// The document form of this record (without its id).
    pub fn to_document(&self) -> Result<Document, TypeError> {
        Self::build_document(&self.fields, &self.asset_url, &self.created_at)
    }

    /// Decode a stored document into a typed record.
    pub fn from_document(id: DocumentId, mut document: Document) -> Result<Self, TypeError> {
        let kind = F::KIND;
        let asset_url = match document.remove(kind.asset_field()) {
            Some(Value::String(url)) if !url.trim().is_empty() => url,
            Some(_) => {
                return Err(TypeError::malformed(format!(
                    "{kind} `{id}` has a non-string or empty `{}`",
                    kind.asset_field()
                )))
            }
            None => {
                return Err(TypeError::malformed(format!(
                    "{kind} `{id}` is missing `{}`",
                    kind.asset_field()
                )))
            }
        };
        let created_at = match document.remove(CREATED_AT_FIELD) {
            Some(Value::String(raw)) => parse_timestamp(&raw)?,
            _ => {
                return Err(TypeError::malformed(format!(
                    "{kind} `{id}` is missing `{CREATED_AT_FIELD}`"
                )))
            }
        };
        // Some backends echo the id inside the document body.
        document.remove("id");

        let fields = serde_json::from_value(Value::Object(document))
            .map_err(|e| TypeError::malformed(format!("{kind} `{id}`: {e}")))?;

        Ok(Self {
            id,
            created_at,
            asset_url,
            fields,
        })
    }
}

/// Serializes as the stored document plus its `id`.
impl<F: EntityFields> Serialize for Record<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut document = self.to_document().map_err(serde::ser::Error::custom)?;
        document.insert("id".to_string(), Value::String(self.id.to_string()));
        document.serialize(serializer)
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), TypeError> {
    if value.trim().is_empty() {
        return Err(TypeError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn optional_url(field: &str, value: Option<&str>) -> Result<(), TypeError> {
    match value {
        None => Ok(()),
        Some(url) => require_url(field, url),
    }
}

pub(crate) fn require_url(field: &str, value: &str) -> Result<(), TypeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeError::invalid(field, "must not be empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(TypeError::invalid(
            field,
            format!("`{trimmed}` must start with http:// or https://"),
        ));
    }
    Ok(())
}
