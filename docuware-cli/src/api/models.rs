//! Wire types for the DocuWare Platform API

use serde::{Deserialize, Serialize};

/// One index field of a selection-list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexField {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Item")]
    pub item: String,
}

impl IndexField {
    pub fn new(field_name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            item: item.into(),
        }
    }
}

/// Body of a create-entry request. No document file is attached; only the
/// index data is sent.
#[derive(Debug, Serialize)]
pub struct CreateEntryRequest<'a> {
    #[serde(rename = "Fields")]
    pub fields: &'a [IndexField],
}

/// Response of a list request.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(rename = "Items", default)]
    pub items: Vec<EntryRef>,
}

/// Reference to one existing entry. Depending on the platform version the
/// identifier is exposed as `Id` or `DocID`.
#[derive(Debug, Deserialize)]
pub struct EntryRef {
    #[serde(rename = "Id")]
    id: Option<serde_json::Value>,
    #[serde(rename = "DocID")]
    doc_id: Option<serde_json::Value>,
}

impl EntryRef {
    /// The entry identifier as a path segment, whichever field carried it.
    pub fn identifier(&self) -> Option<String> {
        self.id
            .as_ref()
            .or(self.doc_id.as_ref())
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }
}
