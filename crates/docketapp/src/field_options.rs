//! # Field Option Catalog
//!
//! The palette of pre-configured fields an editor offers, grouped by section
//! (Schedule, Exporter, Buyer, ...). Each option carries the business
//! identifier it binds to, so the catalog doubles as:
//!
//! - the list of identifiers an operator can assign to a field, and
//! - an out-of-band column schema for table fields whose document does not
//!   declare `tableColumns` (see [`crate::inject::columns`]).
//!
//! Column `_id`s in the catalog are fixed. A document that borrowed its
//! columns from here and later drifts from the catalog is not detected.

use crate::error::{DocketError, Result};
use crate::model::TableColumn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const BUILTIN_FIELD_OPTIONS: &str = include_str!("../catalog/field_options.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub identifier: String,
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<Vec<TableColumn>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOptionGroup {
    pub title: String,
    pub fields: Vec<FieldOption>,
}

/// One selectable identifier, as listed by an editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierOption {
    pub group: String,
    pub title: String,
    pub description: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct FieldOptionCatalog {
    groups: Vec<FieldOptionGroup>,
}

impl FieldOptionCatalog {
    pub fn new(groups: Vec<FieldOptionGroup>) -> Self {
        Self { groups }
    }

    pub fn builtin() -> Result<Self> {
        let groups: Vec<FieldOptionGroup> = serde_json::from_str(BUILTIN_FIELD_OPTIONS)
            .map_err(|e| DocketError::Api(format!("built-in field options are invalid: {}", e)))?;
        Ok(Self::new(groups))
    }

    pub fn groups(&self) -> &[FieldOptionGroup] {
        &self.groups
    }

    pub fn lookup(&self, identifier: &str) -> Option<&FieldOption> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.identifier == identifier)
    }

    /// Column schema of the table option bound to `identifier`.
    pub fn table_columns(&self, identifier: &str) -> Option<&[TableColumn]> {
        self.lookup(identifier)
            .and_then(|f| f.table_columns.as_deref())
            .filter(|columns| !columns.is_empty())
    }

    pub fn identifier_options(&self) -> Vec<IdentifierOption> {
        self.groups
            .iter()
            .flat_map(|group| {
                group.fields.iter().map(move |field| IdentifierOption {
                    group: group.title.clone(),
                    title: field.title.clone(),
                    description: field.description.clone(),
                    value: field.identifier.clone(),
                })
            })
            .collect()
    }
}
