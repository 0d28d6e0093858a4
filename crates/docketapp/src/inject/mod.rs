//! # Value Injection
//!
//! Injection merges a flat [`ValueMap`] into a copy of a template:
//!
//! ```text
//! { "vessel": "MSC Aurora", "items": [{ "sku": "A1" }] }
//!        │                         │
//!        ▼                         ▼
//!   field(identifier=vessel)   field(identifier=items, type=table)
//!   value = "MSC Aurora"       columns resolved → materialize → rows + rowOrder
//! ```
//!
//! Rules:
//! - The input template is never touched; injection works on a deep copy.
//! - Both the root `fields` and the fields of the first file
//!   (`files[0].fields`) are injected.
//! - Only fields whose identifier is a key of the value map change. Field
//!   order is preserved.
//! - Simple fields take the value as-is, no coercion.
//! - Table fields given a list of records have their columns resolved through
//!   a [`ColumnResolver`] and their rows rebuilt; if no columns are found the
//!   field is left unchanged. Given anything else, a table takes the value
//!   as-is like any other field.
//! - Rows are rebuilt on every call with fresh ids. Re-injecting never
//!   reproduces earlier row ids; keep the injected document if ids matter.

pub mod columns;
pub mod materialize;

use crate::field_options::FieldOptionCatalog;
use crate::model::{BusinessValue, Field, TemplateDefinition, ValueMap};
use columns::ColumnResolver;
use materialize::{materialize, Materialized};
use serde::Deserialize;
use serde_json::Value;

pub struct Injector {
    columns: ColumnResolver,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new(ColumnResolver::declared())
    }
}

impl Injector {
    pub fn new(columns: ColumnResolver) -> Self {
        Self { columns }
    }

    /// Resolve table columns from the field first, then from `options`.
    pub fn with_field_options(options: FieldOptionCatalog) -> Self {
        Self::new(ColumnResolver::declared().with_source(options))
    }

    pub fn inject(&self, template: &TemplateDefinition, values: &ValueMap) -> TemplateDefinition {
        let mut document = template.clone();
        for field in &mut document.fields {
            self.inject_field(field, values);
        }
        if let Some(file_fields) = document.file_fields_mut() {
            for raw in file_fields {
                self.inject_raw_field(raw, values);
            }
        }
        document
    }

    /// File fields are kept as raw JSON; only the ones being injected are
    /// parsed and written back.
    fn inject_raw_field(&self, raw: &mut Value, values: &ValueMap) {
        let targeted = raw
            .get("identifier")
            .and_then(Value::as_str)
            .is_some_and(|identifier| values.contains_key(identifier));
        if !targeted {
            return;
        }

        let mut field: Field = match Field::deserialize(&*raw) {
            Ok(field) => field,
            Err(e) => {
                log::warn!("skipping unreadable file field: {}", e);
                return;
            }
        };
        self.inject_field(&mut field, values);
        match serde_json::to_value(&field) {
            Ok(value) => *raw = value,
            Err(e) => log::warn!("could not write back file field: {}", e),
        }
    }

    fn inject_field(&self, field: &mut Field, values: &ValueMap) {
        let Some(value) = field
            .identifier
            .as_deref()
            .and_then(|identifier| values.get(identifier))
        else {
            return;
        };

        let BusinessValue::Records(records) = value else {
            field.set_raw_value(value.clone().into_value());
            return;
        };
        if !field.is_table() {
            field.kind.set_value(value.clone().into_value());
            return;
        }

        let identifier = field.identifier.as_deref().unwrap_or_default();
        let Some(columns) = self.columns.resolve(field) else {
            log::warn!(
                "no column schema for table field '{}', leaving it unchanged",
                identifier
            );
            return;
        };

        let Materialized { rows, row_order } = materialize(records, &columns);
        if let Some(table) = field.kind.as_table_mut() {
            table.columns = Some(columns);
            table.rows = rows;
            table.row_order = Some(row_order);
        }
    }
}
