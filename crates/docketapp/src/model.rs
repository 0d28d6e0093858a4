//! # Documents, Fields and Orders
//!
//! A [`TemplateDefinition`] is the document a form is rendered from: an ordered
//! list of [`Field`]s plus whatever metadata the renderer keeps at the top level
//! (files, pages, field positions). Docket only interprets the fields; every
//! other key is carried through untouched so a saved document round-trips.
//!
//! ## Fields
//!
//! The wire shape of a field is flat JSON:
//!
//! ```json
//! { "_id": "...", "identifier": "vessel", "type": "text", "value": "MSC Aurora", "title": "Vessel" }
//! ```
//!
//! In Rust a field is a shared base (`_id`, `identifier`, extra keys) around a
//! [`FieldKind`], one variant per `type` tag. Table fields carry typed columns
//! and rows ([`TableField`]); every other kind carries its raw value. Tags the
//! renderer knows and we do not end up in [`FieldKind::Other`] with their name
//! preserved.
//!
//! ## Tables
//!
//! Rows store cells keyed by column `_id`, never by the column's business
//! `identifier`. The optional `rowOrder` lists row ids in display order.
//!
//! ## Orders
//!
//! An [`OrderRecord`] is a placed order. User orders carry a frozen copy of
//! their document; the seed order ([`OrderRecord::seed`]) carries none and is
//! rendered from the current template on every read.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const SEED_ORDER_NUMBER: &str = "PKG-001";
pub const SEED_TEMPLATE_KEY: &str = "packingInstructions";
pub const SEED_TEMPLATE_NAME: &str = "Packing Instructions";
// 2023-11-27T10:00:00Z
const SEED_TIMESTAMP: i64 = 1_701_079_200;

/// Cells of a table row, keyed by column `_id`.
pub type Cells = BTreeMap<String, Value>;

/// One flat business record destined for a table row, keyed by column identifier.
pub type Record = Map<String, Value>;

/// Business values keyed by field identifier.
pub type ValueMap = BTreeMap<String, BusinessValue>;

fn default_column_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    #[serde(rename = "_id")]
    pub id: String,
    /// Business key used only when injecting values; distinct from `_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "type", default = "default_column_type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableColumn {
    pub fn new(id: impl Into<String>, identifier: Option<&str>) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.map(str::to_string),
            column_type: default_column_type(),
            title: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub cells: Cells,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableRow {
    pub fn new(id: String, cells: Cells) -> Self {
        Self {
            id,
            deleted: false,
            cells,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableField {
    /// `None` when the document never declared `tableColumns`.
    pub columns: Option<Vec<TableColumn>>,
    pub rows: Vec<TableRow>,
    pub row_order: Option<Vec<String>>,
}

impl TableField {
    /// True when `rowOrder` is absent or is a permutation of the row ids.
    pub fn row_order_is_consistent(&self) -> bool {
        let Some(order) = &self.row_order else {
            return true;
        };
        let mut ordered: Vec<&str> = order.iter().map(String::as_str).collect();
        let mut stored: Vec<&str> = self.rows.iter().map(|r| r.id.as_str()).collect();
        ordered.sort_unstable();
        stored.sort_unstable();
        ordered == stored
    }
}

/// The type-specific part of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text(Option<Value>),
    Textarea(Option<Value>),
    Number(Option<Value>),
    Date(Option<Value>),
    Dropdown(Option<Value>),
    MultiSelect(Option<Value>),
    Signature(Option<Value>),
    Image(Option<Value>),
    Block(Option<Value>),
    Chart(Option<Value>),
    Table(TableField),
    Other {
        type_name: String,
        value: Option<Value>,
    },
}

impl FieldKind {
    /// Build the kind for a non-table `type` tag.
    fn scalar(type_name: String, value: Option<Value>) -> Self {
        match type_name.as_str() {
            "text" => FieldKind::Text(value),
            "textarea" => FieldKind::Textarea(value),
            "number" => FieldKind::Number(value),
            "date" => FieldKind::Date(value),
            "dropdown" => FieldKind::Dropdown(value),
            "multiSelect" => FieldKind::MultiSelect(value),
            "signature" => FieldKind::Signature(value),
            "image" => FieldKind::Image(value),
            "block" => FieldKind::Block(value),
            "chart" => FieldKind::Chart(value),
            _ => FieldKind::Other { type_name, value },
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::Textarea(_) => "textarea",
            FieldKind::Number(_) => "number",
            FieldKind::Date(_) => "date",
            FieldKind::Dropdown(_) => "dropdown",
            FieldKind::MultiSelect(_) => "multiSelect",
            FieldKind::Signature(_) => "signature",
            FieldKind::Image(_) => "image",
            FieldKind::Block(_) => "block",
            FieldKind::Chart(_) => "chart",
            FieldKind::Table(_) => "table",
            FieldKind::Other { type_name, .. } => type_name,
        }
    }

    /// The raw value of a non-table field. Tables return `None`; use
    /// [`FieldKind::as_table`] for their rows.
    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldKind::Text(v)
            | FieldKind::Textarea(v)
            | FieldKind::Number(v)
            | FieldKind::Date(v)
            | FieldKind::Dropdown(v)
            | FieldKind::MultiSelect(v)
            | FieldKind::Signature(v)
            | FieldKind::Image(v)
            | FieldKind::Block(v)
            | FieldKind::Chart(v)
            | FieldKind::Other { value: v, .. } => v.as_ref(),
            FieldKind::Table(_) => None,
        }
    }

    /// Overwrite the value of a non-table field. Returns false (and changes
    /// nothing) for tables.
    pub fn set_value(&mut self, value: Value) -> bool {
        match self {
            FieldKind::Text(v)
            | FieldKind::Textarea(v)
            | FieldKind::Number(v)
            | FieldKind::Date(v)
            | FieldKind::Dropdown(v)
            | FieldKind::MultiSelect(v)
            | FieldKind::Signature(v)
            | FieldKind::Image(v)
            | FieldKind::Block(v)
            | FieldKind::Chart(v)
            | FieldKind::Other { value: v, .. } => {
                *v = Some(value);
                true
            }
            FieldKind::Table(_) => false,
        }
    }

    pub fn as_table(&self) -> Option<&TableField> {
        match self {
            FieldKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableField> {
        match self {
            FieldKind::Table(table) => Some(table),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    pub id: Option<String>,
    /// Business identifier. Fields without one are never injection targets.
    pub identifier: Option<String>,
    pub kind: FieldKind,
    /// Display metadata and any other keys the renderer keeps on the field.
    pub extra: Map<String, Value>,
}

impl Field {
    pub fn new(identifier: Option<&str>, kind: FieldKind) -> Self {
        Self {
            id: None,
            identifier: identifier.map(str::to_string),
            kind,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.extra
            .insert("title".to_string(), Value::String(title.to_string()));
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, FieldKind::Table(_))
    }

    /// Overwrite the value as-is. A table given something other than rows
    /// keeps its `type` tag but becomes a raw-valued field; its columns and
    /// row order stay on it as plain metadata.
    pub fn set_raw_value(&mut self, value: Value) {
        if let FieldKind::Table(table) = &mut self.kind {
            let table = std::mem::take(table);
            keep_table_metadata(&mut self.extra, table.columns, table.row_order);
            self.kind = FieldKind::Other {
                type_name: "table".to_string(),
                value: Some(value),
            };
            return;
        }
        self.kind.set_value(value);
    }
}

fn keep_table_metadata<C: Serialize, O: Serialize>(
    extra: &mut Map<String, Value>,
    columns: Option<C>,
    row_order: Option<O>,
) {
    if let Some(columns) = columns.and_then(|c| serde_json::to_value(c).ok()) {
        extra.insert("tableColumns".to_string(), columns);
    }
    if let Some(order) = row_order.and_then(|o| serde_json::to_value(o).ok()) {
        extra.insert("rowOrder".to_string(), order);
    }
}

/// Distinguishes an explicit `"value": null` from a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Flat wire shape of a field, before the `type` tag is interpreted.
#[derive(Deserialize)]
struct RawField {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default, deserialize_with = "present")]
    value: Option<Value>,
    #[serde(rename = "tableColumns", default)]
    table_columns: Option<Value>,
    #[serde(rename = "rowOrder", default)]
    row_order: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawField> for Field {
    type Error = String;

    fn try_from(raw: RawField) -> std::result::Result<Self, Self::Error> {
        let mut extra = raw.extra;

        let rows = match &raw.value {
            _ if raw.field_type != "table" => None,
            None | Some(Value::Null) => Some(Vec::new()),
            Some(value) => Vec::<TableRow>::deserialize(value).ok(),
        };

        let kind = match rows {
            Some(rows) => {
                let columns = raw
                    .table_columns
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(|e| format!("invalid tableColumns: {}", e))?;
                let row_order = raw
                    .row_order
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(|e| format!("invalid rowOrder: {}", e))?;
                FieldKind::Table(TableField {
                    columns,
                    rows,
                    row_order,
                })
            }
            _ => {
                // Table keys on anything that is not a table of rows are plain metadata
                keep_table_metadata(&mut extra, raw.table_columns, raw.row_order);
                FieldKind::scalar(raw.field_type, raw.value)
            }
        };

        Ok(Field {
            id: raw.id,
            identifier: raw.identifier,
            kind,
            extra,
        })
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("_id", id)?;
        }
        if let Some(identifier) = &self.identifier {
            map.serialize_entry("identifier", identifier)?;
        }
        map.serialize_entry("type", self.kind.type_name())?;
        match &self.kind {
            FieldKind::Table(table) => {
                map.serialize_entry("value", &table.rows)?;
                if let Some(columns) = &table.columns {
                    map.serialize_entry("tableColumns", columns)?;
                }
                if let Some(order) = &table.row_order {
                    map.serialize_entry("rowOrder", order)?;
                }
            }
            kind => {
                if let Some(value) = kind.value() {
                    map.serialize_entry("value", value)?;
                }
            }
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateDefinition {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateDefinition {
    pub fn new(name: &str, fields: Vec<Field>) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
            fields,
            extra: Map::new(),
        }
    }

    /// First field carrying the given business identifier.
    pub fn field(&self, identifier: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.identifier.as_deref() == Some(identifier))
    }

    /// Business identifiers in field order, root fields first, then the
    /// fields of the first file.
    pub fn identifiers(&self) -> Vec<&str> {
        let file_identifiers = self
            .extra
            .get("files")
            .and_then(|files| files.get(0))
            .and_then(|file| file.get("fields"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|field| field.get("identifier").and_then(Value::as_str));

        self.fields
            .iter()
            .filter_map(|f| f.identifier.as_deref())
            .chain(file_identifiers)
            .collect()
    }

    /// Raw fields of the first file. Some documents keep their fields there
    /// instead of (or as well as) at the root.
    pub fn file_fields_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.extra
            .get_mut("files")?
            .as_array_mut()?
            .first_mut()?
            .get_mut("fields")?
            .as_array_mut()
    }
}

/// A value headed for one field: a list of flat records for tables, anything
/// else for simple fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusinessValue {
    Records(Vec<Record>),
    Scalar(Value),
}

impl BusinessValue {
    pub fn into_value(self) -> Value {
        match self {
            BusinessValue::Records(records) => {
                Value::Array(records.into_iter().map(Value::Object).collect())
            }
            BusinessValue::Scalar(value) => value,
        }
    }
}

impl From<Value> for BusinessValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => BusinessValue::Records(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(record) => Some(record),
                        _ => None,
                    })
                    .collect(),
            ),
            other => BusinessValue::Scalar(other),
        }
    }
}

impl From<&str> for BusinessValue {
    fn from(value: &str) -> Self {
        BusinessValue::Scalar(Value::String(value.to_string()))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Order numbers have been stored both as strings and as bare numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "orderNumber must be a string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub order_number: String,
    pub date: DateTime<Utc>,
    pub template_name: String,
    pub template_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<TemplateDefinition>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
}

impl OrderRecord {
    pub fn new(
        order_number: impl Into<String>,
        template_key: &str,
        template_name: &str,
        document: TemplateDefinition,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            date: Utc::now(),
            template_name: template_name.to_string(),
            template_key: template_key.to_string(),
            document: Some(document),
            is_static: false,
        }
    }

    /// The synthetic order that is always listed first and never stored.
    pub fn seed() -> Self {
        Self {
            order_number: SEED_ORDER_NUMBER.to_string(),
            date: DateTime::from_timestamp(SEED_TIMESTAMP, 0).unwrap_or_default(),
            template_name: SEED_TEMPLATE_NAME.to_string(),
            template_key: SEED_TEMPLATE_KEY.to_string(),
            document: None,
            is_static: true,
        }
    }
}
