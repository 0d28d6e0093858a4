//! # Template Catalog
//!
//! The built-in template definitions, keyed by template key, and the static
//! business values the seed order is rendered with. Both are embedded at
//! compile time from `catalog/*.json`.
//!
//! The catalog is a plain owned value. [`crate::store::template_store::TemplateStore`]
//! holds it as the bottom layer of template resolution; nothing mutates it
//! after construction.

use crate::error::{DocketError, Result};
use crate::model::{TemplateDefinition, ValueMap};
use std::collections::BTreeMap;

const BUILTIN_TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "packingInstructions",
        "Packing Instructions",
        include_str!("../catalog/packing_instructions.json"),
    ),
    (
        "templateOne",
        "Cleaning Checklist",
        include_str!("../catalog/cleaning_checklist.json"),
    ),
    (
        "templateTwo",
        "Intake Form",
        include_str!("../catalog/intake_form.json"),
    ),
    (
        "templateThree",
        "Fire Pump Inspection",
        include_str!("../catalog/fire_pump_inspection.json"),
    ),
    (
        "templateFour",
        "Workers Compensation",
        include_str!("../catalog/workers_compensation.json"),
    ),
];

const BUILTIN_VALUES: &[(&str, &str)] = &[(
    "packingInstructions",
    include_str!("../catalog/values/packing_instructions.json"),
)];

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub key: String,
    pub name: String,
    pub definition: TemplateDefinition,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: Vec<CatalogEntry>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with docket.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for (key, name, source) in BUILTIN_TEMPLATES {
            let definition: TemplateDefinition =
                serde_json::from_str(source).map_err(|e| {
                    DocketError::Api(format!("built-in template '{}' is invalid: {}", key, e))
                })?;
            catalog.insert(key, name, definition);
        }
        Ok(catalog)
    }

    /// Add or replace an entry, keeping the position of a replaced key.
    pub fn insert(&mut self, key: &str, name: &str, definition: TemplateDefinition) {
        let entry = CatalogEntry {
            key: key.to_string(),
            name: name.to_string(),
            definition,
        };
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn name_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Business values per template key, used to render synthetic orders.
#[derive(Debug, Clone, Default)]
pub struct StaticValues {
    by_key: BTreeMap<String, ValueMap>,
}

impl StaticValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self> {
        let mut values = Self::new();
        for (key, source) in BUILTIN_VALUES {
            let map: ValueMap = serde_json::from_str(source).map_err(|e| {
                DocketError::Api(format!("built-in values for '{}' are invalid: {}", key, e))
            })?;
            values.insert(key, map);
        }
        Ok(values)
    }

    pub fn insert(&mut self, key: &str, values: ValueMap) {
        self.by_key.insert(key.to_string(), values);
    }

    pub fn for_key(&self, key: &str) -> Option<&ValueMap> {
        self.by_key.get(key)
    }
}
