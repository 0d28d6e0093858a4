//! # Template Store
//!
//! Answers "which definition of template `key` is authoritative right now".
//! Resolution walks an explicit chain of layers and stops at the first hit:
//!
//! 1. **Session**: definitions saved by this process. A save lands here
//!    before it is persisted, so a failed persist is still visible until exit.
//! 2. **Override**: definitions persisted under `savedTemplates`, loaded by
//!    [`TemplateStore::reconcile`] at startup.
//! 3. **Builtin**: the [`TemplateCatalog`].
//!
//! Only catalog keys resolve. Overrides for keys the catalog does not know
//! are ignored at startup and refused on save.

use super::backend::{StorageBackend, TEMPLATES_KEY};
use super::{read_json, read_json_lenient, write_json};
use crate::catalog::TemplateCatalog;
use crate::error::{DocketError, Result};
use crate::model::TemplateDefinition;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
    Session,
    Override,
    Builtin,
}

impl TemplateSource {
    /// Layers in resolution order.
    pub const CHAIN: [TemplateSource; 3] = [
        TemplateSource::Session,
        TemplateSource::Override,
        TemplateSource::Builtin,
    ];
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TemplateSource::Session => "session",
            TemplateSource::Override => "override",
            TemplateSource::Builtin => "built-in",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub key: String,
    pub name: String,
    pub source: TemplateSource,
    pub definition: TemplateDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSummary {
    pub key: String,
    pub name: String,
    pub source: TemplateSource,
    pub field_count: usize,
}

pub struct TemplateStore<B: StorageBackend> {
    backend: Rc<B>,
    catalog: TemplateCatalog,
    overrides: BTreeMap<String, TemplateDefinition>,
    session: BTreeMap<String, TemplateDefinition>,
}

impl<B: StorageBackend> TemplateStore<B> {
    /// A store with no overrides applied yet; call [`Self::reconcile`] to load them.
    pub fn new(backend: Rc<B>, catalog: TemplateCatalog) -> Self {
        Self {
            backend,
            catalog,
            overrides: BTreeMap::new(),
            session: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Every parseable override in storage, keyed by template key.
    ///
    /// Unreadable storage reads as no overrides. Entries that do not parse
    /// as a definition are skipped individually.
    pub fn load_all_overrides(&self) -> BTreeMap<String, TemplateDefinition> {
        let raw: Map<String, Value> = read_json_lenient(self.backend.as_ref(), TEMPLATES_KEY);
        raw.into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(definition) => Some((key, definition)),
                Err(e) => {
                    log::warn!("skipping saved template '{}': {}", key, e);
                    None
                }
            })
            .collect()
    }

    /// Bring the override layer in line with storage. Returns how many
    /// overrides were applied.
    pub fn reconcile(&mut self) -> usize {
        let mut applied = BTreeMap::new();
        for (key, definition) in self.load_all_overrides() {
            if self.catalog.contains(&key) {
                applied.insert(key, definition);
            } else {
                log::warn!("ignoring saved template for unknown key '{}'", key);
            }
        }
        log::debug!("applied {} saved template override(s)", applied.len());
        self.overrides = applied;
        self.overrides.len()
    }

    fn layer(&self, source: TemplateSource, key: &str) -> Option<&TemplateDefinition> {
        match source {
            TemplateSource::Session => self.session.get(key),
            TemplateSource::Override => self.overrides.get(key),
            TemplateSource::Builtin => self.catalog.get(key).map(|entry| &entry.definition),
        }
    }

    fn source_of(&self, key: &str) -> Option<(TemplateSource, &TemplateDefinition)> {
        if !self.catalog.contains(key) {
            return None;
        }
        TemplateSource::CHAIN
            .iter()
            .find_map(|source| self.layer(*source, key).map(|d| (*source, d)))
    }

    pub fn resolve(&self, key: &str) -> Result<ResolvedTemplate> {
        let (source, definition) = self
            .source_of(key)
            .ok_or_else(|| DocketError::TemplateNotFound(key.to_string()))?;
        log::debug!("template '{}' resolved from {} layer", key, source);
        Ok(ResolvedTemplate {
            key: key.to_string(),
            name: self.catalog.name_of(key).unwrap_or(key).to_string(),
            source,
            definition: definition.clone(),
        })
    }

    pub fn get_effective(&self, key: &str) -> Result<TemplateDefinition> {
        self.resolve(key).map(|resolved| resolved.definition)
    }

    /// Replace the override for `key` wholesale.
    ///
    /// The session layer is updated first; an `Err` means the definition is
    /// in effect for this process but did not reach storage.
    pub fn save(&mut self, key: &str, definition: TemplateDefinition) -> Result<()> {
        if !self.catalog.contains(key) {
            return Err(DocketError::TemplateNotFound(key.to_string()));
        }
        let value = serde_json::to_value(&definition)?;
        self.session.insert(key.to_string(), definition);

        let backend = self.backend.as_ref();
        let mut saved: Map<String, Value> = read_json(backend, TEMPLATES_KEY)?.unwrap_or_default();
        saved.insert(key.to_string(), value);
        write_json(backend, TEMPLATES_KEY, &saved)?;

        log::debug!("saved template '{}' to {}", key, backend.location(TEMPLATES_KEY));
        Ok(())
    }

    /// Every catalog template, in catalog order.
    pub fn list(&self) -> Vec<TemplateSummary> {
        self.catalog
            .entries()
            .iter()
            .filter_map(|entry| {
                let (source, definition) = self.source_of(&entry.key)?;
                Some(TemplateSummary {
                    key: entry.key.clone(),
                    name: entry.name.clone(),
                    source,
                    field_count: definition.fields.len(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, FieldKind};
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    fn store() -> (Rc<MemBackend>, TemplateStore<MemBackend>) {
        let backend = Rc::new(MemBackend::new());
        let store = TemplateStore::new(backend.clone(), TemplateCatalog::builtin().unwrap());
        (backend, store)
    }

    fn custom(name: &str) -> TemplateDefinition {
        TemplateDefinition::new(
            name,
            vec![Field::new(Some("order_number"), FieldKind::Text(None))],
        )
    }

    #[test]
    fn builtin_is_effective_without_overrides() {
        let (_, mut store) = store();
        assert_eq!(store.reconcile(), 0);

        let resolved = store.resolve("templateOne").unwrap();
        assert_eq!(resolved.source, TemplateSource::Builtin);
        assert_eq!(resolved.name, "Cleaning Checklist");
        assert_eq!(
            resolved.definition,
            store.catalog().get("templateOne").unwrap().definition
        );
    }

    #[test]
    fn unknown_key_is_not_found() {
        let (_, store) = store();
        assert!(matches!(
            store.get_effective("templateNine"),
            Err(DocketError::TemplateNotFound(ref k)) if k == "templateNine"
        ));
    }

    #[test]
    fn save_then_get_returns_saved_definition() {
        let (backend, mut store) = store();
        store.save("templateTwo", custom("Mine")).unwrap();

        assert_eq!(store.get_effective("templateTwo").unwrap(), custom("Mine"));
        assert_eq!(store.resolve("templateTwo").unwrap().source, TemplateSource::Session);

        let raw: Value = serde_json::from_str(&backend.raw(TEMPLATES_KEY).unwrap()).unwrap();
        assert_eq!(raw["templateTwo"]["name"], json!("Mine"));
    }

    #[test]
    fn saved_override_survives_restart() {
        let (backend, mut store) = store();
        store.save("templateTwo", custom("Mine")).unwrap();

        let mut reopened = TemplateStore::new(backend, TemplateCatalog::builtin().unwrap());
        assert_eq!(reopened.reconcile(), 1);

        let resolved = reopened.resolve("templateTwo").unwrap();
        assert_eq!(resolved.source, TemplateSource::Override);
        assert_eq!(resolved.definition, custom("Mine"));
    }

    #[test]
    fn failed_persist_is_visible_in_session_only() {
        let (backend, mut store) = store();
        backend.set_simulate_write_error(true);

        assert!(store.save("templateOne", custom("Unsaved")).is_err());
        assert_eq!(store.get_effective("templateOne").unwrap(), custom("Unsaved"));

        backend.set_simulate_write_error(false);
        let mut reopened = TemplateStore::new(backend, TemplateCatalog::builtin().unwrap());
        reopened.reconcile();
        assert_eq!(reopened.resolve("templateOne").unwrap().source, TemplateSource::Builtin);
    }

    #[test]
    fn save_keeps_other_overrides() {
        let (backend, mut store) = store();
        store.save("templateOne", custom("One")).unwrap();
        store.save("templateTwo", custom("Two")).unwrap();

        let overrides = store.load_all_overrides();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["templateOne"], custom("One"));
        assert!(backend.raw(TEMPLATES_KEY).is_some());
    }

    #[test]
    fn save_refuses_unknown_key() {
        let (backend, mut store) = store();
        assert!(matches!(
            store.save("nope", custom("x")),
            Err(DocketError::TemplateNotFound(_))
        ));
        assert!(backend.raw(TEMPLATES_KEY).is_none());
    }

    #[test]
    fn corrupt_blob_means_no_overrides() {
        let (backend, mut store) = store();
        backend.insert_raw(TEMPLATES_KEY, "{{{ definitely not json");

        assert_eq!(store.reconcile(), 0);
        assert_eq!(store.resolve("templateOne").unwrap().source, TemplateSource::Builtin);
    }

    #[test]
    fn corrupt_entry_does_not_hide_siblings() {
        let (backend, mut store) = store();
        let blob = json!({
            "templateOne": {"name": "Good", "fields": []},
            "templateTwo": {"fields": "not a list"}
        });
        backend.insert_raw(TEMPLATES_KEY, &blob.to_string());

        assert_eq!(store.reconcile(), 1);
        assert_eq!(store.resolve("templateOne").unwrap().source, TemplateSource::Override);
        assert_eq!(store.resolve("templateTwo").unwrap().source, TemplateSource::Builtin);
    }

    #[test]
    fn save_over_corrupt_blob_writes_nothing() {
        let (backend, mut store) = store();
        backend.insert_raw(TEMPLATES_KEY, "not json");

        assert!(matches!(
            store.save("templateOne", custom("x")),
            Err(DocketError::StorageCorrupt { .. })
        ));
        assert_eq!(backend.raw(TEMPLATES_KEY).as_deref(), Some("not json"));
        // Still in effect for this session
        assert_eq!(store.get_effective("templateOne").unwrap(), custom("x"));
    }

    #[test]
    fn reconcile_ignores_unknown_keys() {
        let (backend, mut store) = store();
        backend.insert_raw(
            TEMPLATES_KEY,
            &json!({"legacyTemplate": {"fields": []}}).to_string(),
        );
        assert_eq!(store.reconcile(), 0);
        assert!(store.get_effective("legacyTemplate").is_err());
    }

    #[test]
    fn unreadable_storage_falls_back_to_builtin() {
        let (backend, mut store) = store();
        store.save("templateOne", custom("x")).unwrap();
        backend.set_simulate_read_error(true);

        let mut reopened = TemplateStore::new(backend, TemplateCatalog::builtin().unwrap());
        assert_eq!(reopened.reconcile(), 0);
        assert_eq!(reopened.resolve("templateOne").unwrap().source, TemplateSource::Builtin);
    }

    #[test]
    fn list_reports_sources_in_catalog_order() {
        let (_, mut store) = store();
        store.save("templateThree", custom("Three")).unwrap();

        let list = store.list();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].key, "packingInstructions");
        assert_eq!(list[0].source, TemplateSource::Builtin);
        assert_eq!(list[3].key, "templateThree");
        assert_eq!(list[3].source, TemplateSource::Session);
        assert_eq!(list[3].field_count, 1);
        assert_eq!(list[3].name, "Fire Pump Inspection");
    }
}
