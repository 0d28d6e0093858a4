//! # Edit Sessions
//!
//! The builder side of docket: one template open for editing. The renderer
//! reports every edit as `(change_log, updated_document)`; the updated
//! document replaces the working copy wholesale and the change log is only
//! counted for diagnostics. Nothing reaches the [`TemplateStore`] until
//! [`EditSession::save`].

use crate::error::Result;
use crate::model::TemplateDefinition;
use crate::store::backend::StorageBackend;
use crate::store::template_store::{TemplateSource, TemplateStore};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct EditSession {
    key: String,
    name: String,
    source: TemplateSource,
    baseline: TemplateDefinition,
    working: TemplateDefinition,
    changes: usize,
}

impl EditSession {
    /// Open the effective definition of `key`.
    pub fn open<B: StorageBackend>(store: &TemplateStore<B>, key: &str) -> Result<Self> {
        let resolved = store.resolve(key)?;
        Ok(Self {
            key: resolved.key,
            name: resolved.name,
            source: resolved.source,
            baseline: resolved.definition.clone(),
            working: resolved.definition,
            changes: 0,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layer the session was opened from.
    pub fn source(&self) -> TemplateSource {
        self.source
    }

    pub fn document(&self) -> &TemplateDefinition {
        &self.working
    }

    /// Number of change events received since open or the last save.
    pub fn changes(&self) -> usize {
        self.changes
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.baseline
    }

    pub fn apply_change(&mut self, change_log: &Value, updated: TemplateDefinition) {
        let entries = change_log.as_array().map_or(1, Vec::len);
        log::debug!(
            "template '{}' changed ({} change log entries)",
            self.key,
            entries
        );
        self.working = updated;
        self.changes += 1;
    }

    /// Hand the working copy to the store. The store applies it to its
    /// session layer even when persisting fails.
    pub fn save<B: StorageBackend>(&mut self, store: &mut TemplateStore<B>) -> Result<()> {
        store.save(&self.key, self.working.clone())?;
        self.baseline = self.working.clone();
        self.source = TemplateSource::Session;
        self.changes = 0;
        Ok(())
    }
}
