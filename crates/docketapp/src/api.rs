//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients. It dispatches to `commands/*.rs`, normalizes
//! inputs (raw JSON documents and value maps) and returns `Result<CmdResult>`.
//! Business logic stays in the commands; presentation stays in the client.
//!
//! `DocketApi<B>` is generic over the storage backend:
//! - Production: `DocketApi<FsBackend>`
//! - Testing: `DocketApi<MemBackend>`
//!
//! API tests check dispatch and input handling, not command logic.

use crate::commands;
use crate::config::DocketConfig;
use crate::error::{DocketError, Result};
use crate::model::{BusinessValue, TemplateDefinition, ValueMap};
use crate::session::EditSession;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use commands::{CmdMessage, CmdResult, MessageLevel};

pub struct DocketApi<B: StorageBackend> {
    store: DocketStore<B>,
    config: DocketConfig,
    data_dir: PathBuf,
}

impl<B: StorageBackend> DocketApi<B> {
    pub fn new(store: DocketStore<B>, config: DocketConfig, data_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            data_dir,
        }
    }

    pub fn list_templates(&self) -> Result<CmdResult> {
        commands::templates::list(&self.store)
    }

    pub fn show_template(&self, key: &str) -> Result<CmdResult> {
        commands::templates::show(&self.store, key)
    }

    pub fn save_template(&mut self, key: &str, definition: TemplateDefinition) -> Result<CmdResult> {
        commands::templates::save(&mut self.store, key, definition)
    }

    /// Save a template given as raw JSON text.
    pub fn save_template_json(&mut self, key: &str, raw: &str) -> Result<CmdResult> {
        let definition: TemplateDefinition = serde_json::from_str(raw)
            .map_err(|e| DocketError::Api(format!("Invalid template document: {}", e)))?;
        self.save_template(key, definition)
    }

    pub fn open_session(&self, key: &str) -> Result<EditSession> {
        EditSession::open(&self.store.templates, key)
    }

    pub fn save_session(&mut self, session: &mut EditSession) -> Result<()> {
        session.save(&mut self.store.templates)
    }

    pub fn field_options(&self) -> Result<CmdResult> {
        commands::fields::run(&self.store)
    }

    pub fn list_orders(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_order(&self, order_number: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, order_number)
    }

    pub fn place_order(
        &self,
        template_key: &str,
        order_number: &str,
        values: &ValueMap,
    ) -> Result<CmdResult> {
        commands::place::run(&self.store, template_key, order_number, values)
    }

    /// Place an order with values given as a raw JSON object.
    pub fn place_order_json(
        &self,
        template_key: &str,
        order_number: &str,
        raw_values: &str,
    ) -> Result<CmdResult> {
        let values = parse_values(raw_values)?;
        self.place_order(template_key, order_number, &values)
    }

    pub fn delete_order(&self, order_number: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, order_number)
    }

    /// Export to `out`, else the configured export dir, else `cwd`.
    pub fn export_order(&self, order_number: &str, out: Option<&Path>, cwd: &Path) -> Result<CmdResult> {
        let out_dir = self.config.export_dir_or(out, cwd);
        commands::export::run(&self.store, &self.config, order_number, &out_dir)
    }

    pub fn upload(&self, path: &Path) -> Result<CmdResult> {
        commands::upload::run(path)
    }

    pub fn config(&self) -> &DocketConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> &DocketStore<B> {
        &self.store
    }
}

/// Business values from a JSON object. Arrays of objects become table records.
pub fn parse_values(raw: &str) -> Result<ValueMap> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| DocketError::Api(format!("Invalid values document: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, BusinessValue::from(value)))
            .collect()),
        other => Err(DocketError::Api(format!(
            "Values must be a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
