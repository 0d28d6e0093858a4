//! # Command Layer
//!
//! The business operations of docket, one submodule per command. Commands
//! take a [`DocketStore`](crate::store::docket_store::DocketStore) and plain
//! Rust arguments and return a [`CmdResult`].
//!
//! Commands do not print, prompt, parse arguments or pick exit codes; that is
//! the client's job. The only files a command touches directly are the ones
//! it exists to produce (export artifacts) or consume (uploads).
//!
//! ## Testing Strategy
//!
//! Most of the tests live here, running against `MemBackend` so no
//! filesystem is involved except where the command writes a file.
//!
//! ## Command Modules
//!
//! - [`templates`]: list, show and save template definitions
//! - [`fields`]: list the identifier options fields can bind to
//! - [`list`]: list orders, seed first
//! - [`view`]: resolve one order into its document
//! - [`place`]: inject values into a template and save the order
//! - [`delete`]: remove stored orders by number
//! - [`export`]: write the render request for an order
//! - [`upload`]: encode a local file as a data URL

use crate::field_options::IdentifierOption;
use crate::model::{OrderRecord, TemplateDefinition};
use crate::store::template_store::TemplateSummary;
use serde::Serialize;
use std::path::PathBuf;

pub mod delete;
pub mod export;
pub mod fields;
pub mod list;
pub mod place;
pub mod templates;
pub mod upload;
pub mod view;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub templates: Vec<TemplateSummary>,
    pub orders: Vec<OrderRecord>,
    /// Document to display (template definition or rendered order).
    pub document: Option<TemplateDefinition>,
    pub identifier_options: Vec<IdentifierOption>,
    pub paths: Vec<PathBuf>,
    pub data_url: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_templates(mut self, templates: Vec<TemplateSummary>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_orders(mut self, orders: Vec<OrderRecord>) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_document(mut self, document: TemplateDefinition) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }
}
