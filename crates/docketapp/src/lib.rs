//! # Docket Architecture
//!
//! Docket fills document templates with business values and keeps the
//! resulting orders. It is a **UI-agnostic library**; the `docket` binary is
//! one client of it, standing in for a browser shell that embeds a visual
//! form renderer.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the docket CLI, or any other UI)                   │
//! │  - Parses arguments, formats output, owns stdout and exit   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses raw JSON inputs        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business operations, returns CmdResult                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - store/: template layers + orders over a StorageBackend   │
//! │  - inject/: value injection and table materialization       │
//! │  - resolver.rs: order number → document                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rendering an Order
//!
//! ```text
//! OrderResolver ──► TemplateStore (effective definition)
//!       │                 + StaticValues (seed only)
//!       ▼
//!   Injector ──► per table field: ColumnResolver → materialize
//!       │
//!       ▼
//!   document handed to the renderer, or written by `export`
//! ```
//!
//! Stored orders skip all of this: their document was frozen when placed.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Inside the library nothing writes to stdout/stderr or exits the process.
//! Diagnostics go through the `log` facade; the client decides whether and
//! where they are shown.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage backends, template and order stores
//! - [`inject`]: Value injection, column resolution, table materialization
//! - [`resolver`]: Order lookup and seed document construction
//! - [`session`]: Template editing sessions
//! - [`model`]: Documents, fields, tables, orders, business values
//! - [`catalog`]: Built-in templates and seed values
//! - [`field_options`]: Field option palette and table schemas
//! - [`ids`]: Row and record id generation
//! - [`upload`]: Files as data URLs
//! - [`config`]: Configuration management
//! - [`init`]: Data directory, config and store setup
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod field_options;
pub mod ids;
pub mod init;
pub mod inject;
pub mod model;
pub mod resolver;
pub mod session;
pub mod store;
pub mod upload;

#[cfg(test)]
pub mod test_utils;
