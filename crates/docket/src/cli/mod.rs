//! # CLI Behavior
//!
//! This is **one client** of docketapp, standing in for the browser shell that
//! renders documents visually. The CLI is the only place that knows about
//! terminal I/O, exit codes and output formatting.
//!
//! ## Commands
//!
//! - `docket templates list|show|save|fields`
//! - `docket orders list|view|place|delete|export`
//! - `docket upload <file>`
//!
//! Documents are printed as pretty JSON, the same shape a renderer receives.
//! `orders place` reads its business values from `--values <file>`, a JSON
//! object whose arrays of objects fill table fields.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API
//! - `render`: Output formatting (lists, messages, documents)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

use anyhow::Result;
use clap::Parser;
use commands::{dispatch, AppContext};
use docketapp::init::initialize;
use env_logger::Env;
use setup::Cli;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let docket = initialize(cli.data)?;
    log::debug!("config: {:?}", docket.config);

    let mut ctx = AppContext { api: docket.api };
    dispatch(&mut ctx, cli.command)
}
