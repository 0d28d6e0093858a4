//! # Docket CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/docketapp/`: UI-agnostic library (templates, injection, orders)
//! - `crates/docket/`: this CLI, one client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/docket/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Command dispatch (commands.rs)                           │
//! │  - Terminal output (render.rs)                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/docketapp/src/api.rs)                    │
//! │  - Parses raw JSON inputs, dispatches to commands           │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything that touches stdout, stderr or the exit code happens here.
//! Library diagnostics arrive through `log` and are printed by `env_logger`
//! on stderr (`-v` for debug, or `RUST_LOG`).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
