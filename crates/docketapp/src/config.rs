//! # Configuration
//!
//! Docket configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `DOCKET__THEME`, `DOCKET__PAGE_WIDTH`, ...
//! 2. **Data dir config**: `<data_dir>/docket.toml`.
//! 3. **Compiled defaults**: built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `theme` | `light` | Theme token passed to the renderer on export |
//! | `page_width` | `830` | Target page width in pixels for exported renders |
//! | `export_dir` | *(cwd)* | Where `orders export` writes when `--out` is absent |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "docket.toml";

const DEFAULT_THEME: &str = "light";
const DEFAULT_PAGE_WIDTH: u32 = 830;

/// Configuration for docket, stored in `docket.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocketConfig {
    /// Renderer theme token ("light", "dark", ...)
    #[config(default = "light")]
    pub theme: String,

    /// Page width in pixels the exported render is laid out for.
    #[config(default = 830)]
    pub page_width: u32,

    /// Default output directory for exports.
    pub export_dir: Option<PathBuf>,
}

impl Default for DocketConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            page_width: DEFAULT_PAGE_WIDTH,
            export_dir: None,
        }
    }
}

impl DocketConfig {
    /// Export directory: explicit `out`, else the configured one, else `fallback`.
    pub fn export_dir_or(&self, out: Option<&Path>, fallback: &Path) -> PathBuf {
        out.map(Path::to_path_buf)
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    /// Blank theme tokens fall back to the default.
    pub fn theme(&self) -> &str {
        let theme = self.theme.trim();
        if theme.is_empty() {
            DEFAULT_THEME
        } else {
            theme
        }
    }
}
