//! Export hands an order to the external rasterizer. Docket does not render;
//! it writes the render request the rasterizer needs:
//!
//! ```json
//! { "orderNumber": "PKG-001", "mode": "readonly", "theme": "light", "pageWidth": 830, "document": { ... } }
//! ```
//!
//! to `order-<orderNumber>.json` in the output directory. Layout travels
//! inside the document (`files[].pages[].fieldPositions`); fields without a
//! position are not drawn by the rasterizer.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocketConfig;
use crate::error::{DocketError, Result};
use crate::model::TemplateDefinition;
use crate::store::backend::StorageBackend;
use crate::store::docket_store::DocketStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const READONLY_MODE: &str = "readonly";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub order_number: String,
    pub mode: String,
    pub theme: String,
    pub page_width: u32,
    pub document: TemplateDefinition,
}

/// `order-<n>.json`, with characters that would escape the directory replaced.
pub fn artifact_name(order_number: &str) -> String {
    let safe: String = order_number
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            c => c,
        })
        .collect();
    format!("order-{}.json", safe)
}

pub fn run<B: StorageBackend>(
    store: &DocketStore<B>,
    config: &DocketConfig,
    order_number: &str,
    out_dir: &Path,
) -> Result<CmdResult> {
    let resolved = store.resolver().get_by_number(order_number)?;
    let request = RenderRequest {
        order_number: resolved.record.order_number.clone(),
        mode: READONLY_MODE.to_string(),
        theme: config.theme().to_string(),
        page_width: config.page_width,
        document: resolved.document,
    };

    let content = serde_json::to_string_pretty(&request)?;
    let path = out_dir.join(artifact_name(&request.order_number));
    fs::create_dir_all(out_dir)
        .and_then(|_| fs::write(&path, content))
        .map_err(|e| DocketError::Export(format!("{}: {}", path.display(), e)))?;

    let mut result = CmdResult::default().with_paths(vec![path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Exported order {} to {}",
        request.order_number,
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::place;
    use crate::model::{ValueMap, SEED_ORDER_NUMBER};
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn read_request(path: &Path) -> RenderRequest {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_render_request_for_seed() {
        let store = DocketStore::open(MemBackend::new()).unwrap();
        let dir = tempdir().unwrap();

        let result = run(&store, &DocketConfig::default(), SEED_ORDER_NUMBER, dir.path()).unwrap();

        let path = &result.paths[0];
        assert_eq!(path.file_name().unwrap(), "order-PKG-001.json");
        let request = read_request(path);
        assert_eq!(request.mode, "readonly");
        assert_eq!(request.theme, "light");
        assert_eq!(request.page_width, 830);
        assert!(request.document.field("product_list").is_some());
    }

    #[test]
    fn uses_configured_theme_and_width() {
        let store = DocketStore::open(MemBackend::new()).unwrap();
        place::run(&store, "templateTwo", "ORD-9", &ValueMap::new()).unwrap();
        let dir = tempdir().unwrap();
        let config = DocketConfig {
            theme: "dark".to_string(),
            page_width: 1200,
            ..Default::default()
        };

        let out = dir.path().join("nested");
        let result = run(&store, &config, "ORD-9", &out).unwrap();

        let request = read_request(&result.paths[0]);
        assert_eq!(request.theme, "dark");
        assert_eq!(request.page_width, 1200);
        assert_eq!(
            request.document,
            store.orders.find("ORD-9").unwrap().document.unwrap()
        );
    }

    #[test]
    fn unknown_order_writes_nothing() {
        let store = DocketStore::open(MemBackend::new()).unwrap();
        let dir = tempdir().unwrap();
        assert!(run(&store, &DocketConfig::default(), "nope", dir.path()).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn artifact_name_stays_in_directory() {
        assert_eq!(artifact_name("A/B\\C"), "order-A-B-C.json");
        assert_eq!(artifact_name("1042"), "order-1042.json");
    }
}
