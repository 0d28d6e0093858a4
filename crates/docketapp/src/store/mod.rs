//! # Storage Layer
//!
//! Docket persists two keyed JSON blobs through a [`backend::StorageBackend`]:
//!
//! ```text
//! <data_dir>/
//! ├── savedTemplates.json   # { "<templateKey>": <TemplateDefinition>, ... }
//! ├── orders.json           # [ <OrderRecord>, ... ]  (seed order never stored)
//! └── docket.toml           # configuration, see crate::config
//! ```
//!
//! Two stores sit on top of one shared backend (`Rc<B>`):
//!
//! - [`template_store::TemplateStore`]: overlays saved overrides on the
//!   built-in catalog.
//! - [`order_store::OrderStore`]: the placed orders, with the synthetic seed
//!   order always listed first.
//!
//! [`docket_store::DocketStore`] bundles both with the injector and the
//! static seed values; it is what commands operate on.
//!
//! ## Failure Policy
//!
//! Reads degrade, writes report:
//!
//! - A blob that cannot be read or parsed on a *read path* is treated as
//!   empty and logged. One bad entry inside a blob is skipped; its siblings
//!   still load.
//! - On a *write path* (read-modify-write), a blob that is corrupt as a
//!   whole aborts the operation with [`DocketError::StorageCorrupt`] and
//!   nothing is written. Entries that merely fail to parse are carried over
//!   untouched.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key, atomic temp + rename.
//! - [`mem_backend::MemBackend`]: `RefCell` map with error simulation, for tests.

use crate::error::{DocketError, Result};
use backend::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod backend;
pub mod docket_store;
pub mod fs_backend;
#[cfg(any(test, feature = "test_utils"))]
pub mod mem_backend;
pub mod order_store;
pub mod template_store;

/// Read and parse a blob. Missing blobs are `Ok(None)`; a blob that does not
/// parse as `T` is [`DocketError::StorageCorrupt`].
pub(crate) fn read_json<B, T>(backend: &B, key: &str) -> Result<Option<T>>
where
    B: StorageBackend + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = backend.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DocketError::StorageCorrupt {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Like [`read_json`], but any failure reads as the default value.
pub(crate) fn read_json_lenient<B, T>(backend: &B, key: &str) -> T
where
    B: StorageBackend + ?Sized,
    T: DeserializeOwned + Default,
{
    match read_json(backend, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring {}: {}", backend.location(key), e);
            T::default()
        }
    }
}

pub(crate) fn write_json<B, T>(backend: &B, key: &str, value: &T) -> Result<()>
where
    B: StorageBackend + ?Sized,
    T: Serialize + ?Sized,
{
    let content = serde_json::to_string_pretty(value)?;
    backend.write(key, &content)
}
