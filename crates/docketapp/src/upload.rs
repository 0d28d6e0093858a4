//! Local files as `data:` URLs, the value shape image and signature fields expect.

use crate::error::{DocketError, Result};
use base64::{engine::general_purpose, Engine as _};
use mime_guess::from_path;
use std::fs;
use std::path::Path;

pub fn data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Read `path` and encode it, guessing the media type from its extension.
pub fn data_url_from_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        DocketError::Api(format!("cannot read upload '{}': {}", path.display(), e))
    })?;
    let mime = from_path(path).first_or_octet_stream();
    Ok(data_url(&bytes, mime.as_ref()))
}
