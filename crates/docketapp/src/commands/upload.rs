use crate::commands::CmdResult;
use crate::error::Result;
use crate::upload::data_url_from_file;
use std::path::Path;

pub fn run(path: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.data_url = Some(data_url_from_file(path)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn returns_data_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sig.svg");
        fs::write(&path, "<svg/>").unwrap();

        let result = run(&path).unwrap();
        assert!(result.data_url.unwrap().starts_with("data:image/svg+xml;base64,"));
    }
}
