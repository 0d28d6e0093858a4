use docketapp::store::backend::{StorageBackend, ORDERS_KEY, TEMPLATES_KEY};
use docketapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_fs_backend_missing_key_is_none() {
    let (_dir, backend) = setup();
    assert_eq!(backend.read(ORDERS_KEY).unwrap(), None);
}

#[test]
fn test_fs_backend_write_creates_root_and_reads_back() {
    let (dir, backend) = setup();
    backend.write(TEMPLATES_KEY, "{}").unwrap();

    let expected = dir.path().join("data").join("savedTemplates.json");
    assert!(expected.exists());
    assert_eq!(backend.read(TEMPLATES_KEY).unwrap().as_deref(), Some("{}"));
    assert_eq!(backend.location(TEMPLATES_KEY), expected.display().to_string());
}

#[test]
fn test_fs_backend_overwrite_leaves_no_temp_files() {
    let (_dir, backend) = setup();
    backend.write(ORDERS_KEY, "[]").unwrap();
    backend.write(ORDERS_KEY, "[1]").unwrap();

    assert_eq!(backend.read(ORDERS_KEY).unwrap().as_deref(), Some("[1]"));
    let leftovers: Vec<_> = fs::read_dir(backend.root())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_fs_backend_keys_are_separate_files() {
    let (_dir, backend) = setup();
    backend.write(ORDERS_KEY, "[]").unwrap();
    backend.write(TEMPLATES_KEY, "{}").unwrap();

    let mut names: Vec<String> = fs::read_dir(backend.root())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["orders.json", "savedTemplates.json"]);
}
