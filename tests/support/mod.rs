#![allow(dead_code)]

use std::path::Path;

/// Write a text fixture, creating parent directories.
pub fn write_fixture(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dirs");
    }
    std::fs::write(path, contents).expect("write fixture");
}
