#![allow(dead_code)]

pub mod architecture;

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a `.toml` file removed when the handle drops.
pub fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("rapvalue-config-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
