use std::path::PathBuf;

use assert_cmd::cmd::Command;

#[allow(dead_code)]
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(3);

pub fn make_cli() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).expect("Failed to find binary")
}

#[allow(dead_code)]
pub fn college_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../testdata/college")
}

#[allow(dead_code)]
pub fn college_file(table: &str) -> PathBuf {
    college_dir().join(format!("{table}.csv"))
}
