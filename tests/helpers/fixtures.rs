//! Fixture files under `tests/fixtures/`.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct Fixture {
    pub path: PathBuf,
    pub text: String,
}

impl Fixture {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Every file with `extension` below `tests/fixtures/<dir>`, sorted by path
pub fn fixtures(dir: &str, extension: &str) -> Vec<Fixture> {
    let mut found: Vec<Fixture> = WalkDir::new(fixture_root().join(dir))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == extension))
        .map(|entry| Fixture {
            text: fs::read_to_string(entry.path()).unwrap(),
            path: entry.into_path(),
        })
        .collect();
    found.sort_by(|a, b| a.path.cmp(&b.path));
    assert!(!found.is_empty(), "no .{extension} fixtures in {dir}");
    found
}

pub fn sources() -> Vec<Fixture> {
    fixtures("sources", "cpp")
}

pub fn settings_files() -> Vec<Fixture> {
    fixtures("settings", "py")
}

pub fn fixture(dir: &str, name: &str) -> String {
    fs::read_to_string(fixture_root().join(dir).join(name)).unwrap()
}

/// A minimal program around a template expression
pub fn program(expression: &str) -> String {
    format!("DihuContext settings(argc, argv);\n  {expression} problem(settings);\n")
}
