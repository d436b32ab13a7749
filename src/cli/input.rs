use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read a draft from a `.json`, `.yaml` or `.yml` file
pub fn load_draft<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_draft(path, &raw)
}

pub fn parse_draft<T: DeserializeOwned>(path: &Path, raw: &str) -> anyhow::Result<T> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(raw)
            .with_context(|| format!("Invalid YAML in {}", path.display())),
        _ => serde_json::from_str(raw)
            .with_context(|| format!("Invalid JSON in {}", path.display())),
    }
}

/// Raw file bytes, e.g. a course outline PDF
pub fn load_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
