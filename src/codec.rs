//! Record codec: load/serialize asset YAML (spec §4.2).
//!
//! Exact comment and scalar-style preservation would need a YAML editor in
//! the shape of `toml_edit` (the teacher's choice for its own config files);
//! no such crate appears anywhere in the retrieved corpus for YAML, so this
//! codec preserves what `serde_yaml_ng`'s `Mapping` gives for free — key
//! insertion order, via its `indexmap` backing — and documents the rest as a
//! known limitation (see DESIGN.md).

use std::fs;
use std::path::Path;

use crate::dotmap::{DotMap, Mapping, Value};
use crate::error::OnyoError;

/// Top-level keys that must never reach an asset's serialized YAML, beyond
/// the `onyo.*` pseudo-key namespace (spec §3, §4.2).
const RESERVED_TOP_LEVEL_KEYS: &[&str] = &["path", "directory", "is_asset_directory", "template"];

pub fn load_asset(path: &Path) -> Result<DotMap, OnyoError> {
    let text = fs::read_to_string(path)
        .map_err(|e| OnyoError::InvalidAsset(format!("cannot read '{}': {e}", path.display())))?;
    load_asset_str(&text, path)
}

pub fn load_asset_str(text: &str, path: &Path) -> Result<DotMap, OnyoError> {
    if text.trim().is_empty() {
        return Ok(DotMap::new());
    }
    let value: Value = serde_yaml_ng::from_str(text)
        .map_err(|e| OnyoError::InvalidAsset(format!("'{}': {e}", path.display())))?;
    match value {
        Value::Mapping(m) => Ok(DotMap::from_mapping(m)),
        Value::Null => Ok(DotMap::new()),
        _ => Err(OnyoError::InvalidAsset(format!(
            "'{}' does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Render `content` as asset YAML, stripping reserved/pseudo keys.
pub fn serialize(content: &DotMap) -> String {
    let mut cleaned = Mapping::new();
    for (k, v) in content.as_mapping() {
        if let Value::String(key) = k {
            if key.starts_with("onyo.") || RESERVED_TOP_LEVEL_KEYS.contains(&key.as_str()) {
                continue;
            }
        }
        cleaned.insert(k.clone(), v.clone());
    }

    if cleaned.is_empty() {
        return "---\n".to_string();
    }

    let body = serde_yaml_ng::to_string(&Value::Mapping(cleaned)).unwrap_or_default();
    let body = body.strip_prefix("---\n").unwrap_or(&body);
    format!("---\n{body}")
}

pub fn write_asset(path: &Path, content: &DotMap) -> Result<(), OnyoError> {
    fs::write(path, serialize(content))
        .map_err(|e| OnyoError::Io(format!("cannot write '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_serializes_to_bare_marker() {
        assert_eq!(serialize(&DotMap::new()), "---\n");
    }

    #[test]
    fn reserved_keys_are_stripped() {
        let mut d = DotMap::new();
        d.set("type", Value::from("laptop")).unwrap();
        d.set("path", Value::from("/tmp/x")).unwrap();
        let out = serialize(&d);
        assert!(out.contains("type: laptop"));
        assert!(!out.contains("path:"));
    }

    #[test]
    fn nested_empty_mapping_preserved_as_flow_map() {
        let mut d = DotMap::new();
        d.set("extra", Value::Mapping(Mapping::new())).unwrap();
        let out = serialize(&d);
        assert!(out.contains("extra: {}"));
    }

    #[test]
    fn round_trip_preserves_key_order() {
        let mut d = DotMap::new();
        d.set("zeta", Value::from(1)).unwrap();
        d.set("alpha", Value::from(2)).unwrap();
        let out = serialize(&d);
        let zeta_pos = out.find("zeta").unwrap();
        let alpha_pos = out.find("alpha").unwrap();
        assert!(zeta_pos < alpha_pos);
    }

    #[test]
    fn invalid_yaml_is_invalid_asset_error() {
        let err = load_asset_str("- not\n  a: mapping\nyo", Path::new("x.yaml"));
        assert!(err.is_err());
    }
}
