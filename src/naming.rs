//! Asset filename rendering from `onyo.assets.name-format` (spec §4.9.1).
//!
//! A format string is a sequence of `{key}` placeholders interleaved with
//! literal text, e.g. `{type}_{make}_{model}.{serial_number}`. A missing
//! key renders as an empty placeholder segment. Rendering is a pure
//! function of `content`: faux-serial substitution happens once, up front,
//! in `Inventory::add_asset`, so the same content always renders the same
//! name here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dotmap::DotMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_.]+)\}").unwrap());

/// Render `format` against `content`.
pub fn render(format: &str, content: &DotMap) -> String {
    PLACEHOLDER
        .replace_all(format, |caps: &regex::Captures| match content.get_cloned(&caps[1]) {
            Ok(Some(value)) => stringify(&value),
            _ => String::new(),
        })
        .into_owned()
}

fn stringify(value: &crate::dotmap::Value) -> String {
    use crate::dotmap::Value;
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => serde_yaml_ng::to_string(other).unwrap_or_default().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotmap::Value;

    #[test]
    fn renders_literal_fields() {
        let mut d = DotMap::new();
        d.set("type", Value::from("laptop")).unwrap();
        d.set("make", Value::from("lenovo")).unwrap();
        d.set("model", Value::from("t14")).unwrap();
        d.set("serial_number", Value::from("abc123")).unwrap();
        assert_eq!(render("{type}_{make}_{model}.{serial_number}", &d), "laptop_lenovo_t14.abc123");
    }

    #[test]
    fn missing_key_renders_as_empty_segment() {
        let d = DotMap::new();
        assert_eq!(render("{serial_number}", &d), "");
    }

    #[test]
    fn renders_substituted_faux_serial_like_any_other_value() {
        let mut d = DotMap::new();
        d.set("serial_number", Value::from("fauxAb12Cd")).unwrap();
        assert_eq!(render("{serial_number}", &d), "fauxAb12Cd");
    }
}
