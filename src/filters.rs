//! Query filters: `KEY=VALUE`, `KEY!=VALUE`, and the type-tag vocabulary
//! (`<unset>`, `<null>`, `<empty>`, `<list>`, `<dict>`, `<bool>`, `<true>`,
//! `<false>`) used by `onyo get --match` (spec §4.7).

use regex::Regex;

use crate::dotmap::Value;
use crate::error::OnyoError;
use crate::item::Item;
use crate::repo::Repo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Equals(String),
    NotEquals(String),
    TypeTag(TypeTag),
    NotTypeTag(TypeTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeTag {
    Unset,
    Null,
    Empty,
    List,
    Dict,
    Bool,
    True,
    False,
}

impl TypeTag {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "<unset>" => TypeTag::Unset,
            "<null>" => TypeTag::Null,
            "<empty>" => TypeTag::Empty,
            "<list>" => TypeTag::List,
            "<dict>" => TypeTag::Dict,
            "<bool>" => TypeTag::Bool,
            "<true>" => TypeTag::True,
            "<false>" => TypeTag::False,
            _ => return None,
        })
    }

    fn matches(self, value: Option<&Value>) -> bool {
        match self {
            TypeTag::Unset => value.is_none(),
            TypeTag::Null => matches!(value, Some(Value::Null)),
            TypeTag::Empty => match value {
                Some(Value::Sequence(s)) => s.is_empty(),
                Some(Value::Mapping(m)) => m.is_empty(),
                Some(Value::String(s)) => s.is_empty(),
                _ => false,
            },
            TypeTag::List => matches!(value, Some(Value::Sequence(_))),
            TypeTag::Dict => matches!(value, Some(Value::Mapping(_))),
            TypeTag::Bool => matches!(value, Some(Value::Bool(_))),
            TypeTag::True => matches!(value, Some(Value::Bool(true))),
            TypeTag::False => matches!(value, Some(Value::Bool(false))),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<null>".to_string(),
        other => serde_yaml_ng::to_string(other).unwrap_or_default().trim().to_string(),
    }
}

/// `pattern` matches `text` if it's a regex that fully matches `text`, or
/// failing that (not a valid regex, or no full match) if it equals it literally.
fn text_matches(pattern: &str, text: &str) -> bool {
    if let Ok(re) = Regex::new(pattern) {
        if let Some(m) = re.find(text) {
            if m.start() == 0 && m.end() == text.len() {
                return true;
            }
        }
    }
    text == pattern
}

#[derive(Debug, Clone)]
pub struct Filter {
    key: String,
    matcher: Matcher,
}

impl Filter {
    /// Parse one `KEY=VALUE` / `KEY!=VALUE` term.
    pub fn parse(term: &str) -> Result<Self, OnyoError> {
        let (key, rest, negate) = if let Some((k, v)) = term.split_once("!=") {
            (k, v, true)
        } else if let Some((k, v)) = term.split_once('=') {
            (k, v, false)
        } else {
            return Err(OnyoError::InvalidFilter(format!(
                "'{term}' is not a KEY=VALUE or KEY!=VALUE filter"
            )));
        };
        if key.is_empty() {
            return Err(OnyoError::InvalidFilter(format!("'{term}' has an empty key")));
        }
        let matcher = match TypeTag::parse(rest) {
            Some(tag) if negate => Matcher::NotTypeTag(tag),
            Some(tag) => Matcher::TypeTag(tag),
            None if negate => Matcher::NotEquals(rest.to_string()),
            None => Matcher::Equals(rest.to_string()),
        };
        Ok(Self { key: key.to_string(), matcher })
    }

    pub fn matches(&self, item: &Item, repo: &Repo) -> bool {
        let value = item.get(&self.key, repo).ok().flatten();
        match &self.matcher {
            Matcher::Equals(v) => match &value {
                Some(val) => text_matches(v, &value_to_string(val)),
                None => false,
            },
            Matcher::NotEquals(v) => match &value {
                Some(val) => !text_matches(v, &value_to_string(val)),
                None => true,
            },
            Matcher::TypeTag(tag) => tag.matches(value.as_ref()),
            Matcher::NotTypeTag(tag) => !tag.matches(value.as_ref()),
        }
    }
}

/// A group of filters, ANDed together; multiple groups are ORed (spec §4.7).
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    groups: Vec<Vec<Filter>>,
}

impl FilterSet {
    pub fn new(groups: Vec<Vec<Filter>>) -> Self {
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn matches(&self, item: &Item, repo: &Repo) -> bool {
        if self.groups.is_empty() {
            return true;
        }
        self.groups
            .iter()
            .any(|group| group.iter().all(|f| f.matches(item, repo)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotmap::DotMap;
    use crate::repo::Repo;

    fn item_with(key: &str, value: Value) -> Item {
        let mut d = DotMap::new();
        d.set(key, value).unwrap();
        Item::from_content(d)
    }

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn parses_equals_and_not_equals() {
        assert!(matches!(Filter::parse("type=laptop").unwrap().matcher, Matcher::Equals(_)));
        assert!(matches!(Filter::parse("type!=laptop").unwrap().matcher, Matcher::NotEquals(_)));
    }

    #[test]
    fn missing_operator_is_invalid() {
        assert!(Filter::parse("justakey").is_err());
    }

    #[test]
    fn type_tag_unset_matches_missing_key() {
        let tag = TypeTag::Unset;
        assert!(tag.matches(None));
        assert!(!tag.matches(Some(&Value::from(1))));
    }

    #[test]
    fn equals_matches_via_regex_fullmatch() {
        let (_dir, repo) = test_repo();
        let item = item_with("name", Value::from("laptop"));
        let filter = Filter::parse("name=lap.*").unwrap();
        assert!(filter.matches(&item, &repo));
    }

    #[test]
    fn equals_still_matches_literal_value() {
        let (_dir, repo) = test_repo();
        let item = item_with("name", Value::from("laptop"));
        let filter = Filter::parse("name=laptop").unwrap();
        assert!(filter.matches(&item, &repo));
    }

    #[test]
    fn not_equals_rejects_regex_match() {
        let (_dir, repo) = test_repo();
        let item = item_with("name", Value::from("laptop"));
        let filter = Filter::parse("name!=lap.*").unwrap();
        assert!(!filter.matches(&item, &repo));
    }
}
