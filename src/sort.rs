//! Natural-order sorting for `onyo get --sort-ascending/--sort-descending` (spec §4.7).

use std::cmp::Ordering;

use crate::dotmap::Value;
use crate::item::Item;
use crate::repo::Repo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct SortKey {
    pub key: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn sort(&self, items: &mut [Item], repo: &Repo) {
        items.sort_by(|a, b| self.compare(a, b, repo));
    }

    fn compare(&self, a: &Item, b: &Item, repo: &Repo) -> Ordering {
        for key in &self.keys {
            let va = a.get(&key.key, repo).ok().flatten();
            let vb = b.get(&key.key, repo).ok().flatten();
            // Direction only reverses the ordering between two concrete values;
            // `<unset>` sorts last unconditionally, so it must never be reversed.
            let ord = match (&va, &vb) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => {
                    let ord = compare_present(a, b);
                    match key.direction {
                        Direction::Ascending => ord,
                        Direction::Descending => ord.reverse(),
                    }
                }
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// `<unset>` (missing key) sorts after every concrete value, regardless of direction.
#[cfg(test)]
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => natord::compare(a, b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .unwrap_or_default()
            .partial_cmp(&b.as_f64().unwrap_or_default())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => natord::compare(&render(a), &render(b)),
    }
}

fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        _ => serde_yaml_ng::to_string(v).unwrap_or_default().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_sorts_last_ascending_and_descending() {
        assert_eq!(compare_values(None, Some(&Value::from(1))), Ordering::Greater);
        assert_eq!(compare_values(Some(&Value::from(1)), None), Ordering::Less);
    }

    #[test]
    fn natural_order_beats_lexical_order() {
        assert_eq!(natord::compare("item2", "item10"), Ordering::Less);
    }
}
