use super::*;

/// Field names keyed by their trimmed lower-case form.
///
/// The first trimmed spelling seen for a key is kept as its display form.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    display_by_key: HashMap<String, String>,
    insertion_order: Vec<String>,
}

impl FieldSet {
    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.display_by_key.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.insertion_order.iter().map(String::as_str)
    }

    pub fn display_form(&self, key: &str) -> Option<&str> {
        self.display_by_key.get(key).map(String::as_str)
    }

    /// Display forms of keys also present in `other`, in this set's order.
    pub fn shared_display_forms(&self, other: &FieldSet) -> Vec<&str> {
        self.keys()
            .filter(|key| other.contains_key(key))
            .filter_map(|key| self.display_form(key))
            .collect()
    }

    fn insert(&mut self, original: &str) {
        let key = original.to_lowercase();
        if self.display_by_key.contains_key(&key) {
            return;
        }
        self.display_by_key.insert(key.clone(), original.to_string());
        self.insertion_order.push(key);
    }
}

pub fn to_case_insensitive_set(items: &[Value]) -> FieldSet {
    let mut set = FieldSet::default();
    for item in items {
        let Some(text) = item.as_str() else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        set.insert(trimmed);
    }
    set
}
