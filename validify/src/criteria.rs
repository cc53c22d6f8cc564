//! Validation criteria and the `key: value;` parser that reads them from
//! markup.

/// Ordered `key -> value` mapping of criteria for one field.
///
/// Keys are free-form. A key no validator consumes is kept but never matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    entries: Vec<(String, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse with the default `;` and `:` separators.
    pub fn parse(input: &str) -> Self {
        CriteriaParser::default().parse(input)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite a criterion. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Merge another mapping into this one; `other` wins on shared keys.
    pub fn extend(&mut self, other: Criteria) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (k, v) in iter {
            criteria.insert(k, v);
        }
        criteria
    }
}

/// Splits a criteria string into pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaParser {
    pub pair_separator: char,
    pub key_value_separator: char,
}

impl Default for CriteriaParser {
    fn default() -> Self {
        Self {
            pair_separator: ';',
            key_value_separator: ':',
        }
    }
}

impl CriteriaParser {
    pub fn new(pair_separator: char, key_value_separator: char) -> Self {
        Self {
            pair_separator,
            key_value_separator,
        }
    }

    /// Parse `key: value; key: value;` into ordered criteria.
    ///
    /// Blank pairs are skipped and keys/values are trimmed. Only the first
    /// key/value separator splits a pair, so values may contain it.
    pub fn parse(&self, input: &str) -> Criteria {
        let mut criteria = Criteria::new();
        for pair in input.split(self.pair_separator) {
            if pair.trim().is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once(self.key_value_separator)
                .unwrap_or((pair, ""));
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            criteria.insert(key, value.trim());
        }
        criteria
    }
}

/// A change to apply through `set_criteria`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaUpdate {
    /// Merge into the existing criteria.
    Merge(Criteria),
    /// Replace the existing criteria wholesale.
    Replace(Criteria),
    /// Set one criterion.
    Pair(String, String),
}

impl From<Criteria> for CriteriaUpdate {
    fn from(criteria: Criteria) -> Self {
        CriteriaUpdate::Merge(criteria)
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for CriteriaUpdate {
    fn from((key, value): (K, V)) -> Self {
        CriteriaUpdate::Pair(key.into(), value.into())
    }
}

/// What `remove_criteria` should drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaRemoval {
    Keys(Vec<String>),
    All,
}

impl From<&str> for CriteriaRemoval {
    fn from(key: &str) -> Self {
        CriteriaRemoval::Keys(vec![key.to_string()])
    }
}

impl From<Vec<&str>> for CriteriaRemoval {
    fn from(keys: Vec<&str>) -> Self {
        CriteriaRemoval::Keys(keys.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CriteriaRemoval {
    fn from(keys: [&str; N]) -> Self {
        CriteriaRemoval::Keys(keys.into_iter().map(String::from).collect())
    }
}

impl Criteria {
    pub fn apply(&mut self, update: CriteriaUpdate) {
        match update {
            CriteriaUpdate::Merge(other) => self.extend(other),
            CriteriaUpdate::Replace(other) => *self = other,
            CriteriaUpdate::Pair(key, value) => self.insert(key, value),
        }
    }

    pub fn apply_removal(&mut self, removal: CriteriaRemoval) {
        match removal {
            CriteriaRemoval::Keys(keys) => {
                for key in keys {
                    self.remove(&key);
                }
            }
            CriteriaRemoval::All => self.clear(),
        }
    }
}
