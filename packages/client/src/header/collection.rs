use hashbrown::HashMap;

/// Ordered, last-write-wins mapping of header name to value.
///
/// Names are compared ASCII case-insensitively; the spelling of the most
/// recent write is the one kept for iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCollection {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl HeaderCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any earlier value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        let key = name.to_ascii_lowercase();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = (name, value),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((name, value));
            }
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&slot| self.entries[slot].1.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_ascii_lowercase())
    }

    /// Remove `name`, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let slot = self.index.remove(&name.to_ascii_lowercase())?;
        let (_, value) = self.entries.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for HeaderCollection {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderCollection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderCollection::new();
        headers.extend(iter);
        headers
    }
}

impl IntoIterator for HeaderCollection {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_case_insensitively() {
        let mut headers = HeaderCollection::new();
        headers.set("Accept", "text/html").set("accept", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("ACCEPT"), Some("application/json"));
        assert_eq!(headers.iter().next(), Some(("accept", "application/json")));
    }

    #[test]
    fn insertion_order_is_kept() {
        let headers: HeaderCollection =
            [("B", "2"), ("A", "1"), ("C", "3"), ("b", "4")].into_iter().collect();
        let names: Vec<_> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "A", "C"]);
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut headers: HeaderCollection =
            [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        assert_eq!(headers.remove("a").as_deref(), Some("1"));
        assert_eq!(headers.get("C"), Some("3"));
        headers.set("c", "4");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("C"), Some("4"));
        assert!(headers.remove("missing").is_none());
    }
}
