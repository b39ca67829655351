/// An ordered header map with case-insensitive name comparison.
///
/// Duplicate names are **last-wins**: inserting an existing name (compared
/// ASCII-case-insensitively) replaces the stored value in place, keeping the
/// original position and spelling. Captured-traffic replay rarely depends on
/// duplicate request headers, and intercepting proxies fold the one common
/// case (`Cookie`) into a single line, so a multimap is not worth threading
/// through the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a header by name (case-insensitive). Returns the removed value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self
            .entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(idx).1)
    }

    /// Append to the value of the most recently inserted header.
    ///
    /// Used for legacy header folding, where a continuation line extends the
    /// previous header. Returns false when the map is empty.
    pub fn append_to_last(&mut self, fragment: &str) -> bool {
        match self.entries.last_mut() {
            Some((_, v)) => {
                if !v.is_empty() {
                    v.push(' ');
                }
                v.push_str(fragment);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        for (n, v) in iter {
            map.insert(n, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut h = HeaderMap::new();
        h.insert("Content-Type", "application/json");
        assert_eq!(h.get("content-type"), Some("application/json"));
        assert_eq!(h.get("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn duplicate_names_are_last_wins() {
        let mut h = HeaderMap::new();
        h.insert("X-Token", "first");
        h.insert("x-token", "second");
        assert_eq!(h.len(), 1);
        assert_eq!(h.get("X-Token"), Some("second"));
        // Position and spelling of the first insert are kept.
        assert_eq!(h.iter().next(), Some(("X-Token", "second")));
    }

    #[test]
    fn preserves_insertion_order() {
        let mut h = HeaderMap::new();
        h.insert("B", "2");
        h.insert("A", "1");
        h.insert("C", "3");
        let names: Vec<&str> = h.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
