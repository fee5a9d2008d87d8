use crate::header::{HeaderIterator, HeaderName};
use bytes::BytesMut;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) struct HeaderEntry {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl HeaderEntry {
    #[inline]
    fn is(&self, name: &str) -> bool {
        HeaderName::new(&self.name) == name
    }
}

/// Ordered multi-map of header fields.
///
/// Lookups compare names ASCII case-insensitively while the stored casing is
/// kept for output. Values of a repeated name stay in insertion order and are
/// never merged or deduplicated.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct HeaderTable {
    entries: Vec<HeaderEntry>,
}

impl HeaderTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.is(name))
    }

    /// First value stored under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.is(name))
            .map(|e| e.value.as_str())
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is(name))
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Replaces every value of `name` with `value`.
    ///
    /// The field keeps the position of its first occurrence, so the order
    /// reported by [`names`](Self::names) does not change.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter().position(|e| e.is(&name)) {
            Some(first) => {
                let mut idx = 0;
                self.entries.retain(|e| {
                    let keep = idx <= first || !e.is(&name);
                    idx += 1;
                    keep
                });
                self.entries[first] = HeaderEntry { name, value };
            }
            None => self.entries.push(HeaderEntry { name, value }),
        }
    }

    #[inline]
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(HeaderEntry {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Removes every value of `name`, returning how many were dropped.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is(name));
        before - self.entries.len()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Distinct names in first-seen order, with first-seen casing.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.entries.len());
        for e in &self.entries {
            if !names.iter().any(|n| e.is(n)) {
                names.push(&e.name);
            }
        }
        names
    }

    #[inline]
    pub fn iter(&self) -> HeaderIterator<'_> {
        HeaderIterator {
            iter: self.entries.iter(),
        }
    }

    #[inline]
    pub fn encode(&self, wbuf: &mut BytesMut) {
        for e in self.entries.iter() {
            wbuf.extend_from_slice(e.name.as_bytes());
            wbuf.extend_from_slice(b": ");
            wbuf.extend_from_slice(e.value.as_bytes());
            wbuf.extend_from_slice(b"\r\n");
        }
    }
}

impl<'a> IntoIterator for &'a HeaderTable {
    type Item = crate::header::Header<'a>;
    type IntoIter = HeaderIterator<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderTable
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut table = HeaderTable::new();
        for (n, v) in iter {
            table.append(n, v);
        }
        table
    }
}
