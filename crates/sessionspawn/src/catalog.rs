use std::fmt;

/// Name of a spawnable entity, as understood by the session service's
/// instantiation primitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpawnableId(String);

impl SpawnableId {
    /// Wrap a spawnable name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as registered with the session service.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only names cannot be instantiated.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for SpawnableId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for SpawnableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of looking an index up in a [`SpawnableCatalog`].
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogLookup<'a> {
    /// The slot holds a spawnable.
    Entry(&'a SpawnableId),
    /// The index is in range but the slot is a hole.
    Absent,
    /// The index is past the end of the catalog.
    OutOfRange {
        /// Number of slots in the catalog.
        len: usize,
    },
}

/// Index-to-spawnable mapping. Slots may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnableCatalog {
    entries: Vec<Option<SpawnableId>>,
}

impl SpawnableCatalog {
    /// Catalog from explicit slots; `None` marks a hole.
    pub fn new(entries: Vec<Option<SpawnableId>>) -> Self {
        Self { entries }
    }

    /// Catalog without holes.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| Some(SpawnableId::new(name)))
                .collect(),
        }
    }

    /// Number of slots, holes included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the slot at `index`.
    pub fn lookup(&self, index: u32) -> CatalogLookup<'_> {
        match self.entries.get(index as usize) {
            Some(Some(id)) => CatalogLookup::Entry(id),
            Some(None) => CatalogLookup::Absent,
            None => CatalogLookup::OutOfRange {
                len: self.entries.len(),
            },
        }
    }

    /// Present entries with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SpawnableId)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|id| (index as u32, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_with_holes() {
        let catalog = SpawnableCatalog::new(vec![
            Some(SpawnableId::new("Knight")),
            None,
            Some(SpawnableId::new("Rogue")),
        ]);

        assert_eq!(catalog.lookup(0), CatalogLookup::Entry(&SpawnableId::new("Knight")));
        assert_eq!(catalog.lookup(1), CatalogLookup::Absent);
        assert_eq!(catalog.lookup(2), CatalogLookup::Entry(&SpawnableId::new("Rogue")));
        assert_eq!(catalog.lookup(3), CatalogLookup::OutOfRange { len: 3 });
    }

    #[test]
    fn test_iter_skips_holes() {
        let catalog = SpawnableCatalog::new(vec![None, Some(SpawnableId::new("Rogue"))]);
        let entries: Vec<_> = catalog.iter().map(|(i, id)| (i, id.as_str())).collect();
        assert_eq!(entries, vec![(1, "Rogue")]);
    }

    #[test]
    fn test_whitespace_name_is_empty() {
        assert!(SpawnableId::new("  ").is_empty());
        assert!(!SpawnableId::new("Knight").is_empty());
    }
}
