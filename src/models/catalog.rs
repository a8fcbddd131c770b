use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// One installed mod folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModEntry {
    /// Folder name, also the value written to the game's load order.
    pub identity: String,
    pub display_name: String,
    pub install_path: Utf8PathBuf,
}

impl ModEntry {
    /// Create an entry whose display name is the folder name.
    pub fn new(identity: impl Into<String>, install_path: impl Into<Utf8PathBuf>) -> Self {
        let identity = identity.into();
        Self {
            display_name: identity.clone(),
            identity,
            install_path: install_path.into(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

/// Snapshot of the installed mods in discovery order.
///
/// A catalog is built once per scan and never edited afterwards. Identities are
/// unique; inserting the same folder name twice keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, ModEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identity: &str) -> Option<&ModEntry> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    /// Entries in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = &ModEntry> {
        self.entries.values()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Display name for an identity, falling back to the identity itself.
    pub fn display_name<'a>(&'a self, identity: &'a str) -> &'a str {
        self.entries
            .get(identity)
            .map(|entry| entry.display_name.as_str())
            .unwrap_or(identity)
    }

    pub fn install_path(&self, identity: &str) -> Option<&Utf8Path> {
        self.entries
            .get(identity)
            .map(|entry| entry.install_path.as_path())
    }
}

impl FromIterator<ModEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = ModEntry>>(iter: I) -> Self {
        let mut entries = IndexMap::new();
        for entry in iter {
            entries.entry(entry.identity.clone()).or_insert(entry);
        }
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keeps_insertion_order() {
        let catalog: Catalog = ["b", "a", "c"]
            .into_iter()
            .map(|id| ModEntry::new(id, format!("/mods/{id}")))
            .collect();

        let ids: Vec<&str> = catalog.identities().collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_identity_keeps_first() {
        let catalog: Catalog = vec![
            ModEntry::new("a", "/first/a").with_display_name("First"),
            ModEntry::new("a", "/second/a").with_display_name("Second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.display_name("a"), "First");
        assert_eq!(catalog.install_path("a"), Some(Utf8Path::new("/first/a")));
    }

    #[test]
    fn test_display_name_fallback() {
        let catalog = Catalog::new();
        assert_eq!(catalog.display_name("missing"), "missing");
    }
}
