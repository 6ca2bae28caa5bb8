//! Driven port for the addressable query-state representation.

use std::collections::BTreeMap;

/// Where the durable query subset lives (a browser location, a test map,
/// an embedding host's deep link).
pub trait AddressBar {
    /// Read the current flat key/value representation.
    fn read(&self) -> BTreeMap<String, String>;

    /// Replace the representation wholesale. Partial merges are never
    /// performed; the controller always writes the full durable subset.
    fn replace(&mut self, entries: BTreeMap<String, String>);
}

/// In-memory address bar for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBar {
    entries: BTreeMap<String, String>,
}

impl InMemoryAddressBar {
    /// Start with an empty representation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing representation, as when mounting against a
    /// previously shared location.
    #[must_use]
    pub fn with_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Inspect the current representation.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl AddressBar for InMemoryAddressBar {
    fn read(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    fn replace(&mut self, entries: BTreeMap<String, String>) {
        self.entries = entries;
    }
}
