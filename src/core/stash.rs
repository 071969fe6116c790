//! Name to id mapping of the stashes held by the repository.

use crate::core::{bridge::Bridge, error::Result};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StashIndex {
    entries: BTreeMap<String, String>,
}

impl StashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from reported `(name, id)` pairs. A repeated name keeps the
    /// id of its last occurrence.
    pub fn from_pairs<I, N, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut index = Self::new();
        for (name, id) in pairs {
            index.insert(name.into(), id.into());
        }
        index
    }

    /// Replace the contents with the stashes the bridge reports now
    pub fn refresh(&mut self, bridge: &dyn Bridge, cancel: &AtomicBool) -> Result<()> {
        let pairs = bridge.query_stashes(cancel)?;
        *self = Self::from_pairs(pairs);
        log::debug!("Loaded {} stashes", self.len());
        Ok(())
    }

    fn insert(&mut self, name: String, id: String) {
        if let Some(previous) = self.entries.insert(name.clone(), id) {
            log::debug!("Stash name '{name}' reported twice, replacing id {previous}");
        }
    }

    pub fn find(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, id)| (name.as_str(), id.as_str()))
    }

    /// Names of the selected stashes that exist, in index order. With nothing
    /// selected and `all_if_empty` every stash is used.
    pub fn selection<S: AsRef<str>>(&self, selected: &[S], all_if_empty: bool) -> Vec<String> {
        self.names()
            .filter(|name| {
                (selected.is_empty() && all_if_empty)
                    || selected.iter().any(|s| s.as_ref() == *name)
            })
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
