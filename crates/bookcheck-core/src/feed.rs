//! Input rows for the dependent (retrieve/delete) phase

use crate::{Identifier, IdentifierStore};

/// Frozen list of identifiers, one row per dependent invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependentFeed {
    ids: Vec<Identifier>,
}

impl DependentFeed {
    /// Snapshot the store. Call only once every create invocation has completed;
    /// identifiers appended afterwards are not visible to this feed.
    #[must_use]
    pub fn snapshot(store: &IdentifierStore) -> Self {
        Self {
            ids: store.snapshot(),
        }
    }

    /// The rows of the feed
    #[must_use]
    pub fn feed(&self) -> &[Identifier] {
        &self.ids
    }

    /// Number of dependent invocations this feed drives
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no create produced an identifier
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Rows in store order
    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a DependentFeed {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_gives_empty_feed() {
        let feed = DependentFeed::snapshot(&IdentifierStore::new());
        assert!(feed.is_empty());
        assert_eq!(feed.iter().count(), 0);
    }

    #[test]
    fn test_feed_size_matches_store_at_snapshot() {
        let store = IdentifierStore::new();
        for code in ["1", "2", "3"] {
            store.append(Identifier::new(code));
        }
        let feed = DependentFeed::snapshot(&store);
        store.append(Identifier::new("late"));

        assert_eq!(feed.len(), 3);
        assert_eq!(feed.feed().last(), Some(&Identifier::new("3")));
        assert!(!feed.iter().any(|id| id.as_str() == "late"));
    }
}
