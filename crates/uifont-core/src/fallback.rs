//! Who to ask when the primary font comes up empty
//!
//! A [`FallbackProvider`] hands out, per primary font, the ordered list of
//! substitute fonts the facade should try. [`SearchListRegistry`] is the
//! stock provider: a table filled in at startup (or whenever the installed
//! fonts change) and read on every miss.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::{FontId, SearchList};

/// Supplies substitute fonts for a primary font
pub trait FallbackProvider: Send + Sync {
    /// Ordered substitutes for `font_id`
    ///
    /// `None` and an empty list both mean "no fallback available".
    fn search_list(&self, font_id: FontId) -> Option<SearchList>;
}

/// A provider that never offers substitutes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFallback;

impl FallbackProvider for NoFallback {
    fn search_list(&self, _font_id: FontId) -> Option<SearchList> {
        None
    }
}

/// Search lists keyed by primary font id
///
/// Lists are stored as shared slices, so a lookup hands out a cheap clone
/// and releases the lock before any probing starts.
#[derive(Debug, Default)]
pub struct SearchListRegistry {
    lists: RwLock<HashMap<FontId, SearchList>>,
}

impl SearchListRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search list of `font_id`
    ///
    /// Order is kept as given. An empty list removes the entry.
    pub fn set_search_list(&self, font_id: FontId, fonts: impl IntoIterator<Item = FontId>) {
        let fonts: SearchList = fonts.into_iter().collect();
        let mut lists = self.lists.write();
        if fonts.is_empty() {
            lists.remove(&font_id);
            log::debug!("Cleared search list for font {}", font_id);
        } else {
            log::debug!("Search list for font {}: {:?}", font_id, fonts);
            lists.insert(font_id, fonts);
        }
    }

    /// Drop the search list of `font_id`, returning it if there was one
    pub fn remove_search_list(&self, font_id: FontId) -> Option<SearchList> {
        self.lists.write().remove(&font_id)
    }

    pub fn clear(&self) {
        self.lists.write().clear();
    }

    /// Number of primary fonts that have a list
    pub fn len(&self) -> usize {
        self.lists.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.read().is_empty()
    }
}

impl FallbackProvider for SearchListRegistry {
    fn search_list(&self, font_id: FontId) -> Option<SearchList> {
        self.lists.read().get(&font_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_keep_their_order() {
        let registry = SearchListRegistry::new();
        registry.set_search_list(5, [7, 6, 9]);

        let list = registry.search_list(5).unwrap();
        assert_eq!(&*list, &[7, 6, 9]);
        assert!(registry.search_list(6).is_none());
    }

    #[test]
    fn test_empty_list_is_stored_as_absent() {
        let registry = SearchListRegistry::new();
        registry.set_search_list(5, [6]);
        registry.set_search_list(5, []);

        assert!(registry.search_list(5).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_replace_and_remove() {
        let registry = SearchListRegistry::new();
        registry.set_search_list(1, [2, 3]);
        registry.set_search_list(1, [4]);
        registry.set_search_list(2, [1]);
        assert_eq!(registry.len(), 2);
        assert_eq!(&*registry.search_list(1).unwrap(), &[4]);

        let removed = registry.remove_search_list(1).unwrap();
        assert_eq!(&*removed, &[4]);
        assert!(registry.remove_search_list(1).is_none());

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handed_out_list_survives_updates() {
        let registry = SearchListRegistry::new();
        registry.set_search_list(5, [6, 7]);
        let held = registry.search_list(5).unwrap();

        registry.set_search_list(5, [8]);

        assert_eq!(&*held, &[6, 7]);
        assert_eq!(&*registry.search_list(5).unwrap(), &[8]);
    }

    #[test]
    fn test_no_fallback_never_answers() {
        assert!(NoFallback.search_list(0).is_none());
        assert!(NoFallback.search_list(200).is_none());
    }
}
