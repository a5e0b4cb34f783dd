//! Multi-font fallback search
//!
//! One algorithm serves both glyph and width lookups; only the question put
//! to the backend differs. The order is fixed:
//!
//! 1. the shaping override (when multi-font is on and the override is real)
//! 2. the current font
//! 3. the current font's search list, front to back
//!
//! Trying a candidate repoints the backend's current font, so every path
//! out of here puts the starting font back first. The restore does not
//! validate: a starting font unregistered mid-walk is still put back.

use uifont_core::types::NO_SHAPING_FONT;
use uifont_core::{FallbackProvider, FontBackend, FontId};

/// Puts the backend's current font back when dropped
struct RestoreCurrent<'a> {
    backend: &'a dyn FontBackend,
    font_id: FontId,
}

impl<'a> RestoreCurrent<'a> {
    fn new(backend: &'a dyn FontBackend, font_id: FontId) -> Self {
        Self { backend, font_id }
    }
}

impl Drop for RestoreCurrent<'_> {
    fn drop(&mut self) {
        self.backend.restore_current_font_id(self.font_id);
    }
}

/// Run `query` against the fonts the search order names, first hit wins
///
/// `query` gets the backend and the font id to ask about.
pub(crate) fn resolve<T>(
    backend: &dyn FontBackend,
    fallback: &dyn FallbackProvider,
    multi_font: bool,
    shaping: FontId,
    mut query: impl FnMut(&dyn FontBackend, FontId) -> Option<T>,
) -> Option<T> {
    let primary = backend.base_font_id();

    if multi_font && shaping > NO_SHAPING_FONT {
        let hit = {
            let _restore = RestoreCurrent::new(backend, primary);
            query(backend, shaping)
        };
        if hit.is_some() {
            log::trace!("Shaping font {} answered for font {}", shaping, primary);
            return hit;
        }
    }

    if let Some(hit) = query(backend, primary) {
        return Some(hit);
    }

    if !multi_font {
        return None;
    }

    let candidates = fallback.search_list(primary)?;
    if candidates.is_empty() {
        return None;
    }

    let _restore = RestoreCurrent::new(backend, primary);
    for &candidate in candidates.iter() {
        if let Err(e) = backend.set_current_font_id(candidate, 0) {
            log::debug!("Skipping fallback font {}: {}", candidate, e);
            continue;
        }
        let font_id = backend.base_font_id();
        if let Some(hit) = query(backend, font_id) {
            log::debug!("Fallback font {} answered for font {}", font_id, primary);
            return Some(hit);
        }
        log::trace!("Fallback font {} missed", font_id);
    }

    log::trace!("Search list of font {} exhausted", primary);
    None
}
