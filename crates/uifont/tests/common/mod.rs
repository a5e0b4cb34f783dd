//! A backend that records every question it is asked

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use uifont::types::*;
use uifont::{FallbackProvider, FontBackend, FontError, Result, SearchListRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Bitmap(CodePoint, FontId),
    Width(CodePoint, FontId),
    SetCurrent(FontId, u8),
    Restore(FontId),
}

#[derive(Default)]
pub struct MockBackend {
    coverage: HashMap<FontId, HashSet<CodePoint>>,
    refused: HashSet<FontId>,
    current: Mutex<FontId>,
    calls: Mutex<Vec<Call>>,
    dropped: Option<Arc<AtomicBool>>,
}

impl MockBackend {
    pub fn new(current: FontId) -> Self {
        Self {
            coverage: HashMap::new(),
            refused: HashSet::new(),
            current: Mutex::new(current),
            calls: Mutex::new(Vec::new()),
            dropped: None,
        }
    }

    /// `font_id` has glyphs for `cps`
    pub fn covers(mut self, font_id: FontId, cps: impl IntoIterator<Item = CodePoint>) -> Self {
        self.coverage.entry(font_id).or_default().extend(cps);
        self
    }

    /// `set_current_font_id(font_id, _)` fails
    pub fn refuses(mut self, font_id: FontId) -> Self {
        self.refused.insert(font_id);
        self
    }

    /// Raise `flag` when dropped
    pub fn drop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.dropped = Some(flag);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Font ids passed to glyph or width queries, in order
    pub fn queried(&self) -> Vec<FontId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Bitmap(_, font_id) | Call::Width(_, font_id) => Some(*font_id),
                Call::SetCurrent(..) | Call::Restore(_) => None,
            })
            .collect()
    }

    /// Width every font reports: distinct per font so tests can tell who answered
    pub fn width_of(font_id: FontId) -> u16 {
        10 + font_id as u16
    }

    fn has(&self, cp: CodePoint, font_id: FontId) -> bool {
        self.coverage
            .get(&font_id)
            .is_some_and(|cps| cps.contains(&cp))
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(flag) = &self.dropped {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl FontBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn bitmap(&self, cp: CodePoint, font_id: FontId) -> Option<Glyph> {
        self.calls.lock().push(Call::Bitmap(cp, font_id));
        self.has(cp, font_id).then(|| {
            let node = GlyphNode {
                codepoint: cp,
                advance: Self::width_of(font_id),
                font_id,
                ..Default::default()
            };
            Glyph::new(node, Vec::new())
        })
    }

    fn bitmap_spannable(&self, cp: CodePoint, font_id: FontId, _size: u8) -> Option<Glyph> {
        self.bitmap(cp, font_id)
    }

    fn width(&self, cp: CodePoint, font_id: FontId) -> Option<u16> {
        self.calls.lock().push(Call::Width(cp, font_id));
        self.has(cp, font_id).then(|| Self::width_of(font_id))
    }

    fn width_spannable(&self, cp: CodePoint, font_id: FontId, _size: u8) -> Option<u16> {
        self.width(cp, font_id)
    }

    fn height_by_font_id(&self, font_id: FontId, size: u8) -> u16 {
        font_id as u16 + size as u16
    }

    fn height(&self) -> u16 {
        20
    }

    fn glyph_height(&self, _cp: CodePoint, _font_id: FontId) -> u16 {
        12
    }

    fn line_max_height(
        &self,
        _text: &str,
        _font_id: FontId,
        _letter_index: u16,
        _size_spans: Option<&[SizeSpan]>,
    ) -> u16 {
        24
    }

    fn offset_pos_y(&self, _text: &str, _font_size: u8) -> OffsetPosY {
        OffsetPosY::default()
    }

    fn set_current_font_id(&self, font_id: FontId, size: u8) -> Result<()> {
        self.calls.lock().push(Call::SetCurrent(font_id, size));
        if self.refused.contains(&font_id) {
            return Err(FontError::InvalidFontId(font_id));
        }
        *self.current.lock() = font_id;
        Ok(())
    }

    fn restore_current_font_id(&self, font_id: FontId) {
        self.calls.lock().push(Call::Restore(font_id));
        *self.current.lock() = font_id;
    }

    fn base_font_id(&self) -> FontId {
        *self.current.lock()
    }

    fn is_vector_font(&self) -> bool {
        false
    }

    fn is_emoji_font(&self, _font_id: FontId) -> bool {
        false
    }

    fn font_weight(&self, _font_id: FontId) -> u8 {
        1
    }

    fn font_info(&self, _font_id: FontId) -> Option<FontInfo> {
        None
    }

    fn font_id(&self, _name: &str, _size: u8) -> Option<FontId> {
        None
    }

    fn current_font_header(&self) -> Result<FontHeader> {
        Ok(FontHeader::default())
    }

    fn register_font_info(&self, ttf_name: &str, _shaping: u8) -> Result<FontId> {
        Err(FontError::FontNotFound {
            name: ttf_name.to_string(),
        })
    }

    fn register_font_table(&self, _fonts: &[FontInfo]) -> Result<usize> {
        Ok(0)
    }

    fn unregister_font_info(&self, ttf_name: &str) -> Result<FontId> {
        Err(FontError::FontNotFound {
            name: ttf_name.to_string(),
        })
    }

    fn unregister_font_table(&self, _fonts: &[FontInfo]) -> Result<usize> {
        Ok(0)
    }

    fn set_font_path(&self, _dynamic_path: &str, _static_path: &str) -> Result<()> {
        Ok(())
    }

    fn font_version(&self) -> Result<FontVersion> {
        Ok(FontVersion::default())
    }
}

/// Counts how often the facade asks for a search list
pub struct CountingProvider {
    inner: SearchListRegistry,
    lookups: AtomicUsize,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            inner: SearchListRegistry::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_list(self, font_id: FontId, fonts: impl IntoIterator<Item = FontId>) -> Self {
        self.inner.set_search_list(font_id, fonts);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl FallbackProvider for CountingProvider {
    fn search_list(&self, font_id: FontId) -> Option<SearchList> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.search_list(font_id)
    }
}
