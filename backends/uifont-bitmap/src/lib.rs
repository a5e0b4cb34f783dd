// this_file: backends/uifont-bitmap/src/lib.rs

//! Bitmap backend - glyphs rasterized ahead of time
//!
//! Small devices often cannot afford an outline rasterizer. Their fonts come
//! as tables of ready-made coverage bitmaps, one table per face and size.
//! This backend keeps those tables in memory and serves them as-is: no
//! scaling, no hinting, no surprises.
//!
//! A face installed at several sizes is registered once per size, under the
//! same name. Size-parameterized queries use the name to find the sibling
//! registered at the requested size.

mod text_table;

pub use text_table::{TextEntry, TextTable};

use std::collections::HashMap;

use parking_lot::RwLock;
use uifont_core::{
    error::{FontError, Result},
    traits::FontBackend,
    types::*,
};

/// Fonts a bitmap backend can hold (ids `0..FONT_ID_MAX`)
pub const MAX_BITMAP_FONTS: usize = FONT_ID_MAX as usize;

/// One face at one size, with its pre-rasterized glyphs
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    pub name: String,
    pub size: u8,
    pub ascender: i16,
    /// Negative below the baseline
    pub descender: i16,
    pub weight: u8,
    pub is_emoji: bool,
    glyphs: HashMap<CodePoint, (GlyphNode, std::sync::Arc<[u8]>)>,
}

impl BitmapFont {
    pub fn new(name: impl Into<String>, size: u8, ascender: i16, descender: i16) -> Self {
        Self {
            name: name.into(),
            size,
            ascender,
            descender,
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight;
        self
    }

    pub fn emoji(mut self) -> Self {
        self.is_emoji = true;
        self
    }

    /// Add or replace the glyph for `cp`
    pub fn insert_glyph(&mut self, cp: CodePoint, node: GlyphNode, data: impl Into<std::sync::Arc<[u8]>>) {
        let node = GlyphNode {
            codepoint: cp,
            font_size: self.size,
            ..node
        };
        self.glyphs.insert(cp, (node, data.into()));
    }

    pub fn contains(&self, cp: CodePoint) -> bool {
        self.glyphs.contains_key(&cp)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn height(&self) -> u16 {
        (self.ascender as i32 - self.descender as i32).max(0) as u16
    }

    fn glyph(&self, cp: CodePoint, font_id: FontId) -> Option<Glyph> {
        self.glyphs.get(&cp).map(|(node, data)| Glyph {
            node: GlyphNode { font_id, ..*node },
            data: data.clone(),
        })
    }

    fn info(&self) -> FontInfo {
        FontInfo {
            ttf_name: self.name.clone(),
            size: self.size,
            shaping: 0,
            ttf_id: 0,
            is_emoji: self.is_emoji,
            weight: self.weight,
        }
    }
}

struct State {
    fonts: Vec<Option<BitmapFont>>,
    current: FontId,
    lang_id: u8,
    texts: TextTable,
    dynamic_path: String,
    static_path: String,
    version: FontVersion,
}

impl State {
    fn font(&self, font_id: FontId) -> Option<&BitmapFont> {
        self.fonts.get(font_id as usize).and_then(Option::as_ref)
    }

    /// The sibling of `font_id` registered at `size`, or `font_id` itself
    fn sized(&self, font_id: FontId, size: u8) -> FontId {
        let Some(font) = self.font(font_id) else {
            return font_id;
        };
        if size == 0 || font.size == size {
            return font_id;
        }
        self.find(&font.name, size).unwrap_or(font_id)
    }

    fn find(&self, name: &str, size: u8) -> Option<FontId> {
        self.fonts
            .iter()
            .position(|slot| {
                slot.as_ref()
                    .is_some_and(|f| f.name == name && (size == 0 || f.size == size))
            })
            .map(|idx| idx as FontId)
    }

    fn insert(&mut self, font: BitmapFont) -> Result<FontId> {
        let free = self.fonts.iter().position(Option::is_none);
        let idx = match free {
            Some(idx) => idx,
            None if self.fonts.len() < MAX_BITMAP_FONTS => {
                self.fonts.push(None);
                self.fonts.len() - 1
            }
            None => {
                return Err(FontError::TooManyFonts {
                    max: MAX_BITMAP_FONTS,
                })
            }
        };
        log::debug!(
            "Bitmap font '{}' ({}px, {} glyphs) registered as {}",
            font.name,
            font.size,
            font.glyph_count(),
            idx
        );
        self.fonts[idx] = Some(font);
        Ok(idx as FontId)
    }

    fn remove(&mut self, name: &str, size: u8) -> Option<FontId> {
        let id = self.find(name, size)?;
        self.fonts[id as usize] = None;
        log::debug!("Bitmap font '{}' unregistered from {}", name, id);
        Some(id)
    }

    fn height_of(&self, font_id: FontId, size: u8) -> u16 {
        let id = self.sized(font_id, size);
        self.font(id).map(BitmapFont::height).unwrap_or(0)
    }
}

/// Serves glyphs out of in-memory bitmap tables
pub struct BitmapBackend {
    state: RwLock<State>,
}

impl BitmapBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                fonts: Vec::new(),
                current: 0,
                lang_id: 0,
                texts: TextTable::new(),
                dynamic_path: String::new(),
                static_path: String::new(),
                version: FontVersion::default(),
            }),
        }
    }

    /// Install a font with its glyphs; the first free id is assigned
    pub fn add_font(&self, font: BitmapFont) -> Result<FontId> {
        self.state.write().insert(font)
    }

    /// Add or replace one glyph of an installed font
    pub fn insert_glyph(
        &self,
        font_id: FontId,
        cp: CodePoint,
        node: GlyphNode,
        data: impl Into<std::sync::Arc<[u8]>>,
    ) -> Result<()> {
        let mut state = self.state.write();
        let font = state
            .fonts
            .get_mut(font_id as usize)
            .and_then(Option::as_mut)
            .ok_or(FontError::InvalidFontId(font_id))?;
        font.insert_glyph(cp, node, data);
        Ok(())
    }

    pub fn set_font_version(&self, version: FontVersion) {
        self.state.write().version = version;
    }

    pub fn set_lang_param(&self, lang_id: u8, param: LangTextParam) {
        self.state.write().texts.set_lang_param(lang_id, param);
    }

    pub fn insert_text(&self, lang_id: u8, text_id: u16, entry: TextEntry) {
        self.state.write().texts.insert_text(lang_id, text_id, entry);
    }

    /// Directories given to [`FontBackend::set_font_path`]
    pub fn font_paths(&self) -> (String, String) {
        let state = self.state.read();
        (state.dynamic_path.clone(), state.static_path.clone())
    }

    fn with_text<T>(&self, text_id: u16, f: impl FnOnce(&TextEntry) -> Option<T>) -> Option<T> {
        let state = self.state.read();
        state.texts.text(state.lang_id, text_id).and_then(f)
    }
}

impl Default for BitmapBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBackend for BitmapBackend {
    fn name(&self) -> &'static str {
        "bitmap"
    }

    fn bitmap(&self, cp: CodePoint, font_id: FontId) -> Option<Glyph> {
        self.state.read().font(font_id)?.glyph(cp, font_id)
    }

    fn bitmap_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<Glyph> {
        let state = self.state.read();
        let id = state.sized(font_id, size);
        state.font(id)?.glyph(cp, id)
    }

    fn width(&self, cp: CodePoint, font_id: FontId) -> Option<u16> {
        self.bitmap(cp, font_id).map(|glyph| glyph.node.advance)
    }

    fn width_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<u16> {
        self.bitmap_spannable(cp, font_id, size)
            .map(|glyph| glyph.node.advance)
    }

    fn height_by_font_id(&self, font_id: FontId, size: u8) -> u16 {
        self.state.read().height_of(font_id, size)
    }

    fn height(&self) -> u16 {
        let state = self.state.read();
        state.height_of(state.current, 0)
    }

    fn glyph_height(&self, cp: CodePoint, font_id: FontId) -> u16 {
        self.bitmap(cp, font_id)
            .map(|glyph| glyph.node.rows)
            .unwrap_or(0)
    }

    fn line_max_height(
        &self,
        text: &str,
        font_id: FontId,
        letter_index: u16,
        size_spans: Option<&[SizeSpan]>,
    ) -> u16 {
        let state = self.state.read();
        let base = state.height_of(font_id, 0);
        let Some(spans) = size_spans else {
            return base;
        };

        let mut max_height = 0;
        for (offset, _) in text.chars().enumerate() {
            let offset = u16::try_from(offset).unwrap_or(u16::MAX);
            let index = letter_index.saturating_add(offset);
            let height = match spans.iter().find(|span| span.contains(index)) {
                Some(span) => state.height_of(span.font_id, span.size),
                None => base,
            };
            max_height = max_height.max(height);
        }
        if max_height == 0 {
            base
        } else {
            max_height
        }
    }

    fn offset_pos_y(&self, text: &str, font_size: u8) -> OffsetPosY {
        let state = self.state.read();
        let id = state.sized(state.current, font_size);
        let Some(font) = state.font(id) else {
            return OffsetPosY::default();
        };

        let mut offset = 0u16;
        let mut all_emoji = !text.is_empty();
        for ch in text.chars() {
            match font.glyph(ch as CodePoint, id) {
                Some(glyph) => {
                    let overshoot = glyph.node.top as i32 - font.ascender as i32;
                    offset = offset.max(overshoot.max(0) as u16);
                    all_emoji &= font.is_emoji;
                }
                None => all_emoji = false,
            }
        }
        OffsetPosY { offset, all_emoji }
    }

    fn set_current_font_id(&self, font_id: FontId, size: u8) -> Result<()> {
        let mut state = self.state.write();
        let id = state.sized(font_id, size);
        if state.font(id).is_none() {
            return Err(FontError::InvalidFontId(font_id));
        }
        state.current = id;
        Ok(())
    }

    fn restore_current_font_id(&self, font_id: FontId) {
        self.state.write().current = font_id;
    }

    fn base_font_id(&self) -> FontId {
        self.state.read().current
    }

    fn is_vector_font(&self) -> bool {
        false
    }

    fn is_emoji_font(&self, font_id: FontId) -> bool {
        self.state
            .read()
            .font(font_id)
            .is_some_and(|font| font.is_emoji)
    }

    fn font_weight(&self, font_id: FontId) -> u8 {
        self.state
            .read()
            .font(font_id)
            .map(|font| font.weight)
            .unwrap_or(0)
    }

    fn font_info(&self, font_id: FontId) -> Option<FontInfo> {
        self.state.read().font(font_id).map(BitmapFont::info)
    }

    fn font_id(&self, name: &str, size: u8) -> Option<FontId> {
        self.state.read().find(name, size)
    }

    fn current_font_header(&self) -> Result<FontHeader> {
        let state = self.state.read();
        let font = state
            .font(state.current)
            .ok_or(FontError::InvalidFontId(state.current))?;
        Ok(FontHeader {
            ascender: font.ascender,
            descender: font.descender,
            font_height: font.height(),
        })
    }

    /// Reserves an empty face; glyphs arrive later through [`BitmapBackend::insert_glyph`]
    fn register_font_info(&self, ttf_name: &str, _shaping: u8) -> Result<FontId> {
        let mut state = self.state.write();
        if let Some(id) = state.find(ttf_name, 0) {
            return Ok(id);
        }
        state.insert(BitmapFont::new(ttf_name, 0, 0, 0))
    }

    fn register_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        let mut state = self.state.write();
        let mut added = 0;
        for info in fonts {
            if state.find(&info.ttf_name, info.size).is_some() {
                continue;
            }
            let mut font = BitmapFont::new(info.ttf_name.clone(), info.size, 0, 0)
                .with_weight(info.weight);
            font.is_emoji = info.is_emoji;
            state.insert(font)?;
            added += 1;
        }
        Ok(added)
    }

    fn unregister_font_info(&self, ttf_name: &str) -> Result<FontId> {
        self.state
            .write()
            .remove(ttf_name, 0)
            .ok_or_else(|| FontError::FontNotFound {
                name: ttf_name.to_string(),
            })
    }

    fn unregister_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        let mut state = self.state.write();
        Ok(fonts
            .iter()
            .filter(|info| state.remove(&info.ttf_name, info.size).is_some())
            .count())
    }

    fn set_font_path(&self, dynamic_path: &str, static_path: &str) -> Result<()> {
        let mut state = self.state.write();
        state.dynamic_path = dynamic_path.to_string();
        state.static_path = static_path.to_string();
        Ok(())
    }

    fn font_version(&self) -> Result<FontVersion> {
        Ok(self.state.read().version.clone())
    }

    fn set_current_lang_id(&self, lang_id: u8) -> Result<()> {
        let mut state = self.state.write();
        if !state.texts.has_lang(lang_id) {
            return Err(FontError::UnknownLanguage(lang_id));
        }
        state.lang_id = lang_id;
        Ok(())
    }

    fn current_lang_id(&self) -> u8 {
        self.state.read().lang_id
    }

    fn default_param_by_lang_id(&self, lang_id: u8) -> Option<LangTextParam> {
        self.state.read().texts.lang_param(lang_id)
    }

    fn text_utf8(&self, text_id: u16) -> Option<String> {
        self.with_text(text_id, |entry| Some(entry.utf8.clone()))
    }

    fn text_param(&self, text_id: u16) -> Option<TextParam> {
        self.with_text(text_id, |entry| Some(entry.param))
    }

    fn wildcard_static_str(&self, text_id: u16, kind: WildcardStaticType) -> Option<String> {
        self.with_text(text_id, |entry| entry.wildcard(kind).map(str::to_string))
    }

    fn code_points(&self, text_id: u16) -> Option<Vec<CodePoint>> {
        self.with_text(text_id, |entry| Some(entry.code_points()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(advance: u16, rows: u16, top: i16) -> GlyphNode {
        GlyphNode {
            advance,
            rows,
            cols: advance,
            top,
            ..Default::default()
        }
    }

    fn latin(size: u8) -> BitmapFont {
        let mut font = BitmapFont::new("latin", size, 12, -4);
        font.insert_glyph('A' as u32, node(9, 12, 12), vec![0xFF; 9 * 12]);
        font.insert_glyph(' ' as u32, node(4, 0, 0), Vec::new());
        font
    }

    #[test]
    fn test_serves_registered_glyphs() {
        let backend = BitmapBackend::new();
        let id = backend.add_font(latin(16)).unwrap();

        let glyph = backend.bitmap('A' as u32, id).unwrap();
        assert_eq!(glyph.node.font_id, id);
        assert_eq!(glyph.node.codepoint, 'A' as u32);
        assert_eq!(glyph.node.font_size, 16);
        assert_eq!(glyph.data.len(), 9 * 12);

        assert!(backend.bitmap('B' as u32, id).is_none());
        assert!(backend.bitmap('A' as u32, id + 1).is_none());
    }

    #[test]
    fn test_width_and_heights() {
        let backend = BitmapBackend::new();
        let id = backend.add_font(latin(16)).unwrap();

        assert_eq!(backend.width('A' as u32, id), Some(9));
        assert_eq!(backend.width(' ' as u32, id), Some(4));
        assert_eq!(backend.width('B' as u32, id), None);
        assert_eq!(backend.height_by_font_id(id, 0), 16);
        assert_eq!(backend.glyph_height('A' as u32, id), 12);
        assert_eq!(backend.glyph_height('B' as u32, id), 0);
    }

    #[test]
    fn test_spannable_queries_pick_the_sized_sibling() {
        let backend = BitmapBackend::new();
        let small = backend.add_font(latin(16)).unwrap();
        let mut large = BitmapFont::new("latin", 32, 24, -8);
        large.insert_glyph('A' as u32, node(18, 24, 24), vec![0xFF; 18 * 24]);
        let large = backend.add_font(large).unwrap();

        let glyph = backend.bitmap_spannable('A' as u32, small, 32).unwrap();
        assert_eq!(glyph.node.font_id, large);
        assert_eq!(backend.width_spannable('A' as u32, small, 32), Some(18));
        assert_eq!(backend.height_by_font_id(small, 32), 32);

        // Unknown size falls back to the requested font
        assert_eq!(backend.width_spannable('A' as u32, small, 20), Some(9));
    }

    #[test]
    fn test_current_font_selection() {
        let backend = BitmapBackend::new();
        let first = backend.add_font(latin(16)).unwrap();
        let second = backend.add_font(BitmapFont::new("cjk", 16, 14, -2)).unwrap();

        backend.set_current_font_id(second, 0).unwrap();
        assert_eq!(backend.base_font_id(), second);
        assert_eq!(backend.height(), 16);

        assert!(matches!(
            backend.set_current_font_id(42, 0),
            Err(FontError::InvalidFontId(42))
        ));
        assert_eq!(backend.base_font_id(), second);

        backend.set_current_font_id(first, 0).unwrap();
        let header = backend.current_font_header().unwrap();
        assert_eq!(header.ascender, 12);
        assert_eq!(header.descender, -4);
        assert_eq!(header.font_height, 16);
    }

    #[test]
    fn test_line_max_height_uses_spans() {
        let backend = BitmapBackend::new();
        let small = backend.add_font(latin(16)).unwrap();
        backend.add_font(BitmapFont::new("latin", 32, 24, -8)).unwrap();

        assert_eq!(backend.line_max_height("AAA", small, 0, None), 16);

        let spans = [SizeSpan {
            start: 5,
            end: 6,
            size: 32,
            font_id: small,
        }];
        assert_eq!(backend.line_max_height("AAA", small, 0, Some(&spans)), 16);
        assert_eq!(backend.line_max_height("AAA", small, 4, Some(&spans)), 32);
    }

    #[test]
    fn test_line_max_height_past_the_letter_index_range() {
        let backend = BitmapBackend::new();
        let base = backend.add_font(latin(16)).unwrap();
        let short = backend.add_font(BitmapFont::new("short", 8, 6, -2)).unwrap();
        let tall = backend.add_font(BitmapFont::new("tall", 32, 24, -8)).unwrap();

        let tail = [SizeSpan {
            start: u16::MAX - 2,
            end: u16::MAX,
            size: 0,
            font_id: tall,
        }];
        assert_eq!(backend.line_max_height("AAAA", base, u16::MAX - 3, Some(&tail)), 32);
        assert_eq!(backend.line_max_height("AAAA", base, u16::MAX - 6, Some(&tail)), 16);

        // Letters beyond the last index clamp onto it and take the base height
        let whole = [SizeSpan {
            start: 0,
            end: u16::MAX,
            size: 0,
            font_id: short,
        }];
        let long = "A".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(backend.line_max_height(&long[..100], base, 0, Some(&whole)), 8);
        assert_eq!(backend.line_max_height(&long, base, 0, Some(&whole)), 16);
    }

    #[test]
    fn test_offset_pos_y_reports_emoji_lines() {
        let backend = BitmapBackend::new();
        let mut emoji = BitmapFont::new("emoji", 16, 12, -4).emoji();
        emoji.insert_glyph(0x1F600, node(16, 16, 15), vec![0xFF; 256]);
        let id = backend.add_font(emoji).unwrap();
        backend.set_current_font_id(id, 0).unwrap();

        let pos = backend.offset_pos_y("😀", 0);
        assert!(pos.all_emoji);
        assert_eq!(pos.offset, 3);

        let pos = backend.offset_pos_y("😀a", 0);
        assert!(!pos.all_emoji);
        assert!(!backend.offset_pos_y("", 0).all_emoji);
    }

    #[test]
    fn test_registration_round_trip() {
        let backend = BitmapBackend::new();
        let table = [
            FontInfo::new("latin", 16),
            FontInfo {
                is_emoji: true,
                weight: 4,
                ..FontInfo::new("emoji", 16)
            },
        ];
        assert_eq!(backend.register_font_table(&table).unwrap(), 2);
        assert_eq!(backend.register_font_table(&table).unwrap(), 0);

        let emoji = backend.font_id("emoji", 16).unwrap();
        assert!(backend.is_emoji_font(emoji));
        assert_eq!(backend.font_weight(emoji), 4);
        assert_eq!(backend.font_info(emoji).unwrap().ttf_name, "emoji");

        backend
            .insert_glyph(emoji, 0x1F600, node(16, 16, 12), vec![0xFF; 256])
            .unwrap();
        assert!(backend.bitmap(0x1F600, emoji).is_some());

        assert_eq!(backend.unregister_font_table(&table).unwrap(), 2);
        assert!(backend.font_id("emoji", 0).is_none());
        assert!(backend.unregister_font_info("emoji").is_err());

        // Freed slots are reused
        assert_eq!(backend.register_font_info("mono", 0).unwrap(), 0);
        assert_eq!(backend.register_font_info("mono", 0).unwrap(), 0);
    }

    #[test]
    fn test_font_table_capacity() {
        let backend = BitmapBackend::new();
        for i in 0..MAX_BITMAP_FONTS {
            backend
                .add_font(BitmapFont::new(format!("f{}", i), 16, 12, -4))
                .unwrap();
        }
        assert!(matches!(
            backend.add_font(BitmapFont::new("overflow", 16, 12, -4)),
            Err(FontError::TooManyFonts { .. })
        ));
    }

    #[test]
    fn test_text_resources_follow_current_language() {
        let backend = BitmapBackend::new();
        backend.set_lang_param(0, LangTextParam::default());
        backend.set_lang_param(
            1,
            LangTextParam {
                font_id: 2,
                size: 20,
                ..Default::default()
            },
        );
        backend.insert_text(
            0,
            7,
            TextEntry::new("Hi %s", TextParam::default())
                .with_wildcard(WildcardStaticType::First, "there"),
        );
        backend.insert_text(1, 7, TextEntry::new("中", TextParam::default()));

        assert_eq!(backend.text_utf8(7).as_deref(), Some("Hi %s"));
        assert_eq!(
            backend
                .wildcard_static_str(7, WildcardStaticType::First)
                .as_deref(),
            Some("there")
        );

        backend.set_current_lang_id(1).unwrap();
        assert_eq!(backend.current_lang_id(), 1);
        assert_eq!(backend.code_points(7), Some(vec![0x4E2D]));
        assert_eq!(backend.default_param_by_lang_id(1).unwrap().size, 20);

        assert!(matches!(
            backend.set_current_lang_id(9),
            Err(FontError::UnknownLanguage(9))
        ));
        assert_eq!(backend.current_lang_id(), 1);
    }

    #[test]
    fn test_metadata_passthrough() {
        let backend = BitmapBackend::new();
        assert!(!backend.is_vector_font());
        assert!(backend.open_vector_font(0).is_err());

        backend.set_font_path("/data/fonts", "/system/fonts").unwrap();
        assert_eq!(
            backend.font_paths(),
            ("/data/fonts".to_string(), "/system/fonts".to_string())
        );

        backend.set_font_version(FontVersion {
            dynamic_version: "1.2".into(),
            static_version: "0.9".into(),
        });
        assert_eq!(backend.font_version().unwrap().dynamic_version, "1.2");
    }
}
