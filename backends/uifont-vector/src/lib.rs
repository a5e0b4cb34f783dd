//! Vector backend - scalable outline fonts, rasterized on demand
//!
//! Register TrueType/OpenType files (or bytes), ask for a code point, get
//! back an 8-bit coverage mask at whatever size the font is selected at.
//! Outlines come from skrifa, coverage from zeno, and recently used glyphs
//! (and recent misses) stay in an LRU cache so fallback lookups do not
//! rasterize the same glyph twice.
//!
//! ## Sizes
//!
//! Each registered font carries a configured size. The current font can be
//! selected at a different size with `set_current_font_id(id, size)`;
//! size 0 means "the font's configured size".

mod font;
mod raster;

pub use font::{FontOrigin, ScaledMetrics, VectorFont};

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use uifont_core::{
    config::FacadeConfig,
    error::{FontError, Result},
    traits::FontBackend,
    types::*,
};

/// Depth of the coverage masks this backend produces
pub const COVERAGE_BITS: u8 = 8;

/// Fonts a vector backend can hold (ids `0..FONT_ID_MAX`)
pub const MAX_VECTOR_FONTS: usize = FONT_ID_MAX as usize;

const DEFAULT_CACHE_CAPACITY: usize = 256;
const DEFAULT_FONT_SIZE: u8 = 16;

/// (font, size, code point) - a miss is cached as `None`
type GlyphKey = (FontId, u8, CodePoint);

struct State {
    fonts: Vec<Option<VectorFont>>,
    current: FontId,
    current_size: u8,
    dynamic_path: Option<PathBuf>,
    static_path: Option<PathBuf>,
}

impl State {
    fn font(&self, font_id: FontId) -> Option<&VectorFont> {
        self.fonts.get(font_id as usize).and_then(Option::as_ref)
    }

    fn find(&self, name: &str, size: u8) -> Option<FontId> {
        self.fonts
            .iter()
            .position(|slot| {
                slot.as_ref()
                    .is_some_and(|f| f.name() == name && (size == 0 || f.size() == size))
            })
            .map(|idx| idx as FontId)
    }

    /// Size a query for `font_id` should use when the caller passed `size`
    fn size_for(&self, font_id: FontId, size: u8) -> Option<u8> {
        if size != 0 {
            return Some(size);
        }
        if font_id == self.current && self.current_size != 0 {
            return Some(self.current_size);
        }
        self.font(font_id).map(VectorFont::size)
    }

    fn height_of(&self, font_id: FontId, size: u8) -> u16 {
        let Some(size) = self.size_for(font_id, size) else {
            return 0;
        };
        self.font(font_id)
            .and_then(|font| font.metrics(size))
            .map(|m| m.line_height())
            .unwrap_or(0)
    }

    fn locate(&self, name: &str) -> (PathBuf, FontOrigin) {
        let path = Path::new(name);
        if path.is_absolute() {
            return (path.to_path_buf(), FontOrigin::Dynamic);
        }
        let candidates = [
            (self.dynamic_path.as_ref(), FontOrigin::Dynamic),
            (self.static_path.as_ref(), FontOrigin::Static),
        ];
        for (dir, origin) in candidates {
            let Some(dir) = dir else { continue };
            let full = dir.join(name);
            if full.is_file() {
                return (full, origin);
            }
        }
        let dir = self
            .dynamic_path
            .as_ref()
            .or(self.static_path.as_ref())
            .map(|d| d.join(name))
            .unwrap_or_else(|| path.to_path_buf());
        (dir, FontOrigin::Dynamic)
    }

    fn insert(&mut self, font: VectorFont) -> Result<FontId> {
        // Faces of the same file share a ttf id: the id of the first one
        let idx = match self.fonts.iter().position(Option::is_none) {
            Some(idx) => idx,
            None if self.fonts.len() < MAX_VECTOR_FONTS => {
                self.fonts.push(None);
                self.fonts.len() - 1
            }
            None => {
                return Err(FontError::TooManyFonts {
                    max: MAX_VECTOR_FONTS,
                })
            }
        };
        let ttf_id = self.find(font.name(), 0).unwrap_or(idx as FontId);
        let font = font.with_ttf_id(ttf_id);
        log::debug!(
            "Vector font '{}' ({}px, ttf {}) registered as {}",
            font.name(),
            font.size(),
            ttf_id,
            idx
        );
        self.fonts[idx] = Some(font);
        Ok(idx as FontId)
    }

    fn remove(&mut self, name: &str, size: u8) -> Option<FontId> {
        let id = self.find(name, size)?;
        self.fonts[id as usize] = None;
        log::debug!("Vector font '{}' unregistered from {}", name, id);
        Some(id)
    }
}

/// Rasterizes outline fonts on demand
pub struct VectorBackend {
    state: RwLock<State>,
    cache: Mutex<LruCache<GlyphKey, Option<Glyph>>>,
    default_size: u8,
}

impl VectorBackend {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_CACHE_CAPACITY, DEFAULT_FONT_SIZE)
    }

    /// Backend sized from the facade configuration
    pub fn from_config(config: &FacadeConfig) -> Self {
        Self::with_options(config.glyph_cache_capacity, config.default_font_size)
    }

    pub fn with_options(cache_capacity: usize, default_size: u8) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: RwLock::new(State {
                fonts: Vec::new(),
                current: 0,
                current_size: 0,
                dynamic_path: None,
                static_path: None,
            }),
            cache: Mutex::new(LruCache::new(capacity)),
            default_size: default_size.max(1),
        }
    }

    /// Register a font held in memory; size 0 uses the backend default
    pub fn register_font_data(
        &self,
        name: impl Into<String>,
        data: impl Into<std::sync::Arc<[u8]>>,
        size: u8,
    ) -> Result<FontId> {
        let font = VectorFont::from_data(name, data, self.size_or_default(size), FontOrigin::Memory)?;
        self.insert(font)
    }

    /// Register a font file by path; size 0 uses the backend default
    pub fn register_font_file(&self, path: impl AsRef<Path>, size: u8, shaping: u8) -> Result<FontId> {
        let font = VectorFont::from_file(path.as_ref(), self.size_or_default(size), FontOrigin::Dynamic)?
            .with_shaping(shaping);
        self.insert(font)
    }

    /// Number of glyphs (and misses) currently cached
    pub fn cached_glyphs(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn size_or_default(&self, size: u8) -> u8 {
        if size == 0 {
            self.default_size
        } else {
            size
        }
    }

    fn insert(&self, font: VectorFont) -> Result<FontId> {
        let id = self.state.write().insert(font)?;
        // A reused slot must not serve the previous tenant's glyphs
        self.clear_cache();
        Ok(id)
    }

    fn load(&self, name: &str, size: u8, shaping: u8) -> Result<FontId> {
        let (path, origin) = self.state.read().locate(name);
        let font = VectorFont::from_file(&path, self.size_or_default(size), origin)?
            .with_shaping(shaping);
        self.insert(font)
    }

    fn glyph(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<Glyph> {
        let state = self.state.read();
        let size = state.size_for(font_id, size)?;
        let key = (font_id, size, cp);

        if let Some(cached) = self.cache.lock().get(&key) {
            return cached.clone();
        }

        let glyph = state
            .font(font_id)
            .and_then(|font| raster::rasterize(font, font_id, cp, size));
        if glyph.is_none() {
            log::trace!("U+{:04X} not in vector font {}", cp, font_id);
        }
        self.cache.lock().put(key, glyph.clone());
        glyph
    }

    fn advance(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<u16> {
        let state = self.state.read();
        let size = state.size_for(font_id, size)?;
        if let Some(Some(glyph)) = self.cache.lock().get(&(font_id, size, cp)) {
            return Some(glyph.node.advance);
        }
        state.font(font_id)?.advance(cp, size)
    }
}

impl Default for VectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBackend for VectorBackend {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn bitmap(&self, cp: CodePoint, font_id: FontId) -> Option<Glyph> {
        self.glyph(cp, font_id, 0)
    }

    fn bitmap_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<Glyph> {
        self.glyph(cp, font_id, size)
    }

    fn width(&self, cp: CodePoint, font_id: FontId) -> Option<u16> {
        self.advance(cp, font_id, 0)
    }

    fn width_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<u16> {
        self.advance(cp, font_id, size)
    }

    fn height_by_font_id(&self, font_id: FontId, size: u8) -> u16 {
        self.state.read().height_of(font_id, size)
    }

    fn height(&self) -> u16 {
        let state = self.state.read();
        state.height_of(state.current, 0)
    }

    fn glyph_height(&self, cp: CodePoint, font_id: FontId) -> u16 {
        self.glyph(cp, font_id, 0)
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
        let (font_id, size, ascent, is_emoji) = {
            let state = self.state.read();
            let font_id = state.current;
            let Some(size) = state.size_for(font_id, font_size) else {
                return OffsetPosY::default();
            };
            let Some(font) = state.font(font_id) else {
                return OffsetPosY::default();
            };
            let ascent = font.metrics(size).map(|m| m.ascent).unwrap_or(0.0);
            (font_id, size, ascent.ceil() as i32, font.is_emoji())
        };

        let mut offset = 0u16;
        let mut all_emoji = !text.is_empty();
        for ch in text.chars() {
            match self.glyph(ch as CodePoint, font_id, size) {
                Some(glyph) => {
                    let overshoot = glyph.node.top as i32 - ascent;
                    offset = offset.max(overshoot.max(0) as u16);
                    all_emoji &= is_emoji;
                }
                None => all_emoji = false,
            }
        }
        OffsetPosY { offset, all_emoji }
    }

    fn set_current_font_id(&self, font_id: FontId, size: u8) -> Result<()> {
        let mut state = self.state.write();
        let font_size = state
            .font(font_id)
            .map(VectorFont::size)
            .ok_or(FontError::InvalidFontId(font_id))?;
        state.current = font_id;
        state.current_size = if size == 0 { font_size } else { size };
        Ok(())
    }

    fn restore_current_font_id(&self, font_id: FontId) {
        let mut state = self.state.write();
        if let Some(size) = state.font(font_id).map(VectorFont::size) {
            state.current_size = size;
        }
        state.current = font_id;
    }

    fn base_font_id(&self) -> FontId {
        self.state.read().current
    }

    fn is_vector_font(&self) -> bool {
        true
    }

    fn is_emoji_font(&self, font_id: FontId) -> bool {
        self.state
            .read()
            .font(font_id)
            .is_some_and(VectorFont::is_emoji)
    }

    fn font_weight(&self, font_id: FontId) -> u8 {
        match self.state.read().font(font_id) {
            Some(_) => COVERAGE_BITS,
            None => 0,
        }
    }

    fn font_info(&self, font_id: FontId) -> Option<FontInfo> {
        self.state.read().font(font_id).map(VectorFont::info)
    }

    fn font_id(&self, name: &str, size: u8) -> Option<FontId> {
        self.state.read().find(name, size)
    }

    fn current_font_header(&self) -> Result<FontHeader> {
        let state = self.state.read();
        let font = state
            .font(state.current)
            .ok_or(FontError::InvalidFontId(state.current))?;
        let size = state.size_for(state.current, 0).unwrap_or(font.size());
        let metrics = font
            .metrics(size)
            .ok_or_else(|| FontError::InvalidFontData(font.name().to_string()))?;
        Ok(FontHeader {
            ascender: metrics.ascent.round() as i16,
            descender: metrics.descent.round() as i16,
            font_height: metrics.line_height(),
        })
    }

    fn register_font_info(&self, ttf_name: &str, shaping: u8) -> Result<FontId> {
        if let Some(id) = self.state.read().find(ttf_name, 0) {
            return Ok(id);
        }
        self.load(ttf_name, 0, shaping)
    }

    fn register_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        let mut added = 0;
        for info in fonts {
            let size = self.size_or_default(info.size);
            if self.state.read().find(&info.ttf_name, size).is_some() {
                continue;
            }
            self.load(&info.ttf_name, size, info.shaping)?;
            added += 1;
        }
        Ok(added)
    }

    fn unregister_font_info(&self, ttf_name: &str) -> Result<FontId> {
        let removed = self.state.write().remove(ttf_name, 0);
        let id = removed.ok_or_else(|| FontError::FontNotFound {
            name: ttf_name.to_string(),
        })?;
        self.clear_cache();
        Ok(id)
    }

    fn unregister_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        let removed = {
            let mut state = self.state.write();
            fonts
                .iter()
                .filter(|info| {
                    let size = self.size_or_default(info.size);
                    state.remove(&info.ttf_name, size).is_some()
                })
                .count()
        };
        if removed > 0 {
            self.clear_cache();
        }
        Ok(removed)
    }

    fn set_font_path(&self, dynamic_path: &str, static_path: &str) -> Result<()> {
        let dir = |p: &str| -> Result<Option<PathBuf>> {
            if p.is_empty() {
                return Ok(None);
            }
            let path = PathBuf::from(p);
            if !path.is_dir() {
                return Err(FontError::ConfigError(format!(
                    "Font directory does not exist: {}",
                    p
                )));
            }
            Ok(Some(path))
        };
        let dynamic_path = dir(dynamic_path)?;
        let static_path = dir(static_path)?;

        let mut state = self.state.write();
        state.dynamic_path = dynamic_path;
        state.static_path = static_path;
        Ok(())
    }

    fn font_version(&self) -> Result<FontVersion> {
        let state = self.state.read();
        let first_version = |origin: FontOrigin| {
            state
                .fonts
                .iter()
                .flatten()
                .filter(|font| font.origin() == origin)
                .find_map(VectorFont::version)
                .unwrap_or_default()
        };
        Ok(FontVersion {
            dynamic_version: first_version(FontOrigin::Dynamic),
            static_version: first_version(FontOrigin::Static),
        })
    }

    fn font_ttf_id(&self, font_id: FontId, _size: u8) -> Option<u8> {
        self.state.read().font(font_id).map(VectorFont::ttf_id)
    }

    fn open_vector_font(&self, ttf_id: u8) -> Result<()> {
        let state = self.state.read();
        let opened = state
            .fonts
            .iter()
            .flatten()
            .any(|font| font.ttf_id() == ttf_id && font.font_ref().is_some());
        if opened {
            Ok(())
        } else {
            Err(FontError::InvalidFontId(ttf_id))
        }
    }
}
