//! The contract every font backend signs
//!
//! Two kinds of backend exist today: scalable outline fonts that rasterize
//! on demand, and pre-rasterized bitmap fonts for targets without the memory
//! for outlines. Both answer the same questions through [`FontBackend`], so
//! the facade can swap one for the other without its callers noticing.
//!
//! ## Misses are answers, not errors
//!
//! A font that lacks a code point returns `None`. The facade reads that as
//! "try the next font", never as a failure.
//!
//! ## The current font
//!
//! Every backend keeps a notion of the "current font" (see
//! [`FontBackend::set_current_font_id`]). Height queries without a font id
//! read it, and the facade repoints it while it searches fallback fonts.

use crate::{
    error::{FontError, Result},
    types::*,
};

/// A glyph-resolution engine the facade can route requests to
///
/// Methods take `&self`; implementations keep their selection and caches
/// behind locks so a backend can be shared through an `Arc`.
///
/// ```ignore
/// struct NullBackend { current: parking_lot::Mutex<FontId> }
///
/// impl FontBackend for NullBackend {
///     fn bitmap(&self, _cp: CodePoint, _font_id: FontId) -> Option<Glyph> {
///         None // covers nothing
///     }
///     // ...
/// }
/// ```
pub trait FontBackend: Send + Sync {
    /// Short identifier for logs and error messages
    fn name(&self) -> &'static str;

    /// Glyph data for `cp` rendered with `font_id`, or `None` if the font lacks it
    fn bitmap(&self, cp: CodePoint, font_id: FontId) -> Option<Glyph>;

    /// Like [`bitmap`](Self::bitmap), at an explicit size for mixed-size spans
    fn bitmap_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<Glyph>;

    /// Advance width of `cp` in `font_id`, or `None` if the font lacks it
    fn width(&self, cp: CodePoint, font_id: FontId) -> Option<u16>;

    /// Like [`width`](Self::width), at an explicit size
    fn width_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<u16>;

    /// Line height of `font_id` at `size` (0 keeps the font's own size)
    fn height_by_font_id(&self, font_id: FontId, size: u8) -> u16;

    /// Line height of the current font
    fn height(&self) -> u16;

    /// Height of one glyph's ink
    fn glyph_height(&self, cp: CodePoint, font_id: FontId) -> u16;

    /// Tallest line height needed by `text`, honouring per-letter size spans
    fn line_max_height(
        &self,
        text: &str,
        font_id: FontId,
        letter_index: u16,
        size_spans: Option<&[SizeSpan]>,
    ) -> u16;

    /// Baseline correction for a line, and whether it is emoji only
    fn offset_pos_y(&self, text: &str, font_size: u8) -> OffsetPosY;

    /// Make `font_id` the current font; `size` 0 keeps its configured size
    fn set_current_font_id(&self, font_id: FontId, size: u8) -> Result<()>;

    /// Put back a current font previously read from [`base_font_id`](Self::base_font_id)
    ///
    /// Unlike [`set_current_font_id`](Self::set_current_font_id) this never
    /// validates: the font may have been unregistered since it was read, and
    /// the selection must still go back to exactly what it was.
    fn restore_current_font_id(&self, font_id: FontId);

    /// The current font
    fn base_font_id(&self) -> FontId;

    fn is_vector_font(&self) -> bool;

    fn is_emoji_font(&self, font_id: FontId) -> bool;

    fn font_weight(&self, font_id: FontId) -> u8;

    fn font_info(&self, font_id: FontId) -> Option<FontInfo>;

    /// Look a font up by name and size
    fn font_id(&self, name: &str, size: u8) -> Option<FontId>;

    fn current_font_header(&self) -> Result<FontHeader>;

    /// Register a single font by file or face name
    fn register_font_info(&self, ttf_name: &str, shaping: u8) -> Result<FontId>;

    /// Register many fonts; returns how many were added
    fn register_font_table(&self, fonts: &[FontInfo]) -> Result<usize>;

    fn unregister_font_info(&self, ttf_name: &str) -> Result<FontId>;

    /// Unregister many fonts; returns how many were removed
    fn unregister_font_table(&self, fonts: &[FontInfo]) -> Result<usize>;

    /// Where dynamic and static font files live
    fn set_font_path(&self, dynamic_path: &str, static_path: &str) -> Result<()>;

    fn font_version(&self) -> Result<FontVersion>;

    /// Ask the backend which font shaping analysis would pick for `text`
    fn shaping_font_id(&self, _text: &str, _font_id: FontId, _size: u8) -> ShapingInfo {
        ShapingInfo::default()
    }

    fn font_ttf_id(&self, _font_id: FontId, _size: u8) -> Option<u8> {
        None
    }

    fn open_vector_font(&self, _ttf_id: u8) -> Result<()> {
        Err(FontError::unsupported(self.name(), "open_vector_font"))
    }

    fn set_current_lang_id(&self, _lang_id: u8) -> Result<()> {
        Err(FontError::unsupported(self.name(), "set_current_lang_id"))
    }

    fn current_lang_id(&self) -> u8 {
        0
    }

    fn default_param_by_lang_id(&self, _lang_id: u8) -> Option<LangTextParam> {
        None
    }

    fn text_utf8(&self, _text_id: u16) -> Option<String> {
        None
    }

    fn text_param(&self, _text_id: u16) -> Option<TextParam> {
        None
    }

    fn wildcard_static_str(&self, _text_id: u16, _kind: WildcardStaticType) -> Option<String> {
        None
    }

    /// Code points of a static text resource
    fn code_points(&self, _text_id: u16) -> Option<Vec<CodePoint>> {
        None
    }
}
