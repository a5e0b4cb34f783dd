//! The data that moves between the facade, its backends and the text layer

use std::sync::Arc;

/// Identifies an installed font configuration (face plus implicit size class)
pub type FontId = u8;

/// A Unicode scalar value waiting to become a glyph
pub type CodePoint = u32;

/// Reserved id that never names a font
pub const FONT_ID_MAX: FontId = 0xFF;

/// Shaping ids at or below this value mean "no override"
pub const NO_SHAPING_FONT: FontId = 1;

/// Ordered substitute fonts for one primary font
///
/// The first entry that covers a code point wins. The facade only reads it.
pub type SearchList = Arc<[FontId]>;

/// Placement and metrics of one resolved glyph
///
/// Backends fill this in; the facade passes it through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphNode {
    pub codepoint: CodePoint,
    /// Horizontal offset from the pen position to the left edge
    pub left: i16,
    /// Vertical offset from the baseline to the top edge
    pub top: i16,
    pub advance: u16,
    pub rows: u16,
    pub cols: u16,
    pub glyph_index: u32,
    /// Font that actually produced the glyph
    pub font_id: FontId,
    pub font_size: u8,
}

/// A glyph with its coverage data
///
/// `data` holds `rows * cols` bytes of 8-bit coverage, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub node: GlyphNode,
    pub data: Arc<[u8]>,
}

impl Glyph {
    pub fn new(node: GlyphNode, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            node,
            data: data.into(),
        }
    }

    /// Whitespace and other glyphs without ink
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A run of letters sharing one font size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpan {
    /// First letter index covered (inclusive)
    pub start: u16,
    /// Last letter index covered (exclusive)
    pub end: u16,
    pub size: u8,
    pub font_id: FontId,
}

impl SizeSpan {
    pub fn contains(&self, letter_index: u16) -> bool {
        letter_index >= self.start && letter_index < self.end
    }
}

/// Vertical metrics of the current font in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontHeader {
    pub ascender: i16,
    pub descender: i16,
    pub font_height: u16,
}

/// Registration record for one font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontInfo {
    /// File name (vector fonts) or face name (bitmap fonts)
    pub ttf_name: String,
    pub size: u8,
    /// Non-zero when the font needs complex shaping
    pub shaping: u8,
    pub ttf_id: u8,
    pub is_emoji: bool,
    pub weight: u8,
}

impl FontInfo {
    pub fn new(ttf_name: impl Into<String>, size: u8) -> Self {
        Self {
            ttf_name: ttf_name.into(),
            size,
            ..Default::default()
        }
    }
}

/// Default text settings for one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LangTextParam {
    pub font_id: FontId,
    pub size: u8,
    pub line_height: u16,
    pub letter_space: i16,
}

/// Horizontal alignment stored with a text resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text settings stored with a text resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextParam {
    pub font_id: FontId,
    pub size: u8,
    pub align: TextAlign,
    pub right_to_left: bool,
}

/// Which wildcard string of a text resource to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardStaticType {
    First,
    Second,
}

/// What shaping analysis decided for a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapingInfo {
    /// Font to try first; `0` or `1` means no override
    pub shaping_font: FontId,
    pub ttf_id: u8,
    pub script: u32,
}

/// Version strings of the dynamic and static font sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontVersion {
    pub dynamic_version: String,
    pub static_version: String,
}

/// Vertical offset for a line plus whether every glyph came from an emoji font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetPosY {
    pub offset: u16,
    pub all_emoji: bool,
}
