// this_file: backends/uifont-vector/src/font.rs

//! One registered outline font
//!
//! Stores the raw font bytes and parses them on demand, the same way the
//! font database keeps fonts: no self-referential borrows, no leaks, and a
//! collection file costs nothing until one of its faces is used.

use std::path::Path;
use std::sync::Arc;

use read_fonts::types::Tag;
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, MetadataProvider};
use uifont_core::error::{FontError, Result};
use uifont_core::types::{CodePoint, FontInfo};

/// Tables whose presence marks a colour (emoji) font
const EMOJI_TABLES: [&[u8; 4]; 3] = [b"CBDT", b"sbix", b"COLR"];

/// Where the bytes of a font came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    /// The dynamic (updatable) font directory
    Dynamic,
    /// The static (read-only) font directory
    Static,
    /// Handed over in memory
    Memory,
}

/// Vertical metrics in pixels at one size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl ScaledMetrics {
    pub fn line_height(&self) -> u16 {
        (self.ascent - self.descent + self.leading).ceil().max(0.0) as u16
    }
}

/// A registered outline font at its configured size
pub struct VectorFont {
    name: String,
    data: Arc<[u8]>,
    size: u8,
    shaping: u8,
    ttf_id: u8,
    is_emoji: bool,
    origin: FontOrigin,
}

impl VectorFont {
    /// Validates `data` and wraps it
    pub fn from_data(
        name: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        size: u8,
        origin: FontOrigin,
    ) -> Result<Self> {
        let name = name.into();
        let data = data.into();
        let font = FontRef::from_index(&data, 0)
            .map_err(|e| FontError::InvalidFontData(format!("{}: {}", name, e)))?;
        let is_emoji = EMOJI_TABLES
            .iter()
            .any(|tag| font.table_data(Tag::new(tag)).is_some());

        Ok(Self {
            name,
            data,
            size,
            shaping: 0,
            ttf_id: 0,
            is_emoji,
            origin,
        })
    }

    /// Reads and validates a font file
    pub fn from_file(path: &Path, size: u8, origin: FontOrigin) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| FontError::font_load(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_data(name, data, size, origin)
    }

    pub fn with_shaping(mut self, shaping: u8) -> Self {
        self.shaping = shaping;
        self
    }

    pub(crate) fn with_ttf_id(mut self, ttf_id: u8) -> Self {
        self.ttf_id = ttf_id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn ttf_id(&self) -> u8 {
        self.ttf_id
    }

    pub fn is_emoji(&self) -> bool {
        self.is_emoji
    }

    pub fn origin(&self) -> FontOrigin {
        self.origin
    }

    /// Parses the stored bytes; they were validated at registration
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, 0).ok()
    }

    /// Advance of `cp` in whole pixels at `size`
    pub fn advance(&self, cp: CodePoint, size: u8) -> Option<u16> {
        let font = self.font_ref()?;
        let gid = font.charmap().map(cp)?;
        let advance = font
            .glyph_metrics(Size::new(size as f32), LocationRef::default())
            .advance_width(gid)?;
        Some(advance.round().max(0.0) as u16)
    }

    pub fn metrics(&self, size: u8) -> Option<ScaledMetrics> {
        let metrics = self
            .font_ref()?
            .metrics(Size::new(size as f32), LocationRef::default());
        Some(ScaledMetrics {
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: metrics.leading,
        })
    }

    /// The font's version string from its `name` table
    pub fn version(&self) -> Option<String> {
        let font = self.font_ref()?;
        let version = font
            .localized_strings(skrifa::string::StringId::VERSION_STRING)
            .english_or_first()?;
        Some(version.to_string())
    }

    pub fn info(&self) -> FontInfo {
        FontInfo {
            ttf_name: self.name.clone(),
            size: self.size,
            shaping: self.shaping,
            ttf_id: self.ttf_id,
            is_emoji: self.is_emoji,
            weight: crate::COVERAGE_BITS,
        }
    }
}

impl std::fmt::Debug for VectorFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .field("size", &self.size)
            .field("ttf_id", &self.ttf_id)
            .field("is_emoji", &self.is_emoji)
            .field("origin", &self.origin)
            .finish()
    }
}
