//! Startup configuration
//!
//! Picks which backend the facade builds for itself and whether the
//! fallback search runs at all. Resolve it once, before the facade is first
//! used; later changes do not reach an already-built facade.
//!
//! # Environment Variables
//!
//! [`FacadeConfig::from_env`] starts from the defaults and applies:
//!
//! ```bash
//! UIFONT_BACKEND=bitmap       # vector (default) or bitmap
//! UIFONT_MULTI_FONT=0         # 1/true/yes/on or 0/false/no/off
//! UIFONT_GLYPH_CACHE=512      # rasterized glyphs kept by the vector backend
//! UIFONT_FONT_SIZE=24         # size used when a font is selected with size 0
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::FontError;

pub const ENV_BACKEND: &str = "UIFONT_BACKEND";
pub const ENV_MULTI_FONT: &str = "UIFONT_MULTI_FONT";
pub const ENV_GLYPH_CACHE: &str = "UIFONT_GLYPH_CACHE";
pub const ENV_FONT_SIZE: &str = "UIFONT_FONT_SIZE";

/// Which backend the facade constructs when none is supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Scalable outlines, rasterized on demand
    #[default]
    Vector,
    /// Pre-rasterized glyph tables
    Bitmap,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Vector => write!(f, "vector"),
            BackendKind::Bitmap => write!(f, "bitmap"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector" | "ttf" => Ok(BackendKind::Vector),
            "bitmap" | "bmp" => Ok(BackendKind::Bitmap),
            other => Err(FontError::ConfigError(format!(
                "Unknown backend '{}' (expected vector or bitmap)",
                other
            ))),
        }
    }
}

/// Settings resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeConfig {
    pub backend: BackendKind,
    /// Run the shaping override and fallback search
    pub multi_font: bool,
    /// Rasterized glyphs the vector backend keeps around
    pub glyph_cache_capacity: usize,
    /// Size a font gets when it is selected with size 0
    pub default_font_size: u8,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Vector,
            multi_font: true,
            glyph_cache_capacity: 256,
            default_font_size: 16,
        }
    }
}

impl FacadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn multi_font(mut self, enabled: bool) -> Self {
        self.multi_font = enabled;
        self
    }

    pub fn glyph_cache_capacity(mut self, capacity: usize) -> Self {
        self.glyph_cache_capacity = capacity.max(1);
        self
    }

    pub fn default_font_size(mut self, size: u8) -> Self {
        self.default_font_size = size.max(1);
        self
    }

    /// Defaults overridden by `UIFONT_*` environment variables
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_BACKEND) {
            match val.parse() {
                Ok(kind) => config.backend = kind,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_BACKEND, e),
            }
        }

        if let Some(val) = lookup(ENV_MULTI_FONT) {
            match parse_flag(&val) {
                Some(enabled) => config.multi_font = enabled,
                None => log::warn!("Ignoring {}={:?}: not a boolean", ENV_MULTI_FONT, val),
            }
        }

        if let Some(val) = lookup(ENV_GLYPH_CACHE) {
            match val.trim().parse::<usize>() {
                Ok(capacity) => config = config.glyph_cache_capacity(capacity),
                Err(_) => log::warn!("Ignoring {}={:?}: not a count", ENV_GLYPH_CACHE, val),
            }
        }

        if let Some(val) = lookup(ENV_FONT_SIZE) {
            match val.trim().parse::<u8>() {
                Ok(size) => config = config.default_font_size(size),
                Err(_) => log::warn!("Ignoring {}={:?}: not a size", ENV_FONT_SIZE, val),
            }
        }

        config
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
