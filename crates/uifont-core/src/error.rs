// this_file: crates/uifont-core/src/error.rs

//! Error types for uifont.
//!
//! A missing glyph is not an error here. Glyph lookups answer with `None`
//! (or a zero width) and the caller decides what to draw instead. The
//! variants below cover the things that really can go wrong: fonts that
//! fail to load, ids that name nothing, and configuration mistakes.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FontId;

pub type Result<T> = std::result::Result<T, FontError>;

/// Main error type for uifont operations
#[derive(Debug, Error)]
pub enum FontError {
    /// Font file could not be read
    #[error("Failed to load font: {path:?}")]
    FontLoad {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No font registered under this name
    #[error("Font not found: {name}")]
    FontNotFound {
        /// Name that could not be resolved.
        name: String,
    },

    /// No font registered under this id
    #[error("Invalid font id: {0}")]
    InvalidFontId(FontId),

    /// Bytes are not a font the backend understands
    #[error("Invalid font data: {0}")]
    InvalidFontData(String),

    /// Every font id slot is taken
    #[error("Font table full ({max} fonts)")]
    TooManyFonts {
        /// Capacity of the font table.
        max: usize,
    },

    /// No language table registered under this id
    #[error("Unknown language id: {0}")]
    UnknownLanguage(u8),

    /// The active backend does not implement this operation
    #[error("Operation not supported by the {backend} backend: {operation}")]
    Unsupported {
        /// Backend name.
        backend: &'static str,
        /// Operation that was requested.
        operation: &'static str,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FontError {
    /// Shorthand for [`FontError::FontLoad`]
    pub fn font_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FontLoad {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`FontError::Unsupported`]
    pub fn unsupported(backend: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { backend, operation }
    }
}
