//! uifont Core: the vocabulary shared by the facade and its backends
//!
//! A UI text layer asks one question over and over: "what does this code
//! point look like, and how much room does it take?" This crate holds the
//! pieces every answer is built from.
//!
//! - [`traits::FontBackend`] - the contract a glyph engine implements
//! - [`fallback::FallbackProvider`] - ordered substitute fonts per primary font
//! - [`types`] - glyphs, metrics and font records
//! - [`config::FacadeConfig`] - startup choices (backend kind, fallback on/off)
//! - [`error::FontError`] - the things that can actually go wrong
//!
//! The facade that ties them together lives in the `uifont` crate.

pub mod config;
pub mod error;
pub mod fallback;
pub mod traits;
pub mod types;

pub use config::{BackendKind, FacadeConfig};
pub use error::{FontError, Result};
pub use fallback::{FallbackProvider, NoFallback, SearchListRegistry};
pub use traits::FontBackend;
pub use types::{CodePoint, FontId, Glyph, GlyphNode, SearchList, FONT_ID_MAX};
