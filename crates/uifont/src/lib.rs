// this_file: crates/uifont/src/lib.rs

//! uifont: ask for a code point, get pixels back
//!
//! UI text code should not care whether glyphs come from scalable outlines
//! or from a pre-rasterized table, nor which of the installed fonts happens
//! to cover a character. This crate puts one facade in front of all of that.
//!
//! - exactly one backend is active; swap it at runtime with
//!   [`FontFacade::set_font`]
//! - glyph and width lookups fall back through per-font search lists, and
//!   leave the backend's current font exactly as they found it
//! - everything else the backend knows (heights, registration, language
//!   tables) is passed through unchanged
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//! use uifont::{FacadeConfig, FontFacade, SearchListRegistry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lists = Arc::new(SearchListRegistry::new());
//!     let mut facade = FontFacade::builder()
//!         .config(FacadeConfig::from_env())
//!         .fallback(lists.clone())
//!         .build()?;
//!
//!     facade.set_font_path("/system/fonts", "")?;
//!     let ui = facade.register_font_info("NotoSans-Regular.ttf", 0)?;
//!     let emoji = facade.register_font_info("NotoColorEmoji.ttf", 0)?;
//!     lists.set_search_list(ui, [emoji]);
//!
//!     facade.set_current_font_id(ui, 0)?;
//!     for ch in "Hi 👋".chars() {
//!         println!("{:?} -> {}px", ch, facade.width(ch as u32, 0));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `vector` (default): outline fonts through `uifont-vector`
//! - `bitmap` (default): pre-rasterized fonts through `uifont-bitmap`

mod backend;
mod facade;
mod global;
mod search;

pub use backend::{create_backend, linked_backends};
pub use facade::{FacadeBuilder, FontFacade};
pub use global::{configure_global, global, global_with};

pub use uifont_core::{
    config, error, fallback, traits, types, BackendKind, CodePoint, FacadeConfig,
    FallbackProvider, FontBackend, FontError, FontId, Glyph, GlyphNode, NoFallback, Result,
    SearchList, SearchListRegistry, FONT_ID_MAX,
};

#[cfg(feature = "bitmap")]
pub use uifont_bitmap::{BitmapBackend, BitmapFont};
#[cfg(feature = "vector")]
pub use uifont_vector::VectorBackend;
