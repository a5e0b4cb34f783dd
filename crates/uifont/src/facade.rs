// this_file: crates/uifont/src/facade.rs

//! The one place UI text asks about glyphs
//!
//! [`FontFacade`] holds exactly one active backend and forwards to it. Two
//! questions, glyph bitmaps and advance widths, go through the multi-font
//! search first; everything else is passed straight through.

use std::sync::Arc;

use uifont_core::{
    types::*, FacadeConfig, FallbackProvider, FontBackend, NoFallback, Result,
};

use crate::backend::create_backend;
use crate::search::resolve;

/// The active backend and who is responsible for it
enum BackendSlot {
    /// Built by the facade, dropped with it (or when replaced)
    Owned(Box<dyn FontBackend>),
    /// Handed in by a caller who keeps its own handle
    External(Arc<dyn FontBackend>),
}

impl BackendSlot {
    fn get(&self) -> &dyn FontBackend {
        match self {
            BackendSlot::Owned(backend) => backend.as_ref(),
            BackendSlot::External(backend) => backend.as_ref(),
        }
    }
}

/// Font resolution facade
///
/// Glyph and width lookups take `&mut self`: a lookup may repoint the
/// backend's current font while it walks fallbacks, and the borrow keeps a
/// second lookup from watching that happen.
///
/// ```no_run
/// use std::sync::Arc;
/// use uifont::{FontFacade, SearchListRegistry};
///
/// let lists = Arc::new(SearchListRegistry::new());
/// let mut facade = FontFacade::builder().fallback(lists.clone()).build()?;
///
/// let latin = facade.register_font_info("NotoSans-Regular.ttf", 0)?;
/// let cjk = facade.register_font_info("NotoSansSC-Regular.otf", 0)?;
/// lists.set_search_list(latin, [cjk]);
///
/// facade.set_current_font_id(latin, 0)?;
/// let _glyph = facade.bitmap('中' as u32, 0); // served by the CJK font
/// assert_eq!(facade.current_font_id(), latin);
/// # Ok::<(), uifont::FontError>(())
/// ```
pub struct FontFacade {
    backend: BackendSlot,
    fallback: Arc<dyn FallbackProvider>,
    config: FacadeConfig,
}

impl FontFacade {
    pub fn builder() -> FacadeBuilder {
        FacadeBuilder::new()
    }

    /// A facade with its own default backend, configured from the environment
    pub fn new() -> Result<Self> {
        Self::builder().config(FacadeConfig::from_env()).build()
    }

    pub(crate) fn with_owned(backend: Box<dyn FontBackend>, config: FacadeConfig) -> Self {
        Self {
            backend: BackendSlot::Owned(backend),
            fallback: Arc::new(NoFallback),
            config,
        }
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// The active backend
    pub fn backend(&self) -> &dyn FontBackend {
        self.backend.get()
    }

    /// Whether the active backend is the facade's own default
    pub fn owns_backend(&self) -> bool {
        matches!(self.backend, BackendSlot::Owned(_))
    }

    /// Switch to `backend`
    ///
    /// `None` changes nothing. Otherwise a default backend the facade built
    /// for itself is dropped right here; a previously supplied one is only
    /// released, its owner still holds it.
    pub fn set_font(&mut self, backend: Option<Arc<dyn FontBackend>>) {
        let Some(backend) = backend else {
            log::trace!("set_font(None) ignored");
            return;
        };
        log::debug!(
            "Switching backend: {} -> {}",
            self.backend.get().name(),
            backend.name()
        );
        self.backend = BackendSlot::External(backend);
    }

    pub fn set_fallback(&mut self, fallback: Arc<dyn FallbackProvider>) {
        self.fallback = fallback;
    }

    pub fn multi_font_enabled(&self) -> bool {
        self.config.multi_font
    }

    /// Glyph for `cp`, searching the shaping font, the current font and its
    /// fallbacks in that order
    pub fn bitmap(&mut self, cp: CodePoint, shaping: FontId) -> Option<Glyph> {
        let glyph = resolve(
            self.backend.get(),
            self.fallback.as_ref(),
            self.config.multi_font,
            shaping,
            |backend, font_id| {
                log::trace!("Probing font {} for U+{:04X}", font_id, cp);
                backend.bitmap(cp, font_id)
            },
        );
        if glyph.is_none() {
            log::trace!("No font has U+{:04X}", cp);
        }
        glyph
    }

    /// Glyph for `cp` in exactly `font_id` at `size`, no fallback
    pub fn bitmap_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> Option<Glyph> {
        self.backend.get().bitmap_spannable(cp, font_id, size)
    }

    /// Advance width of `cp`, same search order as [`bitmap`](Self::bitmap)
    ///
    /// 0 when no font has the code point.
    pub fn width(&mut self, cp: CodePoint, shaping: FontId) -> u16 {
        resolve(
            self.backend.get(),
            self.fallback.as_ref(),
            self.config.multi_font,
            shaping,
            |backend, font_id| backend.width(cp, font_id),
        )
        .unwrap_or(0)
    }

    /// Advance width of `cp` in exactly `font_id` at `size`; 0 on a miss
    pub fn width_spannable(&self, cp: CodePoint, font_id: FontId, size: u8) -> u16 {
        self.backend
            .get()
            .width_spannable(cp, font_id, size)
            .unwrap_or(0)
    }

    pub fn height(&self) -> u16 {
        self.backend.get().height()
    }

    pub fn height_spannable(&self, font_id: FontId, size: u8) -> u16 {
        self.backend.get().height_by_font_id(font_id, size)
    }

    pub fn glyph_height(&self, cp: CodePoint, font_id: FontId) -> u16 {
        self.backend.get().glyph_height(cp, font_id)
    }

    pub fn line_max_height(
        &self,
        text: &str,
        font_id: FontId,
        letter_index: u16,
        size_spans: Option<&[SizeSpan]>,
    ) -> u16 {
        self.backend
            .get()
            .line_max_height(text, font_id, letter_index, size_spans)
    }

    pub fn offset_pos_y(&self, text: &str, font_size: u8) -> OffsetPosY {
        self.backend.get().offset_pos_y(text, font_size)
    }

    pub fn current_font_id(&self) -> FontId {
        self.backend.get().base_font_id()
    }

    pub fn set_current_font_id(&self, font_id: FontId, size: u8) -> Result<()> {
        self.backend.get().set_current_font_id(font_id, size)
    }

    pub fn is_vector_font(&self) -> bool {
        self.backend.get().is_vector_font()
    }

    pub fn is_emoji_font(&self, font_id: FontId) -> bool {
        self.backend.get().is_emoji_font(font_id)
    }

    pub fn font_weight(&self, font_id: FontId) -> u8 {
        self.backend.get().font_weight(font_id)
    }

    pub fn font_info(&self, font_id: FontId) -> Option<FontInfo> {
        self.backend.get().font_info(font_id)
    }

    pub fn font_id(&self, name: &str, size: u8) -> Option<FontId> {
        self.backend.get().font_id(name, size)
    }

    pub fn current_font_header(&self) -> Result<FontHeader> {
        self.backend.get().current_font_header()
    }

    pub fn register_font_info(&self, ttf_name: &str, shaping: u8) -> Result<FontId> {
        self.backend.get().register_font_info(ttf_name, shaping)
    }

    pub fn register_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        self.backend.get().register_font_table(fonts)
    }

    pub fn unregister_font_info(&self, ttf_name: &str) -> Result<FontId> {
        self.backend.get().unregister_font_info(ttf_name)
    }

    pub fn unregister_font_table(&self, fonts: &[FontInfo]) -> Result<usize> {
        self.backend.get().unregister_font_table(fonts)
    }

    pub fn set_font_path(&self, dynamic_path: &str, static_path: &str) -> Result<()> {
        self.backend.get().set_font_path(dynamic_path, static_path)
    }

    pub fn font_version(&self) -> Result<FontVersion> {
        self.backend.get().font_version()
    }

    pub fn shaping_font_id(&self, text: &str, font_id: FontId, size: u8) -> ShapingInfo {
        self.backend.get().shaping_font_id(text, font_id, size)
    }

    pub fn font_ttf_id(&self, font_id: FontId, size: u8) -> Option<u8> {
        self.backend.get().font_ttf_id(font_id, size)
    }

    pub fn open_vector_font(&self, ttf_id: u8) -> Result<()> {
        self.backend.get().open_vector_font(ttf_id)
    }

    pub fn set_current_lang_id(&self, lang_id: u8) -> Result<()> {
        self.backend.get().set_current_lang_id(lang_id)
    }

    pub fn current_lang_id(&self) -> u8 {
        self.backend.get().current_lang_id()
    }

    pub fn default_param_by_lang_id(&self, lang_id: u8) -> Option<LangTextParam> {
        self.backend.get().default_param_by_lang_id(lang_id)
    }

    pub fn text_utf8(&self, text_id: u16) -> Option<String> {
        self.backend.get().text_utf8(text_id)
    }

    pub fn text_param(&self, text_id: u16) -> Option<TextParam> {
        self.backend.get().text_param(text_id)
    }

    pub fn wildcard_static_str(&self, text_id: u16, kind: WildcardStaticType) -> Option<String> {
        self.backend.get().wildcard_static_str(text_id, kind)
    }

    pub fn code_points(&self, text_id: u16) -> Option<Vec<CodePoint>> {
        self.backend.get().code_points(text_id)
    }
}

impl std::fmt::Debug for FontFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFacade")
            .field("backend", &self.backend.get().name())
            .field("owns_backend", &self.owns_backend())
            .field("config", &self.config)
            .finish()
    }
}

/// Configures and builds a [`FontFacade`]
#[derive(Default)]
pub struct FacadeBuilder {
    config: FacadeConfig,
    backend: Option<BackendSlot>,
    fallback: Option<Arc<dyn FallbackProvider>>,
}

impl FacadeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: FacadeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a caller-supplied backend instead of building one
    pub fn backend(mut self, backend: Arc<dyn FontBackend>) -> Self {
        self.backend = Some(BackendSlot::External(backend));
        self
    }

    /// Hand the facade a backend it owns and drops
    pub fn owned_backend(mut self, backend: Box<dyn FontBackend>) -> Self {
        self.backend = Some(BackendSlot::Owned(backend));
        self
    }

    pub fn fallback(mut self, fallback: Arc<dyn FallbackProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Fails only when the configured backend is not compiled in
    pub fn build(self) -> Result<FontFacade> {
        let backend = match self.backend {
            Some(slot) => slot,
            None => BackendSlot::Owned(create_backend(&self.config)?),
        };
        log::debug!(
            "Font facade ready: {} backend, multi-font {}",
            backend.get().name(),
            if self.config.multi_font { "on" } else { "off" }
        );
        Ok(FontFacade {
            backend,
            fallback: self.fallback.unwrap_or_else(|| Arc::new(NoFallback)),
            config: self.config,
        })
    }
}
