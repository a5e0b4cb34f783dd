//! The shared facade when the application configures it up front
//!
//! Everything lives in one test: the facade is built once per process.
#![cfg(feature = "bitmap")]

use std::sync::Arc;

use uifont::types::GlyphNode;
use uifont::{
    configure_global, global, global_with, BackendKind, BitmapBackend, BitmapFont, FacadeConfig,
    FontBackend, FontError,
};

#[test]
fn test_configured_global_is_built_once() {
    let config = FacadeConfig::default()
        .backend(BackendKind::Bitmap)
        .multi_font(false);
    configure_global(config.clone()).unwrap();

    let again = configure_global(FacadeConfig::default());
    assert!(matches!(again, Err(FontError::ConfigError(_))));

    let shared = global();
    {
        let facade = shared.lock();
        assert!(facade.owns_backend());
        assert_eq!(facade.backend().name(), "bitmap");
        assert_eq!(facade.config(), &config);
        assert!(!facade.multi_font_enabled());
    }

    let other = FacadeConfig::default().backend(BackendKind::Vector);
    assert!(std::ptr::eq(global_with(other), shared));
    assert_eq!(global().lock().backend().name(), "bitmap");

    // A backend installed through the shared facade is seen by every caller
    let backend = BitmapBackend::new();
    let mut font = BitmapFont::new("latin", 16, 12, -4);
    let node = GlyphNode {
        advance: 9,
        rows: 12,
        cols: 9,
        ..Default::default()
    };
    font.insert_glyph('A' as u32, node, vec![1u8; 9 * 12]);
    let id = backend.add_font(font).unwrap();
    let backend: Arc<dyn FontBackend> = Arc::new(backend);

    global().lock().set_font(Some(backend.clone()));
    let mut facade = global().lock();
    assert!(!facade.owns_backend());
    assert_eq!(facade.bitmap('A' as u32, 0).unwrap().node.font_id, id);
    assert_eq!(facade.width('A' as u32, 0), 9);
}
