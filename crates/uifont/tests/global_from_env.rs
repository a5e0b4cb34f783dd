//! The shared facade built lazily from `UIFONT_*` variables
//!
//! One test per file: the facade is built once per process.
#![cfg(feature = "bitmap")]

use uifont::config::{ENV_BACKEND, ENV_FONT_SIZE, ENV_GLYPH_CACHE, ENV_MULTI_FONT};
use uifont::{configure_global, global, global_with, BackendKind, FacadeConfig, FontError};

#[test]
fn test_first_use_reads_the_environment() {
    std::env::set_var(ENV_BACKEND, "bitmap");
    std::env::set_var(ENV_MULTI_FONT, "off");
    std::env::remove_var(ENV_GLYPH_CACHE);
    std::env::remove_var(ENV_FONT_SIZE);

    let shared = global();
    {
        let facade = shared.lock();
        assert!(facade.owns_backend());
        assert_eq!(facade.backend().name(), "bitmap");
        assert_eq!(facade.config().backend, BackendKind::Bitmap);
        assert!(!facade.multi_font_enabled());
    }

    assert!(matches!(
        configure_global(FacadeConfig::default()),
        Err(FontError::ConfigError(_))
    ));
    let vector = FacadeConfig::default().backend(BackendKind::Vector);
    assert!(std::ptr::eq(global_with(vector), shared));
    assert!(std::ptr::eq(global(), shared));

    let mut facade = shared.lock();
    assert!(facade.bitmap('A' as u32, 0).is_none());
    assert_eq!(facade.width('A' as u32, 0), 0);
    assert_eq!(facade.current_font_id(), 0);
}
