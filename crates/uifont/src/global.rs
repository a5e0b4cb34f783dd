//! The process-wide facade
//!
//! Built on first use from [`FacadeConfig::from_env`], or from whatever
//! [`configure_global`] installed before that. Lives for the rest of the
//! process; switch its backend with [`FontFacade::set_font`].

use std::sync::OnceLock;

use parking_lot::Mutex;
use uifont_core::{FacadeConfig, FontError, Result};

use crate::backend::fallback_backend;
use crate::facade::FontFacade;

static GLOBAL: OnceLock<Mutex<FontFacade>> = OnceLock::new();

fn build(config: FacadeConfig) -> FontFacade {
    match FontFacade::builder().config(config.clone()).build() {
        Ok(facade) => facade,
        Err(e) => {
            log::warn!("{}; using the default backend instead", e);
            FontFacade::with_owned(fallback_backend(&config), config)
        }
    }
}

/// The shared facade, built on first call
///
/// ```no_run
/// let width = uifont::global().lock().width('A' as u32, 0);
/// ```
pub fn global() -> &'static Mutex<FontFacade> {
    GLOBAL.get_or_init(|| Mutex::new(build(FacadeConfig::from_env())))
}

/// The shared facade, built from `config` if this is the first call
///
/// An already-built facade is returned as is.
pub fn global_with(config: FacadeConfig) -> &'static Mutex<FontFacade> {
    GLOBAL.get_or_init(|| Mutex::new(build(config)))
}

/// Build the shared facade from `config` now
///
/// Fails once the facade exists, or when `config` names a backend that is
/// not compiled in.
pub fn configure_global(config: FacadeConfig) -> Result<()> {
    if GLOBAL.get().is_some() {
        return Err(FontError::ConfigError(
            "The global font facade is already initialized".to_string(),
        ));
    }
    let facade = FontFacade::builder().config(config).build()?;
    GLOBAL.set(Mutex::new(facade)).map_err(|_| {
        FontError::ConfigError("The global font facade is already initialized".to_string())
    })
}
