// this_file: crates/uifont/src/backend.rs

//! Building the backend the facade owns
//!
//! Which variants exist depends on the cargo features this crate was built
//! with (`vector`, `bitmap`). Asking for one that was left out is a
//! configuration error, not a silent substitution.

use uifont_core::{BackendKind, FacadeConfig, FontBackend, FontError, Result};

#[cfg(feature = "bitmap")]
use uifont_bitmap::BitmapBackend;
#[cfg(feature = "vector")]
use uifont_vector::VectorBackend;

#[cfg(not(any(feature = "vector", feature = "bitmap")))]
compile_error!("uifont needs at least one backend feature: `vector` or `bitmap`");

/// Backend variants compiled into this build
pub fn linked_backends() -> Vec<BackendKind> {
    let mut kinds = Vec::new();
    #[cfg(feature = "vector")]
    kinds.push(BackendKind::Vector);
    #[cfg(feature = "bitmap")]
    kinds.push(BackendKind::Bitmap);
    kinds
}

/// Build the backend `config` asks for
pub fn create_backend(config: &FacadeConfig) -> Result<Box<dyn FontBackend>> {
    log::debug!("Creating {} backend", config.backend);
    match config.backend {
        #[cfg(feature = "vector")]
        BackendKind::Vector => Ok(Box::new(VectorBackend::from_config(config))),
        #[cfg(feature = "bitmap")]
        BackendKind::Bitmap => Ok(Box::new(BitmapBackend::new())),
        #[allow(unreachable_patterns)]
        other => Err(FontError::ConfigError(format!(
            "The {} backend is not compiled in (enable the `{}` feature)",
            other, other
        ))),
    }
}

/// The backend used when the configured one cannot be built
#[cfg(feature = "vector")]
pub(crate) fn fallback_backend(config: &FacadeConfig) -> Box<dyn FontBackend> {
    Box::new(VectorBackend::from_config(config))
}

#[cfg(not(feature = "vector"))]
pub(crate) fn fallback_backend(_config: &FacadeConfig) -> Box<dyn FontBackend> {
    Box::new(BitmapBackend::new())
}
