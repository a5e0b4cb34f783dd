//! Info command implementation
//!
//! Shows which backends were compiled in and what configuration a facade
//! would be built with right now.

use anyhow::Result;
use serde::Serialize;
use uifont::config::{ENV_BACKEND, ENV_FONT_SIZE, ENV_GLYPH_CACHE, ENV_MULTI_FONT};
use uifont::FacadeConfig;

use crate::cli::InfoArgs;

#[derive(Debug, Serialize)]
struct InfoReport {
    version: &'static str,
    backends: Vec<String>,
    backend: String,
    multi_font: bool,
    glyph_cache_capacity: usize,
    default_font_size: u8,
}

impl InfoReport {
    fn collect() -> Self {
        let config = FacadeConfig::from_env();
        Self {
            version: env!("CARGO_PKG_VERSION"),
            backends: uifont::linked_backends()
                .iter()
                .map(ToString::to_string)
                .collect(),
            backend: config.backend.to_string(),
            multi_font: config.multi_font,
            glyph_cache_capacity: config.glyph_cache_capacity,
            default_font_size: config.default_font_size,
        }
    }
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let report = InfoReport::collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("uifont v{}", report.version);
    println!();

    println!("Backends:");
    for name in &report.backends {
        let marker = if *name == report.backend { "*" } else { " " };
        println!("  {} {}", marker, name);
    }
    println!();

    println!("Configuration:");
    println!("  {:<20} {}", ENV_BACKEND, report.backend);
    println!(
        "  {:<20} {}",
        ENV_MULTI_FONT,
        if report.multi_font { "on" } else { "off" }
    );
    println!("  {:<20} {}", ENV_GLYPH_CACHE, report.glyph_cache_capacity);
    println!("  {:<20} {}", ENV_FONT_SIZE, report.default_font_size);

    Ok(())
}
