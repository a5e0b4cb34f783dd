//! Resolve command implementation
//!
//! Registers the given fonts on a fresh facade and reports, character by
//! character, which font the fallback search settled on.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use uifont::{FacadeConfig, FontFacade, FontId, SearchListRegistry};

use crate::cli::ResolveArgs;

#[derive(Debug, Serialize)]
struct Resolution {
    #[serde(rename = "char")]
    ch: String,
    codepoint: String,
    found: bool,
    font_id: Option<FontId>,
    width: u16,
    rows: u16,
    cols: u16,
}

fn facade_for(args: &ResolveArgs) -> Result<FontFacade> {
    let mut config = FacadeConfig::from_env();
    if let Some(backend) = args.backend {
        config = config.backend(backend);
    }
    if args.no_multi_font {
        config = config.multi_font(false);
    }
    if args.size > 0 {
        config = config.default_font_size(args.size);
    }

    let lists = Arc::new(SearchListRegistry::new());
    let facade = FontFacade::builder()
        .config(config)
        .fallback(lists.clone())
        .build()?;

    let mut ids = Vec::with_capacity(args.fonts.len());
    for path in &args.fonts {
        let name = path.to_string_lossy();
        let id = facade
            .register_font_info(&name, 0)
            .with_context(|| format!("Failed to register {}", path.display()))?;
        log::debug!("{} -> font {}", path.display(), id);
        ids.push(id);
    }

    let Some((&primary, rest)) = ids.split_first() else {
        bail!("No fonts given");
    };
    if args.fallback.is_empty() {
        lists.set_search_list(primary, rest.iter().copied());
    }
    for spec in &args.fallback {
        lists.set_search_list(spec.font_id, spec.fonts.iter().copied());
    }
    facade
        .set_current_font_id(primary, 0)
        .context("Failed to select the first font")?;

    Ok(facade)
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let mut facade = facade_for(args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut missing = 0usize;

    for ch in args.text.chars() {
        let cp = ch as u32;
        let glyph = facade.bitmap(cp, args.shaping);
        let record = Resolution {
            ch: ch.to_string(),
            codepoint: format!("U+{:04X}", cp),
            found: glyph.is_some(),
            font_id: glyph.as_ref().map(|g| g.node.font_id),
            width: facade.width(cp, args.shaping),
            rows: glyph.as_ref().map(|g| g.node.rows).unwrap_or(0),
            cols: glyph.as_ref().map(|g| g.node.cols).unwrap_or(0),
        };
        if !record.found {
            missing += 1;
        }

        if args.json {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            match record.font_id {
                Some(font_id) => writeln!(
                    out,
                    "{:<8} {:?}  font {:<3} width {:<4} {}x{}",
                    record.codepoint, ch, font_id, record.width, record.cols, record.rows
                )?,
                None => writeln!(out, "{:<8} {:?}  missing", record.codepoint, ch)?,
            }
        }
    }

    if missing > 0 {
        log::info!("{} of {} characters not covered", missing, args.text.chars().count());
    }
    Ok(())
}
