//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uifont::{BackendKind, FontId};

/// uifont - ask which installed font draws each character
#[derive(Parser, Debug)]
#[command(name = "uifont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display linked backends and the effective configuration
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Resolve every character of a text through the fallback search
    #[command(alias = "r")]
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Text to resolve, one lookup per character
    pub text: String,

    /// Font file to register (repeat for more; ids follow the order given)
    #[arg(short = 'f', long = "font", required = true)]
    pub fonts: Vec<PathBuf>,

    /// Search list for a font: <id>=<id>,<id>,...
    /// Without any, the first font falls back to the others in order
    #[arg(long = "fallback", value_parser = parse_fallback)]
    pub fallback: Vec<FallbackSpec>,

    /// Shaping font override (0 and 1 mean none)
    #[arg(long, default_value_t = 0)]
    pub shaping: FontId,

    /// Font size in pixels (0 keeps the configured default)
    #[arg(short = 's', long, default_value_t = 0)]
    pub size: u8,

    /// Backend to build: vector or bitmap
    #[arg(short = 'b', long, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    /// Only ask the current font, never the search list
    #[arg(long)]
    pub no_multi_font: bool,

    /// One JSON object per character instead of a table
    #[arg(long)]
    pub json: bool,
}

/// `--fallback 0=2,1`: font 0 falls back to 2, then 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSpec {
    pub font_id: FontId,
    pub fonts: Vec<FontId>,
}

fn parse_font_id(s: &str) -> Result<FontId, String> {
    s.trim()
        .parse::<FontId>()
        .map_err(|_| format!("'{}' is not a font id (0-254)", s.trim()))
}

pub fn parse_fallback(s: &str) -> Result<FallbackSpec, String> {
    let (font_id, list) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<id>,<id>,... but got '{}'", s))?;
    let fonts = list
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_font_id)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FallbackSpec {
        font_id: parse_font_id(font_id)?,
        fonts,
    })
}

fn parse_backend(s: &str) -> Result<BackendKind, String> {
    s.parse::<BackendKind>().map_err(|e| e.to_string())
}
