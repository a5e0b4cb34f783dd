//! Outline to coverage mask
//!
//! skrifa extracts the outline, zeno fills it. The outline is fed to two
//! sinks at once: an SVG path string (what zeno consumes) and a kurbo path
//! (cheap, exact bounds).

use kurbo::Shape;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::MetadataProvider;
use uifont_core::types::{CodePoint, FontId, Glyph, GlyphNode};
use zeno::Mask;

use crate::font::VectorFont;

/// Largest bitmap edge we are willing to allocate
const MAX_EDGE: u32 = 1024;

/// Rasterize `cp` from `font` at `size` pixels
///
/// `None` when the font has no glyph for `cp`. Glyphs without ink (spaces)
/// come back with empty coverage but a real advance.
pub fn rasterize(font: &VectorFont, font_id: FontId, cp: CodePoint, size: u8) -> Option<Glyph> {
    let font_ref = font.font_ref()?;
    let gid = font_ref.charmap().map(cp)?;
    let px = Size::new(size as f32);

    let advance = font_ref
        .glyph_metrics(px, LocationRef::default())
        .advance_width(gid)
        .unwrap_or(0.0)
        .round()
        .max(0.0) as u16;

    let mut node = GlyphNode {
        codepoint: cp,
        advance,
        glyph_index: gid.to_u32(),
        font_id,
        font_size: size,
        ..Default::default()
    };

    let Some(outline) = font_ref.outline_glyphs().get(gid) else {
        return Some(Glyph::new(node, Vec::new()));
    };

    let mut builder = PathBuilder::new();
    if let Err(e) = outline.draw(DrawSettings::unhinted(px, LocationRef::default()), &mut builder) {
        log::debug!("Outline of U+{:04X} in font {} failed: {}", cp, font_id, e);
        return Some(Glyph::new(node, Vec::new()));
    }
    if builder.is_empty() {
        return Some(Glyph::new(node, Vec::new()));
    }

    let (path_data, kurbo_path) = builder.finish();
    let bbox = kurbo_path.bounding_box();
    if !bbox.is_finite() || bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return Some(Glyph::new(node, Vec::new()));
    }

    let min_x = bbox.x0.floor() as f32;
    let min_y = bbox.y0.floor() as f32;
    let max_x = bbox.x1.ceil() as f32;
    let max_y = bbox.y1.ceil() as f32;
    let width = ((max_x - min_x) as u32).clamp(1, MAX_EDGE);
    let height = ((max_y - min_y) as u32).clamp(1, MAX_EDGE);

    let mut mask = vec![0u8; (width * height) as usize];
    Mask::new(path_data.as_str())
        .size(width, height)
        .offset((-min_x as i32, -min_y as i32))
        .render_into(&mut mask, None);

    // Outlines are y-up, bitmaps are y-down
    for y in 0..(height / 2) {
        let top_row = y as usize * width as usize;
        let bottom_row = (height - 1 - y) as usize * width as usize;
        for x in 0..width as usize {
            mask.swap(top_row + x, bottom_row + x);
        }
    }

    node.left = min_x as i16;
    node.top = max_y as i16;
    node.cols = width as u16;
    node.rows = height as u16;

    Some(Glyph::new(node, mask))
}

/// Collects an outline as SVG commands and a kurbo path
struct PathBuilder {
    commands: Vec<String>,
    kurbo_path: kurbo::BezPath,
}

impl PathBuilder {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
            kurbo_path: kurbo::BezPath::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.kurbo_path)
    }
}

impl OutlinePen for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("M {:.2},{:.2}", x, y));
        self.kurbo_path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(format!("L {:.2},{:.2}", x, y));
        self.kurbo_path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.commands
            .push(format!("Q {:.2},{:.2} {:.2},{:.2}", cx, cy, x, y));
        self.kurbo_path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(format!(
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.kurbo_path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.kurbo_path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tracks_both_paths() {
        let mut builder = PathBuilder::new();
        assert!(builder.is_empty());

        builder.move_to(0.0, 0.0);
        builder.line_to(10.0, 0.0);
        builder.quad_to(10.0, 5.0, 5.0, 10.0);
        builder.close();

        let (svg, path) = builder.finish();
        assert_eq!(svg, "M 0.00,0.00 L 10.00,0.00 Q 10.00,5.00 5.00,10.00 Z");

        let bbox = path.bounding_box();
        assert_eq!(bbox.x0, 0.0);
        assert_eq!(bbox.y0, 0.0);
        assert_eq!(bbox.x1, 10.0);
        assert_eq!(bbox.y1, 10.0);
    }

    #[test]
    fn test_zeno_fills_a_square() {
        let mut mask = vec![0u8; 16];
        Mask::new("M 0,0 L 4,0 L 4,4 L 0,4 Z")
            .size(4, 4)
            .render_into(&mut mask, None);
        assert!(mask.iter().all(|&a| a > 0));
        assert_eq!(mask[5], 255);
    }
}
