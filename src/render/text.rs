use crate::assets::text::{TextBrushRgba8, TextLayoutEngine, TextMeasure};
use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::{CreativeError, CreativeResult};
use crate::render::surface::affine_to_cpu;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Greedy word wrap.
///
/// Words accumulate while `line + word + " "` measures within `max_width`. The first word never
/// wraps, and the final line is always emitted. Lines keep their trailing space.
pub fn wrap_lines(
    measure: &mut dyn TextMeasure,
    text: &str,
    size_px: f32,
    bold: bool,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (i, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if i > 0 && measure.measure(&candidate, size_px, bold) > max_width {
            lines.push(std::mem::take(&mut line));
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// How a text run is placed relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextAnchor {
    /// Anchor is the top-left corner of the run.
    TopLeft,
    /// Anchor is the center of the run.
    Center,
}

/// Draw one line of text. Blank text draws nothing; an engine without a font is a render error.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_line(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    text: &str,
    size_px: f32,
    bold: bool,
    color: Rgba8,
    at: Point,
    anchor: TextAnchor,
    transform: Affine,
) -> CreativeResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let layout = engine.layout_line(text, size_px, bold, TextBrushRgba8::from(color))?;
    let font = engine
        .font_data()
        .cloned()
        .ok_or_else(|| CreativeError::render("no font registered for text drawing"))?;

    let origin = match anchor {
        TextAnchor::TopLeft => at,
        TextAnchor::Center => Point::new(
            at.x - f64::from(layout.width()) / 2.0,
            at.y - f64::from(layout.height()) / 2.0,
        ),
    };
    ctx.set_transform(affine_to_cpu(
        transform * Affine::translate((origin.x, origin.y)),
    ));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

/// Wrap and draw a top-anchored, left-aligned text block.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_wrapped(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    text: &str,
    size_px: f64,
    bold: bool,
    color: Rgba8,
    top_left: Point,
    max_width: f64,
) -> CreativeResult<usize> {
    let size = size_px as f32;
    let lines = wrap_lines(&mut *engine, text, size, bold, max_width);
    let line_height = size_px * LINE_HEIGHT;
    for (i, line) in lines.iter().enumerate() {
        let at = Point::new(top_left.x, top_left.y + line_height * i as f64);
        draw_line(
            ctx,
            engine,
            line,
            size,
            bold,
            color,
            at,
            TextAnchor::TopLeft,
            Affine::IDENTITY,
        )?;
    }
    Ok(lines.len())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
