use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::error::{CreativeError, CreativeResult};

/// Upper bound on either raster dimension.
const MAX_DIM: u32 = 16_384;

/// Pixel size for an SVG of logical size `(w, h)` upscaled so its longest side reaches
/// `min_longest`. Smaller sides round up; larger SVGs keep their own size.
fn raster_size(w: f32, h: f32, min_longest: f32) -> CreativeResult<(u32, u32)> {
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(CreativeError::asset("svg has invalid width/height"));
    }
    let longest = w.max(h);
    let scale = if longest < min_longest {
        min_longest / longest
    } else {
        1.0
    };
    let pw = ((w * scale).ceil() as u32).max(1);
    let ph = ((h * scale).ceil() as u32).max(1);
    if pw > MAX_DIM || ph > MAX_DIM {
        return Err(CreativeError::asset(format!(
            "svg decoration too large to rasterize: {pw}x{ph} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((pw, ph))
}

/// Rasterize a decoration SVG into a premultiplied image whose longest side is at least
/// `min_longest` pixels, so it stays sharp when stretched to a decoration box.
pub(crate) fn rasterize_decoration_svg(
    tree: &usvg::Tree,
    min_longest: f32,
) -> CreativeResult<PreparedImage> {
    let size = tree.size();
    let (width, height) = raster_size(size.width(), size.height(), min_longest)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CreativeError::asset("cannot allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}
