use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{CreativeError, CreativeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// True when the image has no pixels and should be skipped at draw time.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Raster SVGs so their longest side is at least this many pixels.
const SVG_MIN_RASTER_PX: f32 = 512.0;

/// Decode encoded image bytes (PNG, JPEG, WebP, ... or SVG) to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CreativeResult<PreparedImage> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> CreativeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

fn decode_svg(bytes: &[u8]) -> CreativeResult<PreparedImage> {
    let tree = parse_svg(bytes)?;
    crate::assets::svg_raster::rasterize_decoration_svg(&tree, SVG_MIN_RASTER_PX)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Decode the payload of a `data:` URL.
///
/// Both base64 (`data:image/png;base64,...`) and percent-free plain payloads
/// (`data:image/svg+xml,<svg ...>`) are accepted.
pub fn decode_data_url(url: &str) -> CreativeResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CreativeError::asset("data url must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CreativeError::asset("data url is missing ',' separator"))?;
    if meta.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| CreativeError::asset(format!("invalid base64 in data url: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Encode bytes as a base64 `data:` URL with the given mime type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
