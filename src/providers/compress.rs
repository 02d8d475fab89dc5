use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;

use crate::foundation::error::{CreativeError, CreativeResult};
use crate::render::backend::FrameRGBA;

/// First JPEG quality tried.
pub const START_QUALITY: u8 = 90;
/// Quality decrement between attempts.
pub const QUALITY_STEP: u8 = 10;
/// Quality at which the loop gives up and returns whatever it has.
pub const MIN_QUALITY: u8 = 10;

/// Encode a frame as JPEG, lowering quality from 90 in steps of 10 until the output fits
/// in `max_kb` kilobytes or quality reaches 10.
///
/// Alpha is dropped; frames from the compositor are opaque.
pub fn compress_to_jpeg(frame: &FrameRGBA, max_kb: u32) -> CreativeResult<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CreativeError::validation("cannot encode an empty frame"));
    }
    let rgb = image::DynamicImage::ImageRgba8(frame.to_rgba_image()?).to_rgb8();
    let budget = u64::from(max_kb) * 1024;

    let mut quality = START_QUALITY;
    loop {
        let bytes = encode_jpeg(&rgb, quality)?;
        if bytes.len() as u64 <= budget || quality <= MIN_QUALITY {
            tracing::debug!(quality, size = bytes.len(), budget, "jpeg encoded");
            return Ok(bytes);
        }
        quality = quality.saturating_sub(QUALITY_STEP);
    }
}

pub(crate) fn encode_jpeg(rgb: &image::RgbImage, quality: u8) -> CreativeResult<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(rgb)
        .with_context(|| format!("encode jpeg at quality {quality}"))?;
    Ok(out)
}
