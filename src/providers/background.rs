use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{CreativeError, CreativeResult};

/// Channel distance under which a pixel counts as background.
pub const LOCAL_THRESHOLD: u8 = 40;

/// Removes the background of an image, producing PNG bytes with transparency.
pub trait BackgroundRemover {
    /// PNG bytes of the cut-out image.
    fn remove_background(&self, bytes: &[u8]) -> CreativeResult<Vec<u8>>;
}

/// Local heuristic: the mean of the four corner pixels is the background color, and
/// every pixel within [`LOCAL_THRESHOLD`] of it on all channels becomes transparent.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerKeyRemover;

impl BackgroundRemover for CornerKeyRemover {
    fn remove_background(&self, bytes: &[u8]) -> CreativeResult<Vec<u8>> {
        let mut img = image::load_from_memory(bytes)
            .context("decode image for background removal")?
            .to_rgba8();
        key_out_corners(&mut img);
        encode_png(&img)
    }
}

pub(crate) fn key_out_corners(img: &mut image::RgbaImage) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
    let mut sum = [0u32; 3];
    for (x, y) in corners {
        let p = img.get_pixel(x, y).0;
        for c in 0..3 {
            sum[c] += u32::from(p[c]);
        }
    }
    let bg = sum.map(|s| (s / 4) as u8);

    for px in img.pixels_mut() {
        let close = (0..3).all(|c| px.0[c].abs_diff(bg[c]) < LOCAL_THRESHOLD);
        if close {
            px.0[3] = 0;
        }
    }
}

pub(crate) fn encode_png(img: &image::RgbaImage) -> CreativeResult<Vec<u8>> {
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

/// Run `primary`, falling back to [`CornerKeyRemover`] on any failure.
///
/// Never fails: if the fallback cannot decode the input either, the input bytes are
/// returned unchanged.
pub fn remove_background_or_fallback(primary: &dyn BackgroundRemover, bytes: &[u8]) -> Vec<u8> {
    match primary.remove_background(bytes) {
        Ok(out) => return out,
        Err(err) => {
            tracing::warn!(%err, "background removal failed, falling back to local processing")
        }
    }
    match CornerKeyRemover.remove_background(bytes) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(%err, "local background removal failed, keeping original image");
            bytes.to_vec()
        }
    }
}

/// A remover that is never available; every call goes to the fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRemoteRemover;

impl BackgroundRemover for NoRemoteRemover {
    fn remove_background(&self, _bytes: &[u8]) -> CreativeResult<Vec<u8>> {
        Err(CreativeError::asset("no remote background removal configured"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/providers/background.rs"]
mod tests;
