use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{CreativeError, CreativeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered creative as RGBA8 pixels.
///
/// Compositor output is **premultiplied alpha**; the `premultiplied` flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(idx..idx + 4)
            .and_then(|px| px.try_into().ok())
    }

    /// Straight-alpha copy as an `image` buffer.
    pub fn to_rgba_image(&self) -> CreativeResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| CreativeError::render("frame byte length does not match dimensions"))
    }

    /// PNG encoding of the frame.
    pub fn encode_png(&self) -> CreativeResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(out)
    }

    /// Write the frame as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> CreativeResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let img = self.to_rgba_image()?;
        image::save_buffer_with_format(
            path,
            img.as_raw(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
