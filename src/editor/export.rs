use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::editor::session::EditorSession;
use crate::foundation::error::CreativeResult;
use crate::layout::model::AspectRatio;
use crate::providers::compress::compress_to_jpeg;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::Compositor;

/// Encoding of exported files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Size-bounded JPEG.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Export options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOpts {
    /// Wait between consecutive files.
    pub pause: Duration,
    /// JPEG size budget in kilobytes.
    pub max_kb: u32,
    /// File encoding.
    pub format: ExportFormat,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            pause: Duration::from_millis(500),
            max_kb: 500,
            format: ExportFormat::Jpeg,
        }
    }
}

/// `creative-<ratio>.<ext>`, e.g. `creative-9x16.jpg`.
pub fn export_file_name(ratio: AspectRatio, format: ExportFormat) -> String {
    format!("creative-{}.{}", ratio.slug(), format.extension())
}

/// Encode one frame into `dir` and return the written path.
pub fn write_frame(
    frame: &FrameRGBA,
    ratio: AspectRatio,
    dir: &Path,
    opts: &ExportOpts,
) -> CreativeResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    let path = dir.join(export_file_name(ratio, opts.format));
    let bytes = match opts.format {
        ExportFormat::Jpeg => compress_to_jpeg(frame, opts.max_kb)?,
        ExportFormat::Png => frame.encode_png()?,
    };
    std::fs::write(&path, &bytes).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "creative exported");
    Ok(path)
}

/// Export every variant of a session in order, rendering stale ones first and pausing
/// `opts.pause` between files.
pub fn export_all(
    session: &mut EditorSession,
    compositor: &mut Compositor,
    dir: &Path,
    opts: &ExportOpts,
) -> CreativeResult<Vec<PathBuf>> {
    let count = session.creatives().len();
    let mut written = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 && !opts.pause.is_zero() {
            std::thread::sleep(opts.pause);
        }
        let ratio = session.creatives()[i].ratio;
        let frame = session.render_variant(i, compositor)?;
        written.push(write_frame(frame, ratio, dir, opts)?);
    }
    Ok(written)
}
