use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::assets::decode::{PreparedImage, decode_data_url, decode_image};
use crate::foundation::error::{CreativeError, CreativeResult};

/// Where an image's encoded bytes come from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Encoded bytes already in memory.
    Bytes(Arc<[u8]>),
    /// A file on disk.
    Path(PathBuf),
    /// A `data:` URL (base64 or plain payload).
    DataUrl(String),
}

impl ImageSource {
    /// Interpret a layout image reference: `data:` URLs stay URLs, anything else is a path.
    pub fn from_ref(reference: &str) -> Self {
        if reference.starts_with("data:") {
            Self::DataUrl(reference.to_owned())
        } else {
            Self::Path(PathBuf::from(reference))
        }
    }

    /// Read the encoded bytes.
    pub fn read_bytes(&self) -> CreativeResult<Vec<u8>> {
        match self {
            Self::Bytes(b) => Ok(b.to_vec()),
            Self::Path(p) => std::fs::read(p).map_err(|e| {
                CreativeError::asset(format!("failed to read image '{}': {e}", p.display()))
            }),
            Self::DataUrl(url) => decode_data_url(url),
        }
    }

    /// Read and decode the image.
    pub fn load(&self) -> CreativeResult<PreparedImage> {
        let bytes = self.read_bytes()?;
        decode_image(&bytes)
    }

    /// Stable identity used to reuse decoded images across renders.
    pub(crate) fn cache_key(&self) -> u64 {
        let mut h = DefaultHasher::new();
        match self {
            Self::Bytes(b) => {
                0u8.hash(&mut h);
                b.hash(&mut h);
            }
            Self::Path(p) => {
                1u8.hash(&mut h);
                p.hash(&mut h);
            }
            Self::DataUrl(url) => {
                2u8.hash(&mut h);
                url.hash(&mut h);
            }
        }
        h.finish()
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

/// Which compositor input an image fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSlot {
    /// The product photo.
    Packshot,
    /// The brand logo.
    Logo,
    /// An image decoration, by index into `Layout::decorations`.
    Decoration(usize),
}

/// Result of a completed load barrier.
#[derive(Clone, Debug, Default)]
pub struct LoadedImages {
    images: HashMap<ImageSlot, PreparedImage>,
}

impl LoadedImages {
    /// Decoded image for a slot, if one was requested.
    pub fn get(&self, slot: ImageSlot) -> Option<&PreparedImage> {
        self.images.get(&slot)
    }

    /// Number of decoded images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub(crate) fn insert(&mut self, slot: ImageSlot, image: PreparedImage) {
        self.images.insert(slot, image);
    }
}

/// Decode every request on the rayon pool and wait for all of them.
///
/// All-or-nothing: the first decode failure fails the whole barrier, and loads that have not
/// finished within `timeout` turn into [`CreativeError::Timeout`].
#[tracing::instrument(skip(requests), fields(count = requests.len()))]
pub fn load_all(
    requests: Vec<(ImageSlot, ImageSource)>,
    timeout: Duration,
) -> CreativeResult<LoadedImages> {
    let jobs = requests
        .into_iter()
        .map(|(slot, source)| (slot, move || source.load()))
        .collect();
    let out = join_loads(jobs, timeout)?;
    tracing::debug!(loaded = out.len(), "image barrier complete");
    Ok(out)
}

/// Run `jobs` on the rayon pool and join them under one deadline.
fn join_loads<F>(jobs: Vec<(ImageSlot, F)>, timeout: Duration) -> CreativeResult<LoadedImages>
where
    F: FnOnce() -> CreativeResult<PreparedImage> + Send + 'static,
{
    let mut out = LoadedImages::default();
    if jobs.is_empty() {
        return Ok(out);
    }

    let total = jobs.len();
    let (tx, rx) = mpsc::channel::<(ImageSlot, CreativeResult<PreparedImage>)>();
    for (slot, job) in jobs {
        let tx = tx.clone();
        rayon::spawn(move || {
            // The receiver is gone once the barrier has timed out or failed.
            let _ = tx.send((slot, job()));
        });
    }
    drop(tx);

    let deadline = Instant::now() + timeout;
    let mut received = 0usize;
    while received < total {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((slot, Ok(img))) => {
                out.insert(slot, img);
                received += 1;
            }
            Ok((slot, Err(err))) => {
                tracing::warn!(?slot, %err, "image load failed");
                return Err(err);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(pending = total - received, "image barrier timed out");
                return Err(CreativeError::Timeout {
                    millis: timeout.as_millis() as u64,
                    pending: total - received,
                });
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(CreativeError::asset("image loader workers exited early"));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
