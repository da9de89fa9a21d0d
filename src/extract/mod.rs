use std::path::{Path, PathBuf};
use std::time::Duration;

use image::DynamicImage;
use kmeans_colors::get_kmeans_hamerly;
use palette::{IntoColor, Lab, Srgb};
use sha1::{Digest, Sha1};

use crate::color::Rgb;
use crate::error::SyncError;

/// How many dominant colors one cover yields.
pub const PALETTE_SIZE: usize = 5;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const SEED: u64 = 42;

/// Turns a cover-art source (URL, `file://` URI, or plain path) into an
/// ordered dominant-color palette.
pub struct Extractor {
    client: reqwest::Client,
    scratch_dir: PathBuf,
}

impl Extractor {
    pub fn new(scratch_dir: PathBuf) -> Result<Self, SyncError> {
        std::fs::create_dir_all(&scratch_dir).map_err(|e| SyncError::Write {
            path: scratch_dir.clone(),
            source: e,
        })?;
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");
        Ok(Self {
            client,
            scratch_dir,
        })
    }

    /// Fetch, decode, persist a scratch copy, and cluster.
    ///
    /// The palette is ordered by cluster weight, most dominant first. Any
    /// failure along the way surfaces as an `Err` the event loop logs and
    /// skips.
    pub async fn extract(&self, source: &str) -> Result<Vec<Rgb>, SyncError> {
        let bytes = self.load_bytes(source).await?;
        let img = image::load_from_memory(&bytes).map_err(|e| SyncError::Decode {
            uri: source.to_string(),
            source: e,
        })?;
        let stored = self.store_copy(&bytes, &img)?;
        let pixels = load_pixels(&stored)?;
        Ok(dominant_colors(&pixels, PALETTE_SIZE))
    }

    async fn load_bytes(&self, source: &str) -> Result<Vec<u8>, SyncError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let fetch_err = |e: reqwest::Error| SyncError::Fetch {
                uri: source.to_string(),
                source: Box::new(e),
            };
            let response = self
                .client
                .get(source)
                .send()
                .await
                .map_err(fetch_err)?
                .error_for_status()
                .map_err(fetch_err)?;
            Ok(response.bytes().await.map_err(fetch_err)?.to_vec())
        } else {
            let path = source.strip_prefix("file://").unwrap_or(source);
            std::fs::read(path).map_err(|e| SyncError::Fetch {
                uri: source.to_string(),
                source: Box::new(e),
            })
        }
    }

    /// Persist the decoded image under a content-derived name. The palette
    /// pass operates on this stored copy, and the SHA-1 name keeps art from
    /// different tracks from colliding.
    fn store_copy(&self, source_bytes: &[u8], img: &DynamicImage) -> Result<PathBuf, SyncError> {
        let mut hasher = Sha1::new();
        hasher.update(source_bytes);
        let digest = hasher.finalize();
        let path = self
            .scratch_dir
            .join(format!("cover_{}.png", hex::encode(digest)));
        img.save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| SyncError::Write {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?;
        Ok(path)
    }
}

/// Read every pixel of the stored copy into CIELAB. No down-sampling; the
/// clustering sees the full image.
fn load_pixels(path: &Path) -> Result<Vec<Lab>, SyncError> {
    let img = image::open(path).map_err(|e| SyncError::Decode {
        uri: path.display().to_string(),
        source: e,
    })?;
    let rgb = img.to_rgb8();
    Ok(rgb
        .pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            srgb.into_color()
        })
        .collect())
}

/// K-means (Hamerly, fixed seed) over Lab pixels; centroids ordered by
/// cluster population descending. Empty clusters are dropped, so the result
/// can be shorter than `k` for near-monochrome art.
fn dominant_colors(pixels: &[Lab], k: usize) -> Vec<Rgb> {
    if pixels.is_empty() {
        return Vec::new();
    }
    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, pixels, SEED);

    let mut counts = vec![0u32; k];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let mut ranked: Vec<(Rgb, u32)> = result
        .centroids
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, lab)| (Rgb::from_lab(*lab), counts[i]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked.into_iter().map(|(c, _)| c).collect()
}
