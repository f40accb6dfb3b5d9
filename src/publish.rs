//! Publish Sink - Content-Addressed Persistence
//!
//! Finished canvases leave the core through this seam. The reference a
//! sink returns is whatever the caller's storage understands; the bundled
//! sink writes PNGs to a directory and addresses them by content hash.

use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Cannot encode edition {0}: {1}")]
    Encode(usize, #[source] image::ImageError),

    #[error("Cannot write edition {0} to {1}: {2}")]
    Write(usize, String, #[source] std::io::Error),
}

/// External persistence for finished editions. A sink may retry internally
/// but must return a final success or failure; the generator treats
/// `publish` as a single call.
pub trait PublishSink {
    fn publish(&mut self, edition: usize, image: &RgbaImage) -> Result<String, PublishError>;
}

/// Writes `<edition>.png` into an output directory and returns a
/// `sha256:<hex>` reference over the encoded bytes, so identical canvases
/// always resolve to identical references.
pub struct DirectorySink {
    out_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
        }
    }
}

impl PublishSink for DirectorySink {
    fn publish(&mut self, edition: usize, image: &RgbaImage) -> Result<String, PublishError> {
        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
            .map_err(|e| PublishError::Encode(edition, e))?;

        let path = self.out_dir.join(format!("{}.png", edition));
        std::fs::write(&path, &encoded)
            .map_err(|e| PublishError::Write(edition, path.display().to_string(), e))?;

        Ok(format!("sha256:{}", sha256_hex(&encoded)))
    }
}

/// SHA-256 of bytes as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
