use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::Rng;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Fixed, ordered set of gallery images. One entry is chosen uniformly at
/// random per load action.
#[derive(Debug, Clone)]
pub struct ImageGallery {
    entries: Vec<PathBuf>,
}

impl ImageGallery {
    pub fn new(entries: Vec<PathBuf>) -> Result<Self> {
        if entries.is_empty() {
            bail!("image gallery is empty");
        }
        Ok(Self { entries })
    }

    /// Builds the gallery from every image file directly under `dir`, sorted
    /// by file name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        let listing = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read gallery directory {}", dir.display()))?;
        for entry in listing {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_image {
                entries.push(path);
            }
        }
        entries.sort();
        Self::new(entries).with_context(|| format!("no image files found in {}", dir.display()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Uniform random pick. The gallery is never empty, see [`Self::new`].
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &PathBuf {
        &self.entries[rng.gen_range(0..self.entries.len())]
    }
}
