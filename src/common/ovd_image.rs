use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;

/// A decoded gallery image together with its source reference and natural
/// resolution.
#[derive(Debug, Clone, Default)]
pub struct OvdImage {
    pub source: String,
    pub image: RgbImage,
    pub img_width: u32,
    pub img_height: u32,
}

impl std::ops::Deref for OvdImage {
    type Target = RgbImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl std::ops::DerefMut for OvdImage {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.image
    }
}

impl OvdImage {
    pub fn new(source: impl Into<String>, image: RgbImage) -> Self {
        let (img_width, img_height) = image.dimensions();
        Self {
            source: source.into(),
            image,
            img_width,
            img_height,
        }
    }

    /// Decodes an image file. A decode failure is the load error the
    /// controller reports for the selected source.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?
            .to_rgb8();
        Ok(Self::new(path.display().to_string(), image))
    }

    pub fn get_ratio(&self) -> f32 {
        self.img_width as f32 / self.img_height as f32
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.img_width, self.img_height)
    }
}
