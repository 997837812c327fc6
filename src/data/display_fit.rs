use anyhow::{ensure, Result};

/// Aspect-preserving fit of a natural image size into a display bound.
///
/// `width_scale`/`height_scale` are display over natural; the overlay
/// renderer scales detector-space boxes by them, so display and natural
/// resolution are never conflated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    pub width_src: u32,
    pub height_src: u32,
    pub width_dst: u32,
    pub height_dst: u32,
    pub width_scale: f32,
    pub height_scale: f32,
}

impl DisplayTransform {
    /// Fits `(width_src, height_src)` into `(max_width, max_height)`: starts
    /// from the width bound and derives the height by ratio; when that
    /// overflows the height bound, re-derives the width from it instead.
    /// One bound is always met exactly.
    pub fn fit(width_src: u32, height_src: u32, max_width: u32, max_height: u32) -> Result<Self> {
        ensure!(
            width_src > 0 && height_src > 0,
            "image has a degenerate natural size {}x{}",
            width_src,
            height_src
        );
        ensure!(
            max_width > 0 && max_height > 0,
            "display bounds must be positive, got {}x{}",
            max_width,
            max_height
        );

        let ratio = width_src as f32 / height_src as f32;

        let mut width_dst = max_width as f32;
        let mut height_dst = (width_dst / ratio).ceil();
        if height_dst > max_height as f32 {
            height_dst = max_height as f32;
            width_dst = (height_dst * ratio).round();
        }

        let (width_dst, height_dst) = (width_dst as u32, height_dst as u32);
        Ok(Self {
            width_src,
            height_src,
            width_dst,
            height_dst,
            width_scale: width_dst as f32 / width_src as f32,
            height_scale: height_dst as f32 / height_src as f32,
        })
    }

    pub fn is_downscaled(&self) -> bool {
        self.width_scale < 1.0 || self.height_scale < 1.0
    }
}
