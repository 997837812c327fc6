use anyhow::{Context, Result};
use fast_image_resize::images::Image as FirImage;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;
use ndarray::Array4;
use rayon::prelude::*;

/// Resizes an RGB image to exactly `width`x`height`.
pub fn resize_rgb(image: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let src = FirImage::from_vec_u8(
        image.width(),
        image.height(),
        image.as_raw().clone(),
        PixelType::U8x3,
    )
    .context("source buffer does not match its declared dimensions")?;
    let mut dst = FirImage::new(width, height, PixelType::U8x3);

    let mut resizer = Resizer::new();
    resizer.resize(
        &src,
        &mut dst,
        &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom)),
    )?;

    RgbImage::from_raw(width, height, dst.into_vec())
        .context("resized buffer has the wrong length")
}

/// NHWC u8 tensor, the input layout of TF-exported SSD models.
pub fn to_tensor_u8(image: &RgbImage) -> Result<Array4<u8>> {
    let (width, height) = image.dimensions();
    Array4::from_shape_vec(
        (1, height as usize, width as usize, 3),
        image.as_raw().clone(),
    )
    .context("image buffer does not fit an NHWC tensor")
}

/// NHWC f32 tensor normalized to `[0, 1]`.
pub fn to_tensor_f32(image: &RgbImage) -> Result<Array4<f32>> {
    let (width, height) = image.dimensions();
    let data: Vec<f32> = image.as_raw().par_iter().map(|x| *x as f32 / 255.0).collect();
    Array4::from_shape_vec((1, height as usize, width as usize, 3), data)
        .context("image buffer does not fit an NHWC tensor")
}
