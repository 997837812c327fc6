use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::common::OvdDetection;
use crate::data::{colour_or_fallback, DisplayTransform};

const LABEL_TEXT_HEIGHT: u32 = 14;
const LABEL_CHAR_WIDTH: u32 = 8; // rough per-character width at this scale
const LABEL_BG_COLOUR: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_TEXT_COLOUR: Rgb<u8> = Rgb([252, 3, 3]);

/// One planned draw: outline rectangle plus its label, both already in
/// display space.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub rect: Rect,
    pub colour: Rgb<u8>,
    pub label: String,
    pub label_origin: (i32, i32),
}

fn capitalise(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Plans the overlay for one detection list, in input order. Boxes come from
/// the detector in natural-resolution pixels and are scaled into display
/// space here; an unknown class resolves to the fallback colour.
pub fn plan_overlay(detections: &[OvdDetection], transform: &DisplayTransform) -> Vec<DrawOp> {
    detections
        .iter()
        .map(|det| {
            let label = det.get_label();
            let bbox = det.bbox.scaled(transform.width_scale, transform.height_scale);
            let (x, y, w, h) = bbox.as_xy_wh_i32();
            DrawOp {
                rect: Rect::at(x, y).of_size(w.max(1) as u32, h.max(1) as u32),
                colour: colour_or_fallback(&label),
                label: format!("{} - Score: {}", capitalise(&label), det.confidence),
                label_origin: (x, y),
            }
        })
        .collect()
}

/// Draws only the box outlines. Label text needs a font, see
/// [`render_overlay`].
pub fn render_outlines(image: &mut RgbImage, ops: &[DrawOp]) {
    for op in ops {
        draw_hollow_rect_mut(image, op.rect, op.colour);
    }
}

/// Draws the full overlay in op order: outline, filled label background and
/// label text anchored at each box's top-left corner. The caller starts from
/// a fresh display-sized image, so prior contents never survive a redraw.
pub fn render_overlay(image: &mut RgbImage, ops: &[DrawOp], font: &FontVec) {
    let scale = PxScale::from(LABEL_TEXT_HEIGHT as f32);
    for op in ops {
        draw_hollow_rect_mut(image, op.rect, op.colour);

        let (x, y) = op.label_origin;
        let bg_x = x.max(0);
        let bg_y = (y - LABEL_TEXT_HEIGHT as i32).max(0);
        let bg_width = (op.label.len() as u32 * LABEL_CHAR_WIDTH).max(1);
        let bg = Rect::at(bg_x, bg_y).of_size(bg_width, LABEL_TEXT_HEIGHT);
        draw_filled_rect_mut(image, bg, LABEL_BG_COLOUR);
        draw_text_mut(image, LABEL_TEXT_COLOUR, bg_x, bg_y, scale, font, &op.label);
    }
}
