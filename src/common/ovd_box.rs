use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvdBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w: f32,
    pub h: f32,
}

impl OvdBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.w
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.h
    }

    pub fn x_min(&self) -> f32 {
        self.x1
    }

    pub fn y_min(&self) -> f32 {
        self.y1
    }

    pub fn x_max(&self) -> f32 {
        self.x1 + self.w
    }

    pub fn y_max(&self) -> f32 {
        self.y1 + self.h
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)` and
    /// calculates width and height.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;

        self.w = x2 - x1;
        self.h = y2 - y1;
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.w = w;
        self.h = h;

        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Returns a copy with both axes scaled, keeping the `(x1, y1)` corner
    /// anchored in the scaled space. Used to bring detector-space boxes into
    /// display space.
    pub fn scaled(&self, width_scale: f32, height_scale: f32) -> Self {
        Self::default().with_x1y1_wh(
            self.x1 * width_scale,
            self.y1 * height_scale,
            self.w * width_scale,
            self.h * height_scale,
        )
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (
            self.x1.round() as i32,
            self.y1.round() as i32,
            self.w.round() as i32,
            self.h.round() as i32,
        )
    }
}
