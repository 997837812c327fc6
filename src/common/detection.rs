use serde::{Deserialize, Serialize};

use crate::common::OvdBox;

/// One model-reported object instance: class, confidence score and bounding
/// box in pixels of the source image's natural resolution.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvdDetection {
    pub class_id: usize,
    pub label: Option<String>,
    pub confidence: f32,
    pub bbox: OvdBox,
}

impl OvdDetection {
    pub fn new(class_id: usize, bbox: OvdBox, label: Option<String>, confidence: f32) -> Self {
        Self {
            class_id,
            label,
            confidence,
            bbox,
        }
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)`.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = OvdBox::default().with_x1y1_x2y2(x1, y1, x2, y2);
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = OvdBox::default().with_x1y1_wh(x, y, w, h);
        self
    }

    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn get_label(&self) -> String {
        self.label.clone().unwrap_or("unknown".to_string())
    }
}
