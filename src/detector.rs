pub mod detect_process;
pub mod image_ops;
pub mod ort_ssd;
pub mod worker;

pub use detect_process::{DetectProcess, ImageDetector};
pub use ort_ssd::OrtSsd;
pub use worker::{DetectionState, DetectorHandle};
