mod utils;
pub mod common;
pub mod controller;
pub mod data;
pub mod detector;
pub mod overlay;

use crate::common::ModelConfig;
use crate::detector::{DetectProcess, DetectorHandle, ImageDetector, OrtSsd};

/// Spawns the detection worker backed by an ONNX Runtime session.
///
/// Blocks until the worker reports that the session is built and the class
/// labels are resolved, so initialization failure surfaces here instead of
/// on the first detect call.
pub fn init_detector(model_details: &ModelConfig) -> anyhow::Result<DetectorHandle> {
    log::info!(
        "Initializing ORT session with ({}) execution provider",
        model_details.inference_device.str()
    );
    let config = model_details.clone();
    DetectorHandle::spawn(move || {
        let ssd = OrtSsd::new(&config)?;
        Ok(Box::new(ssd) as Box<dyn ImageDetector + Send>)
    })
}
