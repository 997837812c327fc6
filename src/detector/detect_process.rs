use anyhow::Result;

use crate::common::{ModelConfig, OvdDetection, OvdImage};

/// A stage-by-stage detection pipeline: preprocess the input into the
/// engine's tensor, execute, and map the raw output back into detections in
/// the input's natural resolution.
pub trait DetectProcess: Sized {
    type Input;
    type Tensor;
    type Raw;

    /// Creates a new instance of the engine with the given options.
    fn new(config: &ModelConfig) -> Result<Self>;

    /// Pre-process the input data.
    fn preprocess(&self, x: &Self::Input) -> Result<Self::Tensor>;

    /// Executes the model on the preprocessed data.
    fn inference(&mut self, x: Self::Tensor) -> Result<Self::Raw>;

    /// Post-process the model's output.
    fn postprocess(&self, raw: Self::Raw, x0: &Self::Input) -> Result<Vec<OvdDetection>>;

    /// Executes the full pipeline.
    fn run(&mut self, x: &Self::Input) -> Result<Vec<OvdDetection>> {
        let ys = self.preprocess(x)?;
        let ys = self.inference(ys)?;
        self.postprocess(ys, x)
    }
}

/// Object-safe seam between the detection worker and a concrete engine.
pub trait ImageDetector {
    fn detect(&mut self, image: &OvdImage) -> Result<Vec<OvdDetection>>;

    /// Class labels this detector can emit, in class-id order.
    fn class_labels(&self) -> &[String];
}
