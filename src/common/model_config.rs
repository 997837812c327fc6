use crate::common::InferenceDevice;

/// Everything the detection worker needs to build its engine: weights, the
/// ONNX Runtime library, label resolution and run parameters.
#[derive(Default, Debug, Clone)]
pub struct ModelConfig {
    pub weights_path: String,
    pub ort_lib_path: String,
    pub labels_path: Option<String>,
    pub inference_device: InferenceDevice,
    pub conf_threshold: f32,
    pub width: u32,
    pub height: u32,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self {
            conf_threshold: 0.5,
            width: 300,
            height: 300,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, weights_path: &str) -> Self {
        self.weights_path = weights_path.to_string();
        self
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = ort_lib_path.to_string();
        self
    }

    /// Labels file, one class name per line in class-id order. When unset the
    /// worker falls back to the model metadata and then the built-in COCO list.
    pub fn with_labels_path(mut self, labels_path: &str) -> Self {
        self.labels_path = Some(labels_path.to_string());
        self
    }

    pub fn with_device(mut self, device_type: InferenceDevice) -> Self {
        self.inference_device = device_type;
        self
    }

    pub fn with_threshold(mut self, conf_threshold: f32) -> Self {
        self.conf_threshold = conf_threshold;
        self
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "Weights File Path: {}\n\
            Labels Path: {}\n\
            OnnxRuntime Lib Path: {}\n\
            Inference Device: {:?}\n\
            Model Input Resolution: {}x{}\n\
            Detection Threshold: {}",
            self.weights_path,
            self.labels_path.as_deref().unwrap_or("(model metadata / built-in COCO)"),
            self.ort_lib_path,
            self.inference_device,
            self.width,
            self.height,
            self.conf_threshold
        )
    }
}
