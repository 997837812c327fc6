use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use ndarray::{Array4, ArrayD, Axis};
use ort::{
    inputs, CPUExecutionProvider, CUDAExecutionProvider, ExecutionProvider,
    GraphOptimizationLevel, Session, TensorElementType, Value, ValueType,
};
use regex::Regex;

use crate::common::{InferenceDevice, ModelConfig, OvdDetection, OvdImage};
use crate::data::COCO_CLASSES;
use crate::detector::detect_process::{DetectProcess, ImageDetector};
use crate::detector::image_ops;
use crate::utils;

/// Input dtype the session declares; the tensor is aligned to it before the
/// run.
#[derive(Debug, Clone, Copy, PartialEq)]
enum InputKind {
    U8,
    F32,
}

#[derive(Debug)]
pub enum SsdInput {
    U8(Array4<u8>),
    F32(Array4<f32>),
}

/// Raw post-NMS outputs, batch axis already dropped.
#[derive(Debug)]
pub struct SsdOutputs {
    boxes: ArrayD<f32>,
    classes: ArrayD<f32>,
    scores: ArrayD<f32>,
}

#[derive(Debug, Clone)]
struct SsdOutputNames {
    boxes: String,
    classes: String,
    scores: String,
}

/// ONNX Runtime adapter for post-NMS (SSD-style) detection models: the model
/// itself emits final boxes, class indices and scores, so postprocessing is
/// reading tensors rather than decoding anchors.
#[derive(Debug)]
pub struct OrtSsd {
    session: Session,
    input_name: String,
    input_kind: InputKind,
    output_names: SsdOutputNames,
    names: Vec<String>,
    conf_threshold: f32,
    width: u32,
    height: u32,
}

impl DetectProcess for OrtSsd {
    type Input = OvdImage;
    type Tensor = SsdInput;
    type Raw = SsdOutputs;

    fn new(config: &ModelConfig) -> Result<Self> {
        // Dynamically load the runtime library from the given path
        ort::init_from(&config.ort_lib_path)
            .commit()
            .context("failed to commit the ONNX Runtime library")?;

        let builder = Session::builder()?;

        match config.inference_device {
            InferenceDevice::CUDA(device_id) => {
                let cuda = CUDAExecutionProvider::default().with_device_id(device_id as i32);
                match cuda.register(&builder) {
                    Ok(_) => log::info!("CUDA device successfully registered"),
                    Err(e) => log::warn!("Failed to register CUDA device: {}, using CPU", e),
                }
            }
            InferenceDevice::CPU => {
                let cpu = CPUExecutionProvider::default();
                if let Err(e) = cpu.register(&builder) {
                    bail!("CPU execution provider registration failed: {e}");
                }
            }
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&config.weights_path)
            .with_context(|| format!("failed to load model weights from {}", config.weights_path))?;

        let input = session.inputs.first().context("model declares no inputs")?;
        let input_name = input.name.clone();
        let input_kind = match &input.input_type {
            ValueType::Tensor {
                ty: TensorElementType::Uint8,
                ..
            } => InputKind::U8,
            ValueType::Tensor {
                ty: TensorElementType::Float32,
                ..
            } => InputKind::F32,
            other => bail!("unsupported model input type: {:?}", other),
        };

        let declared: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let output_names = Self::map_outputs(&declared)?;

        let names = match &config.labels_path {
            Some(path) => utils::file_to_vec(Path::new(path))
                .with_context(|| format!("failed to read labels file {}", path))?,
            None => match Self::fetch_names(&session) {
                Some(parsed) => parsed,
                None => COCO_CLASSES.iter().map(|s| s.to_string()).collect(),
            },
        };
        log::info!(
            "Model: {} | Input: {:?} {}x{} | Classes: {}",
            config.weights_path,
            input_kind,
            config.width,
            config.height,
            names.len()
        );

        Ok(Self {
            session,
            input_name,
            input_kind,
            output_names,
            names,
            conf_threshold: config.conf_threshold,
            width: config.width,
            height: config.height,
        })
    }

    fn preprocess(&self, image: &OvdImage) -> Result<SsdInput> {
        let resized = image_ops::resize_rgb(&image.image, self.width, self.height)?;
        match self.input_kind {
            InputKind::U8 => Ok(SsdInput::U8(image_ops::to_tensor_u8(&resized)?)),
            InputKind::F32 => Ok(SsdInput::F32(image_ops::to_tensor_f32(&resized)?)),
        }
    }

    fn inference(&mut self, x: SsdInput) -> Result<SsdOutputs> {
        let outputs = match x {
            SsdInput::U8(tensor) => self
                .session
                .run(inputs![self.input_name.as_str() => tensor.view()]?)?,
            SsdInput::F32(tensor) => self
                .session
                .run(inputs![self.input_name.as_str() => tensor.view()]?)?,
        };

        let boxes = Self::tensor_f32(&outputs[self.output_names.boxes.as_str()])
            .context("boxes output")?;
        let classes = Self::tensor_f32(&outputs[self.output_names.classes.as_str()])
            .context("classes output")?;
        let scores = Self::tensor_f32(&outputs[self.output_names.scores.as_str()])
            .context("scores output")?;

        Ok(SsdOutputs {
            boxes: Self::squeeze_batch(boxes),
            classes: Self::squeeze_batch(classes),
            scores: Self::squeeze_batch(scores),
        })
    }

    fn postprocess(&self, raw: SsdOutputs, image: &OvdImage) -> Result<Vec<OvdDetection>> {
        anyhow::ensure!(
            raw.boxes.ndim() == 2 && raw.boxes.shape()[1] == 4,
            "boxes output has shape {:?}, expected [n, 4]",
            raw.boxes.shape()
        );

        let img_width = image.img_width as f32;
        let img_height = image.img_height as f32;
        let n = raw.scores.len().min(raw.boxes.shape()[0]);

        let mut detections = Vec::new();
        for i in 0..n {
            let score = raw.scores[[i]];
            // filtering low scores
            if score < self.conf_threshold {
                continue;
            }

            let class_id = raw.classes[[i]] as usize;
            let label = self.names.get(class_id).with_context(|| {
                format!(
                    "model emitted class index {} outside the {}-entry label list",
                    class_id,
                    self.names.len()
                )
            })?;

            // normalized [y_min, x_min, y_max, x_max] corners to pixels in
            // the natural resolution
            let (y1, x1, y2, x2) = (
                raw.boxes[[i, 0]],
                raw.boxes[[i, 1]],
                raw.boxes[[i, 2]],
                raw.boxes[[i, 3]],
            );

            detections.push(
                OvdDetection::default()
                    .with_x1y1_x2y2(
                        (x1 * img_width).max(0.),
                        (y1 * img_height).max(0.),
                        x2 * img_width,
                        y2 * img_height,
                    )
                    .with_confidence(score)
                    .with_class_id(class_id)
                    .with_label(label),
            );
        }

        Ok(detections)
    }
}

impl OrtSsd {
    fn map_outputs(declared: &[String]) -> Result<SsdOutputNames> {
        let find = |keys: &[&str]| {
            declared
                .iter()
                .find(|name| {
                    let lower = name.to_lowercase();
                    keys.iter().any(|key| lower.contains(key))
                })
                .cloned()
        };

        match (find(&["box"]), find(&["class", "label"]), find(&["score"])) {
            (Some(boxes), Some(classes), Some(scores)) => Ok(SsdOutputNames {
                boxes,
                classes,
                scores,
            }),
            _ if declared.len() >= 3 => {
                log::warn!(
                    "Could not match output names {:?}; assuming boxes/classes/scores order",
                    declared
                );
                Ok(SsdOutputNames {
                    boxes: declared[0].clone(),
                    classes: declared[1].clone(),
                    scores: declared[2].clone(),
                })
            }
            _ => bail!(
                "model declares {} outputs; a post-NMS detection model needs boxes, classes and scores",
                declared.len()
            ),
        }
    }

    fn tensor_f32(value: &Value) -> Result<ArrayD<f32>> {
        if let Ok(tensor) = value.try_extract_tensor::<f32>() {
            return Ok(tensor.into_owned());
        }
        let tensor = value
            .try_extract_tensor::<i64>()
            .context("output tensor is neither f32 nor i64")?;
        Ok(tensor.mapv(|x| x as f32))
    }

    fn squeeze_batch(x: ArrayD<f32>) -> ArrayD<f32> {
        if x.ndim() > 1 && x.shape()[0] == 1 {
            x.index_axis_move(Axis(0), 0)
        } else {
            x
        }
    }

    fn fetch_names(session: &Session) -> Option<Vec<String>> {
        // fetch class names from onnx metadata
        // String format: `{0: 'person', 1: 'bicycle', 2: 'sports ball', ...}`
        let raw = match session.metadata() {
            Err(_) => None,
            Ok(metadata) => metadata.custom("names").unwrap_or_default(),
        }?;
        let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#).ok()?;
        let mut names = vec![];
        for (_, [_, name, _]) in re.captures_iter(&raw).map(|x| x.extract()) {
            names.push(name.to_string());
        }
        Some(names)
    }
}

impl ImageDetector for OrtSsd {
    fn detect(&mut self, image: &OvdImage) -> Result<Vec<OvdDetection>> {
        let t_pre = Instant::now();
        let ys = self.preprocess(image)?;
        let t_pre = t_pre.elapsed();

        let t_exe = Instant::now();
        let ys = self.inference(ys)?;
        let t_exe = t_exe.elapsed();

        let t_post = Instant::now();
        let detections = self.postprocess(ys, image)?;
        let t_post = t_post.elapsed();

        log::debug!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        Ok(detections)
    }

    fn class_labels(&self) -> &[String] {
        &self.names
    }
}
