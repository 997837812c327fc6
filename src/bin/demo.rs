use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use overlay_demo::common::{InferenceDevice, ModelConfig};
use overlay_demo::controller::{AppController, AppState};
use overlay_demo::data::ImageGallery;
use overlay_demo::init_detector;

#[derive(Parser, Debug)]
#[command(author, version, about = "Random-gallery object detection overlay demo")]
struct Args {
    /// Path to the ONNX detection model (post-NMS outputs).
    #[arg(long)]
    model: String,
    /// Path to the ONNX Runtime shared library.
    #[arg(long)]
    ort_lib: String,
    /// Class labels file, one label per line in class-id order.
    #[arg(long)]
    labels: Option<String>,
    /// Directory holding the gallery images.
    #[arg(long)]
    gallery: String,
    /// Output directory for overlay images and detection dumps.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Inference device (cpu or cuda).
    #[arg(long, default_value = "cpu")]
    device: String,
    #[arg(long, default_value_t = 0)]
    device_id: usize,
    /// Confidence threshold.
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,
    /// Model input resolution (square).
    #[arg(long, default_value_t = 300)]
    input_size: u32,
    /// Display bounds for the overlay image.
    #[arg(long, default_value_t = 600)]
    max_width: u32,
    #[arg(long, default_value_t = 600)]
    max_height: u32,
    /// TrueType font used for the labels.
    #[arg(long, default_value = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")]
    font: PathBuf,
}

fn ms(took: Duration) -> f64 {
    took.as_secs_f64() * 1000.0
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let device = InferenceDevice::from_str(&args.device, args.device_id)
        .with_context(|| format!("unknown inference device '{}'", args.device))?;

    let mut model = ModelConfig::new()
        .with_model(&args.model)
        .with_ort_lib_path(&args.ort_lib)
        .with_device(device)
        .with_threshold(args.threshold)
        .with_input_size(args.input_size, args.input_size);
    if let Some(labels) = &args.labels {
        model = model.with_labels_path(labels);
    }

    let out_dir = match args.out {
        Some(out) => out,
        None => dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("overlay_demo"),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let gallery = ImageGallery::from_dir(Path::new(&args.gallery))?;
    println!("Gallery: {} images from {}", gallery.len(), args.gallery);
    println!("{}", model.summary());
    println!();
    println!("Loading model...");

    let font = std::fs::read(&args.font)
        .ok()
        .and_then(|data| ab_glyph::FontVec::try_from_vec(data).ok());
    if font.is_none() {
        log::warn!(
            "No usable font at {}; overlays will carry boxes only",
            args.font.display()
        );
    }

    let (mut ctx, controller) = AppController::start(
        || init_detector(&model),
        gallery,
        args.max_width,
        args.max_height,
        rand::thread_rng(),
    );
    let mut controller = controller.context("detector initialization failed")?;
    if let Some(font) = font {
        controller = controller.with_font(font);
    }

    if let Some(load_time) = ctx.timing.load_time() {
        println!("Model load time: {:.2}ms", ms(load_time));
    }

    let stdin = io::stdin();
    loop {
        print!("\n[Enter] load random image, [q] quit > ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim() == "q" {
            break;
        }

        match controller.load_image(&mut ctx) {
            Ok(outcome) => {
                let stem = Path::new(&outcome.source)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("image")
                    .to_string();
                let overlay_path = out_dir.join(format!("{stem}_overlay.png"));
                outcome.overlay.save(&overlay_path).with_context(|| {
                    format!("failed to write overlay to {}", overlay_path.display())
                })?;
                let json_path = out_dir.join(format!("{stem}_detections.json"));
                std::fs::write(&json_path, serde_json::to_string_pretty(&outcome.detections)?)?;

                println!("{} | {} detections", outcome.source, outcome.detections.len());
                for det in &outcome.detections {
                    let (x, y, w, h) = det.bbox.as_xy_wh_i32();
                    println!(
                        "  - {}: {:.2} at ({}, {}, {}x{})",
                        det.get_label(),
                        det.confidence,
                        x,
                        y,
                        w,
                        h
                    );
                }
                println!("Overlay written to {}", overlay_path.display());
                println!("Image inference time: {:.2}ms", ms(outcome.inference_time));
                println!("Average inference time: {:.2}ms", ms(outcome.average_time));
            }
            Err(err) => {
                eprintln!("Load failed: {err:#}");
                if ctx.state == AppState::DetectorFailed {
                    break;
                }
            }
        }
    }

    Ok(())
}
