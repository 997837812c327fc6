use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use overlay_demo::common::{OvdDetection, OvdImage};
use overlay_demo::controller::{AppController, AppState};
use overlay_demo::data::ImageGallery;
use overlay_demo::detector::{DetectorHandle, ImageDetector};

struct StubDetector {
    labels: Vec<String>,
    fail: bool,
}

impl ImageDetector for StubDetector {
    fn detect(&mut self, image: &OvdImage) -> Result<Vec<OvdDetection>> {
        if self.fail {
            return Err(anyhow!("engine exploded"));
        }
        Ok(vec![OvdDetection::default()
            .with_x1y1_wh(
                2.0,
                2.0,
                (image.img_width / 2) as f32,
                (image.img_height / 2) as f32,
            )
            .with_confidence(0.93)
            .with_class_id(0)
            .with_label("person")])
    }

    fn class_labels(&self) -> &[String] {
        &self.labels
    }
}

fn stub_handle(labels: &[&str], fail: bool) -> Result<DetectorHandle> {
    let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    DetectorHandle::spawn(move || {
        Ok(Box::new(StubDetector { labels, fail }) as Box<dyn ImageDetector + Send>)
    })
}

fn temp_gallery(n: usize) -> (TempDir, ImageGallery) {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..n {
        let image = RgbImage::from_pixel(64, 48, Rgb([i as u8 * 40, 10, 200]));
        image.save(dir.path().join(format!("img_{i}.png"))).unwrap();
    }
    let gallery = ImageGallery::from_dir(dir.path()).unwrap();
    (dir, gallery)
}

#[test]
fn three_sequential_loads_record_timings() {
    let (_dir, gallery) = temp_gallery(3);
    let (mut ctx, controller) = AppController::start(
        || stub_handle(&["person", "dog"], false),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(7),
    );
    let mut controller = controller.unwrap();
    assert_eq!(ctx.state, AppState::DetectorReady);
    assert!(ctx.timing.load_time().is_some());

    let mut sources = HashSet::new();
    for _ in 0..3 {
        let outcome = controller.load_image(&mut ctx).unwrap();
        assert_eq!(ctx.state, AppState::InferenceComplete);
        assert_eq!(outcome.detections.len(), 1);
        assert_eq!(outcome.detections[0].get_label(), "person");
        sources.insert(outcome.source);
    }

    assert_eq!(ctx.timing.images_requested(), 3);
    assert_eq!(ctx.timing.recorded().len(), sources.len());
    assert!(ctx.timing.average().is_some());
}

#[test]
fn overlay_matches_display_dimensions() {
    let (_dir, gallery) = temp_gallery(1);
    let (mut ctx, controller) = AppController::start(
        || stub_handle(&["person"], false),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(3),
    );
    let mut controller = controller.unwrap();

    // 64x48 fits 600x600 as 600x450
    let outcome = controller.load_image(&mut ctx).unwrap();
    assert_eq!(outcome.overlay.dimensions(), (600, 450));

    let current = ctx.current.as_ref().unwrap();
    assert_eq!(current.transform.width_dst, 600);
    assert_eq!(current.transform.height_dst, 450);
    assert_eq!(current.source, outcome.source);
}

#[test]
fn load_is_rejected_while_inference_is_running() {
    let (_dir, gallery) = temp_gallery(1);
    let (mut ctx, controller) = AppController::start(
        || stub_handle(&["person"], false),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(1),
    );
    let mut controller = controller.unwrap();

    ctx.state = AppState::InferenceRunning;
    let err = controller.load_image(&mut ctx).unwrap_err();
    assert!(err.to_string().contains("in progress"));
    // the rejected action never counted as a request
    assert_eq!(ctx.timing.images_requested(), 0);
}

#[test]
fn detect_failure_lands_in_detection_failed() {
    let (_dir, gallery) = temp_gallery(1);
    let (mut ctx, controller) = AppController::start(
        || stub_handle(&["person"], true),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(1),
    );
    let mut controller = controller.unwrap();

    assert!(controller.load_image(&mut ctx).is_err());
    assert_eq!(ctx.state, AppState::DetectionFailed);
    assert!(ctx.last_error.is_some());
    assert_eq!(ctx.timing.images_requested(), 1);
    assert!(ctx.timing.recorded().is_empty());

    // the failure state still accepts another attempt
    assert!(controller.load_image(&mut ctx).is_err());
    assert_eq!(ctx.timing.images_requested(), 2);
}

#[test]
fn init_failure_lands_in_detector_failed() {
    let (_dir, gallery) = temp_gallery(1);
    let (ctx, controller) = AppController::start(
        || Err(anyhow!("no backend available")),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(1),
    );
    assert!(controller.is_err());
    assert_eq!(ctx.state, AppState::DetectorFailed);
    assert!(ctx.last_error.is_some());
}

#[test]
fn missing_colour_entry_is_a_configuration_error() {
    let (_dir, gallery) = temp_gallery(1);
    let (ctx, controller) = AppController::start(
        || stub_handle(&["person", "unicorn"], false),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(1),
    );
    let err = controller.err().unwrap();
    assert!(err.to_string().contains("unicorn"));
    assert_eq!(ctx.state, AppState::DetectorFailed);
}

#[test]
fn decode_failure_lands_in_detection_failed() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("broken.png");
    std::fs::write(&garbage, b"not an image at all").unwrap();
    let gallery = ImageGallery::new(vec![PathBuf::from(&garbage)]).unwrap();

    let (mut ctx, controller) = AppController::start(
        || stub_handle(&["person"], false),
        gallery,
        600,
        600,
        StdRng::seed_from_u64(1),
    );
    let mut controller = controller.unwrap();

    assert!(controller.load_image(&mut ctx).is_err());
    assert_eq!(ctx.state, AppState::DetectionFailed);
    assert_eq!(ctx.timing.images_requested(), 1);
    assert!(ctx.timing.average().is_some(), "failed request still divides");
}
