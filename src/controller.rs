use std::time::Duration;

use ab_glyph::FontVec;
use anyhow::{anyhow, bail, Context, Result};
use image::RgbImage;
use rand::Rng;

use crate::common::{OvdDetection, OvdImage};
use crate::data::{verify_coverage, DisplayTransform, ImageGallery, TimingTracker};
use crate::detector::{image_ops, DetectorHandle};
use crate::overlay;

/// Where the session is in its lifecycle. Failure states are explicit so the
/// view shows them instead of hanging in a stale render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    DetectorLoading,
    DetectorReady,
    ImageSelected,
    InferenceRunning,
    InferenceComplete,
    DetectorFailed,
    DetectionFailed,
}

/// The image currently on display: source reference, natural size and its
/// fit into the display bounds. Replaced wholesale on every load action.
#[derive(Debug, Clone)]
pub struct DisplayedImage {
    pub source: String,
    pub transform: DisplayTransform,
}

/// Mutable session state threaded through every transition handler.
#[derive(Debug)]
pub struct SessionContext {
    pub state: AppState,
    pub timing: TimingTracker,
    pub current: Option<DisplayedImage>,
    pub last_error: Option<String>,
}

impl SessionContext {
    fn new() -> Self {
        let mut timing = TimingTracker::new();
        timing.mark_load_start();
        Self {
            state: AppState::DetectorLoading,
            timing,
            current: None,
            last_error: None,
        }
    }
}

/// Result of one completed load-image cycle.
#[derive(Debug)]
pub struct LoadOutcome {
    pub source: String,
    pub detections: Vec<OvdDetection>,
    pub overlay: RgbImage,
    pub inference_time: Duration,
    pub average_time: Duration,
}

pub struct AppController<R: Rng> {
    handle: DetectorHandle,
    gallery: ImageGallery,
    max_width: u32,
    max_height: u32,
    font: Option<FontVec>,
    rng: R,
}

impl<R: Rng> AppController<R> {
    /// Boots the session: spawns the detector, checks that the colour table
    /// covers its label set, and stamps the load window. The returned context
    /// carries the failure state when the result is an error.
    pub fn start<F>(
        build: F,
        gallery: ImageGallery,
        max_width: u32,
        max_height: u32,
        rng: R,
    ) -> (SessionContext, Result<Self>)
    where
        F: FnOnce() -> Result<DetectorHandle>,
    {
        let mut ctx = SessionContext::new();

        let handle = match build() {
            Ok(handle) => handle,
            Err(err) => {
                ctx.state = AppState::DetectorFailed;
                ctx.last_error = Some(err.to_string());
                return (ctx, Err(err));
            }
        };

        let labels = handle.class_labels().iter().map(String::as_str);
        if let Err(missing) = verify_coverage(labels) {
            let err = anyhow!(
                "class colour table is missing entries for: {}",
                missing.join(", ")
            );
            ctx.state = AppState::DetectorFailed;
            ctx.last_error = Some(err.to_string());
            return (ctx, Err(err));
        }

        ctx.timing.mark_load_end();
        ctx.state = AppState::DetectorReady;
        let controller = Self {
            handle,
            gallery,
            max_width,
            max_height,
            font: None,
            rng,
        };
        (ctx, Ok(controller))
    }

    /// Font used for the overlay labels; without one only outlines are drawn.
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    /// One full load-random-image cycle: pick, decode, fit, detect, draw,
    /// record. Rejected while a previous cycle is still in flight.
    pub fn load_image(&mut self, ctx: &mut SessionContext) -> Result<LoadOutcome> {
        match ctx.state {
            AppState::DetectorReady | AppState::InferenceComplete | AppState::DetectionFailed => {}
            AppState::ImageSelected | AppState::InferenceRunning => {
                bail!("inference already in progress")
            }
            AppState::DetectorLoading | AppState::DetectorFailed => {
                bail!("detector is not ready")
            }
        }

        ctx.timing.note_request();
        let source = self.gallery.pick(&mut self.rng).clone();
        let source_str = source.display().to_string();

        let image = match OvdImage::open(&source) {
            Ok(image) => image,
            Err(err) => return Err(Self::fail(ctx, err)),
        };

        let transform = match DisplayTransform::fit(
            image.img_width,
            image.img_height,
            self.max_width,
            self.max_height,
        ) {
            Ok(transform) => transform,
            Err(err) => return Err(Self::fail(ctx, err)),
        };
        ctx.current = Some(DisplayedImage {
            source: source_str.clone(),
            transform,
        });
        ctx.state = AppState::ImageSelected;

        // Display-sized copy kept back for the overlay; the natural image
        // goes to the worker.
        let mut display =
            match image_ops::resize_rgb(&image.image, transform.width_dst, transform.height_dst) {
                Ok(display) => display,
                Err(err) => return Err(Self::fail(ctx, err)),
            };

        ctx.timing.begin_inference();
        ctx.state = AppState::InferenceRunning;

        let detections = match self.handle.detect(image) {
            Ok(detections) => detections,
            Err(err) => return Err(Self::fail(ctx, err)),
        };

        let ops = overlay::plan_overlay(&detections, &transform);
        match &self.font {
            Some(font) => overlay::render_overlay(&mut display, &ops, font),
            None => overlay::render_outlines(&mut display, &ops),
        }

        let inference_time = ctx
            .timing
            .complete_inference(&source_str)
            .context("inference clock was never started")?;
        let average_time = ctx
            .timing
            .average()
            .context("average is undefined before the first request")?;
        ctx.state = AppState::InferenceComplete;

        log::info!(
            "{} | {} detections | inference={:.2?} | avg={:.2?}",
            source_str,
            detections.len(),
            inference_time,
            average_time
        );

        Ok(LoadOutcome {
            source: source_str,
            detections,
            overlay: display,
            inference_time,
            average_time,
        })
    }

    fn fail(ctx: &mut SessionContext, err: anyhow::Error) -> anyhow::Error {
        ctx.state = AppState::DetectionFailed;
        ctx.last_error = Some(err.to_string());
        err
    }
}
