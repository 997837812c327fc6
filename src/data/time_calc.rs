use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Session timing: the detector load window, per-image inference durations
/// keyed by image source, and the number of images ever requested.
///
/// The running average divides by the requested count rather than the
/// recorded count, so a request that fails before its duration lands still
/// widens the denominator.
#[derive(Debug, Default)]
pub struct TimingTracker {
    load_start: Option<Instant>,
    load_end: Option<Instant>,
    inference_start: Option<Instant>,
    inference_end: Option<Instant>,
    durations: HashMap<String, Duration>,
    images_requested: u32,
}

impl TimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_load_start(&mut self) {
        self.load_start = Some(Instant::now());
    }

    pub fn mark_load_end(&mut self) {
        self.load_end = Some(Instant::now());
    }

    pub fn load_time(&self) -> Option<Duration> {
        match (self.load_start, self.load_end) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// Counts a load action.
    pub fn note_request(&mut self) {
        self.images_requested += 1;
    }

    /// Clears the previous inference window and stamps a new start.
    pub fn begin_inference(&mut self) {
        self.inference_end = None;
        self.inference_start = Some(Instant::now());
    }

    /// Stamps the end of the current inference window and records its
    /// duration under `source`, overwriting a previous entry for the same
    /// image.
    pub fn complete_inference(&mut self, source: &str) -> Option<Duration> {
        let start = self.inference_start?;
        let end = Instant::now();
        self.inference_end = Some(end);
        let took = end.duration_since(start);
        self.durations.insert(source.to_string(), took);
        Some(took)
    }

    pub fn record(&mut self, source: &str, took: Duration) {
        self.durations.insert(source.to_string(), took);
    }

    pub fn last_inference(&self) -> Option<Duration> {
        match (self.inference_start, self.inference_end) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    pub fn recorded(&self) -> &HashMap<String, Duration> {
        &self.durations
    }

    pub fn images_requested(&self) -> u32 {
        self.images_requested
    }

    /// Mean inference duration across the session, `None` before the first
    /// request.
    pub fn average(&self) -> Option<Duration> {
        if self.images_requested == 0 {
            return None;
        }
        let total: Duration = self.durations.values().sum();
        Some(total / self.images_requested)
    }
}
