use std::thread;

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

use crate::common::{OvdDetection, OvdImage};
use crate::detector::detect_process::ImageDetector;

/// Channel ends owned by the worker thread.
pub struct DetectionState {
    pub img_rx: Receiver<Box<OvdImage>>,
    pub det_tx: Sender<Result<Vec<OvdDetection>>>,
}

/// Controller-side handle to the detection worker. At most one detect call is
/// in flight at a time; the controller's state machine enforces that.
pub struct DetectorHandle {
    img_tx: Sender<Box<OvdImage>>,
    det_rx: Receiver<Result<Vec<OvdDetection>>>,
    labels: Vec<String>,
}

impl DetectorHandle {
    /// Spawns the worker and blocks until its detector reports ready, so a
    /// build failure is returned here rather than on the first detect call.
    pub fn spawn<F>(build: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn ImageDetector + Send>> + Send + 'static,
    {
        let (img_tx, img_rx) = bounded::<Box<OvdImage>>(1);
        let (det_tx, det_rx) = bounded::<Result<Vec<OvdDetection>>>(1);
        let (ready_tx, ready_rx) = bounded::<Result<Vec<String>>>(1);

        thread::spawn(move || {
            let mut detector = match build() {
                Ok(detector) => {
                    let _ = ready_tx.send(Ok(detector.class_labels().to_vec()));
                    detector
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };

            let state = DetectionState { img_rx, det_tx };
            // MESSAGE LOOP: ends when the handle drops its sender
            while let Ok(image) = state.img_rx.recv() {
                let result = detector.detect(&image);
                if state.det_tx.send(result).is_err() {
                    break;
                }
            }
        });

        let labels = ready_rx
            .recv()
            .map_err(|_| anyhow!("detection worker exited before reporting ready"))??;
        Ok(Self {
            img_tx,
            det_rx,
            labels,
        })
    }

    /// Runs one detection cycle, blocking until the worker answers. The
    /// worker never interleaves two cycles.
    pub fn detect(&self, image: OvdImage) -> Result<Vec<OvdDetection>> {
        self.img_tx
            .send(Box::new(image))
            .map_err(|_| anyhow!("detection worker is gone"))?;
        self.det_rx
            .recv()
            .map_err(|_| anyhow!("detection worker dropped the reply channel"))?
    }

    /// Class labels the detector can emit, in class-id order.
    pub fn class_labels(&self) -> &[String] {
        &self.labels
    }
}
