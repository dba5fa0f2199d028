use std::fmt;

use log::{error, info};
use posture_base::{Tensor, TensorError};
use posture_camera::Camera;
use posture_infer::pose::PoseDetection;
use posture_infer::{InferError, PoseSource};

use crate::classifier::PostureClassifier;
use crate::status::PostureStatus;

/// Why the monitor loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user closed the window or pressed the exit key.
    Closed,
    /// Frame acquisition failed; the source is treated as gone.
    SourceFailed,
}

/// Summary of a finished monitor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorExit {
    pub frames: u64,
    pub reason: ExitReason,
}

#[derive(Debug)]
pub enum MonitorError {
    /// The detector failed outright (not "nothing detected", which is a
    /// normal per-frame outcome).
    Detect(InferError),
    /// A frame could not be converted for the detector.
    Convert(TensorError),
    /// The display surface failed.
    Surface(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Detect(err) => write!(f, "detector error: {err}"),
            MonitorError::Convert(err) => write!(f, "frame conversion error: {err}"),
            MonitorError::Surface(err) => write!(f, "surface error: {err}"),
        }
    }
}

impl std::error::Error for MonitorError {}

/// Output side of the loop: shows frames and reports exit requests.
pub trait Surface {
    /// Present one frame together with its overlay data.
    fn present(
        &mut self,
        frame: &Tensor<u8>,
        detections: &[PoseDetection],
        status: PostureStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Whether the user asked to stop (window closed or exit key pressed).
    fn close_requested(&self) -> bool;
}

/// Widen an RGB `u8` frame to the `f32` tensor the detectors take.
pub fn frame_to_f32(frame: &Tensor<u8>) -> Result<Tensor<f32>, TensorError> {
    Tensor::new(
        frame.shape.clone(),
        frame.data.iter().map(|&v| v as f32).collect(),
    )
}

/// Run the posture monitor until the user exits or the source fails.
///
/// One iteration is one frame: acquire, detect, assess, present. There is no
/// retry and no frame skipping; a frame-acquisition failure ends the run
/// after a diagnostic. The camera is taken by value so that every exit path,
/// including errors, drops it here and releases the device exactly once.
pub async fn run<C, D, S>(
    mut camera: C,
    detector: &mut D,
    surface: &mut S,
    classifier: &PostureClassifier,
) -> Result<MonitorExit, MonitorError>
where
    C: Camera,
    D: PoseSource,
    S: Surface,
{
    let mut frames = 0u64;

    loop {
        if surface.close_requested() {
            info!("exit requested after {frames} frames");
            return Ok(MonitorExit {
                frames,
                reason: ExitReason::Closed,
            });
        }

        let frame = match camera.recv().await {
            Ok(frame) => frame,
            Err(err) => {
                error!("frame acquisition failed: {err}");
                return Ok(MonitorExit {
                    frames,
                    reason: ExitReason::SourceFailed,
                });
            }
        };

        let image = frame_to_f32(&frame).map_err(MonitorError::Convert)?;
        let detections = detector.detect(&image).map_err(MonitorError::Detect)?;
        let status = classifier.assess(&detections);

        surface
            .present(&frame, &detections, status)
            .map_err(MonitorError::Surface)?;
        frames += 1;
    }
}
