use posture_base::Tensor;

use crate::pose::PoseDetection;
use crate::InferError;

/// Anything that maps an RGB image to a set of pose detections.
///
/// The monitor loop is generic over this trait, so tests can substitute a
/// scripted detector for the full ONNX pipeline.
pub trait PoseSource {
    /// Detect people in an image.
    ///
    /// `image` is HWC `Tensor<f32>` with RGB values in `[0, 255]`. An empty
    /// vector means nobody was detected; it is not an error.
    fn detect(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError>;
}
