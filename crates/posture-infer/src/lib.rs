//! Pose landmark detection for the posture monitor.
//!
//! The `pose` module carries the COCO-17 keypoint schema and the YOLO pose
//! pipeline (letterbox preprocess, `[1, 56, N]` decode, NMS). Actual model
//! execution goes through the [`Backend`]/[`Session`] traits; the ONNX
//! runtime backend is behind the `onnx` feature.

pub mod backend;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;
pub mod source;

#[cfg(feature = "onnx")]
pub mod backends;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use pose::{
    COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex, LetterboxInfo, PoseDetection,
    YoloPoseEstimator, iou, postprocess, preprocess,
};
pub use session::Session;
pub use source::PoseSource;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
