use std::fmt;

use crate::Device;

#[derive(Debug)]
pub enum InferError {
    /// A tensor did not have the shape a pipeline stage expects.
    ShapeMismatch { expected: String, got: String },
    /// The model file or bytes could not be loaded.
    ModelLoad(String),
    /// The inference backend failed.
    Backend(String),
    /// An input name the session does not know.
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    /// The requested compute device is not available in this build.
    UnsupportedDevice(Device),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => {
                write!(f, "unknown input '{name}', model has {expected_names:?}")
            }
            InferError::UnsupportedDevice(device) => {
                write!(f, "device {device} not supported by this build")
            }
        }
    }
}

impl std::error::Error for InferError {}
