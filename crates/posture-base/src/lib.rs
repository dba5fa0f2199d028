//! Shared primitives for the posture-monitor workspace: small math types,
//! a tensor container for image and model data, and logging setup.

pub mod logging;
pub mod rect;
pub mod tensor;
pub mod vec2;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log so every crate in the workspace shares one facade version.
pub use log;
