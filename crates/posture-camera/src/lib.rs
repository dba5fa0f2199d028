//! Frame acquisition for the posture monitor.
//!
//! The [`Camera`] trait yields decoded RGB frames; the V4L2 backend lives
//! behind the `v4l2` feature so the rest of the workspace builds on machines
//! without Video4Linux headers.

pub mod config;
pub mod decode;
pub mod error;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
