//! Posture assessment: the hip-shoulder-ear angle heuristic and the frame
//! loop that ties camera, detector, and display together.

pub mod angle;
pub mod classifier;
pub mod monitor;
pub mod status;

pub use angle::vertex_angle_deg;
pub use classifier::{AngleBounds, PostureClassifier};
pub use monitor::{ExitReason, MonitorError, MonitorExit, Surface, run};
pub use status::PostureStatus;
