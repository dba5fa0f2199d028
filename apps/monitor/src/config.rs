use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Encode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config io error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Encode(msg) => write!(f, "config encode error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// On-disk configuration for the posture monitor.
///
/// Every field has a default, so a partial (or absent) `posture.toml` works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub camera_device: String,
    pub camera_width: u32,
    pub camera_height: u32,
    pub camera_fps: u32,
    pub model_path: String,
    pub use_cuda: bool,
    pub cuda_device_id: i32,
    /// Exclusive lower bound of the good-posture angle band, degrees.
    pub good_angle_min_deg: f32,
    /// Exclusive upper bound of the good-posture angle band, degrees.
    pub good_angle_max_deg: f32,
    /// Keypoints below this confidence count as not visible.
    pub min_keypoint_visibility: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            camera_device: "/dev/video0".to_string(),
            camera_width: 640,
            camera_height: 480,
            camera_fps: 30,
            model_path: "models/yolov8n-pose.onnx".to_string(),
            use_cuda: false,
            cuda_device_id: 0,
            good_angle_min_deg: 160.0,
            good_angle_max_deg: 185.0,
            min_keypoint_visibility: 0.3,
        }
    }
}

impl MonitorConfig {
    /// Load from `path`; an absent file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Encode(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}
