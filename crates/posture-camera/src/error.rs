use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// The device could not be opened or configured.
    Device(String),
    /// The capture stream failed mid-run.
    Stream(String),
    /// A captured buffer could not be decoded to RGB.
    Decode(String),
    /// The channel between the capture thread and the caller broke.
    Channel(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Decode(msg) => write!(f, "decode error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<image::ImageError> for CameraError {
    fn from(err: image::ImageError) -> Self {
        CameraError::Decode(err.to_string())
    }
}
