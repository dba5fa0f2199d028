/// Configuration for camera capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraConfig {
    device: String,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
        }
    }
}

impl CameraConfig {
    /// Device path, e.g. "/dev/video0".
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Number of mmap buffers for the capture stream, also the depth of the
    /// frame channel.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = CameraConfig::default()
            .with_device("/dev/video2")
            .with_width(1280)
            .with_height(720)
            .with_fps(15);

        assert_eq!(config.device(), "/dev/video2");
        assert_eq!(config.width(), 1280);
        assert_eq!(config.height(), 720);
        assert_eq!(config.fps(), 15);
        assert_eq!(config.buffer_count(), 4);
    }
}
