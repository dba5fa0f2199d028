use minifb::{Key, Window, WindowOptions};
use posture_base::Tensor;
use posture_core::{PostureStatus, Surface};
use posture_infer::pose::PoseDetection;

use crate::banner::draw_banner;
use crate::draw::{draw_skeleton, rgb_to_argb};

/// Live preview window: frame, skeleton overlay, status banner.
pub struct PreviewWindow {
    window: Window,
    kp_threshold: f32,
}

impl PreviewWindow {
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        fps: u32,
        kp_threshold: f32,
    ) -> Result<Self, minifb::Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        window.set_target_fps(fps as usize);

        Ok(Self {
            window,
            kp_threshold,
        })
    }

    /// Show a blank frame with the initial status while the camera and the
    /// first inference warm up.
    pub fn splash(&mut self, width: usize, height: usize) -> Result<(), minifb::Error> {
        let status = PostureStatus::default();
        let mut rgb = vec![0u8; width * height * 3];
        draw_banner(&mut rgb, width, height, status.banner(), status.color());

        let argb = rgb_to_argb(&rgb, width, height);
        self.window.update_with_buffer(&argb, width, height)
    }
}

impl Surface for PreviewWindow {
    fn present(
        &mut self,
        frame: &Tensor<u8>,
        detections: &[PoseDetection],
        status: PostureStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let &[height, width, _] = frame.shape.as_slice() else {
            return Err(format!("expected HWC frame, got shape {:?}", frame.shape).into());
        };

        let mut rgb = frame.data.clone();
        for detection in detections {
            draw_skeleton(&mut rgb, width, height, detection, self.kp_threshold);
        }
        draw_banner(&mut rgb, width, height, status.banner(), status.color());

        let argb = rgb_to_argb(&rgb, width, height);
        self.window.update_with_buffer(&argb, width, height)?;
        Ok(())
    }

    fn close_requested(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}
