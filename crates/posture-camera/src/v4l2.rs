use std::thread::{self, JoinHandle};

use log::{debug, warn};
use posture_base::Tensor;
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

use crate::decode::{decode_mjpeg, decode_yuyv};
use crate::{Camera, CameraConfig, CameraError};

type FrameResult = Result<Tensor<u8>, CameraError>;

/// Pixel format the device agreed to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelFormat {
    Mjpeg,
    Yuyv,
}

/// V4L2 camera backed by a dedicated capture thread.
///
/// The thread reads mmap'd buffers, decodes them to RGB, and hands frames to
/// `recv()` over a bounded channel. Dropping the camera closes the channel,
/// which stops the thread and releases the device.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Option<Device>,
    format: PixelFormat,
    frame_size: (usize, usize),
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("running", &self.receiver.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("capture thread ended".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // Closing the channel tells the capture thread to stop.
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Open the device named in `config` and negotiate a pixel format.
    ///
    /// MJPEG is requested first; if the device refuses it, YUYV is tried.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, supports
    /// neither format, or rejects the frame rate.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        let (format, accepted) = Self::negotiate_format(&device, &config)?;
        debug!(
            "camera {} delivering {:?} at {}x{}",
            config.device(),
            format,
            accepted.width,
            accepted.height
        );

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        Ok(Self {
            config,
            device: Some(device),
            format,
            frame_size: (accepted.width as usize, accepted.height as usize),
            receiver: None,
            thread_handle: None,
        })
    }

    fn negotiate_format(
        device: &Device,
        config: &CameraConfig,
    ) -> Result<(PixelFormat, Format), CameraError> {
        for (fourcc, format) in [(b"MJPG", PixelFormat::Mjpeg), (b"YUYV", PixelFormat::Yuyv)] {
            let requested = Format::new(config.width(), config.height(), FourCC::new(fourcc));
            let accepted = Capture::set_format(device, &requested)?;
            // The driver may silently switch to a different fourcc.
            if accepted.fourcc == FourCC::new(fourcc) {
                return Ok((format, accepted));
            }
        }
        Err(CameraError::Device(format!(
            "{} supports neither MJPG nor YUYV",
            config.device()
        )))
    }

    /// Start the capture thread on the first `recv()` call.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count() as usize;
        let (tx, rx) = mpsc::channel(buffer_count);
        let format = self.format;
        let (width, height) = self.frame_size;

        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, tx, buffer_count, format, width, height) {
                warn!("capture thread stopped: {e}");
            }
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    /// Background capture loop: read a buffer, decode it, send it.
    ///
    /// Ends when the receiver side of the channel is dropped.
    fn capture_loop(
        device: Device,
        tx: mpsc::Sender<FrameResult>,
        buffer_count: usize,
        format: PixelFormat,
        width: usize,
        height: usize,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count as u32)
            .map_err(|e| CameraError::Stream(e.to_string()))?;

        loop {
            let (buf, _metadata) = CaptureStream::next(&mut stream)
                .map_err(|e| CameraError::Stream(e.to_string()))?;

            let frame = match format {
                PixelFormat::Mjpeg => decode_mjpeg(buf),
                PixelFormat::Yuyv => decode_yuyv(buf, width, height),
            };

            // blocking_send applies backpressure while the consumer is busy;
            // an Err means the camera was dropped and the thread should end.
            if tx.blocking_send(frame).is_err() {
                break;
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
