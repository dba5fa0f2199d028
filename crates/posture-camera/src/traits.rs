use posture_base::Tensor;

use crate::CameraError;

/// A source of decoded video frames.
///
/// `recv` yields RGB frames as `Tensor<u8>` in `[height, width, 3]` layout.
/// Implementations own the underlying device handle and must release it in
/// `Drop`, so dropping a camera on any exit path closes the device exactly
/// once.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Tensor<u8>, CameraError>;
}
