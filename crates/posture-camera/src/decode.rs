use image::ImageFormat;
use posture_base::Tensor;

use crate::CameraError;

/// Decode an MJPEG frame buffer to an RGB tensor `[height, width, 3]`.
pub fn decode_mjpeg(data: &[u8]) -> Result<Tensor<u8>, CameraError> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Jpeg)?.to_rgb8();
    let (width, height) = decoded.dimensions();

    Tensor::new(
        vec![height as usize, width as usize, 3],
        decoded.into_raw(),
    )
    .map_err(|e| CameraError::Decode(e.to_string()))
}

/// Convert a YUYV (YUV 4:2:2) buffer to an RGB tensor `[height, width, 3]`.
///
/// YUYV packs as `[Y0, U, Y1, V, ...]`: each pair of pixels shares one U and
/// one V sample. Conversion uses the BT.601 coefficients:
/// - R = Y + 1.402 * (V - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - B = Y + 1.772 * (U - 128)
pub fn decode_yuyv(data: &[u8], width: usize, height: usize) -> Result<Tensor<u8>, CameraError> {
    let pixel_count = width * height;
    let expected_len = pixel_count * 2;
    if data.len() < expected_len {
        return Err(CameraError::Decode(format!(
            "YUYV buffer too short: need {expected_len} bytes for {width}x{height}, got {}",
            data.len()
        )));
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for quad in data[..expected_len].chunks_exact(4) {
        let [y0, u, y1, v] = [quad[0], quad[1], quad[2], quad[3]];
        rgb.extend_from_slice(&yuv_to_rgb(y0, u, v));
        rgb.extend_from_slice(&yuv_to_rgb(y1, u, v));
    }

    Tensor::new(vec![height, width, 3], rgb).map_err(|e| CameraError::Decode(e.to_string()))
}

fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
    [r, g, b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yuyv_neutral_chroma_is_gray() {
        // Y=128, U=V=128 decodes to mid gray for both pixels of the pair.
        let data = [128u8, 128, 128, 128];
        let t = decode_yuyv(&data, 2, 1).unwrap();

        assert_eq!(t.shape, vec![1, 2, 3]);
        assert_eq!(t.data, vec![128, 128, 128, 128, 128, 128]);
    }

    #[test]
    fn yuyv_white_and_black() {
        // First pixel full luma, second zero luma, neutral chroma.
        let data = [255u8, 128, 0, 128];
        let t = decode_yuyv(&data, 2, 1).unwrap();

        assert_eq!(&t.data[0..3], &[255, 255, 255]);
        assert_eq!(&t.data[3..6], &[0, 0, 0]);
    }

    #[test]
    fn yuyv_rejects_short_buffer() {
        let data = [0u8; 10];
        let err = decode_yuyv(&data, 4, 2).unwrap_err();
        assert!(matches!(err, CameraError::Decode(_)));
    }

    #[test]
    fn mjpeg_rejects_garbage() {
        let err = decode_mjpeg(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, CameraError::Decode(_)));
    }
}
