use posture_base::Tensor;

use super::types::LetterboxInfo;
use crate::InferError;

/// YOLO pose input side length.
const TARGET_SIZE: usize = 640;
/// Gray letterbox padding, in the normalized [0, 1] range.
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Prepare an image for YOLO pose inference.
///
/// Input is HWC `[H, W, 3]` with values in `[0, 255]`; output is NCHW
/// `[1, 3, 640, 640]` with values in `[0, 1]`, letterboxed to preserve the
/// aspect ratio. Resizing is nearest-neighbor. The returned [`LetterboxInfo`]
/// lets postprocessing map detections back to image coordinates.
pub fn preprocess(image: &Tensor<f32>) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    let [h, w] = match image.shape.as_slice() {
        [h, w, 3] => [*h, *w],
        other => {
            return Err(InferError::ShapeMismatch {
                expected: "[H, W, 3]".to_string(),
                got: format!("{other:?}"),
            });
        }
    };
    if h == 0 || w == 0 {
        return Err(InferError::ShapeMismatch {
            expected: "non-zero image dimensions".to_string(),
            got: format!("{h}x{w}"),
        });
    }

    let scale = (TARGET_SIZE as f32 / w as f32).min(TARGET_SIZE as f32 / h as f32);
    let new_w = (w as f32 * scale) as usize;
    let new_h = (h as f32 * scale) as usize;
    let pad_x = ((TARGET_SIZE - new_w) / 2) as f32;
    let pad_y = ((TARGET_SIZE - new_h) / 2) as f32;

    let mut nchw = vec![PAD_VALUE; 3 * TARGET_SIZE * TARGET_SIZE];
    let pad_x_px = pad_x as usize;
    let pad_y_px = pad_y as usize;

    for out_y in 0..new_h {
        // Nearest-neighbor source row.
        let src_y = ((out_y as f32 / scale) as usize).min(h - 1);
        for out_x in 0..new_w {
            let src_x = ((out_x as f32 / scale) as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            let dst_y = out_y + pad_y_px;
            let dst_x = out_x + pad_x_px;

            for ch in 0..3 {
                let dst = ch * TARGET_SIZE * TARGET_SIZE + dst_y * TARGET_SIZE + dst_x;
                nchw[dst] = image.data[src + ch] / 255.0;
            }
        }
    }

    let preprocessed = Tensor::new(vec![1, 3, TARGET_SIZE, TARGET_SIZE], nchw)
        .map_err(|e| InferError::Backend(format!("preprocess tensor: {e}")))?;

    Ok((preprocessed, LetterboxInfo { scale, pad_x, pad_y }))
}
