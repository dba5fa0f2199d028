use posture_base::{Rect, Tensor, Vec2};

use super::types::{COCO_KEYPOINT_COUNT, Keypoint, LetterboxInfo, PoseDetection};
use crate::InferError;

/// Rows per candidate in YOLO pose output: cx, cy, w, h, conf, 17 * (x, y, v).
const CHANNELS: usize = 5 + COCO_KEYPOINT_COUNT * 3;

/// Intersection over union of two boxes.
///
/// Zero-area or disjoint boxes give 0.0; there is no division by zero.
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return 0.0;
    }

    let overlap = match a.intersection(*b) {
        Some(rect) => rect.size.x * rect.size.y,
        None => 0.0,
    };

    let union = a.size.x * a.size.y + b.size.x * b.size.y - overlap;
    if union <= 0.0 {
        return 0.0;
    }

    overlap / union
}

/// Decode raw YOLO pose output into detections.
///
/// `output` has shape `[1, 56, N]` with N candidate boxes. Candidates below
/// `conf_threshold` are dropped, the rest go through greedy NMS at
/// `iou_threshold`, and all coordinates are mapped back through the
/// letterbox into original-image pixels.
///
/// Returns detections sorted by confidence, highest first.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, InferError> {
    let n = match output.shape.as_slice() {
        [1, CHANNELS, n] => *n,
        other => {
            return Err(InferError::ShapeMismatch {
                expected: format!("[1, {CHANNELS}, N]"),
                got: format!("{other:?}"),
            });
        }
    };
    if n == 0 {
        return Ok(Vec::new());
    }

    // Row-major [1, 56, N]: channel `row` of candidate `i` is at row * N + i.
    let at = |row: usize, i: usize| output.data[row * n + i];
    let unpad = |x: f32, y: f32| {
        Vec2::new(
            (x - letterbox.pad_x) / letterbox.scale,
            (y - letterbox.pad_y) / letterbox.scale,
        )
    };

    let mut candidates = Vec::new();
    for i in 0..n {
        let confidence = at(4, i);
        if confidence < conf_threshold {
            continue;
        }

        let mut keypoints = [Keypoint {
            position: Vec2::zero(),
            confidence: 0.0,
        }; COCO_KEYPOINT_COUNT];
        for (kp, slot) in keypoints.iter_mut().enumerate() {
            let row = 5 + kp * 3;
            *slot = Keypoint {
                position: unpad(at(row, i), at(row + 1, i)),
                confidence: at(row + 2, i),
            };
        }

        // Box comes center-based; convert to a top-left origin rect in
        // original-image coordinates.
        let center = unpad(at(0, i), at(1, i));
        let size = Vec2::new(at(2, i) / letterbox.scale, at(3, i) / letterbox.scale);
        let bbox = Rect::new(center - size * 0.5, size);

        candidates.push(PoseDetection {
            bbox,
            confidence,
            keypoints,
        });
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Greedy NMS.
    let mut keep: Vec<PoseDetection> = Vec::new();
    for candidate in candidates {
        if keep
            .iter()
            .all(|kept| iou(&kept.bbox, &candidate.bbox) <= iou_threshold)
        {
            keep.push(candidate);
        }
    }

    Ok(keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::KeypointIndex;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    const NO_LETTERBOX: LetterboxInfo = LetterboxInfo {
        scale: 1.0,
        pad_x: 0.0,
        pad_y: 0.0,
    };

    /// Build a `[1, 56, N]` tensor from per-candidate channel vectors.
    fn output_from(candidates: &[[f32; CHANNELS]]) -> Tensor<f32> {
        let n = candidates.len();
        let mut data = vec![0.0; CHANNELS * n];
        for (i, candidate) in candidates.iter().enumerate() {
            for (row, value) in candidate.iter().enumerate() {
                data[row * n + i] = *value;
            }
        }
        Tensor::new(vec![1, CHANNELS, n], data).unwrap()
    }

    fn candidate(cx: f32, cy: f32, w: f32, h: f32, conf: f32) -> [f32; CHANNELS] {
        let mut channels = [0.0; CHANNELS];
        channels[0] = cx;
        channels[1] = cy;
        channels[2] = w;
        channels[3] = h;
        channels[4] = conf;
        channels
    }

    #[test]
    fn iou_identical_boxes() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iou_disjoint_boxes() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 20.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_zero_area_box() {
        let a = rect(0.0, 0.0, 0.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn confidence_filter_drops_weak_candidates() {
        let output = output_from(&[
            candidate(100.0, 100.0, 50.0, 80.0, 0.9),
            candidate(300.0, 100.0, 50.0, 80.0, 0.1),
        ]);

        let detections = postprocess(&output, &NO_LETTERBOX, 0.25, 0.45).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].confidence, 0.9);
    }

    #[test]
    fn center_box_becomes_origin_rect() {
        let output = output_from(&[candidate(100.0, 200.0, 40.0, 60.0, 0.9)]);

        let detections = postprocess(&output, &NO_LETTERBOX, 0.25, 0.45).unwrap();
        assert_eq!(detections[0].bbox, rect(80.0, 170.0, 40.0, 60.0));
    }

    #[test]
    fn nms_suppresses_overlapping_candidates() {
        let output = output_from(&[
            candidate(100.0, 100.0, 50.0, 80.0, 0.6),
            candidate(102.0, 101.0, 50.0, 80.0, 0.8),
            candidate(400.0, 100.0, 50.0, 80.0, 0.7),
        ]);

        let detections = postprocess(&output, &NO_LETTERBOX, 0.25, 0.45).unwrap();
        // The two boxes around x=100 collapse to the stronger one.
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].confidence, 0.8);
        assert_eq!(detections[1].confidence, 0.7);
    }

    #[test]
    fn letterbox_rescaling_applies_to_keypoints() {
        let mut channels = candidate(320.0, 320.0, 100.0, 100.0, 0.9);
        // Left shoulder at model coordinates (330, 340), fully visible.
        let row = 5 + usize::from(KeypointIndex::LeftShoulder) * 3;
        channels[row] = 330.0;
        channels[row + 1] = 340.0;
        channels[row + 2] = 1.0;

        let letterbox = LetterboxInfo {
            scale: 0.5,
            pad_x: 0.0,
            pad_y: 80.0,
        };
        let output = output_from(&[channels]);

        let detections = postprocess(&output, &letterbox, 0.25, 0.45).unwrap();
        let shoulder = detections[0].keypoint(KeypointIndex::LeftShoulder);
        assert_eq!(shoulder.position, Vec2::new(660.0, 520.0));
        assert_eq!(shoulder.confidence, 1.0);
    }

    #[test]
    fn sorted_by_confidence_descending() {
        let output = output_from(&[
            candidate(100.0, 100.0, 20.0, 20.0, 0.5),
            candidate(300.0, 100.0, 20.0, 20.0, 0.9),
            candidate(500.0, 100.0, 20.0, 20.0, 0.7),
        ]);

        let detections = postprocess(&output, &NO_LETTERBOX, 0.25, 0.45).unwrap();
        let confs: Vec<f32> = detections.iter().map(|d| d.confidence).collect();
        assert_eq!(confs, vec![0.9, 0.7, 0.5]);
    }

    #[test]
    fn empty_candidate_axis_yields_no_detections() {
        let output = Tensor::new(vec![1, CHANNELS, 0], vec![]).unwrap();
        let detections = postprocess(&output, &NO_LETTERBOX, 0.25, 0.45).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let output = Tensor::new(vec![1, 10, 2], vec![0.0; 20]).unwrap();
        assert!(matches!(
            postprocess(&output, &NO_LETTERBOX, 0.25, 0.45),
            Err(InferError::ShapeMismatch { .. })
        ));
    }
}
