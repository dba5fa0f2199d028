use posture_base::{Rect, Vec2};

/// Number of keypoints in the COCO pose schema.
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// A single body keypoint: 2D position plus a confidence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Position in original-image pixel coordinates.
    pub position: Vec2<f32>,
    /// Confidence/visibility in `[0.0, 1.0]`. YOLO pose models emit a
    /// continuous score, not the categorical COCO 0/1/2 visibility.
    pub confidence: f32,
}

impl Keypoint {
    /// Whether this keypoint is confidently placed.
    pub fn visible(&self, floor: f32) -> bool {
        self.confidence >= floor
    }
}

/// COCO keypoint names, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL
            .get(value)
            .copied()
            .ok_or_else(|| format!("invalid keypoint index {value}, must be 0-16"))
    }
}

/// A detected person: bounding box, detection confidence, 17 keypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDetection {
    pub bbox: Rect<f32>,
    pub confidence: f32,
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PoseDetection {
    /// Look up a keypoint by its anatomical name.
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// Letterbox transformation parameters, kept so detections can be mapped
/// back into original-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied before padding.
    pub scale: f32,
    /// Horizontal padding in model-input pixels.
    pub pad_x: f32,
    /// Vertical padding in model-input pixels.
    pub pad_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for (i, index) in KeypointIndex::ALL.iter().enumerate() {
            assert_eq!(usize::from(*index), i);
            assert_eq!(KeypointIndex::try_from(i).unwrap(), *index);
        }
    }

    #[test]
    fn index_out_of_range() {
        assert!(KeypointIndex::try_from(17).is_err());
    }

    #[test]
    fn keypoint_lookup_by_name() {
        let mut keypoints = [Keypoint {
            position: Vec2::zero(),
            confidence: 0.0,
        }; COCO_KEYPOINT_COUNT];
        keypoints[usize::from(KeypointIndex::LeftEar)] = Keypoint {
            position: Vec2::new(3.0, 4.0),
            confidence: 0.9,
        };

        let detection = PoseDetection {
            bbox: Rect::default(),
            confidence: 1.0,
            keypoints,
        };

        let ear = detection.keypoint(KeypointIndex::LeftEar);
        assert_eq!(ear.position, Vec2::new(3.0, 4.0));
        assert!(ear.visible(0.5));
        assert!(!detection.keypoint(KeypointIndex::Nose).visible(0.5));
    }
}
