use posture_base::Vec2;
use posture_infer::pose::{KeypointIndex, PoseDetection};

use crate::angle::vertex_angle_deg;
use crate::status::PostureStatus;

/// Keypoints below this confidence are treated as not visible.
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.3;

/// Open interval of posture angles treated as good, in degrees.
///
/// Both bounds are exclusive: an angle exactly on a bound is a correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBounds {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for AngleBounds {
    fn default() -> Self {
        // Empirical band for the directional hip-shoulder-ear angle, roughly
        // "neck in line with the torso" when seen from the left.
        Self {
            min_deg: 160.0,
            max_deg: 185.0,
        }
    }
}

/// Stateless per-frame posture classifier.
///
/// Works on the left-side hip, shoulder, and ear keypoints. Presence of each
/// required keypoint is checked explicitly; a frame with any of them missing
/// is reported as [`PostureStatus::LandmarksNotVisible`] instead of being
/// forced through the angle computation.
#[derive(Debug, Clone, Copy)]
pub struct PostureClassifier {
    bounds: AngleBounds,
    min_visibility: f32,
}

impl Default for PostureClassifier {
    fn default() -> Self {
        Self::new(AngleBounds::default(), DEFAULT_MIN_VISIBILITY)
    }
}

impl PostureClassifier {
    pub fn new(bounds: AngleBounds, min_visibility: f32) -> Self {
        Self {
            bounds,
            min_visibility,
        }
    }

    pub fn bounds(&self) -> AngleBounds {
        self.bounds
    }

    /// Map a posture angle to a verdict. Bounds are exclusive.
    pub fn classify(&self, angle_deg: f32) -> PostureStatus {
        if self.bounds.min_deg < angle_deg && angle_deg < self.bounds.max_deg {
            PostureStatus::Good
        } else {
            PostureStatus::NeedsCorrection
        }
    }

    /// Directional angle at the left shoulder between the rays to the left
    /// hip and the left ear, or `None` when any of the three keypoints is
    /// below the visibility floor.
    pub fn posture_angle(&self, detection: &PoseDetection) -> Option<f32> {
        let hip = self.visible_point(detection, KeypointIndex::LeftHip)?;
        let shoulder = self.visible_point(detection, KeypointIndex::LeftShoulder)?;
        let ear = self.visible_point(detection, KeypointIndex::LeftEar)?;
        Some(vertex_angle_deg(hip, shoulder, ear))
    }

    /// Assess one frame's detections.
    ///
    /// Detections arrive sorted by confidence, so the first entry is the
    /// person the monitor tracks. An empty slice means nobody was detected.
    pub fn assess(&self, detections: &[PoseDetection]) -> PostureStatus {
        let Some(person) = detections.first() else {
            return PostureStatus::LandmarksNotVisible;
        };

        match self.posture_angle(person) {
            Some(angle) => self.classify(angle),
            None => PostureStatus::LandmarksNotVisible,
        }
    }

    fn visible_point(&self, detection: &PoseDetection, index: KeypointIndex) -> Option<Vec2<f32>> {
        let keypoint = detection.keypoint(index);
        keypoint
            .visible(self.min_visibility)
            .then_some(keypoint.position)
    }
}
