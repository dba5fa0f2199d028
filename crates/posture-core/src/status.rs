/// Per-frame posture verdict shown in the preview window.
///
/// Recomputed from scratch every frame; nothing here carries over between
/// frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureStatus {
    /// No frame has been assessed yet.
    Analyzing,
    Good,
    NeedsCorrection,
    /// The detector found nobody, or a required keypoint was not visible.
    LandmarksNotVisible,
}

impl Default for PostureStatus {
    fn default() -> Self {
        PostureStatus::Analyzing
    }
}

impl PostureStatus {
    /// Banner text for the overlay.
    pub fn banner(self) -> &'static str {
        match self {
            PostureStatus::Analyzing => "Analyzing...",
            PostureStatus::Good => "Posture good",
            PostureStatus::NeedsCorrection => "FIX YOUR POSTURE",
            PostureStatus::LandmarksNotVisible => "Landmarks not visible",
        }
    }

    /// RGB overlay color for this status.
    pub fn color(self) -> [u8; 3] {
        match self {
            PostureStatus::Analyzing => [255, 255, 255],
            PostureStatus::Good => [0, 255, 0],
            PostureStatus::NeedsCorrection => [255, 0, 0],
            PostureStatus::LandmarksNotVisible => [255, 255, 0],
        }
    }
}
