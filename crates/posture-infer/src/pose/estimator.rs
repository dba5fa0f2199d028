use posture_base::Tensor;

use super::postprocess::postprocess;
use super::preprocess::preprocess;
use super::types::PoseDetection;
use crate::source::PoseSource;
use crate::{Backend, InferError, ModelSource};

/// End-to-end YOLO pose pipeline: letterbox, inference, decode.
///
/// The model is executed through whatever [`Backend`] loaded it, so the
/// estimator itself has no runtime dependency on a particular inference
/// library.
pub struct YoloPoseEstimator {
    session: Box<dyn crate::Session>,
    conf_threshold: f32,
    iou_threshold: f32,
}

impl YoloPoseEstimator {
    /// Load a pose model through `backend`.
    ///
    /// Thresholds default to conf 0.25 and NMS IoU 0.45.
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;

        Ok(Self {
            session,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
        })
    }

    /// Override confidence and NMS thresholds.
    pub fn with_thresholds(mut self, conf: f32, iou: f32) -> Self {
        self.conf_threshold = conf;
        self.iou_threshold = iou;
        self
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }

    /// Run pose estimation on an HWC `[H, W, 3]` image with values in
    /// `[0, 255]`. Returns detections sorted by confidence descending.
    pub fn estimate(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError> {
        let (preprocessed, letterbox) = preprocess(image)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?
            .clone();

        let outputs = self.session.run(&[(input_name.as_str(), preprocessed)])?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| InferError::Backend("model produced no outputs".to_string()))?;

        postprocess(output, &letterbox, self.conf_threshold, self.iou_threshold)
    }
}

impl PoseSource for YoloPoseEstimator {
    fn detect(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError> {
        self.estimate(image)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Session;
    use crate::pose::COCO_KEYPOINT_COUNT;

    /// Session that answers every run with a fixed `[1, 56, N]` tensor.
    struct CannedSession {
        input_names: Vec<String>,
        output_names: Vec<String>,
        output: Tensor<f32>,
    }

    impl Session for CannedSession {
        fn run(
            &mut self,
            _inputs: &[(&str, Tensor<f32>)],
        ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
            Ok(HashMap::from([("output0".to_string(), self.output.clone())]))
        }

        fn input_names(&self) -> &[String] {
            &self.input_names
        }

        fn output_names(&self) -> &[String] {
            &self.output_names
        }
    }

    fn estimator_with_output(output: Tensor<f32>) -> YoloPoseEstimator {
        YoloPoseEstimator {
            session: Box::new(CannedSession {
                input_names: vec!["images".to_string()],
                output_names: vec!["output0".to_string()],
                output,
            }),
            conf_threshold: 0.25,
            iou_threshold: 0.45,
        }
    }

    #[test]
    fn estimate_decodes_session_output() {
        let channels = 5 + COCO_KEYPOINT_COUNT * 3;
        let mut data = vec![0.0; channels];
        data[0] = 320.0; // cx
        data[1] = 320.0; // cy
        data[2] = 100.0; // w
        data[3] = 200.0; // h
        data[4] = 0.9; // confidence
        let output = Tensor::new(vec![1, channels, 1], data).unwrap();

        let mut estimator = estimator_with_output(output);
        let image = Tensor::new(vec![640, 640, 3], vec![0.0; 640 * 640 * 3]).unwrap();

        let detections = estimator.estimate(&image).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].confidence, 0.9);
    }

    #[test]
    fn estimate_with_nothing_detected() {
        let channels = 5 + COCO_KEYPOINT_COUNT * 3;
        let output = Tensor::new(vec![1, channels, 0], vec![]).unwrap();

        let mut estimator = estimator_with_output(output);
        let image = Tensor::new(vec![480, 640, 3], vec![0.0; 480 * 640 * 3]).unwrap();

        assert!(estimator.estimate(&image).unwrap().is_empty());
    }

    #[test]
    fn estimate_rejects_non_image_input() {
        let channels = 5 + COCO_KEYPOINT_COUNT * 3;
        let output = Tensor::new(vec![1, channels, 0], vec![]).unwrap();
        let mut estimator = estimator_with_output(output);

        let not_an_image = Tensor::new(vec![10], vec![0.0; 10]).unwrap();
        assert!(estimator.estimate(&not_an_image).is_err());
    }
}
