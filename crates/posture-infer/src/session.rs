use std::collections::HashMap;

use posture_base::Tensor;

use crate::InferError;

/// A loaded model ready to run.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;

    fn input_names(&self) -> &[String];

    fn output_names(&self) -> &[String];
}
