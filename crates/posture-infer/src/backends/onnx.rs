use std::collections::HashMap;

use log::info;
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use posture_base::Tensor;

use crate::{Backend, Device, InferError, ModelSource, Session};

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let mut builder = OrtSession::builder()
            .map_err(|e| InferError::Backend(format!("session builder: {e}")))?;

        builder = match &self.device {
            Device::Cpu => {
                info!("onnx: CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::ep::ExecutionProvider;
                use ort::execution_providers::CUDAExecutionProvider;

                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                info!(
                    "onnx: CUDA execution provider (device_id={}, available={})",
                    device_id,
                    ep.is_available().unwrap_or(false)
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder
                .commit_from_file(&path)
                .map_err(|e| InferError::ModelLoad(format!("{}: {e}", path.display())))?,
            ModelSource::Memory(bytes) => builder
                .commit_from_memory(&bytes)
                .map_err(|e| InferError::ModelLoad(format!("in-memory model: {e}")))?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // The pose models we load are single-input; keep the bridge simple.
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "onnx session expects exactly one input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|known| known == name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            });
        }

        let array = tensor_to_ndarray(tensor)?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Backend(format!("tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Backend(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = &outputs[output_name.as_str()];
            let array = value.try_extract_array::<f32>().map_err(|e| {
                InferError::Backend(format!("output '{output_name}' is not f32: {e}"))
            })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

fn tensor_to_ndarray(tensor: &Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape.clone(), tensor.data.clone())
        .map_err(|e| InferError::Backend(format!("tensor to ndarray: {e}")))
}

fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Tensor::new(shape, data).map_err(|e| InferError::Backend(format!("ndarray to tensor: {e}")))
}
