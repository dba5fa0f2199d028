use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// N-dimensional array with a flat row-major data buffer.
///
/// Images are stored HWC: `[height, width, channels]`.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or(TensorError::ShapeOverflow)
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let count = element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); count],
        })
    }
}

// Data buffers can be huge; keep Debug output to the shape.
impl<T> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_shape_product() {
        let err = Tensor::new(vec![2, 3], vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn new_detects_overflow() {
        let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
        assert_eq!(err, TensorError::ShapeOverflow);
    }

    #[test]
    fn zeros_fills_default() {
        let t = Tensor::<f32>::zeros(vec![2, 2, 3]).unwrap();
        assert_eq!(t.ndim(), 3);
        assert_eq!(t.len(), 12);
        assert!(t.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn scalar_shape_holds_one_element() {
        let t = Tensor::new(vec![], vec![7u8]).unwrap();
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }
}
