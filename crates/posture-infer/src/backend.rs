use crate::{InferError, ModelSource, Session};

/// An inference runtime that can turn model bytes into a [`Session`].
pub trait Backend {
    fn name(&self) -> &str;

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
