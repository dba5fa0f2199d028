use std::path::PathBuf;

/// Where model bytes come from.
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
