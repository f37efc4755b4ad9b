use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} out of bounds for skip list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("skip list structure is corrupted: {0}")]
    Corruption(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for the structural-consistency failure, false for caller mistakes.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corruption(_))
    }
}
