use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage error during '{0}': {1}")]
    Backend(String, String),
    #[error("Corrupted stored event: {0}")]
    Corruption(String),
}

impl StoreError {
    pub fn backend<O: Into<String>, M: ToString>(operation: O, message: M) -> Self {
        Self::Backend(operation.into(), message.to_string())
    }
}
