/// Errors raised while setting up a CUSUM transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CusumError {
    /// A required parameter was not supplied
    #[error("invalid arguments: you must specify {0}")]
    InvalidArguments(&'static str),
}

/// Result alias for fallible CUSUM setup
pub type Result<T> = core::result::Result<T, CusumError>;
