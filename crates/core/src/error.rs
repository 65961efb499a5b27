#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal computation error: {0}")]
    InternalComputation(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
