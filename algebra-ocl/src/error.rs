use algebra::fields::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    #[error("DeviceError: {0}")]
    Simple(&'static str),
    #[error("Field parameters rejected: {0}")]
    Validation(#[from] ValidationError),
    #[error("Operand length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type DeviceResult<T> = std::result::Result<T, DeviceError>;
