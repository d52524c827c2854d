use sp_core::CoreError;
use sp_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("field setup failed: {0}")]
    Field(#[from] FieldError),
}

pub type SimResult<T> = Result<T, SimError>;
