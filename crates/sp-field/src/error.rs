//! Field-subsystem error type.

use thiserror::Error;

/// Errors produced by `sp-field`.  Only construction and zone registration
/// can fail; per-tick operations are infallible.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("forbidden zone '{name}' does not overlap the {width}x{height} grid")]
    ZoneOutsideGrid { name: String, width: usize, height: usize },
}

pub type FieldResult<T> = Result<T, FieldError>;
