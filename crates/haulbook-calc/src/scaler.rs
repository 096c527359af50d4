//! Element-wise array scaling

use thiserror::Error;

/// Factor every element is multiplied by
pub const SCALE_FACTOR: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("input array is missing")]
    NullInput,

    #[error("input array is empty")]
    EmptyInput,
}

/// Return a new vector with every element multiplied by [`SCALE_FACTOR`].
///
/// `None` models an absent array and is rejected separately from an empty one.
pub fn multiply_by_three(values: Option<&[f64]>) -> Result<Vec<f64>, ScaleError> {
    let values = values.ok_or(ScaleError::NullInput)?;
    if values.is_empty() {
        return Err(ScaleError::EmptyInput);
    }
    Ok(values.iter().map(|v| v * SCALE_FACTOR).collect())
}
