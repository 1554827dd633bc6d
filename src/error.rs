/// Errors from turning raw data into colliders.
///
/// Geometric queries never produce these; a miss is an `Option::None`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColliderError {
    #[error("Expected {expected} values for a {shape} collider, found {found}")]
    WrongLength {
        shape: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Collider data contained a non-finite value")]
    NonFinite,
    #[error("Collider radius must be finite and non-negative")]
    InvalidRadius,
    #[error("Cannot build a bounding box from zero points")]
    NoPoints,
}

/// Check a flat float slice before building a collider from it.
pub(crate) fn check_flat(
    shape: &'static str,
    expected: usize,
    values: &[f32],
) -> Result<(), ColliderError> {
    if values.len() != expected {
        return Err(ColliderError::WrongLength {
            shape,
            expected,
            found: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ColliderError::NonFinite);
    }
    Ok(())
}
