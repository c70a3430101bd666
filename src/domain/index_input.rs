use thiserror::Error;

/// Rejections raised before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexInputError {
    #[error("Please enter a valid number")]
    Missing,
    #[error("Index must be a non-negative integer")]
    Negative,
    #[error("Index must be an integer")]
    NotInteger,
}

/// Parse a user-typed sequence index.
///
/// Blank or non-numeric text is `Missing`, a negative number is `Negative`
/// (checked before integrality, so `-1.5` is `Negative`), and a finite number
/// with a fractional part is `NotInteger`.
pub fn parse_index(input: &str) -> Result<u64, IndexInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IndexInputError::Missing);
    }

    if let Ok(index) = trimmed.parse::<u64>() {
        return Ok(index);
    }

    let number: f64 = trimmed.parse().map_err(|_| IndexInputError::Missing)?;
    if !number.is_finite() {
        return Err(IndexInputError::Missing);
    }
    if number < 0.0 {
        return Err(IndexInputError::Negative);
    }
    if number.fract() != 0.0 || number > u64::MAX as f64 {
        return Err(IndexInputError::NotInteger);
    }
    // Whole-valued forms such as "10.0" or "1e3"
    Ok(number as u64)
}
