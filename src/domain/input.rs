use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field}: \"{raw}\" is not a number")]
    NotANumber { field: &'static str, raw: String },
}

/// Parses a numeric text field. Blank input means "unset" and is never read as zero.
///
/// Accepts a comma as the decimal separator so `"12,50"` and `"12.50"` agree.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Option<f64>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(InputError::NotANumber {
            field,
            raw: trimmed.to_string(),
        }),
    }
}
