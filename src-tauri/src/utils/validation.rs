//! Field-level checks applied to form drafts before they reach the store.

use crate::utils::ValidationError;

/// Returns the trimmed facility name, rejecting blank input.
pub fn validate_facility(facility: &str) -> Result<String, ValidationError> {
    let facility = facility.trim();
    if facility.is_empty() {
        return Err(ValidationError::MissingFacility);
    }
    Ok(facility.to_string())
}

/// Accepts an absent price or any finite, non-negative amount.
pub fn validate_price(price: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(ValidationError::InvalidPrice(p)),
        other => Ok(other),
    }
}

/// Trims optional free text; blank text is treated as absent.
pub fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
