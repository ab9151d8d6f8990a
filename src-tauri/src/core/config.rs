//! Configuration for the log book: storage key, thumbnail bounds, rounding.

use serde::{Deserialize, Serialize};

use crate::utils::{LogbookError, LogbookResult, ValidationError};

/// Storage key of the current record schema.
///
/// Bump the suffix whenever the entry shape changes incompatibly; data under
/// older keys is left where it is and never read again.
pub const STORAGE_KEY: &str = "sauna_records_v3";

/// Bounding box and JPEG quality for photo thumbnails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThumbnailSettings {
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
    /// JPEG quality in (0, 1]
    pub quality: f32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            max_width: 1280,
            max_height: 1280,
            quality: 0.8,
        }
    }
}

impl ThumbnailSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ValidationError::settings(format!(
                "Thumbnail bounds must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }

        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(ValidationError::settings(format!(
                "Invalid quality value: {}. Must be in (0, 1]",
                self.quality
            )));
        }

        Ok(())
    }

    /// Quality on the encoder's 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Number of decimal digits the average rating is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AveragePrecision {
    One,
    #[default]
    Two,
}

impl AveragePrecision {
    pub fn digits(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn round(self, value: f64) -> f64 {
        let factor = 10f64.powi(self.digits() as i32);
        (value * factor).round() / factor
    }

    pub fn format(self, value: f64) -> String {
        format!("{value:.*}", self.digits())
    }
}

impl TryFrom<u8> for AveragePrecision {
    type Error = String;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        match digits {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("average precision must be 1 or 2 digits, got {other}")),
        }
    }
}

impl From<AveragePrecision> for u8 {
    fn from(precision: AveragePrecision) -> Self {
        precision.digits() as u8
    }
}

/// Top-level log book configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogbookConfig {
    pub storage_key: String,
    pub thumbnail: ThumbnailSettings,
    pub average_precision: AveragePrecision,
    /// Comment length shown in the table before truncation
    pub comment_preview_chars: usize,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            thumbnail: ThumbnailSettings::default(),
            average_precision: AveragePrecision::default(),
            comment_preview_chars: 80,
        }
    }
}

impl LogbookConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> LogbookResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| LogbookError::from(ValidationError::settings(format!("Invalid config: {e}"))))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage_key.trim().is_empty() {
            return Err(ValidationError::settings("Storage key cannot be empty"));
        }
        self.thumbnail.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = LogbookConfig::from_json("{}").unwrap();
        assert_eq!(config, LogbookConfig::default());
        assert_eq!(config.storage_key, "sauna_records_v3");
        assert_eq!(config.thumbnail.jpeg_quality(), 80);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = LogbookConfig::from_json(
            r#"{"thumbnail": {"maxWidth": 640}, "averagePrecision": 1}"#,
        )
        .unwrap();
        assert_eq!(config.thumbnail.max_width, 640);
        assert_eq!(config.thumbnail.max_height, 1280);
        assert_eq!(config.average_precision, AveragePrecision::One);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(LogbookConfig::from_json(r#"{"averagePrecision": 3}"#).is_err());
        assert!(LogbookConfig::from_json(r#"{"thumbnail": {"quality": 0.0}}"#).is_err());
        assert!(LogbookConfig::from_json(r#"{"thumbnail": {"quality": 1.5}}"#).is_err());
        assert!(LogbookConfig::from_json(r#"{"thumbnail": {"maxHeight": 0}}"#).is_err());
        assert!(LogbookConfig::from_json(r#"{"storageKey": "  "}"#).is_err());
    }

    #[test]
    fn precision_formats_fixed_digits() {
        assert_eq!(AveragePrecision::Two.format(4.0), "4.00");
        assert_eq!(AveragePrecision::One.format(3.67), "3.7");
        assert_eq!(AveragePrecision::Two.round(3.456), 3.46);
    }
}
