//! Inline photo representation stored inside an entry.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::utils::DecodeError;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A JPEG embedded as a base64 data URI, usable directly as an `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Photo(String);

impl Photo {
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + bytes.len().div_ceil(3) * 4);
        uri.push_str(DATA_URI_PREFIX);
        STANDARD.encode_string(bytes, &mut uri);
        Self(uri)
    }

    pub fn as_data_uri(&self) -> &str {
        &self.0
    }

    /// Decodes the embedded JPEG bytes back out of the URI.
    pub fn to_jpeg(&self) -> Result<Vec<u8>, DecodeError> {
        STANDARD
            .decode(&self.0[DATA_URI_PREFIX.len()..])
            .map_err(|e| DecodeError::corrupt(format!("Invalid photo payload: {e}")))
    }
}

impl TryFrom<String> for Photo {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.starts_with(DATA_URI_PREFIX) && value.len() > DATA_URI_PREFIX.len() {
            Ok(Self(value))
        } else {
            Err("photo must be a non-empty base64 JPEG data URI".to_string())
        }
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        photo.0
    }
}
