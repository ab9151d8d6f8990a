//! Core record types: entries, ratings and the form draft they are built from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AveragePrecision;
use crate::core::photo::Photo;
use crate::utils::{ValidationError, validation};

/// Stable identifier of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The fixed rating categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingField {
    Bath,
    Sauna,
    Mood,
    Creativity,
    Appearance,
}

impl RatingField {
    pub const ALL: [RatingField; 5] = [
        Self::Bath,
        Self::Sauna,
        Self::Mood,
        Self::Creativity,
        Self::Appearance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bath => "bath",
            Self::Sauna => "sauna",
            Self::Mood => "mood",
            Self::Creativity => "creativity",
            Self::Appearance => "appearance",
        }
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score on the 1-5 scale. Zero is not a rating; "not rated" is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!("rating must be between {} and {}, got {value}", Self::MIN, Self::MAX)
        })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Per-category ratings of one visit.
///
/// Serialized flat into the entry, one key per category, `null` when unrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub bath: Option<Rating>,
    pub sauna: Option<Rating>,
    pub mood: Option<Rating>,
    pub creativity: Option<Rating>,
    pub appearance: Option<Rating>,
}

impl Ratings {
    pub fn get(&self, field: RatingField) -> Option<Rating> {
        match field {
            RatingField::Bath => self.bath,
            RatingField::Sauna => self.sauna,
            RatingField::Mood => self.mood,
            RatingField::Creativity => self.creativity,
            RatingField::Appearance => self.appearance,
        }
    }

    pub fn set(&mut self, field: RatingField, rating: Option<Rating>) {
        let slot = match field {
            RatingField::Bath => &mut self.bath,
            RatingField::Sauna => &mut self.sauna,
            RatingField::Mood => &mut self.mood,
            RatingField::Creativity => &mut self.creativity,
            RatingField::Appearance => &mut self.appearance,
        };
        *slot = rating;
    }

    /// All categories in display order with their rating, if any.
    pub fn iter(&self) -> impl Iterator<Item = (RatingField, Option<Rating>)> + '_ {
        RatingField::ALL.into_iter().map(|field| (field, self.get(field)))
    }

    /// Builds ratings from raw form values, rejecting anything off the scale.
    pub fn from_raw(raw: &BTreeMap<RatingField, i64>) -> Result<Self, ValidationError> {
        let mut ratings = Self::default();
        for (&field, &value) in raw {
            let rating = u8::try_from(value)
                .ok()
                .and_then(Rating::new)
                .ok_or(ValidationError::RatingOutOfRange { field, value })?;
            ratings.set(field, Some(rating));
        }
        Ok(ratings)
    }

    /// Mean of the present ratings rounded to `precision`, `None` when nothing is rated.
    pub fn average(&self, precision: AveragePrecision) -> Option<f64> {
        let present: Vec<u32> = self
            .iter()
            .filter_map(|(_, rating)| rating.map(|r| u32::from(r.get())))
            .collect();

        if present.is_empty() {
            return None;
        }

        let mean = present.iter().sum::<u32>() as f64 / present.len() as f64;
        Some(precision.round(mean))
    }
}

/// Form values for a new entry, before validation.
///
/// `id` and `created_at` are normally left empty and assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDraft {
    pub id: Option<EntryId>,
    pub created_at: Option<DateTime<Utc>>,
    pub facility: String,
    pub address: Option<String>,
    pub price: Option<f64>,
    pub comment: Option<String>,
    /// Selected ratings; unselected categories are simply missing
    pub ratings: BTreeMap<RatingField, i64>,
    pub photo: Option<Photo>,
}

impl EntryDraft {
    pub fn new(facility: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            ..Self::default()
        }
    }

    pub fn rate(mut self, field: RatingField, value: i64) -> Self {
        self.ratings.insert(field, value);
        self
    }
}

/// A persisted sauna visit.
///
/// Fields are read-only once built; `avg` always reflects the ratings the
/// entry was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    id: EntryId,
    created_at: DateTime<Utc>,
    facility: String,
    address: Option<String>,
    price: Option<f64>,
    comment: Option<String>,
    #[serde(flatten)]
    ratings: Ratings,
    avg: Option<f64>,
    photo: Option<Photo>,
}

impl LogEntry {
    /// Validates `draft` and builds the entry, assigning id and timestamp when unset.
    pub fn from_draft(draft: EntryDraft, precision: AveragePrecision) -> Result<Self, ValidationError> {
        let facility = validation::validate_facility(&draft.facility)?;
        let price = validation::validate_price(draft.price)?;
        let ratings = Ratings::from_raw(&draft.ratings)?;

        Ok(Self {
            id: draft.id.unwrap_or_default(),
            created_at: draft.created_at.unwrap_or_else(Utc::now),
            facility,
            address: validation::normalize_text(draft.address),
            price,
            comment: validation::normalize_text(draft.comment),
            avg: ratings.average(precision),
            ratings,
            photo: draft.photo,
        })
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn facility(&self) -> &str {
        &self.facility
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    pub fn avg(&self) -> Option<f64> {
        self.avg
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }
}
