use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Customer star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for StarRating {
    fn default() -> Self {
        StarRating(Self::MAX)
    }
}

impl TryFrom<i64> for StarRating {
    type Error = AppError;

    /// Out-of-range ratings are rejected, never clamped.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(StarRating(value as u8))
        } else {
            Err(AppError::Validation(format!(
                "star_rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

/// A customer review as entered on the main screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewInput {
    pub comment: String,
    pub star_rating: StarRating,
    /// Free-text the merchant wants woven into the reply. Empty means none.
    pub note: String,
}

impl ReviewInput {
    /// A blank comment means there is nothing to answer.
    pub fn is_blank(&self) -> bool {
        self.comment.trim().is_empty()
    }
}

/// Structured result of one generation call. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    /// Turkish translation of the review.
    pub translation: String,
    /// Reply written only in the review's own language.
    pub original_language_reply: String,
    /// Alternate reply in Turkish.
    pub turkish_reply: String,
    /// English name of the detected language, e.g. "German".
    pub detected_language: String,
}

/// Result of polishing an edited Turkish draft and translating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedReply {
    pub original_language_reply: String,
    pub turkish_reply: String,
}

impl GeneratedResponse {
    /// Replaces both replies; translation and detected language stay as they were.
    pub fn with_refined(&self, refined: RefinedReply) -> GeneratedResponse {
        GeneratedResponse {
            original_language_reply: refined.original_language_reply,
            turkish_reply: refined.turkish_reply,
            ..self.clone()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub comment: String,
    pub star_rating: Option<i64>,
    #[serde(default)]
    pub note: String,
}

impl GenerateRequest {
    pub fn into_review(self) -> Result<ReviewInput, AppError> {
        let star_rating = match self.star_rating {
            Some(value) => StarRating::try_from(value)?,
            None => StarRating::default(),
        };
        Ok(ReviewInput {
            comment: self.comment,
            star_rating,
            note: self.note,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    /// The human-edited Turkish draft.
    pub turkish_reply: String,
    /// Defaults to the language detected for the displayed response.
    pub target_language: Option<String>,
}
