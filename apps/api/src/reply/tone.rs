//! Tone calibration — maps the star rating to the tone rules a reply must follow.
//!
//! The rating alone picks the band. Sentiment of the comment text is judged by
//! the model, so the low band carries one rule per sentiment and the model
//! applies whichever matches.

use crate::reply::models::StarRating;

/// Coarse grouping of star ratings. Drives which tone rules are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Low,
    Neutral,
    High,
}

impl RatingBand {
    pub fn from_rating(rating: StarRating) -> Self {
        match rating.value() {
            0..=2 => RatingBand::Low,
            3 => RatingBand::Neutral,
            _ => RatingBand::High,
        }
    }

    /// Label shown under the star picker.
    pub fn label(self) -> &'static str {
        match self {
            RatingBand::Low => "Düşük (Üzgün/Kızgın)",
            RatingBand::Neutral => "Orta (Nötr)",
            RatingBand::High => "Yüksek (Mutlu)",
        }
    }
}

/// Applies to every reply regardless of rating.
pub const WARMTH_RULE: &str =
    "Çok samimi, sıcakkanlı ve içten ol; kalıp cümlelerle robot gibi konuşma.";

/// Low rating but the comment itself is positive.
pub const LOW_RATING_POSITIVE_TEXT: &str =
    "Puan düşük ama yorum olumluysa hafif esprili, tatlı bir takılmayla yaklaş \
    (örneğin yorumun güzel olduğunu ama yıldızların eksik kaldığını şakayla belirt).";

/// Low rating and a negative comment.
pub const LOW_RATING_NEGATIVE_TEXT: &str =
    "Puan düşük ve yorum olumsuzsa çok nazik ve alttan alan bir dil kullan; \
    özür dile ve somut bir çözüm ya da iletişim yolu öner.";

pub const NEUTRAL_RATING: &str =
    "Puan ortaysa dengeli ol; teşekkür et ve geri bildirimin dikkate alınacağını belirt.";

pub const HIGH_RATING: &str =
    "Puan yüksekse içtenlikle teşekkür et ve öne çıkarılacak özellikleri vurgula.";

/// Tone rules for a rating, in the order they are rendered.
#[derive(Debug, Clone)]
pub struct TonePolicy {
    pub band: RatingBand,
    pub rules: Vec<&'static str>,
}

/// Returns the tone rules that apply to `rating`.
pub fn tone_policy(rating: StarRating) -> TonePolicy {
    let band = RatingBand::from_rating(rating);
    let mut rules = vec![WARMTH_RULE];
    match band {
        RatingBand::Low => {
            rules.push(LOW_RATING_POSITIVE_TEXT);
            rules.push(LOW_RATING_NEGATIVE_TEXT);
        }
        RatingBand::Neutral => rules.push(NEUTRAL_RATING),
        RatingBand::High => rules.push(HIGH_RATING),
    }
    TonePolicy { band, rules }
}
