//! Plain-text export of a generated response, ready for the clipboard.

use serde::Deserialize;

use crate::reply::models::GeneratedResponse;

pub const TRANSLATION_LABEL: &str = "🔄 Türkçe Çeviri:";
pub const ORIGINAL_REPLY_LABEL: &str = "🌍 Orijinal Dilinde Yanıt:";
pub const TURKISH_REPLY_LABEL: &str = "🇹🇷 Türkçe Yanıt:";

/// A single card's worth of text, for per-field copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportField {
    Translation,
    Original,
    Turkish,
}

/// All three sections, labelled, in fixed order: translation, original, Turkish.
pub fn clipboard_text(response: &GeneratedResponse) -> String {
    format!(
        "{TRANSLATION_LABEL}\n{}\n\n{ORIGINAL_REPLY_LABEL}\n{}\n\n{TURKISH_REPLY_LABEL}\n{}",
        response.translation, response.original_language_reply, response.turkish_reply
    )
}

/// The bare text of one field, without a label.
pub fn field_text(response: &GeneratedResponse, field: ExportField) -> &str {
    match field {
        ExportField::Translation => &response.translation,
        ExportField::Original => &response.original_language_reply,
        ExportField::Turkish => &response.turkish_reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> GeneratedResponse {
        GeneratedResponse {
            translation: "T".to_string(),
            original_language_reply: "O".to_string(),
            turkish_reply: "K".to_string(),
            detected_language: "English".to_string(),
        }
    }

    #[test]
    fn test_clipboard_text_has_three_sections_in_order() {
        let text = clipboard_text(&response());
        assert_eq!(
            text,
            "🔄 Türkçe Çeviri:\nT\n\n🌍 Orijinal Dilinde Yanıt:\nO\n\n🇹🇷 Türkçe Yanıt:\nK"
        );

        let sections: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].starts_with(TRANSLATION_LABEL));
        assert!(sections[1].starts_with(ORIGINAL_REPLY_LABEL));
        assert!(sections[2].starts_with(TURKISH_REPLY_LABEL));
    }

    #[test]
    fn test_clipboard_text_omits_detected_language() {
        assert!(!clipboard_text(&response()).contains("English"));
    }

    #[test]
    fn test_field_text() {
        let r = response();
        assert_eq!(field_text(&r, ExportField::Translation), "T");
        assert_eq!(field_text(&r, ExportField::Original), "O");
        assert_eq!(field_text(&r, ExportField::Turkish), "K");
    }
}
