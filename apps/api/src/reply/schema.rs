//! Output schemas sent with each call, and strict parsing of what comes back.
//!
//! Model output is untrusted: each required field is checked explicitly and
//! must be a JSON string. Nothing is coerced.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::llm_client::strip_json_fences;
use crate::reply::models::{GeneratedResponse, RefinedReply};
use crate::reply::rules::MAX_REPLY_CHARS;

pub const TRANSLATION: &str = "translation";
pub const ORIGINAL_LANGUAGE_REPLY: &str = "original_language_reply";
pub const TURKISH_REPLY: &str = "turkish_reply";
pub const DETECTED_LANGUAGE: &str = "detected_language";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("model returned no text")]
    Empty,

    #[error("model output is not valid JSON: {0}")]
    NotJson(String),

    #[error("model output is not a JSON object")]
    NotAnObject,

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{0}' is not a string")]
    NotAString(&'static str),
}

/// Four-field schema for a full generation.
pub fn generated_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            TRANSLATION: {
                "type": "STRING",
                "description": "Turkish translation of the customer's comment."
            },
            ORIGINAL_LANGUAGE_REPLY: {
                "type": "STRING",
                "description": format!(
                    "Sincere, concise reply written FULLY and EXCLUSIVELY in the detected language, \
                    at most {MAX_REPLY_CHARS} characters. No Turkish words unless the language is Turkish."
                )
            },
            TURKISH_REPLY: {
                "type": "STRING",
                "description": format!("Sincere, concise reply in Turkish, at most {MAX_REPLY_CHARS} characters.")
            },
            DETECTED_LANGUAGE: {
                "type": "STRING",
                "description": "English name of the language the comment is written in (e.g. Arabic, English, German, Turkish)."
            }
        },
        "required": [TRANSLATION, ORIGINAL_LANGUAGE_REPLY, TURKISH_REPLY, DETECTED_LANGUAGE]
    })
}

/// Two-field schema for a refinement into `target_language`.
pub fn refined_reply_schema(target_language: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            ORIGINAL_LANGUAGE_REPLY: {
                "type": "STRING",
                "description": format!("The polished reply translated into {target_language}.")
            },
            TURKISH_REPLY: {
                "type": "STRING",
                "description": "The polished Turkish reply."
            }
        },
        "required": [ORIGINAL_LANGUAGE_REPLY, TURKISH_REPLY]
    })
}

/// Parses raw model text into a `GeneratedResponse`.
pub fn parse_generated_response(raw: &str) -> Result<GeneratedResponse, SchemaError> {
    let object = parse_object(raw)?;
    Ok(GeneratedResponse {
        translation: require_string(&object, TRANSLATION)?,
        original_language_reply: require_string(&object, ORIGINAL_LANGUAGE_REPLY)?,
        turkish_reply: require_string(&object, TURKISH_REPLY)?,
        detected_language: require_string(&object, DETECTED_LANGUAGE)?,
    })
}

/// Parses raw model text into a `RefinedReply`.
pub fn parse_refined_reply(raw: &str) -> Result<RefinedReply, SchemaError> {
    let object = parse_object(raw)?;
    Ok(RefinedReply {
        original_language_reply: require_string(&object, ORIGINAL_LANGUAGE_REPLY)?,
        turkish_reply: require_string(&object, TURKISH_REPLY)?,
    })
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, SchemaError> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Err(SchemaError::Empty);
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(SchemaError::NotAnObject),
        Err(e) => Err(SchemaError::NotJson(e.to_string())),
    }
}

fn require_string(object: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::NotAString(field)),
        None => Err(SchemaError::MissingField(field)),
    }
}
