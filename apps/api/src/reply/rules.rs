//! Output rules every generated reply must follow.
//!
//! The rules are rendered into the instruction text by `prompts.rs` and checked
//! again (softly) against whatever the model returns.

/// Hard cap on each reply field, counted in characters, not bytes.
pub const MAX_REPLY_CHARS: usize = 350;

/// Marker every reply field must end with.
pub const REPLY_MARKER: &str = "💜";

/// The operator's own language. Translations and the alternate reply use it.
pub const BASE_LANGUAGE: &str = "Türkçe";

/// Sampling temperature for both generation and refinement.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// A reply rule the model broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    TooLong { chars: usize },
    MissingMarker,
}

/// Returns every rule `reply` breaks. Empty means compliant.
pub fn check_reply(reply: &str) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    let chars = reply.chars().count();
    if chars > MAX_REPLY_CHARS {
        violations.push(RuleViolation::TooLong { chars });
    }
    if !reply.trim_end().ends_with(REPLY_MARKER) {
        violations.push(RuleViolation::MissingMarker);
    }

    violations
}
