//! Reply generation — builds the instruction, calls the model, validates the output.
//!
//! Flow: tone policy → instruction → generation call (schema-constrained) →
//!       strict schema parse → soft rule checks → return.
//!
//! There are no retries here. A failed call is reported once and the user
//! decides whether to trigger it again.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::reply::models::{GeneratedResponse, RefinedReply, ReviewInput};
use crate::reply::prompts::{build_generate_instruction, build_refine_instruction, REFINE_TRIGGER};
use crate::reply::rules::{check_reply, GENERATION_TEMPERATURE};
use crate::reply::schema::{
    generated_response_schema, parse_generated_response, parse_refined_reply,
    refined_reply_schema, ORIGINAL_LANGUAGE_REPLY, TURKISH_REPLY,
};
use crate::setup::models::MerchantConfig;

/// Builds the full generation request. The review text travels as the input, not inside the instruction.
pub fn build_generation_request(review: &ReviewInput, config: &MerchantConfig) -> GenerationRequest {
    GenerationRequest {
        system_instruction: build_generate_instruction(review, config),
        input_text: review.comment.clone(),
        response_schema: generated_response_schema(),
        temperature: GENERATION_TEMPERATURE,
    }
}

pub fn build_refine_request(
    draft: &str,
    target_language: &str,
    config: &MerchantConfig,
) -> GenerationRequest {
    GenerationRequest {
        system_instruction: build_refine_instruction(draft, target_language, config),
        input_text: REFINE_TRIGGER.to_string(),
        response_schema: refined_reply_schema(target_language),
        temperature: GENERATION_TEMPERATURE,
    }
}

/// Generates a translation plus two replies for a review.
///
/// Callers skip blank comments; this function assumes there is something to answer.
pub async fn generate_reply(
    llm: &dyn TextGenerator,
    review: &ReviewInput,
    config: &MerchantConfig,
) -> Result<GeneratedResponse, AppError> {
    let request = build_generation_request(review, config);
    info!(
        "Generating reply for '{}' ({} stars)",
        config.app_name,
        review.star_rating.value()
    );

    let raw = call(llm, &request).await?;
    let response = parse_generated_response(&raw)
        .map_err(|e| AppError::Generation(format!("Invalid generation output: {e}")))?;

    warn_on_rule_violations(ORIGINAL_LANGUAGE_REPLY, &response.original_language_reply);
    warn_on_rule_violations(TURKISH_REPLY, &response.turkish_reply);

    info!("Reply generated (detected language: {})", response.detected_language);
    Ok(response)
}

/// Polishes an edited Turkish draft and translates it into `target_language`.
pub async fn refine_reply(
    llm: &dyn TextGenerator,
    draft: &str,
    target_language: &str,
    config: &MerchantConfig,
) -> Result<RefinedReply, AppError> {
    if draft.trim().is_empty() {
        return Err(AppError::Validation("turkish_reply cannot be empty".to_string()));
    }
    if target_language.trim().is_empty() {
        return Err(AppError::Validation("target_language cannot be empty".to_string()));
    }

    let request = build_refine_request(draft, target_language.trim(), config);
    info!("Refining reply into {}", target_language.trim());

    let raw = call(llm, &request).await?;
    let refined = parse_refined_reply(&raw)
        .map_err(|e| AppError::Generation(format!("Invalid refinement output: {e}")))?;

    warn_on_rule_violations(ORIGINAL_LANGUAGE_REPLY, &refined.original_language_reply);
    warn_on_rule_violations(TURKISH_REPLY, &refined.turkish_reply);

    Ok(refined)
}

async fn call(llm: &dyn TextGenerator, request: &GenerationRequest) -> Result<String, AppError> {
    llm.generate(request)
        .await
        .map_err(|e| AppError::Generation(format!("Generation call failed: {e}")))?
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Generation("No response generated".to_string()))
}

/// Rule breaks are logged, not rejected: the reply is still usable and the user edits it.
fn warn_on_rule_violations(field: &str, reply: &str) {
    let violations = check_reply(reply);
    if !violations.is_empty() {
        warn!(
            "Reply field '{}' breaks output rules {:?}: {:?}",
            field,
            violations,
            reply.chars().take(60).collect::<String>()
        );
    }
}
