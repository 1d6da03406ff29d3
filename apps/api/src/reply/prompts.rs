// All LLM prompt text for the reply module.
// Rules come from rules.rs and tone.rs; this file only lays them out.

use crate::llm_client::prompts::{
    or_sentinel, render, JSON_ONLY_INSTRUCTION, NO_NOTE, UNSPECIFIED,
};
use crate::reply::models::ReviewInput;
use crate::reply::rules::{BASE_LANGUAGE, MAX_REPLY_CHARS, REPLY_MARKER};
use crate::reply::tone::tone_policy;
use crate::setup::models::MerchantConfig;

/// Input text sent with every refinement call.
pub const REFINE_TRIGGER: &str = "Lütfen bu metni düzenle ve çevir.";

/// Reply generation instruction.
/// Slots: {app_name}, {features}, {email}, {campaign}, {stars}, {band}, {note},
///        {language_rule}, {length_rule}, {tone_rules}, {json_only}
pub const GENERATE_SYSTEM_TEMPLATE: &str = r#"Sen bir uygulama adına müşteri yorumlarını yanıtlayan profesyonel bir asistansın.
Gelen yorumu analiz et ve aşağıdaki kurallara eksiksiz uyan yanıtlar üret.

BAĞLAM:
- Uygulama adı: "{app_name}"
- Öne çıkarılacak özellikler: "{features}"
- İletişim e-postası: "{email}"
- Kampanya / hediye: "{campaign}"
- Müşterinin puanı: {stars} / 5 yıldız ({band})
- Yanıta eklenecek özel not: "{note}" (varsa yanıta doğal bir şekilde yerleştir)

KURALLAR:
1. DİL: {language_rule}
2. UZUNLUK VE İŞARET: {length_rule}
3. TON:
{tone_rules}

GÖREV:
- Yorumun dilini kesin olarak tespit et ve İngilizce adını "detected_language" alanına yaz (ör. English, German, Arabic, Turkish).
- Yorumun Türkçe çevirisini "translation" alanına yaz.
- Yorumun kendi dilinde, dil karıştırmadan bir yanıt yaz: "original_language_reply".
- Farklı bir üslupla Türkçe bir yanıt daha yaz: "turkish_reply".

{json_only}"#;

/// Refinement instruction.
/// Slots: {draft}, {app_name}, {target_language}, {length_rule}, {target_language_rule}, {json_only}
pub const REFINE_SYSTEM_TEMPLATE: &str = r#"Sen bir metin editörü ve çevirmensin.

DURUM:
Kullanıcı, müşteri yanıtı olarak şu Türkçe taslağı yazdı:
"{draft}"

GÖREV:
1. TÜRKÇE DÜZENLEME ("turkish_reply"): Taslağı anlamını bozmadan daha akıcı, samimi ve profesyonel hale getir, yazım hatalarını gider.
   - Uygulama adı: {app_name}
   - {length_rule}
2. ÇEVİRİ ("original_language_reply"): Düzenlenmiş metni birebir anlamıyla {target_language} diline çevir.
   - {target_language_rule}
   - {length_rule}

{json_only}"#;

/// The monolingual rule for the original-language reply.
pub fn language_rule() -> String {
    format!(
        "'original_language_reply' alanı %100 tespit edilen dilde olmalı. \
        Yorum başka bir dildeyse bu alanda tek bir {BASE_LANGUAGE} kelime bile olmamalı; \
        o dilin kendi alfabesini kullan (Rusça için Kiril, Arapça için Arap alfabesi). \
        Asla yarı {BASE_LANGUAGE} yarı yabancı cümle kurma."
    )
}

/// Length and marker rule shared by both reply fields.
pub fn length_rule() -> String {
    format!(
        "Her yanıt alanı ('original_language_reply' ve 'turkish_reply') en fazla \
        {MAX_REPLY_CHARS} karakter olmalı ve mutlaka {REPLY_MARKER} ile bitmeli."
    )
}

fn target_language_rule(target_language: &str) -> String {
    format!(
        "Hedef dil {BASE_LANGUAGE} değilse metin %100 {target_language} olmalı; \
        hiçbir {BASE_LANGUAGE} kelime karıştırma ve hedef dilin kendi alfabesini kullan."
    )
}

/// Renders the generation instruction for a review. Deterministic for equal inputs.
pub fn build_generate_instruction(review: &ReviewInput, config: &MerchantConfig) -> String {
    let policy = tone_policy(review.star_rating);
    let tone_rules = policy
        .rules
        .iter()
        .map(|rule| format!("   - {rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    let language_rule = language_rule();
    let length_rule = length_rule();
    let stars = review.star_rating.value().to_string();

    render(
        GENERATE_SYSTEM_TEMPLATE,
        &[
            ("app_name", config.app_name.trim()),
            ("features", config.features.trim()),
            ("email", or_sentinel(&config.email, UNSPECIFIED)),
            ("campaign", or_sentinel(&config.campaign, UNSPECIFIED)),
            ("stars", stars.as_str()),
            ("band", policy.band.label()),
            ("note", or_sentinel(&review.note, NO_NOTE)),
            ("language_rule", language_rule.as_str()),
            ("length_rule", length_rule.as_str()),
            ("tone_rules", tone_rules.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Renders the refinement instruction for an edited Turkish draft.
pub fn build_refine_instruction(
    draft: &str,
    target_language: &str,
    config: &MerchantConfig,
) -> String {
    let length_rule = length_rule();
    let target_language_rule = target_language_rule(target_language);

    render(
        REFINE_SYSTEM_TEMPLATE,
        &[
            ("draft", draft.trim()),
            ("app_name", config.app_name.trim()),
            ("target_language", target_language),
            ("length_rule", length_rule.as_str()),
            ("target_language_rule", target_language_rule.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}
