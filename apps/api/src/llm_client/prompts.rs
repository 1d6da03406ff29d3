// Shared prompt fragments and prompt-building utilities.
// Each service that calls the LLM keeps its own prompts.rs alongside it.

/// Placeholder rendered for optional merchant fields left blank.
pub const UNSPECIFIED: &str = "Belirtilmedi";

/// Placeholder rendered when no extra note accompanies a review.
pub const NO_NOTE: &str = "Yok";

/// Appended to every instruction; the response schema is enforced by the API as well.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Yanıtını YALNIZCA verilen şemaya uyan geçerli bir JSON nesnesi olarak döndür. \
    JSON dışında hiçbir metin, açıklama veya kod bloğu ekleme.";

/// Returns the trimmed value, or `sentinel` when the value is blank.
pub fn or_sentinel<'a>(value: &'a str, sentinel: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        sentinel
    } else {
        trimmed
    }
}

/// Fills `{name}` slots in `template` in a single pass.
///
/// Substituted values are never rescanned, so braces inside user text stay
/// literal. Unknown slots are left as written.
pub fn render(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let filled = after.find('}').and_then(|end| {
            let name = &after[..end];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, end))
        });
        match filled {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
