//! Setup collector — validates the merchant form and produces a `MerchantConfig`.

use crate::errors::AppError;
use crate::setup::models::{MerchantConfig, SetupForm};

/// Validates a setup submission.
///
/// `app_name` and `features` are required (whitespace-only counts as missing).
/// `email` and `campaign` pass through unvalidated and default to empty strings.
pub fn collect(form: SetupForm) -> Result<MerchantConfig, AppError> {
    if form.app_name.trim().is_empty() {
        return Err(AppError::Validation("app_name cannot be empty".to_string()));
    }
    if form.features.trim().is_empty() {
        return Err(AppError::Validation("features cannot be empty".to_string()));
    }

    Ok(MerchantConfig {
        app_name: form.app_name,
        features: form.features,
        email: form.email.unwrap_or_default(),
        campaign: form.campaign.unwrap_or_default(),
    })
}

/// Values the setup form opens with: the active config, else the saved one, else blank.
pub fn prefill(active: Option<&MerchantConfig>, saved: Option<&MerchantConfig>) -> MerchantConfig {
    active.or(saved).cloned().unwrap_or_default()
}

/// Clears the form. Destructive, so it only proceeds once the user has confirmed.
pub fn clear(confirmed: bool) -> Result<MerchantConfig, AppError> {
    if !confirmed {
        return Err(AppError::ConfirmationRequired(
            "Clearing the saved setup needs confirm=true".to_string(),
        ));
    }
    Ok(MerchantConfig::default())
}
