use serde::{Deserialize, Serialize};

/// Merchant context used to personalise generated replies.
///
/// `email` and `campaign` are optional: an empty string means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantConfig {
    pub app_name: String,
    pub features: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub campaign: String,
}

/// Raw setup form submission, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupForm {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub features: String,
    pub email: Option<String>,
    pub campaign: Option<String>,
}
