use serde::{Deserialize, Serialize};

const HOOKS_PATH: &str = "gamification/connectors/crowdin/hooks";
const I18N_PATH: &str = "gamification-crowdin/i18n/locale.portlet.CrowdinWebHookManagement";

/// Portal environment the connector runs against.
///
/// The original webapp reads these values from an ambient configuration
/// object; here they are injected explicitly at client construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalConfig {
    /// Portal servlet context, e.g. `/portal`.
    pub context: String,

    /// REST path prefix under the portal context, e.g. `/rest`.
    pub rest_prefix: String,

    /// Active UI language, used to pick the localized resource bundle.
    pub language: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            context: "/portal".to_owned(),
            rest_prefix: "/rest".to_owned(),
            language: "en".to_owned(),
        }
    }
}

impl PortalConfig {
    /// Base path of the hooks REST endpoint, always absolute.
    pub fn hooks_path(&self) -> String {
        format!(
            "{}/{}/{HOOKS_PATH}",
            self.context.trim_end_matches('/'),
            self.rest_prefix.trim_matches('/'),
        )
    }

    /// Path of the localized resource bundle for the configured language.
    pub fn i18n_path(&self) -> String {
        format!(
            "{}/{I18N_PATH}?lang={}",
            self.context.trim_end_matches('/'),
            self.language,
        )
    }
}
