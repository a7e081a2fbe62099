use serde::{Deserialize, Serialize};

/// Plain-data descriptor shown in the host platform's admin UI.
///
/// `description` and `action_label` are localization keys resolved by the
/// host once the plugin's resource bundle is loaded.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDescriptor {
    pub id: String,
    pub name: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub action_label: String,
    pub rank: u32,
}
