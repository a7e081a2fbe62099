use serde::{Deserialize, Serialize};

/// Crowdin project as reported by the server, read-only.
///
/// Identifiers are opaque strings issued by the remote translation service.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Webhook registration linking a Crowdin project to the connector.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebHook {
    pub id: i64,
    #[serde(default)]
    pub webhook_id: Option<i64>,
    pub project_id: i64,
    pub project_name: String,
    #[serde(default)]
    pub project_logo: Option<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    pub enabled: bool,
    #[serde(default)]
    pub watched_by: Option<String>,
    #[serde(default)]
    pub watched_date: Option<String>,
    #[serde(default)]
    pub updated_date: Option<String>,
    #[serde(default)]
    pub watch_scope_limited: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebHookList {
    pub webhooks: Vec<WebHook>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Repository scoped under a watched organization.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepository {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
}

/// Query parameters for listing webhooks.
///
/// `Default` carries the documented defaults; `include_languages` and
/// `force_update` are only encoded when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebHookListParams {
    pub offset: u32,
    pub limit: u32,
    pub include_languages: bool,
    pub force_update: bool,
}

impl Default for WebHookListParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
            include_languages: false,
            force_update: false,
        }
    }
}

/// Query parameters for listing an organization's repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryListParams {
    pub page: u32,
    pub per_page: u32,
    pub keyword: String,
}

impl Default for RepositoryListParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 25,
            keyword: String::new(),
        }
    }
}
