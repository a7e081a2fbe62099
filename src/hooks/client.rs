use {
    crate::{
        config::PortalConfig,
        hooks::{
            error::HooksError,
            types::{
                RemoteProject, RemoteRepository, RepositoryListParams, WebHook, WebHookList,
                WebHookListParams,
            },
        },
    },
    async_trait::async_trait,
    reqwest::{
        header::{self, HeaderValue},
        IntoUrl, Method, StatusCode, Url,
    },
    serde::{de::DeserializeOwned, Deserialize},
    std::{fmt::Debug, time::Duration},
    tracing::debug,
};

const INVALID_COOKIE_ERROR: &str = "invalid session cookie";

const GET_PROJECTS_ERROR: &str = "error getting crowdin projects";
const GET_WEB_HOOKS_ERROR: &str = "error getting crowdin webhooks";
const GET_WEB_HOOK_ERROR: &str = "error getting crowdin webhook";
const GET_REPOSITORIES_ERROR: &str = "error getting crowdin webhook repositories";
const SAVE_WEB_HOOK_ERROR: &str = "error saving crowdin webhook";
const UPDATE_TOKEN_ERROR: &str = "error updating crowdin webhook access token";
const DELETE_WEB_HOOK_ERROR: &str = "error deleting crowdin webhook";
const REPOSITORY_STATUS_ERROR: &str = "error updating crowdin repository status";
const WATCH_SCOPE_STATUS_ERROR: &str = "error updating crowdin watch scope status";
const FORCE_UPDATE_ERROR: &str = "error force updating crowdin webhooks";

pub type HooksResult<T> = Result<T, HooksError>;

/// One method per remote hooks operation.
///
/// Every call is independent and stateless: the client issues a fresh
/// request each time and never caches results.
#[async_trait]
pub trait HooksClient: 'static + Send + Sync + Debug {
    async fn projects(&self, access_token: &str) -> HooksResult<Vec<RemoteProject>>;
    async fn web_hooks(&self, params: WebHookListParams) -> HooksResult<WebHookList>;
    async fn web_hook(&self, id: i64) -> HooksResult<WebHook>;
    async fn repositories(
        &self,
        organization_id: i64,
        params: RepositoryListParams,
    ) -> HooksResult<Vec<RemoteRepository>>;
    async fn create_web_hook(
        &self,
        project: &RemoteProject,
        access_token: &str,
    ) -> HooksResult<()>;
    async fn update_access_token(&self, web_hook_id: i64, access_token: &str) -> HooksResult<()>;
    async fn delete_web_hook(&self, id: i64) -> HooksResult<()>;
    async fn set_repository_status(
        &self,
        repository_id: i64,
        organization_id: i64,
        enabled: bool,
    ) -> HooksResult<()>;
    async fn set_watch_scope_status(&self, organization_id: i64, enabled: bool)
        -> HooksResult<()>;
    async fn force_update_web_hooks(&self) -> HooksResult<()>;
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection keep-alive timeout after being returned to the pool.
    ///
    /// `None` disables the timeout. Default is 90 seconds.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum number of idle connections to keep alive.
    ///
    /// Default is unlimited.
    pub pool_max_idle: usize,

    /// Enables a request timeout.
    ///
    /// The timeout is applied for both the connect phase of a `Client`, and
    /// for fully receiving response body.
    ///
    /// Default is no timeout.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        // These defaults are taken from `reqwest` default config.
        Self {
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle: usize::MAX,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HooksHttpClient {
    base_url: Url,
    portal: PortalConfig,
    http_client: reqwest::Client,
}

impl HooksHttpClient {
    pub fn new(base_url: impl IntoUrl, portal: PortalConfig) -> HooksResult<Self> {
        Self::with_config(base_url, portal, None, Default::default())
    }

    /// Builds a client that forwards `session_cookie` on every request,
    /// matching the browser behavior of always including portal session
    /// credentials.
    pub fn with_config(
        base_url: impl IntoUrl,
        portal: PortalConfig,
        session_cookie: Option<&str>,
        config: HttpClientConfig,
    ) -> HooksResult<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let mut cookie_value = HeaderValue::from_str(cookie)
                .map_err(|_| HooksError::Config(INVALID_COOKIE_ERROR))?;

            // Make sure we're not leaking session credentials in debug output.
            cookie_value.set_sensitive(true);
            headers.insert(header::COOKIE, cookie_value);
        }

        let mut http_client = reqwest::Client::builder()
            .default_headers(headers)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle);

        if let Some(timeout) = config.timeout {
            http_client = http_client.connect_timeout(timeout).timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into_url().map_err(HooksError::BaseUrlIntoUrl)?,
            portal,
            http_client: http_client.build().map_err(HooksError::BuildClient)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        op_error: &'static str,
    ) -> HooksResult<T> {
        debug!(%url, "GET");

        let resp = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(HooksError::Transport)?;

        parse_http_response(resp, op_error).await
    }

    /// Mutations encode their parameters as a form-url-encoded body, never
    /// as a query string.
    async fn submit_form(
        &self,
        method: Method,
        url: Url,
        form: &[(&str, String)],
        op_error: &'static str,
    ) -> HooksResult<()> {
        debug!(%method, %url, "submit form");

        let resp = self
            .http_client
            .request(method, url)
            .form(form)
            .send()
            .await
            .map_err(HooksError::Transport)?;

        check_http_response(resp, op_error).await
    }

    async fn submit(&self, method: Method, url: Url, op_error: &'static str) -> HooksResult<()> {
        debug!(%method, %url, "submit");

        let resp = self
            .http_client
            .request(method, url)
            .send()
            .await
            .map_err(HooksError::Transport)?;

        check_http_response(resp, op_error).await
    }
}

#[async_trait]
impl HooksClient for HooksHttpClient {
    async fn projects(&self, access_token: &str) -> HooksResult<Vec<RemoteProject>> {
        let url = build_projects_url(&self.base_url, &self.portal, access_token)
            .map_err(HooksError::UrlBuild)?;

        self.get_json(url, GET_PROJECTS_ERROR).await
    }

    async fn web_hooks(&self, params: WebHookListParams) -> HooksResult<WebHookList> {
        let url = build_web_hooks_url(&self.base_url, &self.portal, &params)
            .map_err(HooksError::UrlBuild)?;

        self.get_json(url, GET_WEB_HOOKS_ERROR).await
    }

    async fn web_hook(&self, id: i64) -> HooksResult<WebHook> {
        let url =
            build_hooks_url(&self.base_url, &self.portal, &id.to_string())
                .map_err(HooksError::UrlBuild)?;

        self.get_json(url, GET_WEB_HOOK_ERROR).await
    }

    async fn repositories(
        &self,
        organization_id: i64,
        params: RepositoryListParams,
    ) -> HooksResult<Vec<RemoteRepository>> {
        let url = build_repositories_url(&self.base_url, &self.portal, organization_id, &params)
            .map_err(HooksError::UrlBuild)?;

        self.get_json(url, GET_REPOSITORIES_ERROR).await
    }

    async fn create_web_hook(
        &self,
        project: &RemoteProject,
        access_token: &str,
    ) -> HooksResult<()> {
        let url = build_hooks_url(&self.base_url, &self.portal, "").map_err(HooksError::UrlBuild)?;
        let form = [
            ("projectId", project.id.clone()),
            ("projectName", project.name.clone()),
            ("projectLogo", project.logo.clone().unwrap_or_default()),
            ("accessToken", access_token.to_owned()),
        ];

        self.submit_form(Method::POST, url, &form, SAVE_WEB_HOOK_ERROR)
            .await
    }

    async fn update_access_token(&self, web_hook_id: i64, access_token: &str) -> HooksResult<()> {
        let url = build_hooks_url(&self.base_url, &self.portal, "").map_err(HooksError::UrlBuild)?;
        let form = [
            ("webHookId", web_hook_id.to_string()),
            ("accessToken", access_token.to_owned()),
        ];

        self.submit_form(Method::PATCH, url, &form, UPDATE_TOKEN_ERROR)
            .await
    }

    async fn delete_web_hook(&self, id: i64) -> HooksResult<()> {
        let url =
            build_hooks_url(&self.base_url, &self.portal, &id.to_string())
                .map_err(HooksError::UrlBuild)?;

        self.submit(Method::DELETE, url, DELETE_WEB_HOOK_ERROR).await
    }

    async fn set_repository_status(
        &self,
        repository_id: i64,
        organization_id: i64,
        enabled: bool,
    ) -> HooksResult<()> {
        let url = build_hooks_url(&self.base_url, &self.portal, "repo/status")
            .map_err(HooksError::UrlBuild)?;
        let form = [
            ("repositoryId", repository_id.to_string()),
            ("organizationId", organization_id.to_string()),
            ("enabled", enabled.to_string()),
        ];

        self.submit_form(Method::POST, url, &form, REPOSITORY_STATUS_ERROR)
            .await
    }

    async fn set_watch_scope_status(
        &self,
        organization_id: i64,
        enabled: bool,
    ) -> HooksResult<()> {
        let url = build_hooks_url(&self.base_url, &self.portal, "watchScope/status")
            .map_err(HooksError::UrlBuild)?;
        let form = [
            ("organizationId", organization_id.to_string()),
            ("enabled", enabled.to_string()),
        ];

        self.submit_form(Method::POST, url, &form, WATCH_SCOPE_STATUS_ERROR)
            .await
    }

    async fn force_update_web_hooks(&self) -> HooksResult<()> {
        let url = build_hooks_url(&self.base_url, &self.portal, "forceUpdate")
            .map_err(HooksError::UrlBuild)?;

        self.submit(Method::PATCH, url, FORCE_UPDATE_ERROR).await
    }
}

fn build_hooks_url(
    base_url: &Url,
    portal: &PortalConfig,
    suffix: &str,
) -> Result<Url, url::ParseError> {
    let path = if suffix.is_empty() {
        portal.hooks_path()
    } else {
        format!("{}/{suffix}", portal.hooks_path())
    };
    base_url.join(&path)
}

fn build_projects_url(
    base_url: &Url,
    portal: &PortalConfig,
    access_token: &str,
) -> Result<Url, url::ParseError> {
    let mut url = build_hooks_url(base_url, portal, "get-projects")?;
    url.query_pairs_mut().append_pair("accessToken", access_token);
    Ok(url)
}

fn build_web_hooks_url(
    base_url: &Url,
    portal: &PortalConfig,
    params: &WebHookListParams,
) -> Result<Url, url::ParseError> {
    let mut url = build_hooks_url(base_url, portal, "")?;
    url.query_pairs_mut()
        .append_pair("offset", &params.offset.to_string())
        .append_pair("limit", &params.limit.to_string())
        .append_pair("returnSize", "true");
    if params.include_languages {
        url.query_pairs_mut().append_pair("includeLanguages", "true");
    }
    if params.force_update {
        url.query_pairs_mut().append_pair("forceUpdate", "true");
    }
    Ok(url)
}

fn build_repositories_url(
    base_url: &Url,
    portal: &PortalConfig,
    organization_id: i64,
    params: &RepositoryListParams,
) -> Result<Url, url::ParseError> {
    let mut url = build_hooks_url(base_url, portal, &format!("{organization_id}/repos"))?;
    url.query_pairs_mut()
        .append_pair("page", &params.page.to_string())
        .append_pair("perPage", &params.per_page.to_string())
        .append_pair("keyword", &params.keyword);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// The server reports 401/404 with a JSON `{ "message": ... }` payload, but
/// some filters in front of it answer with plain text.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => payload.message,
        Err(_) => body.to_owned(),
    }
}

async fn response_error(resp: reqwest::Response, op_error: &'static str) -> HooksError {
    match resp.status() {
        StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => match resp.text().await {
            Ok(body) => HooksError::Denied(extract_message(&body)),
            Err(err) => HooksError::Transport(err),
        },
        _ => HooksError::Response(op_error),
    }
}

async fn parse_http_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    op_error: &'static str,
) -> HooksResult<T> {
    if resp.status().is_success() {
        resp.json().await.map_err(HooksError::ResponseJsonParse)
    } else {
        Err(response_error(resp, op_error).await)
    }
}

/// Success on a mutation resolves without reading the body.
async fn check_http_response(resp: reqwest::Response, op_error: &'static str) -> HooksResult<()> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(response_error(resp, op_error).await)
    }
}
