pub use types::ConnectorDescriptor;
use {
    crate::config::PortalConfig,
    reqwest::{IntoUrl, Url},
    std::{fmt, future::Future, pin::Pin},
    thiserror::Error as ThisError,
    tracing::debug,
};

pub mod types;

/// Extension point the host platform exposes for engagement connectors.
pub const CONNECTORS_EXTENSION_POINT: &str = "engagementCenterConnectors";
pub const CONNECTOR_PLUGIN_ID: &str = "connector-extensions";

const CONNECTOR_ID: &str = "crowdin";
const CONNECTOR_TITLE: &str = "Crowdin";
const CONNECTOR_IMAGE: &str = "/gamification-crowdin/images/crowdin.png";
const CONNECTOR_DESCRIPTION_KEY: &str = "crowdinConnector.admin.label.description";
const CONNECTOR_ACTION_LABEL_KEY: &str = "crowdinConnector.action.form.label";
const CONNECTOR_RANK: u32 = 40;

#[derive(ThisError, Debug)]
pub enum ConnectorError {
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("invalid response: {0}")]
    Response(String),

    #[error("building URL: {0}")]
    UrlBuild(url::ParseError),

    #[error("BaseUrlIntoUrl: {0}")]
    BaseUrlIntoUrl(reqwest::Error),

    #[error("building client: {0}")]
    BuildClient(reqwest::Error),
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

pub type InitFuture = Pin<Box<dyn Future<Output = ConnectorResult<()>> + Send>>;

/// Connector descriptor plus its async initialization hook.
///
/// The host awaits the hook before activating the connector UI.
pub struct ConnectorPlugin {
    pub descriptor: ConnectorDescriptor,
    init: Box<dyn Fn() -> InitFuture + Send + Sync>,
}

impl ConnectorPlugin {
    pub fn new(
        descriptor: ConnectorDescriptor,
        init: impl Fn() -> InitFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            descriptor,
            init: Box::new(init),
        }
    }

    pub fn init(&self) -> InitFuture {
        (self.init)()
    }
}

impl fmt::Debug for ConnectorPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorPlugin")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Host-provided registry of UI extensions. The crate only defines the seam.
pub trait ExtensionRegistry: Send + Sync {
    fn register(&self, extension_point: &str, plugin_id: &str, plugin: ConnectorPlugin);
}

/// Builds the Crowdin connector plugin.
///
/// The init hook loads the localized resource bundle for the portal's
/// active language and resolves once it is fetched.
pub fn crowdin_plugin(
    base_url: impl IntoUrl,
    portal: &PortalConfig,
) -> ConnectorResult<ConnectorPlugin> {
    let base_url = base_url.into_url().map_err(ConnectorError::BaseUrlIntoUrl)?;
    let bundle_url = base_url
        .join(&portal.i18n_path())
        .map_err(ConnectorError::UrlBuild)?;
    let http_client = reqwest::Client::builder()
        .build()
        .map_err(ConnectorError::BuildClient)?;

    let descriptor = ConnectorDescriptor {
        id: CONNECTOR_ID.to_owned(),
        name: CONNECTOR_ID.to_owned(),
        image: CONNECTOR_IMAGE.to_owned(),
        title: CONNECTOR_TITLE.to_owned(),
        description: CONNECTOR_DESCRIPTION_KEY.to_owned(),
        action_label: CONNECTOR_ACTION_LABEL_KEY.to_owned(),
        rank: CONNECTOR_RANK,
    };

    Ok(ConnectorPlugin::new(descriptor, move || {
        load_resource_bundle(http_client.clone(), bundle_url.clone())
    }))
}

/// Builds the Crowdin plugin and registers it with the host registry.
pub fn register(
    registry: &dyn ExtensionRegistry,
    base_url: impl IntoUrl,
    portal: &PortalConfig,
) -> ConnectorResult<()> {
    let plugin = crowdin_plugin(base_url, portal)?;
    registry.register(CONNECTORS_EXTENSION_POINT, CONNECTOR_PLUGIN_ID, plugin);
    Ok(())
}

fn load_resource_bundle(http_client: reqwest::Client, url: Url) -> InitFuture {
    Box::pin(async move {
        debug!(%url, "loading connector resource bundle");

        let resp = http_client
            .get(url)
            .send()
            .await
            .map_err(ConnectorError::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ConnectorError::Response(status.to_string()))
        }
    })
}
