use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum HooksError {
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("invalid config: {0}")]
    Config(&'static str),

    #[error("json parse error: {0}")]
    ResponseJsonParse(reqwest::Error),

    /// 401/404 rejection carrying the message extracted from the server
    /// payload.
    #[error("{0}")]
    Denied(String),

    /// Any other non-success status; the message is fixed per operation.
    #[error("{0}")]
    Response(&'static str),

    #[error("building URL: {0}")]
    UrlBuild(url::ParseError),

    #[error("BaseUrlIntoUrl: {0}")]
    BaseUrlIntoUrl(reqwest::Error),

    #[error("building client: {0}")]
    BuildClient(reqwest::Error),
}
