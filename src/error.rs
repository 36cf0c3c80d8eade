use thiserror::Error;

/// Failure of an outbound metadata read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} did not return json: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Usage(String),
}
