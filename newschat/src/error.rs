use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Non-success HTTP status from the LLM or news endpoint
    #[error("upstream API error {status}: {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },

    /// JSON parse or shape failure when deserializing an upstream body,
    /// including the nested model-generated payload
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(what: &str, err: impl std::fmt::Display) -> Self {
        Error::MalformedResponse(format!("{}: {}", what, err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
