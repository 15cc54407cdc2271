// API client module: a small blocking HTTP client for the Cacoo REST API.
// Every call is a single round trip; status codes are left to the caller.

use crate::config::Config;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failures that abort a command.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid path segment '{0}'")]
    InvalidPathSegment(String),

    #[error("request body is not a JSON object")]
    InvalidBody(#[source] serde_json::Error),

    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

/// Holds a reqwest blocking client and the loaded credentials.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(ApiClient { client, config })
    }

    /// URL for a resource path, without the API key.
    ///
    /// Each element of `path` becomes exactly one percent-encoded segment, so
    /// an id containing `/` cannot reach another endpoint. The last segment
    /// gets the `.json` suffix: `["diagrams", "abc", "delete"]` gives
    /// `<endpoint>/diagrams/abc/delete.json`.
    pub fn resource_url(&self, path: &[&str]) -> Result<Url, ApiError> {
        let endpoint = self.config.endpoint();
        let mut url = Url::parse(endpoint)
            .map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
            segments.pop_if_empty();
            for (i, segment) in path.iter().enumerate() {
                if segment.is_empty() || *segment == "." || *segment == ".." {
                    return Err(ApiError::InvalidPathSegment(segment.to_string()));
                }
                if i + 1 == path.len() {
                    segments.push(&format!("{}.json", segment));
                } else {
                    segments.push(segment);
                }
            }
        }
        Ok(url)
    }

    /// Send one request. A body switches the method from GET to POST; the
    /// body must decode as a JSON object and is re-encoded before sending.
    pub fn request(&self, path: &[&str], body: Option<&str>) -> Result<ApiResponse, ApiError> {
        let url = self.resource_url(path)?;
        let payload = body.map(encode_body).transpose()?;
        let method = if payload.is_some() {
            Method::POST
        } else {
            Method::GET
        };
        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .client
            .request(method, url.clone())
            .query(&[("apiKey", self.config.api_key())]);
        if let Some(payload) = payload {
            req = req.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let res = req.send().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source: source.without_url(),
        })?;
        let status = res.status();
        let body = res.text().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source: source.without_url(),
        })?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "received response");
        Ok(ApiResponse { status, body })
    }
}

fn encode_body(body: &str) -> Result<String, ApiError> {
    let raw: Map<String, Value> = serde_json::from_str(body).map_err(ApiError::InvalidBody)?;
    serde_json::to_string(&raw).map_err(ApiError::InvalidBody)
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body into a typed record.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Decode)
    }

    /// Decode the body into an untyped tree for path lookups.
    pub fn json_value(&self) -> Result<Value, ApiError> {
        self.json()
    }
}
