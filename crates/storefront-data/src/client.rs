//! Fetch client over reqwest.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;
use url::Url;

use crate::response::Response;
use crate::timeout::TimeoutConfig;
use crate::FetchError;

/// HTTP client for outbound catalog requests.
///
/// Wraps a pooled `reqwest::Client` with timeouts and a JSON `Accept` header,
/// and resolves relative paths against an optional base URL.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl FetchClient {
    /// Start configuring a client.
    pub fn builder() -> FetchClientBuilder {
        FetchClientBuilder::default()
    }

    /// Create a GET request.
    pub fn get(&self, url: &str) -> Result<ClientRequestBuilder, FetchError> {
        let url = self.resolve(url)?;
        Ok(ClientRequestBuilder {
            inner: self.http.get(url.clone()),
            url,
        })
    }

    /// Resolve `url` against the base URL, unless it is already absolute.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(Url::parse(url)?);
        }
        match &self.base_url {
            Some(base) => {
                let joined = format!(
                    "{}/{}",
                    base.as_str().trim_end_matches('/'),
                    url.trim_start_matches('/')
                );
                Ok(Url::parse(&joined)?)
            }
            None => Err(FetchError::InvalidUrl(format!(
                "relative URL '{}' with no base URL",
                url
            ))),
        }
    }
}

/// Builder for [`FetchClient`].
#[derive(Debug, Default)]
pub struct FetchClientBuilder {
    base_url: Option<String>,
    timeouts: TimeoutConfig,
}

impl FetchClientBuilder {
    /// Prepend `base_url` to relative request paths.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn build(self) -> Result<FetchClient, FetchError> {
        let base_url = self.base_url.as_deref().map(Url::parse).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.timeouts.connect)
            .timeout(self.timeouts.total)
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(FetchClient { http, base_url })
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    inner: reqwest::RequestBuilder,
    url: Url,
}

impl ClientRequestBuilder {
    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as a normal [`Response`]; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.url;
        let response = self.inner.send().await?;
        let response = Response::read(response).await?;
        debug!(%url, status = response.status, bytes = response.body.len(), "fetched");
        Ok(response)
    }
}
