//! Blocking HTTP transport used by the backend worker thread.

use std::time::Duration;

/// Status code and raw body of a reply. Non-2xx replies are not errors at
/// this layer; the protocol codec decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Transport seam. The worker owns one boxed client for its whole life.
pub trait HttpClient: Send + 'static {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;

    /// POSTs `body` with a JSON content type. `None` sends an empty body.
    fn post_json(&self, url: &str, body: Option<Vec<u8>>) -> Result<HttpResponse, HttpError>;
}

/// `reqwest` blocking client with a cookie store, so the backend session
/// survives across requests.
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(HttpError::Build)?;
        Ok(Self { client })
    }

    fn finish(
        url: &str,
        result: reqwest::Result<reqwest::blocking::Response>,
    ) -> Result<HttpResponse, HttpError> {
        let into_error = |source| HttpError::Request {
            url: url.to_string(),
            source,
        };
        let response = result.map_err(into_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(into_error)?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        Self::finish(url, self.client.get(url).send())
    }

    fn post_json(&self, url: &str, body: Option<Vec<u8>>) -> Result<HttpResponse, HttpError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(body),
            None => request,
        };
        Self::finish(url, request.send())
    }
}

/// Stand-in used when no real client could be built. Every call fails.
pub struct OfflineHttpClient {
    reason: String,
}

impl OfflineHttpClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl HttpClient for OfflineHttpClient {
    fn get(&self, _url: &str) -> Result<HttpResponse, HttpError> {
        Err(HttpError::Unavailable(self.reason.clone()))
    }

    fn post_json(&self, _url: &str, _body: Option<Vec<u8>>) -> Result<HttpResponse, HttpError> {
        Err(HttpError::Unavailable(self.reason.clone()))
    }
}

/// Joins a base URL and an absolute API path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("http://127.0.0.1:5000/", "/api/status"),
            "http://127.0.0.1:5000/api/status"
        );
        assert_eq!(
            join_url("http://host", "api/guess"),
            "http://host/api/guess"
        );
    }

    #[test]
    fn offline_client_always_fails() {
        let client = OfflineHttpClient::new("no tls backend");
        assert!(matches!(
            client.get("http://host"),
            Err(HttpError::Unavailable(reason)) if reason == "no tls backend"
        ));
    }
}
