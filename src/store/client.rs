//! HTTP client for realtime database REST requests.
//!
//! Every location is addressed as `<base_url>/<path>.json`, optionally
//! authenticated with an `auth` query parameter.

use super::StoreError;
use reqwest::{header, Method, Response};
use serde_json::Value;

/// Makes requests against one database and checks response status.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) auth_token: Option<String>,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional token.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created, which only happens for
    /// invalid builder configuration.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_token: auth_token.map(str::to_owned),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Return the REST URL for a database path.
    ///
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, path)
        }
    }

    /// Make request with optional JSON body and return the successful
    /// response or an error carrying the status and body text.
    ///
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, StoreError> {
        let mut request = self.http_client.request(method, self.url(path));
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::check(request.send().await?).await
    }

    /// Open the event stream for a path.
    ///
    pub async fn stream(&self, path: &str) -> Result<Response, StoreError> {
        let mut request = self
            .http_client
            .get(self.url(path))
            .header(header::ACCEPT, "text/event-stream");
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }
        Self::check(request.send().await?).await
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or(text);
        log::error!("Database request failed with status {}: {}", status, message);
        Err(StoreError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}
