//! Blocking JSON client shared by the REST backends.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Endpoint;
use crate::error::{HarnessError, Result};

/// JSON client bound to one component endpoint.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    component: &'static str,
    base_url: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl RestClient {
    /// Build a client for `endpoint`, labelling errors with `component`.
    pub fn new(component: &'static str, endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &endpoint.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                HarnessError::ConfigValidationError {
                    message: format!("Invalid header name '{}' for {}: {}", name, component, e),
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|e| HarnessError::ConfigValidationError {
                    message: format!("Invalid header value for {}: {}", component, e),
                })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(concat!("onaptests/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        let credentials = match (&endpoint.username, &endpoint.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            component,
            base_url: endpoint.url.trim_end_matches('/').to_string(),
            credentials,
            timeout,
        })
    }

    /// Component label used in errors.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `path`, with `query` pairs encoded.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| anyhow::anyhow!("invalid URL for {}: {}", self.component, e))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {} {}", self.component, method, url);
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }

    fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let message = response.text().unwrap_or_default();
        Err(HarnessError::Api {
            component: self.component.to_string(),
            status: status.as_u16(),
            url,
            message,
        })
    }

    /// GET and decode a JSON body.
    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path, query)?;
        Ok(self.send(self.request(Method::GET, url))?.json()?)
    }

    /// GET and decode a JSON body, mapping 404 to `None`.
    pub fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        match self.get(path, query) {
            Ok(value) => Ok(Some(value)),
            Err(HarnessError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Send `body` as JSON and decode the JSON response.
    pub fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path, &[])?;
        Ok(self.send(self.request(method, url).json(body))?.json()?)
    }

    /// Send `body` as JSON, ignoring the response body.
    pub fn send_json_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.url(path, &[])?;
        self.send(self.request(method, url).json(body))?;
        Ok(())
    }

    /// Send raw bytes.
    pub fn send_bytes(&self, method: Method, path: &str, bytes: Vec<u8>) -> Result<()> {
        let url = self.url(path, &[])?;
        self.send(
            self.request(method, url)
                .header("Content-Type", "application/octet-stream")
                .body(bytes),
        )?;
        Ok(())
    }

    /// DELETE without body.
    pub fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        let url = self.url(path, query)?;
        self.send(self.request(Method::DELETE, url))?;
        Ok(())
    }
}
