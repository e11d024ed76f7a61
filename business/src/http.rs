//! HTTP client wrapper for the admin API.
//!
//! Every network call made by the console goes through [`Client::request`]:
//!
//! - the path is server-relative and joined to the configured base URL
//! - a default `content-type: application/json` header is sent; caller headers win
//! - the session cookie jar is attached to every call, so the cookie set by
//!   `/auth/login` travels with later requests
//! - the body is parsed as JSON regardless of status; an unparsable or empty
//!   body becomes `None` instead of an error
//! - a non-2xx status becomes a [`RequestError`] carrying the server's message,
//!   the status and the raw body
//!
//! There are no retries and no timeout. Callers own all error presentation.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Url;
use reqwest::cookie::{CookieStore as _, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::listing::{ListResult, Listing};

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Patch,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A simplified HTTP response that contains only owned data.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, treating empty or malformed bodies as absent.
    pub fn json_lenient(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Error produced by [`Client::request`].
///
/// Transport failures and HTTP error statuses share this type so callers can
/// treat them identically. `status` and `body` are only set when the server
/// answered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<Value>,
}

impl RequestError {
    /// A failure before any response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// A non-2xx response.
    ///
    /// The message is the body's `error` field, else its `message` field,
    /// else `HTTP <status>`.
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| server_message(b, "error").or_else(|| server_message(b, "message")))
            .map(str::to_owned)
            .unwrap_or_else(|| format!("HTTP {status}"));

        Self {
            message,
            status: Some(status),
            body,
        }
    }

    /// A successful response whose body did not have the expected shape.
    pub fn decode(status: u16, body: Option<Value>, detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Unexpected response: {detail}"),
            status: Some(status),
            body,
        }
    }
}

fn server_message<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, RequestError>;

/// Options bag for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::Post)
    }

    pub fn patch() -> Self {
        Self::with_method(Method::Patch)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Add a header to the request. Names are case-insensitive.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Default headers overlaid with the caller's headers.
    fn merged_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::from([(
            "content-type".to_owned(),
            "application/json".to_owned(),
        )]);
        headers.extend(self.headers.clone());
        headers
    }
}

/// Admin API client.
///
/// Cloning is cheap: clones share the connection pool and the cookie jar.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl Client {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> HttpResult<Self> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| RequestError::transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http,
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server-relative path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn origin(&self) -> Option<Url> {
        Url::parse(&self.url("/")).ok()
    }

    /// The `Cookie` header value the client would send, if any.
    pub fn session_cookies(&self) -> Option<String> {
        let origin = self.origin()?;
        self.jar
            .cookies(&origin)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    /// Seed the cookie jar from a previously saved `Cookie` header value.
    pub fn restore_session(&self, cookies: &str) {
        let Some(origin) = self.origin() else {
            log::warn!("cannot restore session: invalid base url {}", self.base_url);
            return;
        };
        for pair in cookies.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &origin);
        }
    }

    /// Forget the session cookies held by this client.
    pub fn clear_session(&self) {
        let Some(origin) = self.origin() else {
            return;
        };
        let names: Vec<String> = self
            .session_cookies()
            .unwrap_or_default()
            .split(';')
            .filter_map(|pair| pair.split_once('=').map(|(name, _)| name.trim().to_owned()))
            .collect();
        for name in names {
            self.jar
                .add_cookie_str(&format!("{name}=; Max-Age=0"), &origin);
        }
    }

    /// Send one request and return the raw response.
    pub async fn send(&self, path: &str, options: RequestOptions) -> HttpResult<Response> {
        let url = self.url(path);
        log::debug!("{:?} {url}", options.method);

        let mut request = self.http.request(options.method.as_reqwest(), &url);
        for (name, value) in options.merged_headers() {
            request = request.header(name, value);
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }

    /// Send one request and return the parsed body (possibly absent).
    pub async fn request(&self, path: &str, options: RequestOptions) -> HttpResult<Option<Value>> {
        let response = self.send(path, options).await?;
        let body = response.json_lenient();

        if !response.is_success() {
            return Err(RequestError::from_status(response.status, body));
        }
        Ok(body)
    }

    /// GET `path` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> HttpResult<T> {
        self.decoded(path, RequestOptions::get()).await
    }

    /// Send `options` to `path` and decode the body as `T`.
    pub async fn decoded<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> HttpResult<T> {
        let response = self.send(path, options).await?;
        let body = response.json_lenient();

        if !response.is_success() {
            return Err(RequestError::from_status(response.status, body));
        }

        let value = body.clone().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| RequestError::decode(response.status, body, e))
    }

    /// GET a collection, accepting both a bare array and an `{items, total}` envelope.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> HttpResult<Listing<T>> {
        let result: ListResult<T> = self.get_json(path).await?;
        Ok(result.into())
    }
}
