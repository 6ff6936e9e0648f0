//! Pluggable request transports.
//!
//! [`FetchClient`](crate::FetchClient) builds requests; a [`Transport`]
//! puts them on the wire. [`HttpTransport`] uses `reqwest` natively and
//! Spin's outbound HTTP on `wasm32`. [`CannedTransport`] replays queued
//! responses and records what was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::{FetchError, RequestBuilder, Response};

/// Sends a finished request and returns the raw response.
///
/// Non-2xx responses are returned as `Ok`; status handling belongs to the
/// caller.
pub trait Transport {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request)
    }
}

/// Default request timeout for the native transport.
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Real network transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build HTTP client, using defaults");
                reqwest::blocking::Client::new()
            });
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for HttpTransport {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.full_url();
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let mut builder = self.client.request(method, url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = request.method.as_str(), url = %url, "sending request");
        let response = builder.send().map_err(|e| map_reqwest_error(e, &url))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .map_err(|e| map_reqwest_error(e, &url))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_reqwest_error(e: reqwest::Error, url: &str) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::InvalidUrl(url.to_string())
    } else {
        FetchError::RequestError(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl HttpTransport {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(target_arch = "wasm32")]
impl Transport for HttpTransport {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use crate::Method;
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
            Method::Head => SpinMethod::Head,
            Method::Options => SpinMethod::Options,
        };

        let mut builder = Request::builder();
        builder.method(method);
        builder.uri(request.full_url());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder.body(body);
        }

        let response: spin_sdk::http::Response =
            spin_sdk::http::run(spin_sdk::http::send(builder.build()))
                .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();

        Ok(Response::new(status, headers, response.into_body()))
    }
}

/// Replays queued responses in order and records every request.
///
/// Once the queue is empty each further request fails with
/// [`FetchError::RequestError`].
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: Mutex<VecDeque<Result<Response, FetchError>>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(self, response: Response) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a JSON response.
    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(Response::from_json(status, &body))
    }

    /// Queue a transport failure.
    pub fn fail(self, error: FetchError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, outcome: Result<Response, FetchError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(outcome);
        }
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Transport for CannedTransport {
    fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        if let Ok(mut sent) = self.requests.lock() {
            sent.push(request);
        }
        self.responses
            .lock()
            .map_err(|_| FetchError::RequestError("transport lock poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestError("no canned response".to_string())))
    }
}
