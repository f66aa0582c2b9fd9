//! HTTP transport abstraction.
//!
//! The client talks to the network through the [`Transport`] trait so tests
//! can substitute a canned-response transport and assert on the exact
//! requests issued.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::error::Result;

/// An outgoing request, fully built and (if applicable) signed.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Replay transport for tests: hands out canned responses in order and
/// records every request it was asked to execute.
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    pub struct MockTransport {
        responses: Mutex<Vec<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(status: u16, body: impl Into<Bytes>) -> Self {
            let transport = Self::new();
            transport.push_response(status, body);
            transport
        }

        pub fn push_response(&self, status: u16, body: impl Into<Bytes>) {
            let response = HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into(),
            };
            self.responses.lock().unwrap().push(response);
        }

        /// Requests executed so far, in order.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(crate::error::Error::InternalError(
                    "mock transport has no response queued".to_string(),
                ));
            }
            Ok(responses.remove(0))
        }
    }
}
