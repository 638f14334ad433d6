use std::fmt::Debug;
use std::time::Duration;

use crate::models::Token;
use crate::{error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{RequestBuilder, StatusCode};
use snafu::ResultExt;
use url::Url;

/// Status and raw body of a single exchange with the repository manager
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as text, for error reporting
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A trait for the http transport used to reach the repository manager. Paths are
/// relative to the server's base url. Connection handling, tls, authorization and
/// timeouts all belong to the implementation; this is also the intercept point
/// for unittesting.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GET {base}/{path}?{query}
    async fn get(&self, path: &str, query: Option<&[(&str, &str)]>) -> Result<TransportResponse>;
    /// POST {base}/{path}
    async fn post(&self, path: &str, body: Bytes) -> Result<TransportResponse>;
    /// PUT {base}/{path}
    async fn put(&self, path: &str, body: Bytes) -> Result<TransportResponse>;
    /// DELETE {base}/{path}
    async fn delete(&self, path: &str) -> Result<TransportResponse>;
}

/// Implements a simple transport using reqwest
#[derive(Debug)]
pub struct SimpleTransport {
    client: reqwest::Client,
    base: Url,
    auth: Option<Token>,
}

impl SimpleTransport {
    pub fn new(base: Url, auth: Option<Token>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: Self::normalize(base),
            auth,
        }
    }

    /// Same as [`SimpleTransport::new`] but every request gives up after `timeout`
    pub fn with_timeout(base: Url, auth: Option<Token>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context(error::HttpClientInitSnafu)?;
        Ok(Self {
            client,
            base: Self::normalize(base),
            auth,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    // Without a trailing slash `join` would drop the last segment of a context path
    fn normalize(mut base: Url) -> Url {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .context(error::UrlSnafu)
    }

    pub(crate) fn auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.auth.as_ref() {
            match token {
                Token::Bearer(t) => request.bearer_auth(t),
                Token::Basic { username, password } => request.basic_auth(username, Some(password)),
            }
        } else {
            request
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<TransportResponse> {
        let response = self
            .auth(request)
            .header("Accept", "application/json")
            .send()
            .await
            .context(error::RequestSnafu)?;
        let status = response.status();
        let body = response.bytes().await.context(error::ResponseBodySnafu)?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for SimpleTransport {
    async fn get(&self, path: &str, query: Option<&[(&str, &str)]>) -> Result<TransportResponse> {
        let mut request = self.client.get(self.url(path)?);
        if let Some(query) = query {
            request = request.query(query);
        }
        self.send(request).await
    }

    async fn post(&self, path: &str, body: Bytes) -> Result<TransportResponse> {
        let request = self
            .client
            .post(self.url(path)?)
            .header("Content-Type", "application/json")
            .body(body);
        self.send(request).await
    }

    async fn put(&self, path: &str, body: Bytes) -> Result<TransportResponse> {
        let request = self
            .client
            .put(self.url(path)?)
            .header("Content-Type", "application/json")
            .body(body);
        self.send(request).await
    }

    async fn delete(&self, path: &str) -> Result<TransportResponse> {
        let request = self.client.delete(self.url(path)?);
        self.send(request).await
    }
}
