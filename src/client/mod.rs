//! Request client for the platform API.
//!
//! Attaches the JSON content type and the session's bearer token, sends a
//! single attempt, and turns both transport failures and non-2xx answers into
//! a `RequestError` whose message names the method and path. `call` folds that
//! error into the `{ "error": ... }` body so callers can branch on one shape.

pub mod batch;
mod transport;

pub use batch::fan_out;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::session::SessionStore;
use crate::types::HttpMethod;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Method, headers and serialized body for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self::with_transport(base_url, session, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            session,
            transport,
            log_requests: false,
        }
    }

    pub fn from_config(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self::new(config.api.base_url.clone(), session)
            .with_request_logging(config.api.enable_request_logging)
    }

    /// Log every outgoing request at info level instead of debug
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers and body for a request. The body is serialized whenever one is given.
    pub fn request_options(&self, method: HttpMethod, body: Option<&Value>) -> RequestOptions {
        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())];
        if let Some(token) = self.session.token() {
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {}", token)));
        }
        RequestOptions {
            method,
            headers,
            body: body.filter(|b| !b.is_null()).map(Value::to_string),
        }
    }

    /// Send one request. Success yields the parsed body unchanged.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let options = self.request_options(method, body);
        let request = TransportRequest {
            method,
            url: self.url_for(path),
            headers: options.headers,
            body: options.body,
        };

        if self.log_requests {
            tracing::info!(%method, path, "sending request");
        } else {
            tracing::debug!(%method, path, "sending request");
        }
        let result = self.dispatch(method, path, request).await;
        if let Err(e) = &result {
            tracing::warn!("{}", e);
        }
        result
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        request: TransportRequest,
    ) -> Result<Value, RequestError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|reason| RequestError::Transport {
                method,
                path: path.to_string(),
                reason,
            })?;

        // the body is parsed before the status is looked at
        let body: Value =
            serde_json::from_str(&response.body).map_err(|e| RequestError::InvalidBody {
                method,
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        if !response.is_success() {
            let message = match body.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(other) if !other.is_null() => other.to_string(),
                _ => format!("HTTP {}", response.status),
            };
            return Err(RequestError::Status {
                method,
                path: path.to_string(),
                status: response.status,
                message,
            });
        }

        Ok(body)
    }

    /// Never fails: errors come back as `{ "error": message }`
    pub async fn call(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Value {
        match self.request(method, path, body).await {
            Ok(value) => value,
            Err(e) => e.to_json(),
        }
    }

    /// Like `request`, but gives up with `RequestError::Cancelled` once `token` fires
    pub async fn request_cancellable(
        &self,
        token: &CancellationToken,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(%method, path, "request cancelled");
                Err(RequestError::Cancelled { method, path: path.to_string() })
            }
            result = self.request(method, path, body) => result,
        }
    }

    /// Send a request and decode the success body into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, RequestError> {
        let value = self.request(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| RequestError::Decode {
            method,
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
