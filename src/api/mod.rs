//! Typed operations over the platform API.
//!
//! Every operation validates its input locally, goes through the shared
//! `ApiClient`, applies its session side effects, and signals the reload bus
//! for the resources it changed.

pub mod admin;
pub mod auth;
pub mod courses;
pub mod models;
pub mod profile;
pub mod projects;

pub use models::*;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::PlatformError;
use crate::reload::{ReloadBus, Resource};
use crate::session::SessionStore;
use crate::types::HttpMethod;

pub type PlatformResult<T> = Result<T, PlatformError>;

#[derive(Debug, Clone)]
pub struct Platform {
    client: ApiClient,
    reload: Arc<ReloadBus>,
}

impl Platform {
    pub fn new(client: ApiClient, reload: Arc<ReloadBus>) -> Self {
        Self { client, reload }
    }

    /// File-backed session and reqwest transport, both from `config`
    pub fn from_config(config: &ClientConfig) -> Self {
        let session = Arc::new(SessionStore::from_config(config));
        let client = ApiClient::from_config(config, session);
        Self::new(client, Arc::new(ReloadBus::new()))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    pub fn reload(&self) -> &Arc<ReloadBus> {
        &self.reload
    }

    pub(crate) async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> PlatformResult<Value> {
        Ok(self.client.request(method, path, body).await?)
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> PlatformResult<T> {
        Ok(self.client.request_as(HttpMethod::Get, path, None).await?)
    }

    pub(crate) async fn send_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &Value,
    ) -> PlatformResult<T> {
        Ok(self.client.request_as(method, path, Some(body)).await?)
    }

    pub(crate) fn changed(&self, resources: &[Resource]) {
        self.reload.signal_many(resources);
    }
}

/// Percent-encode one path segment
pub(crate) fn segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `?key=value` with the value form-encoded
pub(crate) fn query(key: &str, value: &str) -> String {
    let encoded: String = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("?{}", encoded)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::tests::StubTransport;

    pub(crate) fn platform(transport: Arc<StubTransport>) -> Platform {
        let client = ApiClient::with_transport(
            "http://backend.test",
            Arc::new(SessionStore::in_memory()),
            transport,
        );
        Platform::new(client, Arc::new(ReloadBus::new()))
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(segment("course admin"), "course%20admin");
        assert_eq!(segment("COMP1511"), "COMP1511");
        assert_eq!(segment("a/b"), "a%2Fb");
    }

    #[test]
    fn query_string() {
        assert_eq!(query("zID", "z1234567"), "?zID=z1234567");
        assert_eq!(query("zID", "a b"), "?zID=a+b");
    }
}
