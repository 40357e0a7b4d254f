//! REST implementation of the remote document store.
//!
//! Speaks the RTDB-style REST surface: every node is addressable at
//! `<base>/<path>.json`; `POST` appends a child and answers
//! `{"name": "<key>"}`; `GET` answers the subtree JSON or `null`;
//! `PUT` overwrites a node; `DELETE` removes it.

use crate::error::{RemoteError, RemoteResult};
use crate::store::RemoteStore;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tether_types::{RemoteKey, normalize_join};
use tracing::debug;

/// Configuration for the REST remote store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the store (e.g. `https://project.example-db.app`).
    pub base_url: String,
    /// Optional static auth token, sent as a query parameter.
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_token: None,
            timeout_secs: 60,
        }
    }
}

impl RemoteConfig {
    /// Creates a config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the static auth token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    name: String,
}

/// REST remote store client.
pub struct RestRemote {
    config: RemoteConfig,
    client: Client,
}

impl RestRemote {
    /// Creates a new REST client for the configured store.
    pub fn new(config: RemoteConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");
        Self { config, client }
    }

    fn node_url(&self, path: &str) -> String {
        let mut url = format!(
            "{}/{}.json",
            self.config.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        );
        if let Some(token) = &self.config.auth_token {
            url.push_str("?auth=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }

    fn check(response: reqwest::blocking::Response) -> RemoteResult<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(RemoteError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

impl RemoteStore for RestRemote {
    fn root_url(&self) -> &str {
        &self.config.base_url
    }

    fn post(&self, path: &str, data: &Value) -> RemoteResult<RemoteKey> {
        let url = self.node_url(path);
        debug!("POST {}", path);
        let response = self
            .client
            .post(url)
            .json(data)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let body: PostResponse = Self::check(response)?
            .json()
            .map_err(|e| RemoteError::Protocol(format!("bad post response: {e}")))?;
        Ok(RemoteKey::new(body.name))
    }

    fn get(&self, path: &str, subpath: Option<&str>) -> RemoteResult<Option<Value>> {
        let full = match subpath {
            Some(sub) => normalize_join(path, sub),
            None => path.to_string(),
        };
        let url = self.node_url(&full);
        debug!("GET {}", full);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let value: Value = Self::check(response)?
            .json()
            .map_err(|e| RemoteError::Protocol(format!("bad get response: {e}")))?;
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    fn put(&self, path: &str, name: &str, data: &Value) -> RemoteResult<()> {
        let url = self.node_url(&normalize_join(path, name));
        debug!("PUT {}/{}", path, name);
        let response = self
            .client
            .put(url)
            .json(data)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Self::check(response)?;
        Ok(())
    }

    fn delete(&self, path: &str, key: Option<&str>) -> RemoteResult<()> {
        let full = match key {
            Some(k) => normalize_join(path, k),
            None => path.to_string(),
        };
        let url = self.node_url(&full);
        debug!("DELETE {}", full);
        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Self::check(response)?;
        Ok(())
    }
}
