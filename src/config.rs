//! # Model configuration.
//!
//! Provides [`ModelConfig`], the settings shared by the model and its default
//! HTTP transport.
//!
//! ## Field semantics
//! - `base_url`: page location the relative endpoint is resolved against
//! - `endpoint`: relative path of the update handler (`"update"`)
//! - `token_field`: body field that carries the authentication token
//!
//! There is no timeout field: a save waits for its reply.

use reqwest::Url;

use crate::error::TransportError;

/// Settings for saving parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Base the update endpoint is joined onto. Keep the trailing slash when
    /// the endpoint should sit *under* the base path.
    pub base_url: String,

    /// Relative path of the update handler.
    pub endpoint: String,

    /// Name of the body field carrying the authentication token.
    pub token_field: String,
}

impl ModelConfig {
    /// Creates a configuration for the given base, with default endpoint and field.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolves the update endpoint against the base URL.
    pub fn update_url(&self) -> Result<Url, TransportError> {
        let base = Url::parse(&self.base_url).map_err(|e| TransportError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        base.join(&self.endpoint)
            .map_err(|e| TransportError::InvalidUrl {
                url: format!("{}{}", self.base_url, self.endpoint),
                reason: e.to_string(),
            })
    }
}

impl Default for ModelConfig {
    /// Default configuration:
    ///
    /// - `base_url = "http://localhost:4433/"`
    /// - `endpoint = "update"`
    /// - `token_field = "csrf_blob"`
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4433/".to_string(),
            endpoint: "update".to_string(),
            token_field: "csrf_blob".to_string(),
        }
    }
}
