use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::params::ParamSet;
use crate::transport::{HttpTransport, Transport};

use super::model::Model;

/// Builder for a [`Model`] with optional transport and configuration.
pub struct ModelBuilder {
    initial: ParamSet,
    auth_token: String,
    save_allowed: bool,
    config: ModelConfig,
    transport: Option<Box<dyn Transport>>,
}

impl ModelBuilder {
    /// Creates a builder over the given initial parameters.
    ///
    /// Defaults: empty token, saving permitted, [`ModelConfig::default`].
    pub fn new(initial: ParamSet) -> Self {
        Self {
            initial,
            auth_token: String::new(),
            save_allowed: true,
            config: ModelConfig::default(),
            transport: None,
        }
    }

    /// Sets the opaque token attached to save requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    /// Sets the advisory "saving permitted" flag.
    pub fn with_save_allowed(mut self, allowed: bool) -> Self {
        self.save_allowed = allowed;
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a custom transport instead of [`HttpTransport`].
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Builds the model.
    ///
    /// Fails if a numeric parameter is not finite. Without a custom transport,
    /// an [`HttpTransport`] is created from the configuration; this fails if
    /// the update URL does not resolve.
    pub fn build(self) -> Result<Model, ModelError> {
        self.initial.validate()?;
        let transport = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&self.config)?),
        };
        Ok(Model::from_parts(
            self.initial,
            self.auth_token,
            self.save_allowed,
            self.config.token_field,
            transport,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParamError, TransportError};
    use crate::transport::{Reply, SaveRequest};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Capture(Rc<RefCell<Option<serde_json::Value>>>);

    #[async_trait(?Send)]
    impl Transport for Capture {
        async fn post(&self, request: &SaveRequest) -> Result<Reply, TransportError> {
            *self.0.borrow_mut() = Some(serde_json::to_value(request).unwrap());
            Ok(Reply::new(200, "OK", ""))
        }
    }

    #[test]
    fn test_defaults_build_http_model() {
        let model = ModelBuilder::new(ParamSet::new().boolean("running", false))
            .build()
            .unwrap();
        assert!(model.save_allowed());
        assert_eq!(model.auth_token(), "");
    }

    #[test]
    fn test_bad_base_url_fails_build() {
        let err = ModelBuilder::new(ParamSet::new())
            .with_config(ModelConfig::with_base_url("no scheme here"))
            .build()
            .unwrap_err();
        assert_eq!(err.as_label(), "transport_invalid_url");
    }

    #[test]
    fn test_non_finite_initial_fails_build() {
        let err = ModelBuilder::new(ParamSet::new().numeric("x", f64::NAN, 1.0, 0))
            .with_transport(Capture(Rc::default()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::Params(ParamError::InvalidInitial { .. })));
        assert_eq!(err.as_label(), "param_invalid_initial");
    }

    #[tokio::test]
    async fn test_token_field_follows_config() {
        let seen = Rc::new(RefCell::new(None));
        let config = ModelConfig {
            token_field: "token".to_string(),
            ..ModelConfig::default()
        };
        let model = Model::builder(ParamSet::new().numeric("x", 1.0, 1.0, 0))
            .with_token("abc")
            .with_save_allowed(false)
            .with_config(config)
            .with_transport(Capture(Rc::clone(&seen)))
            .build()
            .unwrap();

        model.save().await;
        assert_eq!(
            seen.borrow().clone().unwrap(),
            serde_json::json!({"params": {"x": 1.0}, "token": "abc"})
        );
        assert_eq!(model.permission_notice(), Some("No cert"));
    }
}
