//! # Save transport contract
//!
//! [`Transport`] is the seam between the model and the network. The model
//! hands it a [`SaveRequest`] and expects either a [`Reply`] (any HTTP status,
//! success or not) or a [`TransportError`] when no reply arrived at all.
//!
//! ## Contract
//! - One `post` per save; no retries, no timeout.
//! - Non-success replies are **not** errors: return them as a `Reply` with the
//!   body text filled in, the model turns them into a failure status.
//! - The body text of a success reply is not needed and may be left empty.

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::TransportError;
use crate::params::ParamSet;

/// Body of one save request.
///
/// Serializes as `{"params": {...}, "<token_field>": "<token>"}`.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    params: ParamSet,
    token_field: String,
    token: String,
}

impl SaveRequest {
    pub fn new(params: ParamSet, token_field: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            params,
            token_field: token_field.into(),
            token: token.into(),
        }
    }

    /// Full parameter snapshot carried by the request.
    #[inline]
    pub fn params(&self) -> &ParamSet {
        &self.params
    }
}

impl Serialize for SaveRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("params", &self.params)?;
        map.serialize_entry(&self.token_field, &self.token)?;
        map.end()
    }
}

/// What the endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Numeric HTTP status.
    pub status: u16,
    /// Reason phrase for the status.
    pub status_text: String,
    /// Raw body text (read for non-success replies).
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// True for statuses in the 2xx range.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers save requests.
///
/// Futures are not required to be `Send`: the model lives on a single thread.
#[async_trait(?Send)]
pub trait Transport {
    /// Sends one request and waits for the reply.
    async fn post(&self, request: &SaveRequest) -> Result<Reply, TransportError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_carries_params_and_token() {
        let params = ParamSet::new().numeric("x", 3.0, 1.0, 0).boolean("on", true);
        let request = SaveRequest::new(params, "csrf_blob", "tok-123");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"params": {"x": 3.0, "on": true}, "csrf_blob": "tok-123"})
        );
    }

    #[test]
    fn test_reply_success_range() {
        assert!(Reply::new(200, "OK", "").is_success());
        assert!(Reply::new(204, "No Content", "").is_success());
        assert!(!Reply::new(199, "", "").is_success());
        assert!(!Reply::new(302, "Found", "").is_success());
        assert!(!Reply::new(500, "Internal Server Error", "bad token").is_success());
    }
}
