//! # Reactive parameter model.
//!
//! [`Model`] owns a [`ParamSet`], announces every change on [`EDIT`], and saves
//! the full set through a [`Transport`], reporting progress on [`STATUS`].
//!
//! ## Rules
//! - The key set fixed at construction never changes; unknown names and kind
//!   changes are rejected with [`ParamError`] and emit nothing.
//! - No registry or parameter borrow is held while subscribers run, so a
//!   subscriber may read or mutate the model it is attached to.
//! - Each `save()` emits `Saving` on first poll, before the request is issued,
//!   then exactly one terminal status.
//!   Concurrent saves are independent and may interleave.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::ParamError;
use crate::model::builder::ModelBuilder;
use crate::model::notification::{EDIT, Notification, STATUS, SaveFailure, SaveStatus};
use crate::observable::{Observable, Observers};
use crate::params::{ParamSet, Value};
use crate::transport::{SaveRequest, Transport};

/// Notice for collaborators when saving is not permitted.
pub const SAVE_NOT_PERMITTED: &str = "No cert";

/// Observable parameter state with best-effort persistence.
pub struct Model {
    params: RefCell<ParamSet>,
    initial: ParamSet,
    auth_token: String,
    save_allowed: bool,
    token_field: String,
    transport: Box<dyn Transport>,
    observers: Observers<Notification>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("params", &self.params.borrow())
            .field("save_allowed", &self.save_allowed)
            .field("transport", &self.transport.name())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Creates a model from a copy of `initial`.
    ///
    /// The token is attached to save requests under the default field name
    /// (see [`ModelConfig`](crate::ModelConfig)); use [`Model::builder`] to change it.
    pub fn new<T>(
        initial: &ParamSet,
        auth_token: impl Into<String>,
        save_allowed: bool,
        transport: T,
    ) -> Self
    where
        T: Transport + 'static,
    {
        let token_field = crate::ModelConfig::default().token_field;
        Self::from_parts(
            initial.clone(),
            auth_token.into(),
            save_allowed,
            token_field,
            Box::new(transport),
        )
    }

    /// Starts a [`ModelBuilder`] over `initial`.
    pub fn builder(initial: ParamSet) -> ModelBuilder {
        ModelBuilder::new(initial)
    }

    pub(crate) fn from_parts(
        initial: ParamSet,
        auth_token: String,
        save_allowed: bool,
        token_field: String,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            params: RefCell::new(initial.clone()),
            initial,
            auth_token,
            save_allowed,
            token_field,
            transport,
            observers: Observers::new(),
        }
    }

    /// Opaque token passed through to every save request.
    #[inline]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Whether saving is permitted. Advisory: `save()` does not check it.
    #[inline]
    pub fn save_allowed(&self) -> bool {
        self.save_allowed
    }

    /// `Some("No cert")` when saving is not permitted.
    pub fn permission_notice(&self) -> Option<&'static str> {
        (!self.save_allowed).then_some(SAVE_NOT_PERMITTED)
    }

    /// Current value of a parameter.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.params.borrow().value(name)
    }

    /// Snapshot of the current parameters.
    pub fn params(&self) -> ParamSet {
        self.params.borrow().clone()
    }

    /// Parameters as they were at construction.
    #[inline]
    pub fn initial(&self) -> &ParamSet {
        &self.initial
    }

    /// Current value formatted for display.
    pub fn display(&self, name: &str) -> Result<String, ParamError> {
        self.params
            .borrow()
            .get(name)
            .map(|p| p.display())
            .ok_or_else(|| unknown(name))
    }

    /// True if the value differs visibly from its initial value.
    pub fn is_modified(&self, name: &str) -> Result<bool, ParamError> {
        let params = self.params.borrow();
        match (params.get(name), self.initial.get(name)) {
            (Some(current), Some(initial)) => Ok(!current.displays_same(initial)),
            _ => Err(unknown(name)),
        }
    }

    /// Overwrites a parameter and emits `"edit"` with the new value.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<Value, ParamError> {
        let result = self.params.borrow_mut().assign(name, value.into());
        self.announce(name, result)
    }

    /// Adds `delta` to a numeric parameter and emits `"edit"` with the new value.
    pub fn adjust(&self, name: &str, delta: f64) -> Result<Value, ParamError> {
        let result = self.params.borrow_mut().adjust(name, delta);
        self.announce(name, result)
    }

    /// `adjust(name, +step)`.
    pub fn step_up(&self, name: &str) -> Result<Value, ParamError> {
        let step = self.step_of(name)?;
        self.adjust(name, step)
    }

    /// `adjust(name, -step)`.
    pub fn step_down(&self, name: &str) -> Result<Value, ParamError> {
        let step = self.step_of(name)?;
        self.adjust(name, -step)
    }

    /// Saves the full parameter set.
    ///
    /// Emits `Saving` when the future is first polled, before the request is
    /// issued, and the returned terminal status once it resolves. Nothing is
    /// emitted until the future is polled. Never fails: transport errors become
    /// [`SaveFailure::Transport`].
    pub async fn save(&self) -> SaveStatus {
        self.emit_status(SaveStatus::Saving);

        let request = SaveRequest::new(self.params(), &self.token_field, &self.auth_token);
        debug!(
            transport = self.transport.name(),
            params = request.params().len(),
            "saving parameters"
        );

        let outcome = match self.transport.post(&request).await {
            Ok(reply) if reply.is_success() => {
                info!(status = reply.status, "parameters saved");
                SaveStatus::Saved
            }
            Ok(reply) => {
                warn!(status = reply.status, body = %reply.body, "save rejected");
                SaveStatus::Failed(SaveFailure::Rejected {
                    status: reply.status,
                    status_text: reply.status_text,
                    body: reply.body,
                })
            }
            Err(err) => {
                warn!(label = err.as_label(), detail = %err.as_message(), "save failed");
                SaveStatus::Failed(SaveFailure::Transport {
                    error: err.to_string(),
                })
            }
        };

        self.emit_status(outcome.clone());
        outcome
    }

    fn step_of(&self, name: &str) -> Result<f64, ParamError> {
        let params = self.params.borrow();
        let param = params.get(name).ok_or_else(|| unknown(name))?;
        param.step().ok_or_else(|| ParamError::NotNumeric {
            name: name.to_string(),
        })
    }

    fn announce(&self, name: &str, result: Result<Value, ParamError>) -> Result<Value, ParamError> {
        match result {
            Ok(value) => {
                self.emit(
                    EDIT,
                    &Notification::Edit {
                        name: name.to_string(),
                        value,
                    },
                );
                Ok(value)
            }
            Err(err) => {
                warn!(label = err.as_label(), detail = %err.as_message(), "edit rejected");
                Err(err)
            }
        }
    }

    fn emit_status(&self, status: SaveStatus) {
        self.emit(STATUS, &Notification::Status(status));
    }
}

impl Observable for Model {
    type Payload = Notification;

    fn observers(&self) -> &Observers<Notification> {
        &self.observers
    }
}

fn unknown(name: &str) -> ParamError {
    ParamError::UnknownParameter {
        name: name.to_string(),
    }
}
