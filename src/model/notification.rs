//! # Notifications emitted by the model.
//!
//! | Topic      | Payload                              | When                          |
//! |------------|--------------------------------------|-------------------------------|
//! | [`EDIT`]   | [`Notification::Edit`]`{name, value}`| after every successful mutation |
//! | [`STATUS`] | [`Notification::Status`]`(status)`   | save start and save outcome   |
//!
//! ## Save cycle
//! ```text
//! save() ─► Status(Saving) ─► post ─┬─ 2xx reply      ─► Status(Saved)
//!                                   ├─ other reply    ─► Status(Failed(Rejected{..}))
//!                                   └─ no reply       ─► Status(Failed(Transport{..}))
//! ```
//! Exactly one terminal status follows each `Saving`.

use std::fmt;

use crate::params::Value;

/// Topic for parameter changes.
pub const EDIT: &str = "edit";
/// Topic for save progress.
pub const STATUS: &str = "status";

/// Payload delivered to model subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A parameter now holds `value`.
    Edit { name: String, value: Value },
    /// Save progress or outcome.
    Status(SaveStatus),
}

impl Notification {
    /// Status message, for `Status` notifications.
    pub fn message(&self) -> Option<String> {
        match self {
            Notification::Status(status) => Some(status.to_string()),
            Notification::Edit { .. } => None,
        }
    }
}

/// Stage of a save cycle.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saving,
    Saved,
    Failed(SaveFailure),
}

impl SaveStatus {
    /// True for `Saved` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SaveStatus::Saving)
    }

    #[inline]
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Saving => f.write_str("Saving..."),
            SaveStatus::Saved => f.write_str("Saved"),
            SaveStatus::Failed(failure) => write!(f, "Failed: {failure}"),
        }
    }
}

/// Why a save did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    /// The endpoint answered with a non-success status.
    Rejected {
        status: u16,
        status_text: String,
        body: String,
    },
    /// No reply arrived.
    Transport { error: String },
}

impl fmt::Display for SaveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveFailure::Rejected {
                status,
                status_text,
                body,
            } => write!(f, "{status} {status_text} {body}"),
            SaveFailure::Transport { error } => f.write_str(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(SaveStatus::Saving.to_string(), "Saving...");
        assert_eq!(SaveStatus::Saved.to_string(), "Saved");

        let rejected = SaveStatus::Failed(SaveFailure::Rejected {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: "bad token".into(),
        });
        assert_eq!(
            rejected.to_string(),
            "Failed: 500 Internal Server Error bad token"
        );
        assert!(rejected.is_terminal());
        assert!(!SaveStatus::Saving.is_terminal());
    }

    #[test]
    fn test_message_only_for_status() {
        let edit = Notification::Edit {
            name: "x".into(),
            value: Value::Number(1.0),
        };
        assert_eq!(edit.message(), None);
        assert_eq!(
            Notification::Status(SaveStatus::Saved).message().as_deref(),
            Some("Saved")
        );
    }
}
