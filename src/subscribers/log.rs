//! # LogWriter — notification printer
//!
//! A subscriber that attaches to `"edit status"` in one registration and
//! writes each notification through `tracing`. Useful for demos and debugging.
//!
//! ## Example output
//! ```text
//! [edit] param="fridge_setpoint" value=18.1
//! [status] Saving...
//! [status] Failed: 500 Internal Server Error bad token
//! ```

use tracing::info;

use crate::model::{EDIT, Notification, STATUS};
use crate::observable::{Emission, Observable, Subscriber};

/// Notification writer.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registers a writer on `host` for both model topics.
    ///
    /// The returned handle can be passed to `off` to detach it.
    pub fn attach<H>(&self, host: &H) -> Subscriber<Notification>
    where
        H: Observable<Payload = Notification>,
    {
        let subscriber = Subscriber::new(Self::write);
        host.on(&format!("{EDIT} {STATUS}"), &subscriber);
        subscriber
    }

    fn write(e: &Emission<'_, Notification>) {
        let topic = e.topic().unwrap_or("?");
        match e.payload() {
            Notification::Edit { name, value } => {
                info!("[{topic}] param={name:?} value={value}");
            }
            Notification::Status(status) => {
                info!("[{topic}] {status}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Observers;
    use crate::model::SaveStatus;
    use crate::params::Value;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_writes_both_topics() {
        let host: Observers<Notification> = Observers::new();
        let sub = LogWriter::new().attach(&host);
        assert!(sub.is_positional());

        host.emit(
            EDIT,
            &Notification::Edit {
                name: "fridge_setpoint".into(),
                value: Value::Number(18.5),
            },
        );
        host.emit(STATUS, &Notification::Status(SaveStatus::Saved));

        assert!(logs_contain("[edit] param=\"fridge_setpoint\" value=18.5"));
        assert!(logs_contain("[status] Saved"));
    }

    #[traced_test]
    #[test]
    fn test_detached_writer_is_silent() {
        let host: Observers<Notification> = Observers::new();
        let sub = LogWriter::new().attach(&host);
        host.off("edit status", Some(&sub));

        host.emit(STATUS, &Notification::Status(SaveStatus::Saving));
        assert!(!logs_contain("Saving..."));
    }
}
