//! # Built-in subscribers for model notifications.
//!
//! ```text
//! Model ── emit("edit" | "status") ──► Observers ──┬──► LogWriter (tracing)
//!                                                  ├──► view code
//!                                                  └──► ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use paramsync::{Emission, Model, Notification, Observable, Subscriber};
//!
//! fn attach_status_line(model: &Model) {
//!     let status_line = Subscriber::new(|e: &Emission<'_, Notification>| {
//!         if let Some(message) = e.payload().message() {
//!             println!("status: {message}");
//!         }
//!     });
//!     model.on("status", &status_line);
//! }
//! ```

mod log;

pub use log::LogWriter;
