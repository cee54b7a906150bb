//! # paramsync
//!
//! **paramsync** keeps a small set of numeric and boolean parameters in sync
//! between the code that edits them, any number of listeners, and a server
//! that persists them.
//!
//! It provides a generic topic-based publish/subscribe primitive and, built on
//! it, an observable parameter model that saves its full state as one JSON
//! object and reports the outcome asynchronously.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   view code / controls                     subscribers (view updates, LogWriter, ...)
//!        │ set / adjust / step_* / save                 ▲
//!        ▼                                              │ Emission{topic?, payload}
//! ┌──────────────────────────────────────────────────────┴────────────┐
//! │  Model                                                            │
//! │  - ParamSet (fixed keys, typed entries)                           │
//! │  - initial snapshot (for "modified" display)                      │
//! │  - Observers<Notification> ── "edit" / "status" topics            │
//! │  - Box<dyn Transport>                                             │
//! └──────────────────────────────────────────────┬────────────────────┘
//!                                                ▼
//!                             HttpTransport ── POST <base>/update
//!                             {"params": {...}, "csrf_blob": "<token>"}
//! ```
//!
//! ### Save cycle
//! ```text
//! save()
//!   ├─► emit("status", Saving)                 (on first poll, before the request)
//!   ├─► Transport::post(SaveRequest).await
//!   │       ├─ 2xx      ─► emit("status", Saved)
//!   │       ├─ non-2xx  ─► emit("status", Failed: <code> <text> <body>)
//!   │       └─ no reply ─► emit("status", Failed: <error>)
//!   └─► returns the terminal SaveStatus
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Dispatch**      | Topic registry, one-shot and multi-topic subscribers.        | [`Observable`], [`Observers`], [`Subscriber`] |
//! | **Parameters**    | Typed numeric/boolean entries with a fixed key set.          | [`ParamSet`], [`Param`], [`Value`]        |
//! | **Model**         | Mutations that always notify, save with status reporting.    | [`Model`], [`Notification`], [`SaveStatus`] |
//! | **Transport**     | Network seam and the `reqwest` implementation.               | [`Transport`], [`HttpTransport`]          |
//! | **Errors**        | Typed errors for state-shape and transport failures.         | [`ParamError`], [`TransportError`]        |
//! | **Configuration** | Endpoint and token field settings.                           | [`ModelConfig`]                           |
//!
//! ## Threading
//! Everything is single-threaded: the model and its registry use `Rc`/`RefCell`
//! and are `!Send`. Run saves on a current-thread runtime or a `LocalSet`.
//!
//! ## Example
//! ```rust,no_run
//! use paramsync::{Emission, Model, Notification, Observable, ParamSet, Subscriber};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let initial = ParamSet::new()
//!         .numeric("fridge_setpoint", 18.0, 0.1, 1)
//!         .boolean("running", false);
//!
//!     let model = Model::builder(initial)
//!         .with_token("csrf-token-from-page")
//!         .build()?;
//!
//!     let view = Subscriber::new(|e: &Emission<'_, Notification>| match e.payload() {
//!         Notification::Edit { name, value } => println!("{name} -> {value}"),
//!         Notification::Status(status) => println!("{status}"),
//!     });
//!     model.on("edit", &view).on("status", &view);
//!
//!     model.step_up("fridge_setpoint")?;
//!     model.set("running", true)?;
//!     model.save().await;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod model;
mod observable;
mod params;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use config::ModelConfig;
pub use error::{ModelError, ParamError, TransportError};
pub use model::{
    EDIT, Model, ModelBuilder, Notification, SAVE_NOT_PERMITTED, STATUS, SaveFailure, SaveStatus,
};
pub use observable::{ALL_TOPICS, Emission, Observable, Observers, Subscriber};
pub use params::{Param, ParamSet, Value};
pub use subscribers::LogWriter;
pub use transport::{HttpTransport, Reply, SaveRequest, Transport};
