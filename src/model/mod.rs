//! Reactive parameter model.
//!
//! - [`Model`] observable parameter state plus the save operation
//! - [`ModelBuilder`] assembles a model with a custom transport or config
//! - [`Notification`], [`SaveStatus`], [`SaveFailure`] what subscribers receive
//! - [`EDIT`], [`STATUS`] topic names
//!
//! ## Wiring
//! ```text
//! view code ── set / adjust / step_* ──► Model ── emit("edit") ──► subscribers
//! view code ── save ───────────────────► Model ── emit("status", Saving)
//!                                          └─► Transport::post ─► emit("status", outcome)
//! ```

mod builder;
#[allow(clippy::module_inception)]
mod model;
mod notification;

pub use builder::ModelBuilder;
pub use model::{Model, SAVE_NOT_PERMITTED};
pub use notification::{EDIT, Notification, STATUS, SaveFailure, SaveStatus};
