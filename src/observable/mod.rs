//! Observable core: topic-based publish/subscribe.
//!
//! ## Contents
//! - [`Subscriber`], [`Emission`] callback handle and what it receives
//! - [`Observers`] the topic registry with synchronous dispatch
//! - [`Observable`] mixin trait giving a host `on` / `off` / `once` / `emit`
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and never fails:
//! malformed input degrades to a no-op.

#[allow(clippy::module_inception)]
mod observable;
mod registry;
mod subscriber;

pub use observable::Observable;
pub use registry::{ALL_TOPICS, Observers};
pub use subscriber::{Emission, Subscriber};
