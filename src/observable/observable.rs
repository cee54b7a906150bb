//! # The `Observable` mixin
//!
//! Any type that owns an [`Observers`] registry gets topic-based messaging by
//! implementing one accessor; `on` / `off` / `once` / `emit` are provided and
//! return the host so calls chain.
//!
//! ```rust
//! use paramsync::{Emission, Observable, Observers, Subscriber};
//!
//! struct Thermostat {
//!     observers: Observers<f64>,
//! }
//!
//! impl Observable for Thermostat {
//!     type Payload = f64;
//!     fn observers(&self) -> &Observers<f64> {
//!         &self.observers
//!     }
//! }
//!
//! let t = Thermostat { observers: Observers::new() };
//! let print = Subscriber::new(|e: &Emission<'_, f64>| println!("now {}", e.payload()));
//! t.on("reading", &print).emit("reading", &18.5).off("reading", None);
//! ```

use super::registry::Observers;
use super::subscriber::Subscriber;

/// Topic-based publish/subscribe for a host type.
pub trait Observable {
    /// Payload delivered to subscribers.
    type Payload;

    /// Registry backing this host.
    fn observers(&self) -> &Observers<Self::Payload>;

    /// Registers `subscriber` under each whitespace-separated topic.
    fn on(&self, topics: &str, subscriber: &Subscriber<Self::Payload>) -> &Self {
        self.observers().register(topics, subscriber);
        self
    }

    /// Deregisters from the named topics, or everything for `"*"`.
    fn off(&self, topics: &str, subscriber: Option<&Subscriber<Self::Payload>>) -> &Self {
        self.observers().deregister(topics, subscriber);
        self
    }

    /// Registers a one-shot subscriber for a single topic.
    fn once(&self, topic: &str, subscriber: &Subscriber<Self::Payload>) -> &Self {
        self.observers().register_once(topic, subscriber);
        self
    }

    /// Synchronously delivers `payload` to the subscribers of `topic`.
    fn emit(&self, topic: &str, payload: &Self::Payload) -> &Self {
        self.observers().emit(topic, payload);
        self
    }
}

impl<P> Observable for Observers<P> {
    type Payload = P;

    fn observers(&self) -> &Observers<P> {
        self
    }
}
