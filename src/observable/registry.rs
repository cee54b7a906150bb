//! # Topic registry and synchronous dispatch.
//!
//! [`Observers`] maps topic names to ordered lists of registrations and
//! delivers payloads to them synchronously, on the caller's stack.
//!
//! ## Architecture
//! ```text
//! register("edit status", S)        emit("edit", &payload)
//!   ├─► "edit"   : [.., #7 S]           │ snapshot [#3 A, #7 S] (ids + handles)
//!   └─► "status" : [.., #8 S]           ├─► #3 still registered? not busy? ─► A
//!                                       └─► #7 still registered? not busy? ─► S
//!                                              └─► one-shot? remove #7
//! ```
//!
//! ## Rules
//! - **Registration order**: subscribers of a topic run in insertion order.
//! - **Snapshot dispatch**: `emit` copies the topic's registration ids up front and
//!   never holds a borrow of the registry while a callback runs. Registrations
//!   added during an emit first run on the next emit of that topic; registrations
//!   removed during an emit are skipped if they have not run yet.
//! - **Reentrancy**: a busy subscriber is skipped by nested emits, other
//!   subscribers of the same topic still run.
//! - **No failures**: empty topic lists, unknown topics and absent subscribers
//!   are no-ops.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use super::subscriber::Subscriber;

/// Wildcard accepted by [`Observers::deregister`] to clear every topic.
pub const ALL_TOPICS: &str = "*";

struct Registration<P> {
    id: u64,
    subscriber: Subscriber<P>,
}

/// Topic-keyed subscriber registry with synchronous, reentrancy-guarded emit.
pub struct Observers<P> {
    topics: RefCell<HashMap<String, Vec<Registration<P>>>>,
    next_id: Cell<u64>,
}

impl<P> Default for Observers<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Observers<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics = self.topics.borrow();
        let mut map = f.debug_map();
        for (topic, regs) in topics.iter() {
            map.entry(topic, &regs.len());
        }
        map.finish()
    }
}

impl<P> Observers<P> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topics: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// Appends `subscriber` to every whitespace-separated topic in `topics`.
    ///
    /// The subscriber becomes positional when more than one topic is listed.
    pub fn register(&self, topics: &str, subscriber: &Subscriber<P>) {
        let names: Vec<&str> = topics.split_whitespace().collect();
        if names.is_empty() {
            return;
        }
        subscriber.mark_positional(names.len() > 1);

        let mut registry = self.topics.borrow_mut();
        for name in names {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            registry
                .entry(name.to_owned())
                .or_default()
                .push(Registration {
                    id,
                    subscriber: subscriber.clone(),
                });
        }
    }

    /// Marks `subscriber` one-shot and registers it under `topic`.
    pub fn register_once(&self, topic: &str, subscriber: &Subscriber<P>) {
        subscriber.mark_one_shot();
        self.register(topic, subscriber);
    }

    /// Removes registrations.
    ///
    /// - `"*"` clears the whole registry, whatever `subscriber` is.
    /// - With a subscriber: every registration of that handle under the named
    ///   topics is removed, adjacent duplicates included.
    /// - Without one: the named topics are cleared.
    pub fn deregister(&self, topics: &str, subscriber: Option<&Subscriber<P>>) {
        let mut registry = self.topics.borrow_mut();
        if topics == ALL_TOPICS {
            registry.clear();
            return;
        }

        for name in topics.split_whitespace() {
            match subscriber {
                Some(target) => {
                    if let Some(regs) = registry.get_mut(name) {
                        regs.retain(|r| !r.subscriber.same(target));
                        if regs.is_empty() {
                            registry.remove(name);
                        }
                    }
                }
                None => {
                    registry.remove(name);
                }
            }
        }
    }

    /// Delivers `payload` to every current subscriber of `topic`.
    ///
    /// Returns how many callbacks actually ran.
    pub fn emit(&self, topic: &str, payload: &P) -> usize {
        let snapshot: Vec<(u64, Subscriber<P>)> = match self.topics.borrow().get(topic) {
            Some(regs) => regs
                .iter()
                .map(|r| (r.id, r.subscriber.clone()))
                .collect(),
            None => return 0,
        };

        let mut invoked = 0;
        for (id, subscriber) in snapshot {
            if !self.is_registered(topic, id) {
                continue;
            }
            if !subscriber.invoke(topic, payload) {
                continue;
            }
            invoked += 1;
            if subscriber.is_one_shot() {
                self.remove_registration(topic, id);
            }
        }
        invoked
    }

    /// Number of registrations under `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.borrow().get(topic).map_or(0, Vec::len)
    }

    /// Topics that currently have at least one registration.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.topics.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// True if no topic has registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.borrow().is_empty()
    }

    fn is_registered(&self, topic: &str, id: u64) -> bool {
        self.topics
            .borrow()
            .get(topic)
            .is_some_and(|regs| regs.iter().any(|r| r.id == id))
    }

    fn remove_registration(&self, topic: &str, id: u64) {
        let mut registry = self.topics.borrow_mut();
        if let Some(regs) = registry.get_mut(topic) {
            regs.retain(|r| r.id != id);
            if regs.is_empty() {
                registry.remove(topic);
            }
        }
    }
}
