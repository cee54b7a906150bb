//! # Subscriber handles
//!
//! A [`Subscriber`] is a shared handle to a callback plus the flags the
//! dispatcher keeps for it. Handles are compared by identity: cloning a
//! handle yields the *same* subscriber, so `off(topic, Some(&handle))` removes
//! exactly the registrations made with that handle (or any of its clones).
//!
//! ## Flags
//! ```text
//! positional  set on every registration; true when the topic list held more
//!             than one topic, so the callback can tell which one fired
//! one_shot    set by `once`; the registration is dropped after its first call
//! busy        true only while the callback is on the stack; nested emits
//!             skip a busy subscriber
//! ```
//!
//! All flags live on the handle, not on the individual registration: a
//! subscriber registered under two topics is busy for both while either runs.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// What a callback receives for one invocation.
///
/// [`Emission::topic`] is only populated for positional subscribers (those
/// registered through a multi-topic list); single-topic subscribers already
/// know which topic they are bound to.
pub struct Emission<'a, P> {
    topic: &'a str,
    positional: bool,
    payload: &'a P,
}

impl<'a, P> Emission<'a, P> {
    /// Topic that fired, for positional subscribers only.
    #[inline]
    pub fn topic(&self) -> Option<&'a str> {
        self.positional.then_some(self.topic)
    }

    /// The emitted payload.
    #[inline]
    pub fn payload(&self) -> &'a P {
        self.payload
    }
}

struct Inner<P> {
    callback: Box<dyn Fn(&Emission<'_, P>)>,
    positional: Cell<bool>,
    one_shot: Cell<bool>,
    busy: Cell<bool>,
}

/// Shared, identity-compared subscriber handle.
pub struct Subscriber<P> {
    inner: Rc<Inner<P>>,
}

impl<P> Clone for Subscriber<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> fmt::Debug for Subscriber<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("positional", &self.inner.positional.get())
            .field("one_shot", &self.inner.one_shot.get())
            .field("busy", &self.inner.busy.get())
            .finish()
    }
}

impl<P> Subscriber<P> {
    /// Wraps a callback into a new subscriber handle.
    ///
    /// Callbacks are `Fn`; keep mutable state behind `Cell`/`RefCell`.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Emission<'_, P>) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                callback: Box::new(callback),
                positional: Cell::new(false),
                one_shot: Cell::new(false),
                busy: Cell::new(false),
            }),
        }
    }

    /// True if the topic name is passed along with each payload.
    #[inline]
    pub fn is_positional(&self) -> bool {
        self.inner.positional.get()
    }

    /// True if registrations are dropped after their first invocation.
    #[inline]
    pub fn is_one_shot(&self) -> bool {
        self.inner.one_shot.get()
    }

    /// True while the callback is running.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    /// Identity comparison (same underlying callback).
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub(crate) fn mark_positional(&self, positional: bool) {
        self.inner.positional.set(positional);
    }

    #[inline]
    pub(crate) fn mark_one_shot(&self) {
        self.inner.one_shot.set(true);
    }

    /// Runs the callback with the busy flag held.
    ///
    /// Returns `false` without calling anything if the subscriber is already
    /// busy. The flag is released even if the callback unwinds.
    pub(crate) fn invoke(&self, topic: &str, payload: &P) -> bool {
        if self.inner.busy.replace(true) {
            return false;
        }
        let _busy = BusyGuard(&self.inner.busy);

        let emission = Emission {
            topic,
            positional: self.inner.positional.get(),
            payload,
        };
        (self.inner.callback)(&emission);
        true
    }
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_clones_share_identity_and_flags() {
        let a: Subscriber<u32> = Subscriber::new(|_| {});
        let b = a.clone();
        let c: Subscriber<u32> = Subscriber::new(|_| {});

        assert!(a.same(&b));
        assert!(!a.same(&c));

        b.mark_one_shot();
        assert!(a.is_one_shot());
        assert!(!c.is_one_shot());
    }

    #[test]
    fn test_topic_only_visible_when_positional() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = Subscriber::new(move |e: &Emission<'_, u32>| {
            sink.borrow_mut()
                .push((e.topic().map(str::to_owned), *e.payload()));
        });

        assert!(sub.invoke("tick", &1));
        sub.mark_positional(true);
        assert!(sub.invoke("tick", &2));

        assert_eq!(
            *seen.borrow(),
            vec![(None, 1), (Some("tick".to_string()), 2)]
        );
    }

    #[test]
    fn test_busy_released_after_panic() {
        let sub: Subscriber<u32> = Subscriber::new(|_| panic!("boom"));

        let result = catch_unwind(AssertUnwindSafe(|| sub.invoke("tick", &1)));
        assert!(result.is_err());
        assert!(!sub.is_busy());
    }
}
