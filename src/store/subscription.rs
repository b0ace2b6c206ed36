use std::fmt;

type Teardown = Box<dyn FnOnce() + Send>;

/// RAII handle for a registered listener.
///
/// The teardown runs once, either through [`Subscription::unsubscribe`] or
/// when the handle is dropped.
pub struct Subscription {
    teardowns: Vec<Teardown>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` when unsubscribed.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            teardowns: vec![Box::new(teardown)],
        }
    }

    /// A subscription with nothing to tear down.
    pub fn noop() -> Self {
        Self {
            teardowns: Vec::new(),
        }
    }

    /// Merge several subscriptions into one handle.
    ///
    /// Teardowns run in the order the subscriptions were given.
    pub fn combine<I>(subscriptions: I) -> Self
    where
        I: IntoIterator<Item = Subscription>,
    {
        let mut teardowns = Vec::new();
        for mut subscription in subscriptions {
            teardowns.append(&mut subscription.teardowns);
        }
        Self { teardowns }
    }

    /// Unregister the listener now.
    pub fn unsubscribe(mut self) {
        self.run_teardowns();
    }

    /// Keep the listener registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.teardowns.clear();
    }

    fn run_teardowns(&mut self) {
        for teardown in self.teardowns.drain(..) {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardowns();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("teardowns", &self.teardowns.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicUsize>) -> Subscription {
        let counter = Arc::clone(counter);
        Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn unsubscribe_runs_teardown_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        counting(&calls).unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_runs_teardown() {
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let _subscription = counting(&calls);
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detach_skips_teardown() {
        let calls = Arc::new(AtomicUsize::new(0));
        counting(&calls).detach();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn combined_subscription_tears_down_all() {
        let calls = Arc::new(AtomicUsize::new(0));
        let combined = Subscription::combine(vec![
            counting(&calls),
            Subscription::noop(),
            counting(&calls),
        ]);
        combined.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
