//! Derived store.

use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tokio::sync::watch;

use super::{Readable, Subscription, Writable};

/// A value computed from another store.
///
/// The mapping runs synchronously each time the source changes, so `get()`
/// right after a source `set()` already reflects the new value.
///
/// Each recomputation reads the source's current value rather than the one
/// carried by the notification, and recomputations are serialized. When
/// setters race, the last recomputation therefore sees the latest value.
pub struct Derived<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    output: Writable<T>,
    _source: Arc<Subscription>,
}

impl<T> Clone for Derived<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            output: self.output.clone(),
            _source: Arc::clone(&self._source),
        }
    }
}

impl<T> Derived<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Derive from `source` through `map`.
    ///
    /// The derived store keeps `source` alive and stops following it once
    /// every clone of the derived store is dropped.
    pub fn new<S, R, F>(source: &R, map: F) -> Self
    where
        S: 'static,
        R: Readable<S> + Clone + Send + Sync + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let output = Writable::new(map(&source.get()));
        let sink = output.clone();
        let upstream = source.clone();
        // Reentrant: a derived subscriber may set the source again.
        let gate = ReentrantMutex::new(());
        let subscription = source.subscribe(move |_: &S| {
            let _guard = gate.lock();
            sink.set(map(&upstream.get()));
        });

        Self {
            output,
            _source: Arc::new(subscription),
        }
    }

    /// Receiver that wakes whenever the derived value changes.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.output.watch()
    }
}

impl<T> Readable<T> for Derived<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn get(&self) -> T {
        self.output.get()
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.output.subscribe(callback)
    }
}

impl<T> std::fmt::Debug for Derived<T>
where
    T: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived")
            .field("output", &self.output)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_follows_source() {
        let source = Writable::new(2);
        let squared = Derived::new(&source, |n: &i32| n * n);
        assert_eq!(squared.get(), 4);

        source.set(3);
        assert_eq!(squared.get(), 9);
    }

    #[test]
    fn test_notifies_own_subscribers() {
        let source = Writable::new("zh".to_string());
        let upper = Derived::new(&source, |s: &String| s.to_uppercase());

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _sub = upper.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        source.set("en".to_string());
        // Same derived value: no second notification.
        source.set("EN".to_string());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(upper.get(), "EN");
    }

    #[test]
    fn test_chained_derivation() {
        let source = Writable::new(1);
        let plus_one = Derived::new(&source, |n: &i32| n + 1);
        let doubled = Derived::new(&plus_one, |n: &i32| n * 2);

        source.set(10);
        assert_eq!(doubled.get(), 22);
    }

    #[test]
    fn test_converges_when_setters_race() {
        let source = Writable::new("fr".to_string());

        // Registered before the derived store, so it runs first and can hold
        // the "en" setter in the middle of its notification.
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let (entered_cb, release_cb) = (Arc::clone(&entered), Arc::clone(&release));
        let _hold = source.subscribe(move |v: &String| {
            if v == "en" {
                entered_cb.wait();
                release_cb.wait();
            }
        });

        let upper = Derived::new(&source, |s: &String| s.to_uppercase());

        let setter = {
            let source = source.clone();
            std::thread::spawn(move || {
                source.set("en".to_string());
            })
        };

        entered.wait();
        source.set("zh".to_string());
        release.wait();
        setter.join().unwrap();

        assert_eq!(source.get(), "zh");
        assert_eq!(upper.get(), source.get().to_uppercase());
    }

    #[test]
    fn test_subscriber_may_set_source() {
        let source = Writable::new(0);
        let derived = Derived::new(&source, |n: &i32| *n);

        let inner = source.clone();
        let _sub = derived.subscribe(move |n: &i32| {
            if *n == 1 {
                inner.set(2);
            }
        });

        source.set(1);
        assert_eq!(source.get(), 2);
        assert_eq!(derived.get(), 2);
    }

    #[test]
    fn test_drop_releases_source_subscription() {
        let source = Writable::new(0);
        let derived = Derived::new(&source, |n: &i32| *n);
        let copy = derived.clone();
        assert_eq!(source.subscriber_count(), 1);

        drop(derived);
        assert_eq!(source.subscriber_count(), 1);
        drop(copy);
        assert_eq!(source.subscriber_count(), 0);
    }
}
