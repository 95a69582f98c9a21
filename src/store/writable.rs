//! Writable store.

use std::sync::{Arc, Weak};

use tokio::sync::watch;

use super::Readable;
use super::subscription::{Subscribers, Subscription};

struct Inner<T> {
    sender: watch::Sender<T>,
    subscribers: Subscribers<T>,
}

/// A shared, replaceable value.
///
/// Cloning is cheap and yields a handle to the same value.
pub struct Writable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    inner: Arc<Inner<T>>,
}

// Manual Clone: clones share the value instead of copying it
impl<T> Clone for Writable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Writable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            inner: Arc::new(Inner {
                sender,
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Replace the value.
    ///
    /// Subscribers and watchers are notified only if `value` differs from the
    /// current one. Returns whether a change happened.
    pub fn set(&self, value: T) -> bool {
        self.update(move |_| value)
    }

    /// Replace the value with `f(current)`.
    ///
    /// `f` runs under the store's write lock, so concurrent updates never
    /// lose each other's result. It must not read or write this store.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let mut published = None;
        self.inner.sender.send_if_modified(|current| {
            let next = f(current);
            if *current == next {
                return false;
            }
            *current = next;
            published = Some(current.clone());
            true
        });

        match published {
            Some(value) => {
                self.inner.subscribers.notify(&value);
                true
            }
            None => false,
        }
    }

    /// Receiver that wakes on every change, for async consumers.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.inner.sender.subscribe()
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    fn downgrade(&self) -> Weak<Inner<T>> {
        Arc::downgrade(&self.inner)
    }
}

impl<T> Readable<T> for Writable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn get(&self) -> T {
        self.inner.sender.borrow().clone()
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Arc<dyn Fn(&T) + Send + Sync> = Arc::new(callback);
        let id = self.inner.subscribers.add(Arc::clone(&callback));

        callback(&self.get());

        let weak = self.downgrade();
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.remove(id);
            }
        })
    }
}

impl<T> Default for Writable<T>
where
    T: Clone + PartialEq + Send + Sync + Default + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Writable<T>
where
    T: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable")
            .field("value", &*self.inner.sender.borrow())
            .field("subscribers", &self.inner.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
    }

    #[test]
    fn test_subscribe_receives_current_then_changes() {
        let store = Writable::new("zh".to_string());
        let (seen, callback) = recorder();
        let _sub = store.subscribe(callback);

        store.set("en".to_string());
        store.set("fr".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["zh", "en", "fr"]);
        assert_eq!(store.get(), "fr");
    }

    #[test]
    fn test_set_same_value_does_not_notify() {
        let store = Writable::new(1);
        let (seen, callback) = recorder();
        let _sub = store.subscribe(callback);

        assert!(!store.set(1));
        assert!(store.set(2));
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Writable::new(0);
        let (seen, callback) = recorder();
        let sub = store.subscribe(callback);
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);

        store.set(5);
        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_detach_keeps_callback() {
        let store = Writable::new(0);
        let (seen, callback) = recorder();
        store.subscribe(callback).detach();

        store.set(1);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_update_and_clone_share_value() {
        let store = Writable::new(10);
        let handle = store.clone();
        handle.update(|n| n + 5);
        assert_eq!(store.get(), 15);
    }

    #[test]
    fn test_callback_may_set_reentrantly() {
        let store = Writable::new(0);
        let inner = store.clone();
        let _sub = store.subscribe(move |n: &i32| {
            if *n == 1 {
                inner.set(2);
            }
        });

        store.set(1);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Writable::new(0_u32);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..1_000 {
                        store.update(|n| n + 1);
                    }
                });
            }
        });

        assert_eq!(store.get(), 8_000);
    }

    #[tokio::test]
    async fn test_watch_sees_changes() {
        let store = Writable::new("zh".to_string());
        let mut rx = store.watch();

        store.set("en".to_string());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "en");

        // Equal value: no change is published.
        store.set("en".to_string());
        assert!(!rx.has_changed().unwrap());
    }
}
