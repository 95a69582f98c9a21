//! Store module - Observable values with change notification.
//!
//! ## Architecture
//!
//! - `Writable` - A value any holder can replace; notifies on change
//! - `Derived` - A value recomputed from another store whenever it changes
//! - `Subscription` - Handle returned by `subscribe`; dropping it unsubscribes
//!
//! Values live behind a `tokio::sync::watch` channel, so readers always see a
//! whole value and async tasks can `watch()` for changes. Synchronous
//! callbacks run outside any lock, on the thread that performed the `set`.
//!
//! ## Usage
//!
//! ```rust
//! use gostream_i18n::store::{Derived, Readable, Writable};
//!
//! let count = Writable::new(1);
//! let doubled = Derived::new(&count, |n: &i32| n * 2);
//!
//! count.set(4);
//! assert_eq!(doubled.get(), 8);
//! ```

mod derived;
mod subscription;
mod writable;

pub use derived::Derived;
pub use subscription::Subscription;
pub use writable::Writable;

/// A store that can be read and observed.
pub trait Readable<T> {
    /// Current value.
    fn get(&self) -> T;

    /// Register `callback`. It runs once immediately with the current value,
    /// then after every change until the returned handle is dropped.
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static;
}
