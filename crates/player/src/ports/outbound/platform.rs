//! Platform abstraction ports for the embedding component
//!
//! These traits abstract the browser so that:
//! 1. Embedding services remain platform-agnostic
//! 2. `web-sys` code is isolated in infrastructure
//! 3. The lifecycle logic is testable on native with fakes and mocks
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`, not here.

use std::{future::Future, pin::Pin, rc::Rc};

use turbo_racing_domain::Viewport;

/// Keeps a platform event subscription alive
///
/// Dropping it runs the unsubscribe action exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Client identity and viewport geometry
pub trait ViewportPort {
    /// Browser user agent, if readable
    fn user_agent(&self) -> Option<String>;

    /// Current inner viewport size, if readable
    fn viewport(&self) -> Option<Viewport>;

    /// Invoke `callback` on every viewport resize or orientation change
    fn on_resize(&self, callback: Rc<dyn Fn()>) -> Subscription;
}

/// The single page-level chrome element hidden while a session is active
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PageChromePort {
    fn set_chrome_hidden(&self, hidden: bool);
}

/// Async sleep abstraction
///
/// Used for the load timeout so the loader stays free of `#[cfg]` branches.
pub trait SleepPort {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;
}

/// Runs work that must outlive whoever started it
///
/// A runtime instantiation cannot be cancelled, so once its caller goes away
/// the rest of the load is handed here to be driven to completion.
pub trait SpawnPort {
    fn spawn_local(&self, task: Pin<Box<dyn Future<Output = ()> + 'static>>);
}
