//! Fullscreen capability port
//!
//! Browsers expose fullscreen under several vendor names and not all of them
//! exist on every platform. The port answers per-vendor questions; the
//! probing order and fallback policy belong to `FullscreenController`.

use std::{future::Future, pin::Pin, rc::Rc};

use turbo_racing_domain::{FullscreenRequestError, FullscreenVendor};

use super::Subscription;

/// Outcome of a fullscreen request or exit
///
/// The platform call is made eagerly when the future is created; awaiting it
/// only observes the result, so dropping it does not cancel the request.
pub type FullscreenFuture = Pin<Box<dyn Future<Output = Result<(), FullscreenRequestError>>>>;

/// Platform fullscreen surface for the game panel
pub trait FullscreenPort {
    /// Whether the panel exposes the vendor's request method
    fn can_request(&self, vendor: FullscreenVendor) -> bool;

    /// Ask the platform to show the panel fullscreen
    fn request(&self, vendor: FullscreenVendor) -> FullscreenFuture;

    /// Whether the document exposes the vendor's exit method
    fn can_exit(&self, vendor: FullscreenVendor) -> bool;

    /// Ask the platform to leave fullscreen
    fn exit(&self, vendor: FullscreenVendor) -> FullscreenFuture;

    /// Whether the vendor's "current fullscreen element" accessor is non-null
    fn has_fullscreen_element(&self, vendor: FullscreenVendor) -> bool;

    /// Invoke `callback` on any vendor's fullscreen change event
    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription;
}
