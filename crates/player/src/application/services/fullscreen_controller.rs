//! Fullscreen presentation control
//!
//! One request/exit/observe contract over the platform's vendor-specific
//! fullscreen APIs. `is_fullscreen` mirrors the platform: it is recomputed from
//! every vendor's "current fullscreen element" accessor whenever any vendor's
//! change event fires, OR-ed with the simulated flag.
//!
//! Simulated fullscreen is the mobile fallback when no request capability
//! exists or the platform rejects the request. It is a CSS full-viewport
//! overlay rendered by the UI; no platform event fires for it, so the flag is
//! flipped directly.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use turbo_racing_domain::{FullscreenVendor, PresentationMode};

use super::callback::Callback;
use super::DeviceDetector;
use crate::ports::outbound::{FullscreenPort, Subscription};

struct ControllerInner {
    port: Rc<dyn FullscreenPort>,
    device: DeviceDetector,
    simulated: Cell<bool>,
    mode: Cell<PresentationMode>,
    on_change: Callback<PresentationMode>,
    change: RefCell<Option<Subscription>>,
}

/// Presents the game panel fullscreen across platforms
#[derive(Clone)]
pub struct FullscreenController {
    inner: Rc<ControllerInner>,
}

impl FullscreenController {
    pub fn new(port: Rc<dyn FullscreenPort>, device: DeviceDetector) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                port,
                device,
                simulated: Cell::new(false),
                mode: Cell::new(PresentationMode::Windowed),
                on_change: Callback::default(),
                change: RefCell::new(None),
            }),
        }
    }

    /// Subscribe to every vendor's change event and sync with the platform
    pub fn activate(&self) {
        let weak: Weak<ControllerInner> = Rc::downgrade(&self.inner);
        let subscription = self.inner.port.on_change(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                FullscreenController { inner }.reconcile();
            }
        }));
        *self.inner.change.borrow_mut() = Some(subscription);
        self.reconcile();
    }

    pub fn deactivate(&self) {
        self.inner.change.borrow_mut().take();
    }

    pub fn mode(&self) -> PresentationMode {
        self.inner.mode.get()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode().is_fullscreen()
    }

    /// Whether the current fullscreen is the simulated fallback
    pub fn is_simulated(&self) -> bool {
        self.inner.simulated.get()
    }

    pub fn set_on_change(&self, callback: impl FnMut(&PresentationMode) + 'static) {
        self.inner.on_change.set(callback);
    }

    /// Recompute the mode from all platform accessors plus the simulated flag
    pub fn reconcile(&self) {
        let native = FullscreenVendor::PROBE_ORDER
            .into_iter()
            .any(|vendor| self.inner.port.has_fullscreen_element(vendor));
        let mode = PresentationMode::from_active(native || self.inner.simulated.get());
        if self.inner.mode.replace(mode) != mode {
            tracing::debug!(?mode, native, "Presentation mode changed");
            self.inner.on_change.emit(&mode);
        }
    }

    /// Enter fullscreen
    ///
    /// Never fails: rejections degrade to the simulated fallback on mobile
    /// and are logged on desktop.
    pub async fn enter(&self) {
        if self.is_fullscreen() {
            return;
        }
        let port = &self.inner.port;
        match FullscreenVendor::first_available(|v| port.can_request(v)) {
            Some(vendor) => match port.request(vendor).await {
                Ok(()) => self.reconcile(),
                Err(e) if self.inner.device.is_mobile() => {
                    tracing::warn!(?vendor, "{}; using simulated fullscreen", e);
                    self.set_simulated(true);
                }
                Err(e) => tracing::error!(?vendor, "{}", e),
            },
            None if self.inner.device.is_mobile() => {
                tracing::debug!("No fullscreen capability; using simulated fullscreen");
                self.set_simulated(true);
            }
            None => tracing::info!("Fullscreen unsupported on this platform"),
        }
    }

    /// Leave fullscreen
    ///
    /// Simulated fullscreen is left without touching the platform. On mobile a
    /// failed or impossible exit still returns the panel to windowed.
    pub async fn exit(&self) {
        if self.inner.simulated.get() {
            self.set_simulated(false);
            return;
        }
        let port = &self.inner.port;
        match FullscreenVendor::first_available(|v| port.can_exit(v)) {
            Some(vendor) => match port.exit(vendor).await {
                Ok(()) => self.reconcile(),
                Err(e) if self.inner.device.is_mobile() => {
                    tracing::warn!(?vendor, "{}; leaving fullscreen anyway", e);
                    self.force_windowed();
                }
                Err(e) => {
                    tracing::error!(?vendor, "{}", e);
                    self.reconcile();
                }
            },
            None if self.inner.device.is_mobile() => self.force_windowed(),
            None => self.reconcile(),
        }
    }

    /// Enter when windowed, exit when fullscreen
    pub async fn toggle(&self) {
        if self.is_fullscreen() {
            self.exit().await;
        } else {
            self.enter().await;
        }
    }

    /// Synchronous best-effort exit for teardown paths that cannot await
    ///
    /// Clears the simulated flag and fires the platform exit without waiting
    /// for its outcome; the change event reconciles the mode later.
    pub fn release(&self) {
        if self.inner.simulated.get() {
            self.set_simulated(false);
            return;
        }
        if !self.is_fullscreen() {
            return;
        }
        let port = &self.inner.port;
        if let Some(vendor) = FullscreenVendor::first_available(|v| port.can_exit(v)) {
            drop(port.exit(vendor));
        }
    }

    /// Show the panel windowed whatever the platform reports
    ///
    /// Holds until the next platform change event reconciles the mode.
    fn force_windowed(&self) {
        self.inner.simulated.set(false);
        let mode = PresentationMode::Windowed;
        if self.inner.mode.replace(mode) != mode {
            tracing::debug!(?mode, "Presentation mode forced");
            self.inner.on_change.emit(&mode);
        }
    }

    fn set_simulated(&self, active: bool) {
        self.inner.simulated.set(active);
        self.reconcile();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{FakeFullscreen, FakeViewport};
    use turbo_racing_domain::Viewport;

    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)";
    const DESKTOP: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) Safari/605.1.15";

    fn controller(user_agent: &str, fullscreen: &FakeFullscreen) -> FullscreenController {
        let viewport = FakeViewport::new(Some(user_agent), Viewport::new(1024.0, 768.0));
        let device = DeviceDetector::new(Rc::new(viewport));
        device.activate();
        let controller = FullscreenController::new(Rc::new(fullscreen.clone()), device);
        controller.activate();
        controller
    }

    #[tokio::test]
    async fn test_enter_uses_standard_api_first() {
        let fullscreen = FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER);
        let controller = controller(DESKTOP, &fullscreen);

        controller.enter().await;

        assert!(controller.is_fullscreen());
        assert!(!controller.is_simulated());
        assert_eq!(fullscreen.requests(), vec![FullscreenVendor::Standard]);
    }

    #[tokio::test]
    async fn test_enter_falls_back_to_prefixed_api() {
        let fullscreen = FakeFullscreen::with_vendors(&[FullscreenVendor::Webkit]);
        let controller = controller(DESKTOP, &fullscreen);

        controller.enter().await;

        assert!(controller.is_fullscreen());
        assert_eq!(fullscreen.requests(), vec![FullscreenVendor::Webkit]);
    }

    #[tokio::test]
    async fn test_rejected_request_on_mobile_uses_simulation() {
        let fullscreen = FakeFullscreen::with_vendors(&[FullscreenVendor::Standard]);
        fullscreen.reject_requests(true);
        let controller = controller(IPAD, &fullscreen);

        controller.enter().await;
        assert!(controller.is_fullscreen());
        assert!(controller.is_simulated());

        controller.exit().await;
        assert!(!controller.is_fullscreen());
        assert!(fullscreen.exits().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_request_on_desktop_keeps_windowed() {
        let fullscreen = FakeFullscreen::with_vendors(&[FullscreenVendor::Standard]);
        fullscreen.reject_requests(true);
        let controller = controller(DESKTOP, &fullscreen);

        controller.enter().await;

        assert_eq!(controller.mode(), PresentationMode::Windowed);
        assert!(!controller.is_simulated());
    }

    #[tokio::test]
    async fn test_no_capability_on_mobile_simulates() {
        let fullscreen = FakeFullscreen::with_vendors(&[]);
        let controller = controller(IPAD, &fullscreen);

        controller.toggle().await;
        assert!(controller.is_fullscreen());

        controller.toggle().await;
        assert!(!controller.is_fullscreen());
    }

    #[tokio::test]
    async fn test_no_capability_on_desktop_is_unsupported() {
        let fullscreen = FakeFullscreen::with_vendors(&[]);
        let controller = controller(DESKTOP, &fullscreen);

        controller.enter().await;

        assert!(!controller.is_fullscreen());
        assert!(fullscreen.requests().is_empty());
    }

    #[test]
    fn test_any_vendor_accessor_means_fullscreen() {
        let fullscreen = FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER);
        let controller = controller(DESKTOP, &fullscreen);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.set_on_change(move |m| sink.borrow_mut().push(*m));

        // Platform entered fullscreen on its own (e.g. a browser shortcut)
        fullscreen.set_element(FullscreenVendor::Ms, true);
        assert!(controller.is_fullscreen());

        fullscreen.set_element(FullscreenVendor::Ms, false);
        assert!(!controller.is_fullscreen());

        assert_eq!(
            *seen.borrow(),
            vec![PresentationMode::Fullscreen, PresentationMode::Windowed]
        );
    }

    #[tokio::test]
    async fn test_exit_native_fullscreen() {
        let fullscreen = FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER);
        let controller = controller(DESKTOP, &fullscreen);
        controller.enter().await;

        controller.exit().await;

        assert!(!controller.is_fullscreen());
        assert_eq!(fullscreen.exits(), vec![FullscreenVendor::Standard]);
    }

    #[tokio::test]
    async fn test_rejected_exit_on_mobile_returns_to_windowed() {
        let fullscreen = FakeFullscreen::with_vendors(&[FullscreenVendor::Webkit]);
        let controller = controller(IPAD, &fullscreen);
        controller.enter().await;
        assert!(controller.is_fullscreen());
        assert!(!controller.is_simulated());
        fullscreen.reject_exits(true);

        controller.toggle().await;

        assert_eq!(controller.mode(), PresentationMode::Windowed);
        assert_eq!(fullscreen.exits(), vec![FullscreenVendor::Webkit]);

        // The platform reporting its real state again wins
        fullscreen.set_element(FullscreenVendor::Webkit, true);
        assert!(controller.is_fullscreen());
    }

    #[tokio::test]
    async fn test_rejected_exit_on_desktop_keeps_platform_state() {
        let fullscreen = FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER);
        let controller = controller(DESKTOP, &fullscreen);
        controller.enter().await;
        fullscreen.reject_exits(true);

        controller.exit().await;

        assert_eq!(controller.mode(), PresentationMode::Fullscreen);
    }

    #[tokio::test]
    async fn test_release_exits_without_awaiting() {
        let fullscreen = FakeFullscreen::with_vendors(&FullscreenVendor::PROBE_ORDER);
        let controller = controller(DESKTOP, &fullscreen);
        controller.enter().await;

        controller.release();

        assert!(!controller.is_fullscreen());
    }
}
