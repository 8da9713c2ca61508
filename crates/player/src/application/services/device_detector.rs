//! Device profile detection
//!
//! Classifies the client once on activation and then tracks orientation on
//! every viewport resize. The device class never changes after activation.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use turbo_racing_domain::DeviceProfile;

use super::callback::Callback;
use crate::ports::outbound::{Subscription, ViewportPort};

struct DetectorInner {
    viewport: Rc<dyn ViewportPort>,
    profile: Cell<DeviceProfile>,
    on_change: Callback<DeviceProfile>,
    resize: RefCell<Option<Subscription>>,
}

/// Tracks the client's `DeviceProfile`
#[derive(Clone)]
pub struct DeviceDetector {
    inner: Rc<DetectorInner>,
}

impl DeviceDetector {
    pub fn new(viewport: Rc<dyn ViewportPort>) -> Self {
        Self {
            inner: Rc::new(DetectorInner {
                viewport,
                profile: Cell::new(DeviceProfile::default()),
                on_change: Callback::default(),
                resize: RefCell::new(None),
            }),
        }
    }

    /// Classify the client and start listening for resizes
    ///
    /// Calling it again reclassifies and replaces the previous subscription.
    pub fn activate(&self) {
        let user_agent = self.inner.viewport.user_agent();
        let profile =
            DeviceProfile::classify(user_agent.as_deref(), self.inner.viewport.viewport());
        tracing::debug!(
            is_mobile = profile.is_mobile,
            is_portrait = profile.is_portrait,
            "Device classified"
        );
        self.set_profile(profile);

        let weak: Weak<DetectorInner> = Rc::downgrade(&self.inner);
        let subscription = self.inner.viewport.on_resize(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                DeviceDetector { inner }.refresh_orientation();
            }
        }));
        *self.inner.resize.borrow_mut() = Some(subscription);
    }

    /// Stop listening for resizes
    pub fn deactivate(&self) {
        self.inner.resize.borrow_mut().take();
    }

    /// Re-evaluate orientation only; the device class is kept
    pub fn refresh_orientation(&self) {
        let current = self.inner.profile.get();
        if !current.is_mobile {
            return;
        }
        self.set_profile(current.with_viewport(self.inner.viewport.viewport()));
    }

    pub fn profile(&self) -> DeviceProfile {
        self.inner.profile.get()
    }

    pub fn is_mobile(&self) -> bool {
        self.inner.profile.get().is_mobile
    }

    pub fn set_on_change(&self, callback: impl FnMut(&DeviceProfile) + 'static) {
        self.inner.on_change.set(callback);
    }

    fn set_profile(&self, profile: DeviceProfile) {
        if self.inner.profile.replace(profile) != profile {
            self.inner.on_change.emit(&profile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::FakeViewport;
    use turbo_racing_domain::Viewport;

    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";

    #[test]
    fn test_activate_classifies_mobile_portrait() {
        let viewport = FakeViewport::new(Some(ANDROID), Viewport::new(400.0, 800.0));
        let detector = DeviceDetector::new(Rc::new(viewport.clone()));

        detector.activate();

        assert_eq!(
            detector.profile(),
            DeviceProfile {
                is_mobile: true,
                is_portrait: true
            }
        );
        assert_eq!(viewport.resize_listeners(), 1);
    }

    #[test]
    fn test_rotation_updates_orientation_without_reactivation() {
        let viewport = FakeViewport::new(Some(ANDROID), Viewport::new(400.0, 800.0));
        let detector = DeviceDetector::new(Rc::new(viewport.clone()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        detector.set_on_change(move |p| sink.borrow_mut().push(*p));
        detector.activate();

        viewport.resize(Viewport::new(800.0, 400.0));

        assert!(detector.is_mobile());
        assert!(!detector.profile().is_portrait);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_desktop_ignores_resizes() {
        let viewport = FakeViewport::new(Some(DESKTOP), Viewport::new(1280.0, 720.0));
        let detector = DeviceDetector::new(Rc::new(viewport.clone()));
        detector.activate();

        viewport.resize(Viewport::new(500.0, 1000.0));

        assert_eq!(detector.profile(), DeviceProfile::default());
    }

    #[test]
    fn test_deactivate_unsubscribes() {
        let viewport = FakeViewport::new(Some(ANDROID), Viewport::new(400.0, 800.0));
        let detector = DeviceDetector::new(Rc::new(viewport.clone()));
        detector.activate();

        detector.deactivate();
        viewport.resize(Viewport::new(800.0, 400.0));

        assert_eq!(viewport.resize_listeners(), 0);
        assert!(detector.profile().is_portrait);
    }

    #[test]
    fn test_unreadable_platform_defaults_to_desktop() {
        let viewport = FakeViewport::unreadable();
        let detector = DeviceDetector::new(Rc::new(viewport.clone()));
        detector.activate();

        assert_eq!(detector.profile(), DeviceProfile::default());
        assert_eq!(viewport.resize_listeners(), 1);

        viewport.resize(Viewport::new(400.0, 800.0));
        assert!(!detector.is_mobile());
    }
}
