//! Embedding shell
//!
//! Owns one mount of the runtime panel: the selected variant, whether a
//! session is started, the maximize-hint flag and the page chrome lease. It
//! composes the device detector, fullscreen controller and runtime loader and
//! republishes their changes as a single `ShellSnapshot` for the UI.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use turbo_racing_domain::{
    DeviceProfile, LoadState, OverlayInputs, Overlays, PresentationMode, RuntimeVariant,
};

use super::callback::Callback;
use super::{ChromeLease, DeviceDetector, FullscreenController, LoadTask, RuntimeLoader};
use crate::application::EmbedConfig;
use crate::ports::outbound::PageChromePort;
use crate::state::Platform;

/// Everything the UI needs to render one frame of the panel
#[derive(Debug, Clone, PartialEq)]
pub struct ShellSnapshot {
    pub variant: RuntimeVariant,
    pub started: bool,
    pub load: LoadState,
    pub mode: PresentationMode,
    pub device: DeviceProfile,
    pub overlays: Overlays,
    /// The variant selector only accepts input while not started
    pub selector_enabled: bool,
}

struct ShellInner {
    variant: Cell<RuntimeVariant>,
    started: Cell<bool>,
    hint_dismissed: Cell<bool>,
    detector: DeviceDetector,
    fullscreen: FullscreenController,
    loader: RuntimeLoader,
    chrome: Rc<dyn PageChromePort>,
    chrome_lease: RefCell<Option<ChromeLease>>,
    on_change: Callback<ShellSnapshot>,
}

impl ShellInner {
    fn release(&self) {
        self.loader.stop();
        self.fullscreen.release();
        self.fullscreen.deactivate();
        self.detector.deactivate();
        self.started.set(false);
        self.chrome_lease.borrow_mut().take();
    }
}

impl Drop for ShellInner {
    fn drop(&mut self) {
        self.release();
    }
}

/// The runtime panel's state machine
#[derive(Clone)]
pub struct EmbedShell {
    inner: Rc<ShellInner>,
}

impl EmbedShell {
    pub fn new(platform: &Platform, config: &EmbedConfig) -> Self {
        let detector = DeviceDetector::new(platform.viewport());
        let fullscreen = FullscreenController::new(platform.fullscreen(), detector.clone());
        let loader = RuntimeLoader::new(
            platform.runtime_host(),
            platform.sleep(),
            platform.spawner(),
            config.build.clone(),
            config.load_timeout_ms,
        );

        let shell = Self {
            inner: Rc::new(ShellInner {
                variant: Cell::new(RuntimeVariant::default()),
                started: Cell::new(false),
                hint_dismissed: Cell::new(false),
                detector,
                fullscreen,
                loader,
                chrome: platform.chrome(),
                chrome_lease: RefCell::new(None),
                on_change: Callback::default(),
            }),
        };

        let weak = Rc::downgrade(&shell.inner);
        shell
            .inner
            .detector
            .set_on_change(notifier::<DeviceProfile>(weak.clone()));
        shell
            .inner
            .fullscreen
            .set_on_change(notifier::<PresentationMode>(weak.clone()));
        shell.inner.loader.set_on_change(notifier::<LoadState>(weak));
        shell
    }

    /// Start observing the platform
    pub fn mount(&self) {
        self.inner.detector.activate();
        self.inner.fullscreen.activate();
        tracing::debug!(device = ?self.inner.detector.profile(), "Embed shell mounted");
        self.notify();
    }

    /// Release everything the shell attached to the page
    ///
    /// Same cleanup as dropping the last handle; safe to call repeatedly.
    pub fn unmount(&self) {
        self.inner.release();
        tracing::debug!("Embed shell unmounted");
        self.notify();
    }

    pub fn set_on_change(&self, callback: impl FnMut(&ShellSnapshot) + 'static) {
        self.inner.on_change.set(callback);
    }

    /// Stop publishing snapshots, e.g. before the listener's owner goes away
    pub fn clear_on_change(&self) {
        self.inner.on_change.clear();
    }

    pub fn variant(&self) -> RuntimeVariant {
        self.inner.variant.get()
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    /// Choose the variant for the next start
    ///
    /// Returns false, leaving the selection untouched, while started.
    pub fn select_variant(&self, variant: RuntimeVariant) -> bool {
        if self.is_started() {
            tracing::debug!(%variant, "Variant change ignored while started");
            return false;
        }
        if self.inner.variant.replace(variant) != variant {
            self.notify();
        }
        true
    }

    /// Start a session with the selected variant
    ///
    /// Returns the task driving the load; `None` when already started. The
    /// task may be dropped at any time without leaking the runtime.
    pub fn start(&self) -> Option<LoadTask> {
        if self.is_started() {
            return None;
        }
        self.inner.started.set(true);
        {
            let mut lease = self.inner.chrome_lease.borrow_mut();
            if lease.is_none() {
                *lease = Some(ChromeLease::acquire(Rc::clone(&self.inner.chrome)));
            }
        }
        let task = self.inner.loader.start(self.variant());
        self.notify();
        Some(task)
    }

    /// Stop the session and return to variant selection
    pub async fn stop(&self) {
        self.inner.loader.stop();
        self.inner.started.set(false);
        self.inner.chrome_lease.borrow_mut().take();
        self.notify();
        if self.inner.fullscreen.is_fullscreen() {
            self.inner.fullscreen.exit().await;
        }
    }

    pub fn dismiss_hint(&self) {
        if !self.inner.hint_dismissed.replace(true) {
            self.notify();
        }
    }

    pub async fn toggle_fullscreen(&self) {
        self.inner.fullscreen.toggle().await;
    }

    pub fn overlays(&self) -> Overlays {
        let load = self.inner.loader.state();
        Overlays::compute(OverlayInputs {
            load: &load,
            mode: self.inner.fullscreen.mode(),
            device: self.inner.detector.profile(),
            hint_dismissed: self.inner.hint_dismissed.get(),
            variant: self.variant(),
        })
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let started = self.is_started();
        ShellSnapshot {
            variant: self.variant(),
            started,
            load: self.inner.loader.state(),
            mode: self.inner.fullscreen.mode(),
            device: self.inner.detector.profile(),
            overlays: self.overlays(),
            selector_enabled: !started,
        }
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.inner.on_change.emit(&snapshot);
    }
}

fn notifier<T: 'static>(weak: Weak<ShellInner>) -> impl FnMut(&T) + 'static {
    move |_: &T| {
        if let Some(inner) = weak.upgrade() {
            EmbedShell { inner }.notify();
        }
    }
}
