//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in `infrastructure/platform/wasm.rs`, or by
//!   `FakePlatform::platform()` in tests
//! - Provided to Dioxus context by the app root, through the `PlatformFactory`
//!   the composition root registers
//! - Accessed in UI via `use_context::<Platform>()`

use std::rc::Rc;

use crate::application::EmbedConfig;
use crate::ports::outbound::{
    FullscreenPort, PageChromePort, RuntimeHostPort, SleepPort, SpawnPort, ViewportPort,
};

/// Unified platform services container
///
/// Cheap to clone; every provider sits behind an `Rc`. The browser is single
/// threaded, so nothing here is `Send`.
#[derive(Clone)]
pub struct Platform {
    viewport: Rc<dyn ViewportPort>,
    fullscreen: Rc<dyn FullscreenPort>,
    runtime_host: Rc<dyn RuntimeHostPort>,
    chrome: Rc<dyn PageChromePort>,
    sleep: Rc<dyn SleepPort>,
    spawner: Rc<dyn SpawnPort>,
}

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<V, F, H, C, S, T>(
        viewport: V,
        fullscreen: F,
        runtime_host: H,
        chrome: C,
        sleep: S,
        spawner: T,
    ) -> Self
    where
        V: ViewportPort + 'static,
        F: FullscreenPort + 'static,
        H: RuntimeHostPort + 'static,
        C: PageChromePort + 'static,
        S: SleepPort + 'static,
        T: SpawnPort + 'static,
    {
        Self {
            viewport: Rc::new(viewport),
            fullscreen: Rc::new(fullscreen),
            runtime_host: Rc::new(runtime_host),
            chrome: Rc::new(chrome),
            sleep: Rc::new(sleep),
            spawner: Rc::new(spawner),
        }
    }

    /// Build from providers that are already shared (tests keep a handle to inspect them)
    pub fn from_shared(
        viewport: Rc<dyn ViewportPort>,
        fullscreen: Rc<dyn FullscreenPort>,
        runtime_host: Rc<dyn RuntimeHostPort>,
        chrome: Rc<dyn PageChromePort>,
        sleep: Rc<dyn SleepPort>,
        spawner: Rc<dyn SpawnPort>,
    ) -> Self {
        Self {
            viewport,
            fullscreen,
            runtime_host,
            chrome,
            sleep,
            spawner,
        }
    }

    pub fn viewport(&self) -> Rc<dyn ViewportPort> {
        Rc::clone(&self.viewport)
    }

    pub fn fullscreen(&self) -> Rc<dyn FullscreenPort> {
        Rc::clone(&self.fullscreen)
    }

    pub fn runtime_host(&self) -> Rc<dyn RuntimeHostPort> {
        Rc::clone(&self.runtime_host)
    }

    pub fn chrome(&self) -> Rc<dyn PageChromePort> {
        Rc::clone(&self.chrome)
    }

    pub fn sleep(&self) -> Rc<dyn SleepPort> {
        Rc::clone(&self.sleep)
    }

    pub fn spawner(&self) -> Rc<dyn SpawnPort> {
        Rc::clone(&self.spawner)
    }
}

/// Builds the `Platform` inside the UI runtime
///
/// Launch contexts must be `Send + Sync`; `Platform` holds `Rc`s, so the
/// composition root registers this constructor instead.
#[derive(Clone, Copy)]
pub struct PlatformFactory(pub fn(&EmbedConfig) -> Platform);

impl PlatformFactory {
    pub fn build(&self, config: &EmbedConfig) -> Platform {
        (self.0)(config)
    }
}
