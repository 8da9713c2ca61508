//! Outbound ports - Interfaces for the browser and the external runtime
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the embedding services to run without depending on concrete
//! browser bindings.

pub mod fullscreen_port;
pub mod platform;
pub mod runtime_host_port;

pub use fullscreen_port::{FullscreenFuture, FullscreenPort};
pub use platform::{PageChromePort, SleepPort, SpawnPort, Subscription, ViewportPort};
pub use runtime_host_port::{
    InjectedScript, InstanceFuture, ProgressCallback, RuntimeHostPort, RuntimeInstance,
    RuntimeSurface, ScriptFuture, ScriptInjection, SurfaceError,
};

#[cfg(any(test, feature = "testing"))]
pub use platform::MockPageChromePort;
