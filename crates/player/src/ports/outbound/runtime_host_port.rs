//! Runtime host port - where the external runtime gets mounted
//!
//! The host owns the mount surface (a page region). A load session asks it to
//! clear the region, create a fresh drawing surface inside it, and inject the
//! variant's loader script. Every object handed out here is owned by the
//! session record in `RuntimeLoader`, so teardown only needs that record.

use std::{future::Future, pin::Pin};

use thiserror::Error;
use turbo_racing_domain::{
    InstantiationError, LoadScriptError, RuntimeConfig, ShutdownError,
};

/// Resolves once the injected script has loaded or failed
pub type ScriptFuture = Pin<Box<dyn Future<Output = Result<(), LoadScriptError>>>>;

/// Resolves with the instantiated runtime or the rejection reason
pub type InstanceFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn RuntimeInstance>, InstantiationError>>>>;

/// Receives load progress fractions reported by the runtime
pub type ProgressCallback = Box<dyn FnMut(f64)>;

/// The mount surface could not host a new drawing surface
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("mount surface unavailable: {0}")]
pub struct SurfaceError(pub String);

/// A loader script node attached to the page
pub trait InjectedScript {
    /// Detach the node and its load handlers. Must be safe to call twice.
    fn remove(&self);
}

/// A freshly created drawing surface inside the mount surface
pub trait RuntimeSurface {
    /// Invoke the global instantiation entrypoint installed by the loader script
    fn instantiate(&self, config: &RuntimeConfig, on_progress: ProgressCallback) -> InstanceFuture;
}

/// A live external runtime instance
pub trait RuntimeInstance {
    /// Whether the instance exposes a shutdown operation
    fn can_shutdown(&self) -> bool;

    /// Shut the instance down. Only called when `can_shutdown` is true.
    fn shutdown(&self) -> Result<(), ShutdownError>;
}

/// A script node plus the future observing its load
pub struct ScriptInjection {
    pub node: Box<dyn InjectedScript>,
    pub loaded: ScriptFuture,
}

/// The page region the external runtime renders into
pub trait RuntimeHostPort {
    /// Remove every child of the mount surface
    fn clear_mount(&self);

    /// Create a new drawing surface filling the mount surface
    fn create_surface(&self) -> Result<Box<dyn RuntimeSurface>, SurfaceError>;

    /// Attach a loader script with the given source
    fn inject_script(&self, src: &str) -> Result<ScriptInjection, LoadScriptError>;
}
