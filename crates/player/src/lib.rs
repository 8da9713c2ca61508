//! Turbo Racing site crate.
//!
//! Pages, the runtime embedding component, and the browser adapters behind it.
//! Browser bindings are selected with `cfg(target_arch = "wasm32")`; everything
//! else builds and tests on native.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod ui;

// Re-export commonly used entrypoints
pub use application::EmbedConfig;
pub use state::Platform;
pub use ui::app;
pub use ui::{use_platform, Route, ShellKind};
