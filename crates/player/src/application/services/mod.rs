//! Embedding services
//!
//! Leaf first: the device detector and fullscreen controller are composed by
//! the runtime loader's owner, `EmbedShell`.

mod callback;
mod chrome_lease;
mod device_detector;
mod embed_shell;
mod fullscreen_controller;
mod runtime_loader;

pub use chrome_lease::ChromeLease;
pub use device_detector::DeviceDetector;
pub use embed_shell::{EmbedShell, ShellSnapshot};
pub use fullscreen_controller::FullscreenController;
pub use runtime_loader::{LoadTask, RuntimeLoader};
