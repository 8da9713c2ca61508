//! Turbo Racing domain.
//!
//! Pure value types and rules for embedding the external game runtime:
//! build variants and their configuration bundles, load-state progression,
//! device classification, fullscreen vendor tables, and overlay selection.
//! Nothing here touches the browser; the player crate supplies the adapters.

pub mod device;
pub mod error;
pub mod fullscreen_vendor;
pub mod load_state;
pub mod overlays;
pub mod presentation;
pub mod variant;

pub use device::{is_mobile_user_agent, DeviceProfile, Viewport};
pub use error::{
    FullscreenRequestError, InstantiationError, LoadError, LoadScriptError, ShutdownError,
};
pub use fullscreen_vendor::FullscreenVendor;
pub use load_state::LoadState;
pub use overlays::{OverlayInputs, Overlays, ToggleIcon};
pub use presentation::PresentationMode;
pub use variant::{BuildSettings, RuntimeConfig, RuntimeVariant};
