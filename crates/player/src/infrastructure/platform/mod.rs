//! Platform-specific implementations
//!
//! Browser implementations of the port traits defined in
//! `ports/outbound`. The site only runs in the browser, so everything here is
//! selected at compile time for `wasm32`; native builds compile the services
//! and their tests against `infrastructure::testing` instead.

#[cfg(target_arch = "wasm32")]
mod runtime_host;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use runtime_host::WasmRuntimeHost;
#[cfg(target_arch = "wasm32")]
pub use wasm::{
    create_platform, read_embed_config, WasmFullscreen, WasmPageChrome, WasmSleep, WasmSpawner,
    WasmViewport,
};
