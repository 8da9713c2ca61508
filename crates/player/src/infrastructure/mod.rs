//! Infrastructure adapters
//!
//! `platform` binds the outbound ports to the browser through `web-sys`
//! (wasm32 only). `testing` provides in-memory fakes of the same ports.

pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
