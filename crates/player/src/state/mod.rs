//! State containers for player-side dependency injection
//!
//! This module contains DI containers that aggregate services and adapters.
//! These are concrete implementations that belong next to the adapters,
//! not in the ports layer.

mod platform;

pub use platform::{Platform, PlatformFactory};
