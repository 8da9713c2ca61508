//! Player port definitions.
//!
//! Traits the application services talk to. Browser implementations live in
//! `infrastructure`; in-memory fakes for tests live in `infrastructure::testing`.

pub mod outbound;
