//! # API Shared
//!
//! Shared definitions for the ward board APIs.
//!
//! Contains:
//! - Response envelopes (`responses` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `ward-board-run` binary.

pub mod health;
pub mod responses;

pub use health::HealthService;
pub use responses::*;
