//! Configuration types
//!
//! Board-agnostic configuration structures. Configuration is static and
//! compiled into the firmware; it is never written back at runtime.

pub mod types;

pub use types::*;
