//! Board-agnostic core logic for the blaster firmware
//!
//! This crate contains all fire-control logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (input sampler, motor sink)
//! - Input debouncing
//! - Flywheel, pusher and fire-queue controllers
//! - Safety interlock monitoring
//! - Configuration type definitions
//!
//! Everything is driven by [`control::FireControl::tick`], called once per
//! control tick with a wrapping millisecond timestamp.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod input;
pub mod safety;
pub mod time;
pub mod traits;
