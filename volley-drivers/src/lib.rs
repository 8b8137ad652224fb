//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in volley-core on top of `embedded-hal` 1.0:
//!
//! - Input sampling from GPIO pins
//! - ESC outputs driven by PWM pulse width
//! - A flywheel + pusher motor sink

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod motor;
