//! Motor output implementations
//!
//! Both actuators are driven by hobby ESCs that take a servo-style pulse
//! (nominally 1000-2000 µs in a 20 ms frame):
//!
//! - Flywheel: unidirectional ESC, minimum pulse is off
//! - Pusher: bidirectional ESC, neutral pulse brakes

pub mod esc;
pub mod pair;

pub use esc::{Esc, EscConfig, EscProfile};
pub use pair::EscPair;
