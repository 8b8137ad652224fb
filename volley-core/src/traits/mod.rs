//! Hardware abstraction traits
//!
//! These traits define the interface between the fire-control logic
//! and hardware-specific implementations.

pub mod input;
pub mod motor;

pub use input::InputSampler;
pub use motor::{Actuator, Decision, MotorCommand, MotorError, MotorSink};
