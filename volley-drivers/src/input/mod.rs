//! Input sampler implementations

pub mod gpio;

pub use gpio::GpioInputs;
