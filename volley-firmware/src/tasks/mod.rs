//! Embassy async tasks

mod control;

pub use control::*;
