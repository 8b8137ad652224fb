//! Safety interlock monitoring
//!
//! Detects an open interlock (magazine removed or eject door open). The
//! controllers force both actuators to Stop and empty the fire queue on the
//! same tick the interlock opens.

pub mod interlock;

pub use interlock::{InterlockEvent, InterlockFault, InterlockMonitor, InterlockStatus};
