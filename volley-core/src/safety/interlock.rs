//! Interlock monitor implementation
//!
//! The interlock is closed only while a magazine is seated and the eject
//! door is shut. There is no retry or latched error state: the status is
//! recomputed from the debounced inputs every tick.

use crate::input::Inputs;

/// Which interlock contact is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockFault {
    /// Magazine-present switch is open
    MagazineRemoved,
    /// Eject/safety door is open
    EjectOpen,
}

/// Interlock condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockStatus {
    /// Magazine seated and eject door closed; actuators may run
    Closed,
    /// Interlock open; all actuators must stop
    Open(InterlockFault),
}

impl InterlockStatus {
    /// Evaluate the interlock from one tick's committed inputs
    ///
    /// A missing magazine is reported ahead of an open eject door.
    pub fn from_inputs(inputs: &Inputs) -> Self {
        if !inputs.magazine {
            InterlockStatus::Open(InterlockFault::MagazineRemoved)
        } else if !inputs.eject_closed {
            InterlockStatus::Open(InterlockFault::EjectOpen)
        } else {
            InterlockStatus::Closed
        }
    }

    /// Check if the actuators are allowed to run
    pub fn is_closed(&self) -> bool {
        matches!(self, InterlockStatus::Closed)
    }
}

/// Interlock status change reported by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockEvent {
    /// Interlock opened, or the open contact changed
    Opened(InterlockFault),
    /// Interlock closed again
    Closed,
}

/// Tracks interlock transitions across ticks
///
/// The control loop uses this to log faults once per transition instead of
/// on every tick the interlock stays open.
#[derive(Debug, Clone)]
pub struct InterlockMonitor {
    /// Status on the previous tick
    status: InterlockStatus,
    /// Number of closed-to-open transitions since cold start
    fault_count: u16,
}

impl Default for InterlockMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl InterlockMonitor {
    /// Create a monitor in the cold-start state (all inputs inactive)
    pub fn new() -> Self {
        Self {
            status: InterlockStatus::Open(InterlockFault::MagazineRemoved),
            fault_count: 0,
        }
    }

    /// Update with this tick's status
    ///
    /// Returns an event only when the status differs from the previous tick.
    pub fn update(&mut self, status: InterlockStatus) -> Option<InterlockEvent> {
        if status == self.status {
            return None;
        }

        let was_closed = self.status.is_closed();
        self.status = status;

        match status {
            InterlockStatus::Closed => Some(InterlockEvent::Closed),
            InterlockStatus::Open(fault) => {
                if was_closed {
                    self.fault_count = self.fault_count.saturating_add(1);
                }
                Some(InterlockEvent::Opened(fault))
            }
        }
    }

    /// Status recorded on the last update
    pub fn status(&self) -> InterlockStatus {
        self.status
    }

    /// Number of times the interlock opened while armed
    pub fn fault_count(&self) -> u16 {
        self.fault_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(magazine: bool, eject_closed: bool) -> Inputs {
        Inputs {
            magazine,
            eject_closed,
            ..Inputs::default()
        }
    }

    #[test]
    fn test_status_from_inputs() {
        assert_eq!(
            InterlockStatus::from_inputs(&inputs(true, true)),
            InterlockStatus::Closed
        );
        assert_eq!(
            InterlockStatus::from_inputs(&inputs(false, true)),
            InterlockStatus::Open(InterlockFault::MagazineRemoved)
        );
        assert_eq!(
            InterlockStatus::from_inputs(&inputs(true, false)),
            InterlockStatus::Open(InterlockFault::EjectOpen)
        );
        // Magazine takes precedence
        assert_eq!(
            InterlockStatus::from_inputs(&inputs(false, false)),
            InterlockStatus::Open(InterlockFault::MagazineRemoved)
        );
    }

    #[test]
    fn test_cold_start_is_silent() {
        let mut monitor = InterlockMonitor::new();
        let status = InterlockStatus::from_inputs(&Inputs::default());
        assert_eq!(monitor.update(status), None);
        assert_eq!(monitor.fault_count(), 0);
    }

    #[test]
    fn test_reports_transitions_once() {
        let mut monitor = InterlockMonitor::new();

        assert_eq!(
            monitor.update(InterlockStatus::Closed),
            Some(InterlockEvent::Closed)
        );
        assert_eq!(monitor.update(InterlockStatus::Closed), None);

        let open = InterlockStatus::Open(InterlockFault::EjectOpen);
        assert_eq!(
            monitor.update(open),
            Some(InterlockEvent::Opened(InterlockFault::EjectOpen))
        );
        assert_eq!(monitor.update(open), None);
        assert_eq!(monitor.fault_count(), 1);
    }

    #[test]
    fn test_fault_change_while_open_is_not_a_new_fault() {
        let mut monitor = InterlockMonitor::new();
        monitor.update(InterlockStatus::Closed);
        monitor.update(InterlockStatus::Open(InterlockFault::EjectOpen));

        assert_eq!(
            monitor.update(InterlockStatus::Open(InterlockFault::MagazineRemoved)),
            Some(InterlockEvent::Opened(InterlockFault::MagazineRemoved))
        );
        assert_eq!(monitor.fault_count(), 1);
    }
}
