//! Logical input channels

/// Number of debounced input channels
pub const CHANNEL_COUNT: usize = 7;

/// Debounced input channel identity
///
/// All channels are logical `true` when the switch or sensor is active
/// (trigger pulled, magazine seated, eject door closed, pusher at home,
/// dart present, ready switch on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Trigger switch
    Trigger,
    /// Magazine-present switch
    Magazine,
    /// Eject/safety door closed
    Eject,
    /// Pusher home position sensor
    Home,
    /// Left chamber dart sensor
    ChamberLeft,
    /// Right chamber dart sensor
    ChamberRight,
    /// Ready (rev) switch
    Ready,
}

impl Channel {
    /// All channels in filter-table order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Trigger,
        Channel::Magazine,
        Channel::Eject,
        Channel::Home,
        Channel::ChamberLeft,
        Channel::ChamberRight,
        Channel::Ready,
    ];

    /// Position of this channel in the filter table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of all committed input values for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    pub trigger: bool,
    pub magazine: bool,
    pub eject_closed: bool,
    pub home: bool,
    pub chamber_left: bool,
    pub chamber_right: bool,
    pub ready: bool,
}

impl Inputs {
    /// Get the committed value for `channel`
    pub fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::Trigger => self.trigger,
            Channel::Magazine => self.magazine,
            Channel::Eject => self.eject_closed,
            Channel::Home => self.home,
            Channel::ChamberLeft => self.chamber_left,
            Channel::ChamberRight => self.chamber_right,
            Channel::Ready => self.ready,
        }
    }

    /// Set the committed value for `channel`
    pub fn set(&mut self, channel: Channel, value: bool) {
        let slot = match channel {
            Channel::Trigger => &mut self.trigger,
            Channel::Magazine => &mut self.magazine,
            Channel::Eject => &mut self.eject_closed,
            Channel::Home => &mut self.home,
            Channel::ChamberLeft => &mut self.chamber_left,
            Channel::ChamberRight => &mut self.chamber_right,
            Channel::Ready => &mut self.ready,
        };
        *slot = value;
    }

    /// Both chamber sensors report a dart
    pub fn chambered(&self) -> bool {
        self.chamber_left && self.chamber_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_table_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_get_set_roundtrip_per_channel() {
        for channel in Channel::ALL {
            let mut inputs = Inputs::default();
            inputs.set(channel, true);
            assert!(inputs.get(channel));
            // No other channel changed
            for other in Channel::ALL.iter().filter(|c| **c != channel) {
                assert!(!inputs.get(*other));
            }
        }
    }

    #[test]
    fn test_chambered_needs_both() {
        let mut inputs = Inputs::default();
        inputs.chamber_left = true;
        assert!(!inputs.chambered());
        inputs.chamber_right = true;
        assert!(inputs.chambered());
    }
}
