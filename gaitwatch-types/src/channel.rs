//! Sensor channels.

use core::fmt;

use crate::CHANNEL_COUNT;

/// Which foot a sensor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Foot {
    Left,
    Right,
}

/// One of the six insole pressure sensors.
///
/// The discriminant is the sensor's index in the `sensors` array reported by
/// the monitoring endpoint, so `Channel::ALL[i].index() == i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    L0 = 0,
    L1 = 1,
    L2 = 2,
    R0 = 3,
    R1 = 4,
    R2 = 5,
}

impl Channel {
    /// All channels in wire order.
    pub const ALL: [Channel; CHANNEL_COUNT] =
        [Channel::L0, Channel::L1, Channel::L2, Channel::R0, Channel::R1, Channel::R2];

    /// Index of this channel in value and anomaly arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel for a wire index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short display label ("L0" .. "R2").
    pub const fn label(self) -> &'static str {
        match self {
            Channel::L0 => "L0",
            Channel::L1 => "L1",
            Channel::L2 => "L2",
            Channel::R0 => "R0",
            Channel::R1 => "R1",
            Channel::R2 => "R2",
        }
    }

    /// The foot this sensor belongs to.
    pub const fn foot(self) -> Foot {
        match self {
            Channel::L0 | Channel::L1 | Channel::L2 => Foot::Left,
            Channel::R0 | Channel::R1 | Channel::R2 => Foot::Right,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_wire_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
            assert_eq!(Channel::from_index(i), Some(*channel));
        }
        assert_eq!(Channel::from_index(CHANNEL_COUNT), None);
    }

    #[test]
    fn test_foot() {
        assert_eq!(Channel::L2.foot(), Foot::Left);
        assert_eq!(Channel::R0.foot(), Foot::Right);
        assert_eq!(Channel::R1.to_string(), "R1");
    }
}
