//! Patient keys.

use core::fmt;
use core::str::FromStr;

/// Identifier of a monitored patient, as used in the endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PatientId(pub u32);

impl PatientId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PatientId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for PatientId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: PatientId = " 4 ".parse().unwrap();
        assert_eq!(id, PatientId(4));
        assert_eq!(id.to_string(), "4");
        assert!("four".parse::<PatientId>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&PatientId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
