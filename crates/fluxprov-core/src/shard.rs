// Shard-group duration handling for bucket retention rules.
//
// The attribute boundary speaks a flat integer (absent/0, -1, positive);
// internally the three cases are a tagged enum so payload construction and
// read-back projection cannot confuse "unset" with "unmanaged".

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

/// Flat encoding for [`ShardGroupDuration::Unmanaged`].
pub const UNMANAGED_SENTINEL: i64 = -1;

/// Server-side default shard-group duration for a retention interval.
///
/// | retention          | shard group |
/// |--------------------|-------------|
/// | `< 2 days`         | 1 hour      |
/// | `< 180 days`       | 1 day       |
/// | otherwise          | 7 days      |
///
/// An interval of 0 (infinite retention) falls in the first bucket.
pub fn default_shard_group_duration(every_seconds: i64) -> i64 {
    if every_seconds < 2 * DAY {
        HOUR
    } else if every_seconds < 180 * DAY {
        DAY
    } else {
        7 * DAY
    }
}

/// How a declared retention rule wants its shard-group duration handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShardGroupDuration {
    /// Not declared: send the value derived from the retention interval.
    #[default]
    Default,
    /// Declared as `-1`: leave it to the server, never send it.
    Unmanaged,
    /// Declared as a positive number of seconds: send it verbatim.
    Explicit(i64),
}

/// Rejected flat values (negative, other than `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("shard_group_duration_seconds must be -1, 0 or positive, got {0}")]
pub struct InvalidShardDuration(pub i64);

impl ShardGroupDuration {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Decode the flat attribute value.
    pub fn from_flat(value: Option<i64>) -> Result<Self, InvalidShardDuration> {
        match value {
            None | Some(0) => Ok(Self::Default),
            Some(UNMANAGED_SENTINEL) => Ok(Self::Unmanaged),
            Some(secs) if secs > 0 => Ok(Self::Explicit(secs)),
            Some(other) => Err(InvalidShardDuration(other)),
        }
    }

    /// Flat attribute value; `None` means "leave the attribute unset".
    pub fn to_flat(self) -> Option<i64> {
        match self {
            Self::Default => None,
            Self::Unmanaged => Some(UNMANAGED_SENTINEL),
            Self::Explicit(secs) => Some(secs),
        }
    }

    /// Value to put in the create/update payload for a rule with the given
    /// retention interval.
    pub fn to_payload(self, every_seconds: i64) -> Option<i64> {
        match self {
            Self::Default => Some(default_shard_group_duration(every_seconds)),
            Self::Unmanaged => None,
            Self::Explicit(secs) => Some(secs),
        }
    }

    /// What read-back surfaces, given how the rule was declared and what the
    /// server stored.
    ///
    /// Only an explicit declaration reports the server's value; an unmanaged
    /// declaration echoes `-1`; an undeclared one stays unset so the derived
    /// default never shows up as drift.
    pub fn project(self, server: Option<i64>) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Unmanaged => Self::Unmanaged,
            Self::Explicit(_) => match server {
                Some(secs) if secs > 0 => Self::Explicit(secs),
                _ => Self::Default,
            },
        }
    }
}

impl Serialize for ShardGroupDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_flat().unwrap_or(0))
    }
}

impl<'de> Deserialize<'de> for ShardGroupDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Self::from_flat(raw).map_err(serde::de::Error::custom)
    }
}
