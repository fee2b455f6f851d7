/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Quality of service.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data timeliness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum Timeliness {
    /// Not specified; not encodable.
    #[default]
    Unspecified = 0,
    /// Realtime.
    Realtime = 1,
    /// Delayed by an unknown amount.
    DelayedUnknown = 2,
    /// Delayed by `time_info` seconds.
    Delayed = 3,
}

impl Timeliness {
    /// Creates a timeliness from its 3-bit wire value.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }
}

/// Data rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum Rate {
    /// Not specified; not encodable.
    #[default]
    Unspecified = 0,
    /// Every tick.
    TickByTick = 1,
    /// Just-in-time conflated.
    JitConflated = 2,
    /// Conflated to `rate_info` milliseconds.
    TimeConflated = 3,
}

impl Rate {
    /// Creates a rate from its 4-bit wire value.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        <Self as FromPrimitive>::from_u8(value)
    }
}

/// Quality of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Qos {
    /// Timeliness class.
    pub timeliness: Timeliness,
    /// Rate class.
    pub rate: Rate,
    /// True if the QoS may change over the life of the stream.
    pub dynamic: bool,
    /// Delay in seconds, meaningful for [`Timeliness::Delayed`].
    pub time_info: u16,
    /// Conflation interval in milliseconds, meaningful for [`Rate::TimeConflated`].
    pub rate_info: u16,
}

impl Qos {
    /// Creates a static QoS.
    #[must_use]
    pub const fn new(timeliness: Timeliness, rate: Rate) -> Self {
        Self {
            timeliness,
            rate,
            dynamic: false,
            time_info: 0,
            rate_info: 0,
        }
    }

    /// Realtime, tick-by-tick.
    #[must_use]
    pub const fn realtime() -> Self {
        Self::new(Timeliness::Realtime, Rate::TickByTick)
    }

    /// Sets the dynamic flag.
    #[must_use]
    pub const fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Sets the delay in seconds.
    #[must_use]
    pub const fn with_time_info(mut self, time_info: u16) -> Self {
        self.time_info = time_info;
        self
    }

    /// Sets the conflation interval in milliseconds.
    #[must_use]
    pub const fn with_rate_info(mut self, rate_info: u16) -> Self {
        self.rate_info = rate_info;
        self
    }

    /// Returns true if `time_info` travels on the wire.
    #[must_use]
    pub const fn has_time_info(&self) -> bool {
        self.timeliness as u8 > Timeliness::DelayedUnknown as u8
    }

    /// Returns true if `rate_info` travels on the wire.
    #[must_use]
    pub const fn has_rate_info(&self) -> bool {
        self.rate as u8 > Rate::JitConflated as u8
    }

    /// Returns the wire length: 1, 3, or 5.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        let mut len = 1;
        if self.has_time_info() {
            len += 2;
        }
        if self.has_rate_info() {
            len += 2;
        }
        len
    }
}

impl fmt::Display for Timeliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unspecified => "Unspecified",
            Self::Realtime => "Realtime",
            Self::DelayedUnknown => "DelayedByUnknown",
            Self::Delayed => "Delayed",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unspecified => "Unspecified",
            Self::TickByTick => "TickByTick",
            Self::JitConflated => "JustInTimeConflated",
            Self::TimeConflated => "TimeConflated",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Qos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qos: {}", self.timeliness)?;
        if self.has_time_info() {
            write!(f, "({})", self.time_info)?;
        }
        write!(f, "/{}", self.rate)?;
        if self.has_rate_info() {
            write!(f, "({})", self.rate_info)?;
        }
        f.write_str(if self.dynamic { "/Dynamic" } else { "/Static" })
    }
}
