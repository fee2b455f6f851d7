/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! RWF Date, Time, and DateTime values.
//!
//! Each value has a reserved blank pattern: an all-zero date, and a time whose
//! fields are all at their maximum encodable value. Conversions to and from
//! `chrono` naive types are provided for non-blank values.

use arrayvec::ArrayString;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Longest `Date::format_iso` output: `65535-255-255`.
pub const DATE_TEXT_CAPACITY: usize = 13;

/// Longest `Time::format_full` output: `255:255:255:65535:65535:65535`.
pub const TIME_TEXT_CAPACITY: usize = 29;

/// Calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Date {
    /// Year, 0 when blank.
    pub year: u16,
    /// Month 1-12, 0 when blank.
    pub month: u8,
    /// Day 1-31, 0 when blank.
    pub day: u8,
}

impl Date {
    /// Creates a new date.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a blank date.
    #[must_use]
    pub const fn blank() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns true if this date is blank.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// Returns true if this date is blank or a real calendar date.
    ///
    /// A zero year is permitted with a valid month and day.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.is_blank() {
            return true;
        }
        if !(1..=12).contains(&self.month) || self.day == 0 {
            return false;
        }
        self.day <= days_in_month(self.year, self.month)
    }

    /// Converts to a `chrono` date.
    ///
    /// # Returns
    /// `None` if the date is blank or not a calendar date.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if self.is_blank() {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }

    /// Formats the date as `YYYY-MM-DD`.
    ///
    /// Fields outside their calendar range are printed in full.
    #[must_use]
    pub fn format_iso(&self) -> ArrayString<DATE_TEXT_CAPACITY> {
        let mut buf = ArrayString::new();
        // capacity covers every field at its type maximum
        let _ = write!(buf, "{:04}-{:02}-{:02}", self.year, self.month, self.day);
        buf
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = NaiveDate;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| value)?;
        Ok(Self::new(year, value.month() as u8, value.day() as u8))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            return Ok(());
        }
        f.write_str(&self.format_iso())
    }
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Time of day with up to nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Time {
    /// Hour 0-23, 255 when blank.
    pub hour: u8,
    /// Minute 0-59, 255 when blank.
    pub minute: u8,
    /// Second 0-60, 255 when blank.
    pub second: u8,
    /// Millisecond 0-999, 65535 when blank.
    pub millisecond: u16,
    /// Microsecond 0-999, 2047 when blank.
    pub microsecond: u16,
    /// Nanosecond 0-999, 2047 when blank.
    pub nanosecond: u16,
}

impl Time {
    /// Blank hour, minute, and second marker.
    pub const BLANK_HMS: u8 = 255;
    /// Blank millisecond marker.
    pub const BLANK_MILLI: u16 = 65535;
    /// Blank microsecond and nanosecond marker.
    pub const BLANK_SUB_MILLI: u16 = 2047;

    /// Creates a time with second resolution.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond: 0,
            microsecond: 0,
            nanosecond: 0,
        }
    }

    /// Returns a copy with the given sub-second fields.
    #[must_use]
    pub const fn with_subsec(mut self, millisecond: u16, microsecond: u16, nanosecond: u16) -> Self {
        self.millisecond = millisecond;
        self.microsecond = microsecond;
        self.nanosecond = nanosecond;
        self
    }

    /// Creates a blank time.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            hour: Self::BLANK_HMS,
            minute: Self::BLANK_HMS,
            second: Self::BLANK_HMS,
            millisecond: Self::BLANK_MILLI,
            microsecond: Self::BLANK_SUB_MILLI,
            nanosecond: Self::BLANK_SUB_MILLI,
        }
    }

    /// Returns true if this time is blank.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.hour == Self::BLANK_HMS
            && self.minute == Self::BLANK_HMS
            && self.second == Self::BLANK_HMS
            && self.millisecond == Self::BLANK_MILLI
            && self.microsecond == Self::BLANK_SUB_MILLI
            && self.nanosecond == Self::BLANK_SUB_MILLI
    }

    /// Returns true if this time is blank or every field is in range.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        if self.is_blank() {
            return true;
        }
        self.hour < 24
            && self.minute < 60
            && self.second <= 60
            && self.millisecond < 1000
            && self.microsecond < 1000
            && self.nanosecond < 1000
    }

    /// Returns the minimal wire length for this time: 2, 3, 5, 7, or 8.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        if self.nanosecond != 0 {
            8
        } else if self.microsecond != 0 {
            7
        } else if self.millisecond != 0 {
            5
        } else if self.second != 0 {
            3
        } else {
            2
        }
    }

    /// Converts to a `chrono` time.
    ///
    /// # Returns
    /// `None` if the time is blank or out of range.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveTime> {
        if self.is_blank() || !self.is_valid() {
            return None;
        }
        let nanos = u32::from(self.millisecond) * 1_000_000
            + u32::from(self.microsecond) * 1_000
            + u32::from(self.nanosecond);
        NaiveTime::from_hms_nano_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            nanos,
        )
    }

    /// Formats the time as `HH:MM:SS:mmm:uuu:nnn`.
    ///
    /// Fields outside their clock range are printed in full.
    #[must_use]
    pub fn format_full(&self) -> ArrayString<TIME_TEXT_CAPACITY> {
        let mut buf = ArrayString::new();
        // capacity covers every field at its type maximum
        let _ = write!(
            buf,
            "{:02}:{:02}:{:02}:{:03}:{:03}:{:03}",
            self.hour, self.minute, self.second, self.millisecond, self.microsecond, self.nanosecond
        );
        buf
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl From<NaiveTime> for Time {
    fn from(value: NaiveTime) -> Self {
        let nanos = value.nanosecond() % 1_000_000_000;
        Self::new(value.hour() as u8, value.minute() as u8, value.second() as u8).with_subsec(
            (nanos / 1_000_000) as u16,
            (nanos / 1_000 % 1_000) as u16,
            (nanos % 1_000) as u16,
        )
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            return Ok(());
        }
        f.write_str(&self.format_full())
    }
}

/// Date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateTime {
    /// Date part.
    pub date: Date,
    /// Time part.
    pub time: Time,
}

impl DateTime {
    /// Creates a new date-time.
    #[must_use]
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Creates a blank date-time.
    #[must_use]
    pub const fn blank() -> Self {
        Self::new(Date::blank(), Time::blank())
    }

    /// Returns true if both parts are blank.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.date.is_blank() && self.time.is_blank()
    }

    /// Returns true if both parts are valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.date.is_valid() && self.time.is_valid()
    }

    /// Returns the minimal wire length: 6, 7, 9, 11, or 12.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        4 + self.time.encoded_len()
    }

    /// Converts to a `chrono` date-time.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date.to_naive()?, self.time.to_naive()?))
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = NaiveDateTime;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let date = Date::try_from(value.date()).map_err(|_| value)?;
        Ok(Self::new(date, Time::from(value.time())))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            return Ok(());
        }
        write!(f, "{} {}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validity() {
        assert!(Date::blank().is_valid());
        assert!(Date::new(2024, 2, 29).is_valid());
        assert!(!Date::new(2023, 2, 29).is_valid());
        assert!(!Date::new(1900, 2, 29).is_valid());
        assert!(Date::new(2000, 2, 29).is_valid());
        assert!(!Date::new(2024, 13, 1).is_valid());
        assert!(!Date::new(2024, 4, 31).is_valid());
    }

    #[test]
    fn test_date_chrono_conversion() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let date = Date::try_from(naive).unwrap();
        assert_eq!(date, Date::new(2024, 3, 15));
        assert_eq!(date.to_naive(), Some(naive));
        assert_eq!(Date::blank().to_naive(), None);
        assert_eq!(date.to_string(), "2024-03-15");
    }

    #[test]
    fn test_time_encoded_len() {
        assert_eq!(Time::new(12, 30, 0).encoded_len(), 2);
        assert_eq!(Time::new(12, 30, 45).encoded_len(), 3);
        assert_eq!(Time::new(12, 30, 45).with_subsec(1, 0, 0).encoded_len(), 5);
        assert_eq!(Time::new(0, 0, 0).with_subsec(0, 1, 0).encoded_len(), 7);
        assert_eq!(Time::new(0, 0, 0).with_subsec(0, 0, 1).encoded_len(), 8);
        assert_eq!(Time::blank().encoded_len(), 8);
    }

    #[test]
    fn test_time_chrono_conversion() {
        let t = Time::new(12, 30, 45).with_subsec(123, 456, 789);
        let naive = t.to_naive().unwrap();
        assert_eq!(naive.nanosecond(), 123_456_789);
        assert_eq!(Time::from(naive), t);
        assert_eq!(t.to_string(), "12:30:45:123:456:789");
        assert!(!Time::new(24, 0, 0).is_valid());
    }

    #[test]
    fn test_format_never_truncates() {
        let date = Date::new(10000, 12, 31);
        assert!(date.is_valid());
        assert_eq!(date.to_string(), "10000-12-31");
        assert_eq!(Date::new(u16::MAX, u8::MAX, u8::MAX).format_iso().as_str(), "65535-255-255");

        let mut time = Time::new(200, 200, 200);
        time.millisecond = 60000;
        time.microsecond = 60000;
        time.nanosecond = 60000;
        assert_eq!(time.to_string(), "200:200:200:60000:60000:60000");
        assert_eq!(
            Time {
                hour: 254,
                minute: u8::MAX,
                second: u8::MAX,
                millisecond: u16::MAX,
                microsecond: u16::MAX,
                nanosecond: u16::MAX,
            }
            .format_full()
            .as_str(),
            "254:255:255:65535:65535:65535"
        );
    }

    #[test]
    fn test_datetime_blank() {
        let dt = DateTime::blank();
        assert!(dt.is_blank());
        assert!(dt.is_valid());
        assert_eq!(dt.to_naive(), None);
        assert_eq!(dt.encoded_len(), 12);
    }
}
