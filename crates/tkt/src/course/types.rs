/// Types for course schedule data
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use super::error::WeekdayError;

/// One scheduled class occurrence, as stored by the app.
///
/// Slots are the school's period indices, not wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    #[serde(rename = "classroom")]
    pub location: String,
    pub start_slot: i32,
    pub end_slot: i32,
    pub day_of_week: i32, // 1 = Monday ... 7 = Sunday
}

impl CourseRecord {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        start_slot: i32,
        end_slot: i32,
        day_of_week: i32,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            start_slot,
            end_slot,
            day_of_week,
        }
    }

    /// Returns true if this course takes place on the given weekday.
    pub fn is_on(&self, day: Weekday) -> bool {
        self.day_of_week == i32::from(day.get())
    }
}

/// A weekday in the app's convention: 1 = Monday ... 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const MONDAY: Self = Self(1);
    pub const SUNDAY: Self = Self(7);

    /// Creates a weekday from its domain code (1 = Monday ... 7 = Sunday).
    pub fn new(code: u8) -> Result<Self, WeekdayError> {
        if (1..=7).contains(&code) {
            Ok(Self(code))
        } else {
            Err(WeekdayError::OutOfRange { code })
        }
    }

    /// Converts a platform calendar weekday (1 = Sunday, 2 = Monday, ...,
    /// 7 = Saturday) into the domain convention.
    pub fn from_platform(platform_code: u8) -> Result<Self, WeekdayError> {
        match platform_code {
            1 => Ok(Self::SUNDAY),
            2..=7 => Ok(Self(platform_code - 1)),
            _ => Err(WeekdayError::OutOfRange {
                code: platform_code,
            }),
        }
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        // number_from_monday() is always within 1..=7
        Self(day.number_from_monday() as u8)
    }

    /// The current weekday in the local time zone.
    pub fn today() -> Self {
        Self::from_chrono(Local::now().weekday())
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Weekday {
    type Error = WeekdayError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.0
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
