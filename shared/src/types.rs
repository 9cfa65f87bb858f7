use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Duty code held by one roster cell.
///
/// `DayEvening` is the combined holiday shift: one nurse covers both the day
/// and evening sessions. `Admin` is the assistant-nurse weekday default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "shift_code")]
pub enum ShiftCode {
    #[serde(rename = "D")]
    #[sqlx(rename = "D")]
    Day,
    #[serde(rename = "E")]
    #[sqlx(rename = "E")]
    Evening,
    #[serde(rename = "N")]
    #[sqlx(rename = "N")]
    Night,
    #[serde(rename = "DE")]
    #[sqlx(rename = "DE")]
    DayEvening,
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Admin,
    #[serde(rename = "OFF")]
    #[sqlx(rename = "OFF")]
    Off,
}

impl ShiftCode {
    /// Everything except `OFF` counts toward work streaks and work totals.
    pub fn is_work(self) -> bool {
        self != Self::Off
    }

    /// Shifts that satisfy a day's daytime coverage demand.
    pub fn covers_day(self) -> bool {
        matches!(self, Self::Day | Self::DayEvening)
    }

    /// Shifts that satisfy a day's evening coverage demand.
    pub fn covers_evening(self) -> bool {
        matches!(self, Self::Evening | Self::DayEvening)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Evening => "E",
            Self::Night => "N",
            Self::DayEvening => "DE",
            Self::Admin => "M",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(Self::Day),
            "E" => Ok(Self::Evening),
            "N" => Ok(Self::Night),
            "DE" => Ok(Self::DayEvening),
            "M" => Ok(Self::Admin),
            "OFF" => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

/// Nurse role classes with distinct assignment policies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "nurse_role")]
pub enum Role {
    /// Head nurse: preferred for day coverage, strongly deprioritized for
    /// evenings, never scheduled for nights.
    #[serde(rename = "HN")]
    #[sqlx(rename = "HN")]
    Head,
    /// Registered nurse: the interchangeable pool for D/E/N coverage.
    #[serde(rename = "RN")]
    #[sqlx(rename = "RN")]
    Registered,
    /// Assistant nurse: weekday administrative duty, off otherwise.
    #[serde(rename = "AN")]
    #[sqlx(rename = "AN")]
    Assistant,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}
