//! Clock event model and related types.
//!
//! This module defines the [`ClockEvent`] punch and the [`ClockEventKind`]
//! tag that the reconciler pairs into work sessions.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Timestamp layouts accepted from punch-clock exports.
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Whether a punch marks the start or the end of attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventKind {
    /// Clock-in.
    #[serde(alias = "上班")]
    Arrive,
    /// Clock-out.
    #[serde(alias = "下班")]
    Leave,
}

impl fmt::Display for ClockEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockEventKind::Arrive => write!(f, "arrive"),
            ClockEventKind::Leave => write!(f, "leave"),
        }
    }
}

impl FromStr for ClockEventKind {
    type Err = EngineError;

    /// Accepts `arrive`/`leave` (any case) and the punch-clock labels
    /// `上班`/`下班`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "上班" => Ok(ClockEventKind::Arrive),
            "下班" => Ok(ClockEventKind::Leave),
            other => match other.to_lowercase().as_str() {
                "arrive" => Ok(ClockEventKind::Arrive),
                "leave" => Ok(ClockEventKind::Leave),
                _ => Err(EngineError::invalid_input(
                    "kind",
                    format!("unknown clock event kind '{}'", other),
                )),
            },
        }
    }
}

/// A single timestamped arrive/leave punch.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::{ClockEvent, ClockEventKind};
///
/// let event = ClockEvent::parse("arrive", "2025-06-02 09:00:00").unwrap();
/// assert_eq!(event.kind, ClockEventKind::Arrive);
/// assert_eq!(event.timestamp.format("%H:%M").to_string(), "09:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// Arrive or leave.
    pub kind: ClockEventKind,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
}

impl ClockEvent {
    /// Creates a new clock event.
    pub fn new(kind: ClockEventKind, timestamp: NaiveDateTime) -> Self {
        Self { kind, timestamp }
    }

    /// Parses a clock event from its raw textual kind and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the kind is not recognised or
    /// the timestamp does not match any accepted layout.
    pub fn parse(kind: &str, timestamp: &str) -> EngineResult<Self> {
        Ok(Self {
            kind: kind.parse()?,
            timestamp: parse_timestamp(timestamp)?,
        })
    }

    /// The calendar date the punch belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

fn parse_timestamp(raw: &str) -> EngineResult<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            EngineError::invalid_input("timestamp", format!("unparseable timestamp '{}'", raw))
        })
}
