//! Duration text conversion.
//!
//! This module converts fractional hours to and from the
//! "H hours M minutes" text shown in day records. Report totals are summed
//! from that text, so both directions live together here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::debug;

use crate::models::ReportLocale;

/// Number of decimal places hour values are kept at.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// Rounds an hour value to [`HOURS_DECIMAL_PLACES`], ties to even.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::round_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_hours(Decimal::new(83333, 4)), Decimal::new(833, 2));
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Why duration text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// Nothing to parse.
    #[error("duration text is empty")]
    Empty,
    /// The hour marker is absent.
    #[error("no '{marker}' marker in '{text}'")]
    MissingHourMarker {
        /// The marker looked for.
        marker: &'static str,
        /// The offending text.
        text: String,
    },
    /// A component is not a whole number.
    #[error("'{component}' is not a whole number in '{text}'")]
    InvalidNumber {
        /// The component that failed.
        component: String,
        /// The offending text.
        text: String,
    },
}

/// Formats and parses duration text for one [`ReportLocale`].
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::DurationCodec;
/// use rust_decimal::Decimal;
///
/// let codec = DurationCodec::default();
/// assert_eq!(codec.format(Decimal::new(115, 1)), "11 hours 30 minutes");
/// assert_eq!(codec.parse("11 hours 30 minutes").unwrap(), Decimal::new(115, 1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationCodec {
    locale: ReportLocale,
}

impl DurationCodec {
    /// Creates a codec for the given locale.
    pub fn new(locale: ReportLocale) -> Self {
        Self { locale }
    }

    /// The locale this codec renders.
    pub fn locale(&self) -> ReportLocale {
        self.locale
    }

    /// Renders hours as whole hours plus rounded minutes.
    ///
    /// Minutes that round up to 60 carry into the hour, so `1.999` renders
    /// as `2 hours 0 minutes`. Negative input renders as zero.
    pub fn format(&self, hours: Decimal) -> String {
        let hours = hours.max(Decimal::ZERO);
        let mut whole = hours.trunc();
        let mut minutes = ((hours - whole) * Decimal::from(60))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        if minutes >= Decimal::from(60) {
            whole += Decimal::ONE;
            minutes -= Decimal::from(60);
        }

        self.locale.render_duration(
            whole.to_i64().unwrap_or_default(),
            minutes.to_i64().unwrap_or_default(),
        )
    }

    /// Reads duration text back into hours, rounded to 2 decimals.
    ///
    /// The minute component is optional and defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns a [`DurationParseError`] for empty text, text without the hour
    /// marker, or non-numeric components.
    pub fn parse(&self, text: &str) -> Result<Decimal, DurationParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DurationParseError::Empty);
        }

        let hour_marker = self.locale.hour_marker();
        let (hours_part, rest) =
            trimmed
                .split_once(hour_marker)
                .ok_or_else(|| DurationParseError::MissingHourMarker {
                    marker: hour_marker,
                    text: trimmed.to_string(),
                })?;

        let hours = parse_component(hours_part, trimmed)?;
        let minutes = match rest.split_once(self.locale.minute_marker()) {
            Some((minutes_part, _)) => parse_component(minutes_part, trimmed)?,
            None => 0,
        };

        Ok(round_hours(
            Decimal::from(hours) + Decimal::from(minutes) / Decimal::from(60),
        ))
    }

    /// Like [`DurationCodec::parse`] but yields zero for unreadable text.
    ///
    /// Day-record text is display data that may be blank (holidays) or
    /// hand-edited, so totals degrade to zero instead of failing.
    pub fn parse_lenient(&self, text: &str) -> Decimal {
        match self.parse(text) {
            Ok(hours) => hours,
            Err(DurationParseError::Empty) => Decimal::ZERO,
            Err(err) => {
                debug!(error = %err, "Treating unreadable duration text as zero");
                Decimal::ZERO
            }
        }
    }
}

fn parse_component(component: &str, text: &str) -> Result<u32, DurationParseError> {
    let component = component.trim();
    component
        .parse()
        .map_err(|_| DurationParseError::InvalidNumber {
            component: component.to_string(),
            text: text.to_string(),
        })
}
