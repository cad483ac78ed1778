//! Overtime tariff lookup.
//!
//! Overtime is paid as a flat amount per band rather than pro rata: a day
//! with 2.9 overtime hours earns the 2.5-hour band. The bands are data, so a
//! different schedule only needs a different table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One row of the tariff: reaching `threshold_hours` earns `pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffBand {
    /// Minimum overtime hours for this band.
    pub threshold_hours: Decimal,
    /// Flat payment for the band.
    pub pay: i64,
}

const fn band(tenths_of_hour: u32, pay: i64) -> TariffBand {
    TariffBand {
        threshold_hours: Decimal::from_parts(tenths_of_hour, 0, 0, false, 1),
        pay,
    }
}

/// The standard half-hour overtime schedule, ascending.
pub const STANDARD_OVERTIME_BANDS: [TariffBand; 10] = [
    band(5, 81),
    band(10, 162),
    band(15, 243),
    band(20, 323),
    band(25, 423),
    band(30, 524),
    band(35, 624),
    band(40, 725),
    band(45, 825),
    band(50, 926),
];

/// A validated, ascending overtime tariff table.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::OvertimeTariff;
/// use rust_decimal::Decimal;
///
/// let tariff = OvertimeTariff::standard();
/// assert_eq!(tariff.pay_for(Decimal::new(25, 1)), 423);
/// assert_eq!(tariff.pay_for(Decimal::new(29, 1)), 423);
/// assert_eq!(tariff.pay_for(Decimal::new(4, 1)), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OvertimeTariff {
    bands: Vec<TariffBand>,
}

impl OvertimeTariff {
    /// The built-in schedule from [`STANDARD_OVERTIME_BANDS`].
    pub fn standard() -> Self {
        Self {
            bands: STANDARD_OVERTIME_BANDS.to_vec(),
        }
    }

    /// Builds a tariff from custom bands.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if the table is empty, has a
    /// non-positive threshold, or is not strictly increasing in both
    /// threshold and pay.
    pub fn new(bands: Vec<TariffBand>) -> EngineResult<Self> {
        let first = bands.first().ok_or_else(|| EngineError::CalculationError {
            message: "overtime tariff must have at least one band".to_string(),
        })?;
        if first.threshold_hours <= Decimal::ZERO {
            return Err(EngineError::CalculationError {
                message: format!(
                    "overtime tariff thresholds must be positive, got {}",
                    first.threshold_hours
                ),
            });
        }

        if let Some(pair) = bands.windows(2).find(|pair| {
            pair[1].threshold_hours <= pair[0].threshold_hours || pair[1].pay <= pair[0].pay
        }) {
            return Err(EngineError::CalculationError {
                message: format!(
                    "overtime tariff must increase strictly: band {}h/{} follows {}h/{}",
                    pair[1].threshold_hours, pair[1].pay, pair[0].threshold_hours, pair[0].pay
                ),
            });
        }

        Ok(Self { bands })
    }

    /// The bands, ascending.
    pub fn bands(&self) -> &[TariffBand] {
        &self.bands
    }

    /// Payment for the highest band whose threshold does not exceed
    /// `overtime_hours`; zero below the first band.
    pub fn pay_for(&self, overtime_hours: Decimal) -> i64 {
        self.bands
            .iter()
            .rev()
            .find(|band| overtime_hours >= band.threshold_hours)
            .map_or(0, |band| band.pay)
    }
}

impl Default for OvertimeTariff {
    fn default() -> Self {
        Self::standard()
    }
}
