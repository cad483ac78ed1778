//! Report locale.
//!
//! Selects the wording used for duration text, the holiday marker and the
//! reminder notes written into day records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Language used for the human-readable parts of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLocale {
    /// `9 hours 30 minutes`, `holiday`.
    #[default]
    English,
    /// `9小時30分`, `休假`, as printed by the punch-clock spreadsheet.
    TraditionalChinese,
}

impl ReportLocale {
    /// Marker that follows the hour component of a duration.
    pub fn hour_marker(&self) -> &'static str {
        match self {
            ReportLocale::English => "hours",
            ReportLocale::TraditionalChinese => "小時",
        }
    }

    /// Marker that follows the minute component of a duration.
    pub fn minute_marker(&self) -> &'static str {
        match self {
            ReportLocale::English => "minutes",
            ReportLocale::TraditionalChinese => "分",
        }
    }

    /// Renders whole hours and minutes.
    pub fn render_duration(&self, hours: i64, minutes: i64) -> String {
        match self {
            ReportLocale::English => format!("{} hours {} minutes", hours, minutes),
            ReportLocale::TraditionalChinese => format!("{}小時{}分", hours, minutes),
        }
    }

    /// Time-range text for a day without any punches.
    pub fn holiday_label(&self) -> &'static str {
        match self {
            ReportLocale::English => "holiday",
            ReportLocale::TraditionalChinese => "休假",
        }
    }

    /// Note for a day with an unpaired punch.
    pub fn incomplete_punch_note(&self) -> &'static str {
        match self {
            ReportLocale::English => "Incomplete clock record, please verify",
            ReportLocale::TraditionalChinese => "⚠️ 打卡不完整，請確認",
        }
    }

    /// Note for a day whose leave punch precedes its arrive punch.
    pub fn negative_duration_note(&self) -> &'static str {
        match self {
            ReportLocale::English => "Leave punch is earlier than arrive punch, please verify",
            ReportLocale::TraditionalChinese => "⚠️ 下班時間早於上班時間，請確認",
        }
    }

    /// Reminder for a day that fell short of the full-day threshold.
    pub fn shortage_note(&self, shortage_text: &str, full_day_hours: Decimal) -> String {
        match self {
            ReportLocale::English => format!(
                "Short {} of the {}-hour full day",
                shortage_text,
                full_day_hours.normalize()
            ),
            ReportLocale::TraditionalChinese => format!(
                "⏰ 還差 {} 滿{}小時",
                shortage_text,
                full_day_hours.normalize()
            ),
        }
    }
}
