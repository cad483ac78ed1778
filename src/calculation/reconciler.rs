//! Session reconciliation.
//!
//! This module pairs one employee's clock events into work sessions and
//! turns them into exactly one [`DayRecord`] per calendar day of the
//! reporting month.
//!
//! Pairing is positional: an arrive punch immediately followed by a leave
//! punch forms a session, anything else is left unpaired. Events are taken
//! in the order given and are not re-sorted.
//!
//! A session is dated by its arrive punch. When the leave punch falls on a
//! later day of the month, that day still gets a worked record showing the
//! carried leave time (`~07:00`) with no hours of its own.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PayrollRules;
use crate::models::{
    AnomalyKind, ClockEvent, ClockEventKind, DayRecord, DayStatus, ReportMonth, WorkSession,
};

use super::{DurationCodec, OvertimeTariff, round_hours};

/// Output of [`reconcile_month`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Valid sessions that start inside the month, in input order.
    pub sessions: Vec<WorkSession>,
    /// One record per calendar day, ascending by day.
    pub records: Vec<DayRecord>,
}

/// Punches that could not form a session, with the text shown for them.
#[derive(Debug, Clone)]
struct DayAnomaly {
    kind: AnomalyKind,
    display: String,
}

#[derive(Debug, Default)]
struct DayActivity {
    sessions: Vec<WorkSession>,
    anomalies: Vec<DayAnomaly>,
    /// Leave punches of sessions that started on an earlier day.
    carried_leaves: Vec<NaiveDateTime>,
}

/// Reconciles one employee's clock events for a month.
///
/// # Arguments
///
/// * `events` - The employee's punches in time order
/// * `month` - The reporting month
/// * `rules` - Full-day and overtime thresholds
/// * `tariff` - Overtime payment table applied to each day separately
/// * `codec` - Renders duration text for the records
///
/// # Returns
///
/// The paired sessions and one [`DayRecord`] per day of `month`. Sessions
/// are dated by their arrive punch; events dated outside `month` are
/// ignored. Every in-month date that holds a punch gets a non-holiday
/// record, including a day whose only punch is a carried leave.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::{reconcile_month, DurationCodec, OvertimeTariff};
/// use timesheet_payroll::config::PayrollRules;
/// use timesheet_payroll::models::{ClockEvent, DayStatus, ReportMonth};
///
/// let events = vec![
///     ClockEvent::parse("arrive", "2025-06-02 09:00").unwrap(),
///     ClockEvent::parse("leave", "2025-06-02 20:30").unwrap(),
/// ];
/// let month: ReportMonth = "2025-06".parse().unwrap();
///
/// let result = reconcile_month(
///     &events,
///     month,
///     &PayrollRules::default(),
///     &OvertimeTariff::standard(),
///     &DurationCodec::default(),
/// );
///
/// assert_eq!(result.records.len(), 30);
/// let monday = &result.records[1];
/// assert_eq!(monday.status, DayStatus::Worked);
/// assert_eq!(monday.overtime_hours, "2 hours 30 minutes");
/// assert_eq!(monday.overtime_pay, Some(423));
/// ```
pub fn reconcile_month(
    events: &[ClockEvent],
    month: ReportMonth,
    rules: &PayrollRules,
    tariff: &OvertimeTariff,
    codec: &DurationCodec,
) -> ReconciliationResult {
    let mut days: BTreeMap<NaiveDate, DayActivity> = BTreeMap::new();
    let mut sessions = Vec::new();

    let mut i = 0;
    while i < events.len() {
        let event = &events[i];
        let next = events.get(i + 1);

        match (event.kind, next) {
            (ClockEventKind::Arrive, Some(pair)) if pair.kind == ClockEventKind::Leave => {
                let leave = pair.timestamp;
                let date = event.date();
                let leave_date = pair.date();
                let session = WorkSession::new(event.timestamp, leave);
                i += 2;

                if leave_date != date && month.contains(leave_date) {
                    let activity = days.entry(leave_date).or_default();
                    match session {
                        Some(_) => activity.carried_leaves.push(leave),
                        None => activity.anomalies.push(DayAnomaly {
                            kind: AnomalyKind::NegativeDuration,
                            display: leave.format("%H:%M").to_string(),
                        }),
                    }
                }

                if !month.contains(date) {
                    warn!(day = %date, %month, "Skipping session outside the reporting month");
                    continue;
                }

                match session {
                    Some(session) => {
                        days.entry(date).or_default().sessions.push(session.clone());
                        sessions.push(session);
                    }
                    None => {
                        warn!(
                            day = %date,
                            arrive = %event.timestamp,
                            leave = %leave,
                            "Leave punch precedes arrive punch"
                        );
                        days.entry(date).or_default().anomalies.push(DayAnomaly {
                            kind: AnomalyKind::NegativeDuration,
                            display: format!(
                                "{}~{}",
                                event.timestamp.format("%H:%M"),
                                leave.format("%H:%M")
                            ),
                        });
                    }
                }
            }
            _ => {
                let date = event.date();
                i += 1;

                if !month.contains(date) {
                    warn!(day = %date, %month, "Skipping punch outside the reporting month");
                    continue;
                }

                warn!(day = %date, kind = %event.kind, "Unpaired clock event");
                days.entry(date).or_default().anomalies.push(DayAnomaly {
                    kind: AnomalyKind::UnpairedEvent,
                    display: event.timestamp.format("%H:%M").to_string(),
                });
            }
        }
    }

    let records = month
        .dates()
        .map(|date| match days.get(&date) {
            None => DayRecord::holiday(date.day(), codec.locale().holiday_label()),
            Some(activity) => build_record(date.day(), activity, rules, tariff, codec),
        })
        .collect();

    ReconciliationResult { sessions, records }
}

fn build_record(
    day_of_month: u32,
    activity: &DayActivity,
    rules: &PayrollRules,
    tariff: &OvertimeTariff,
    codec: &DurationCodec,
) -> DayRecord {
    let locale = codec.locale();
    let first_anomaly = activity.anomalies.first();
    let anomaly_note = first_anomaly.map(|anomaly| match anomaly.kind {
        AnomalyKind::UnpairedEvent => locale.incomplete_punch_note().to_string(),
        AnomalyKind::NegativeDuration => locale.negative_duration_note().to_string(),
    });

    let carried = activity
        .carried_leaves
        .iter()
        .map(|leave| format!("~{}", leave.format("%H:%M")));

    if activity.sessions.is_empty() && activity.anomalies.is_empty() {
        return DayRecord {
            day_of_month,
            status: DayStatus::Worked,
            time_range: join_displays(carried),
            worked_hours: String::new(),
            overtime_hours: String::new(),
            overtime_pay: None,
            shortage: String::new(),
            anomaly: None,
            anomaly_note: String::new(),
        };
    }

    if activity.sessions.is_empty() {
        return DayRecord {
            day_of_month,
            status: DayStatus::Anomaly,
            time_range: join_displays(
                carried.chain(activity.anomalies.iter().map(|a| a.display.clone())),
            ),
            worked_hours: String::new(),
            overtime_hours: String::new(),
            overtime_pay: None,
            shortage: String::new(),
            anomaly: first_anomaly.map(|a| a.kind),
            anomaly_note: anomaly_note.unwrap_or_default(),
        };
    }

    let worked = round_hours(activity.sessions.iter().map(|s| s.duration_hours).sum());
    let overtime = round_hours((worked - rules.overtime_base_hours).max(Decimal::ZERO));
    let shortage = if worked < rules.full_day_hours {
        round_hours(rules.full_day_hours - worked)
    } else {
        Decimal::ZERO
    };

    let (overtime_hours, overtime_pay) = if overtime > Decimal::ZERO {
        (codec.format(overtime), Some(tariff.pay_for(overtime)))
    } else {
        (String::new(), None)
    };

    let shortage_text = if shortage > Decimal::ZERO {
        codec.format(shortage)
    } else {
        String::new()
    };

    let anomaly_note = match anomaly_note {
        Some(note) => note,
        None if !shortage_text.is_empty() => {
            locale.shortage_note(&shortage_text, rules.full_day_hours)
        }
        None => String::new(),
    };

    debug!(
        day = day_of_month,
        worked = %worked,
        overtime = %overtime,
        shortage = %shortage,
        "Reconciled day"
    );

    DayRecord {
        day_of_month,
        status: DayStatus::Worked,
        time_range: join_displays(carried.chain(activity.sessions.iter().map(WorkSession::time_range))),
        worked_hours: codec.format(worked),
        overtime_hours,
        overtime_pay,
        shortage: shortage_text,
        anomaly: first_anomaly.map(|a| a.kind),
        anomaly_note,
    }
}

fn join_displays(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportLocale;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn arrive(ts: &str) -> ClockEvent {
        ClockEvent::parse("arrive", ts).unwrap()
    }

    fn leave(ts: &str) -> ClockEvent {
        ClockEvent::parse("leave", ts).unwrap()
    }

    fn june() -> ReportMonth {
        ReportMonth::new(2025, 6).unwrap()
    }

    fn reconcile(events: &[ClockEvent]) -> ReconciliationResult {
        reconcile_month(
            events,
            june(),
            &PayrollRules::default(),
            &OvertimeTariff::standard(),
            &DurationCodec::default(),
        )
    }

    fn day(result: &ReconciliationResult, day_of_month: u32) -> &DayRecord {
        &result.records[(day_of_month - 1) as usize]
    }

    #[test]
    fn test_exact_full_day() {
        let result = reconcile(&[arrive("2025-06-02 09:00"), leave("2025-06-02 18:00")]);
        let record = day(&result, 2);

        assert_eq!(record.status, DayStatus::Worked);
        assert_eq!(record.time_range, "09:00~18:00");
        assert_eq!(record.worked_hours, "9 hours 0 minutes");
        assert!(record.overtime_hours.is_empty());
        assert!(record.overtime_pay.is_none());
        assert!(record.shortage.is_empty());
        assert!(record.anomaly.is_none());
        assert!(record.anomaly_note.is_empty());
        assert_eq!(result.sessions.len(), 1);
        assert_eq!(result.sessions[0].duration_hours, dec("9"));
    }

    #[test]
    fn test_overtime_day() {
        let result = reconcile(&[arrive("2025-06-02 09:00"), leave("2025-06-02 20:30")]);
        let record = day(&result, 2);

        assert_eq!(record.worked_hours, "11 hours 30 minutes");
        assert_eq!(record.overtime_hours, "2 hours 30 minutes");
        assert_eq!(record.overtime_pay, Some(423));
        assert!(record.shortage.is_empty());
    }

    #[test]
    fn test_overtime_below_first_band_pays_zero() {
        let result = reconcile(&[arrive("2025-06-02 09:00"), leave("2025-06-02 18:15")]);
        let record = day(&result, 2);

        assert_eq!(record.overtime_hours, "0 hours 15 minutes");
        assert_eq!(record.overtime_pay, Some(0));
    }

    #[test]
    fn test_short_day_carries_reminder() {
        let result = reconcile(&[arrive("2025-06-03 09:00"), leave("2025-06-03 17:00")]);
        let record = day(&result, 3);

        assert_eq!(record.status, DayStatus::Worked);
        assert_eq!(record.worked_hours, "8 hours 0 minutes");
        assert_eq!(record.shortage, "1 hours 0 minutes");
        assert!(record.anomaly.is_none());
        assert_eq!(record.anomaly_note, "Short 1 hours 0 minutes of the 9-hour full day");
    }

    #[test]
    fn test_lone_arrive_is_anomaly() {
        let result = reconcile(&[arrive("2025-06-04 09:00")]);
        let record = day(&result, 4);

        assert_eq!(record.status, DayStatus::Anomaly);
        assert_eq!(record.anomaly, Some(AnomalyKind::UnpairedEvent));
        assert_eq!(record.time_range, "09:00");
        assert!(record.worked_hours.is_empty());
        assert!(record.overtime_pay.is_none());
        assert_eq!(record.anomaly_note, "Incomplete clock record, please verify");
        assert!(result.sessions.is_empty());
    }

    #[test]
    fn test_leave_before_arrive_is_not_paired() {
        // leave, arrive: neither position forms an arrive/leave pair
        let result = reconcile(&[leave("2025-06-05 08:00"), arrive("2025-06-05 09:00")]);
        let record = day(&result, 5);

        assert_eq!(record.status, DayStatus::Anomaly);
        assert_eq!(record.time_range, "08:00, 09:00");
    }

    #[test]
    fn test_negative_duration_pair() {
        let result = reconcile(&[arrive("2025-06-06 18:00"), leave("2025-06-06 09:00")]);
        let record = day(&result, 6);

        assert_eq!(record.status, DayStatus::Anomaly);
        assert_eq!(record.anomaly, Some(AnomalyKind::NegativeDuration));
        assert_eq!(record.time_range, "18:00~09:00");
        assert!(record.worked_hours.is_empty());
        assert!(result.sessions.is_empty());
    }

    #[test]
    fn test_stray_punch_on_worked_day_keeps_hours() {
        let result = reconcile(&[
            arrive("2025-06-09 08:00"),
            arrive("2025-06-09 09:00"),
            leave("2025-06-09 17:00"),
        ]);
        let record = day(&result, 9);

        assert_eq!(record.status, DayStatus::Worked);
        assert_eq!(record.worked_hours, "8 hours 0 minutes");
        assert_eq!(record.shortage, "1 hours 0 minutes");
        assert_eq!(record.anomaly, Some(AnomalyKind::UnpairedEvent));
        // The punch warning takes precedence over the shortage reminder.
        assert_eq!(record.anomaly_note, "Incomplete clock record, please verify");
    }

    #[test]
    fn test_split_shift_merges_into_one_record() {
        let result = reconcile(&[
            arrive("2025-06-10 08:00"),
            leave("2025-06-10 12:00"),
            arrive("2025-06-10 13:00"),
            leave("2025-06-10 19:30"),
        ]);
        let record = day(&result, 10);

        assert_eq!(record.time_range, "08:00~12:00, 13:00~19:30");
        assert_eq!(record.worked_hours, "10 hours 30 minutes");
        assert_eq!(record.overtime_hours, "1 hours 30 minutes");
        assert_eq!(record.overtime_pay, Some(243));
        assert_eq!(result.sessions.len(), 2);
    }

    #[test]
    fn test_overnight_session_belongs_to_arrive_day() {
        let result = reconcile(&[arrive("2025-06-11 22:00"), leave("2025-06-12 07:00")]);

        assert_eq!(day(&result, 11).worked_hours, "9 hours 0 minutes");
        assert_eq!(day(&result, 11).time_range, "22:00~07:00");

        let carried = day(&result, 12);
        assert_eq!(carried.status, DayStatus::Worked);
        assert_eq!(carried.time_range, "~07:00");
        assert!(carried.worked_hours.is_empty());
        assert!(carried.overtime_pay.is_none());
        assert!(carried.shortage.is_empty());
        assert!(carried.anomaly_note.is_empty());
        assert_eq!(result.sessions.len(), 1);
    }

    #[test]
    fn test_carried_leave_precedes_own_session() {
        let result = reconcile(&[
            arrive("2025-06-11 22:00"),
            leave("2025-06-12 07:00"),
            arrive("2025-06-12 13:00"),
            leave("2025-06-12 17:00"),
        ]);
        let record = day(&result, 12);

        assert_eq!(record.status, DayStatus::Worked);
        assert_eq!(record.time_range, "~07:00, 13:00~17:00");
        assert_eq!(record.worked_hours, "4 hours 0 minutes");
        assert_eq!(record.shortage, "5 hours 0 minutes");
    }

    #[test]
    fn test_leave_on_first_day_from_previous_month() {
        let result = reconcile(&[arrive("2025-05-31 22:00"), leave("2025-06-01 06:00")]);
        let record = day(&result, 1);

        assert!(result.sessions.is_empty());
        assert_eq!(record.status, DayStatus::Worked);
        assert_eq!(record.time_range, "~06:00");
        assert!(record.worked_hours.is_empty());
        assert!(result.records[1..].iter().all(|r| r.status == DayStatus::Holiday));
    }

    #[test]
    fn test_negative_pair_across_days_marks_both_days() {
        let result = reconcile(&[arrive("2025-06-13 09:00"), leave("2025-06-12 18:00")]);

        assert_eq!(day(&result, 13).status, DayStatus::Anomaly);
        assert_eq!(day(&result, 13).time_range, "09:00~18:00");
        assert_eq!(day(&result, 12).status, DayStatus::Anomaly);
        assert_eq!(day(&result, 12).anomaly, Some(AnomalyKind::NegativeDuration));
        assert_eq!(day(&result, 12).time_range, "18:00");
    }

    #[test]
    fn test_days_without_events_are_holidays() {
        let result = reconcile(&[]);

        assert_eq!(result.records.len(), 30);
        for (index, record) in result.records.iter().enumerate() {
            assert_eq!(record.day_of_month, index as u32 + 1);
            assert_eq!(record.status, DayStatus::Holiday);
            assert_eq!(record.time_range, "holiday");
        }
    }

    #[test]
    fn test_events_outside_month_are_ignored() {
        let result = reconcile(&[
            arrive("2025-05-31 09:00"),
            leave("2025-05-31 18:00"),
            arrive("2025-07-01 09:00"),
        ]);

        assert!(result.sessions.is_empty());
        assert!(result.records.iter().all(|r| r.status == DayStatus::Holiday));
    }

    #[test]
    fn test_february_leap_year_record_count() {
        let result = reconcile_month(
            &[],
            ReportMonth::new(2024, 2).unwrap(),
            &PayrollRules::default(),
            &OvertimeTariff::standard(),
            &DurationCodec::default(),
        );
        assert_eq!(result.records.len(), 29);
    }

    #[test]
    fn test_eight_hour_rules() {
        let rules = PayrollRules {
            full_day_hours: dec("8"),
            overtime_base_hours: dec("8"),
        };
        let result = reconcile_month(
            &[arrive("2025-06-02 09:00"), leave("2025-06-02 18:00")],
            june(),
            &rules,
            &OvertimeTariff::standard(),
            &DurationCodec::default(),
        );
        let record = day(&result, 2);

        assert_eq!(record.overtime_hours, "1 hours 0 minutes");
        assert_eq!(record.overtime_pay, Some(162));
        assert!(record.shortage.is_empty());
    }

    #[test]
    fn test_traditional_chinese_labels() {
        let result = reconcile_month(
            &[arrive("2025-06-02 09:00"), leave("2025-06-02 17:30"), arrive("2025-06-03 09:00")],
            june(),
            &PayrollRules::default(),
            &OvertimeTariff::standard(),
            &DurationCodec::new(ReportLocale::TraditionalChinese),
        );

        assert_eq!(day(&result, 1).time_range, "休假");
        assert_eq!(day(&result, 2).worked_hours, "8小時30分");
        assert_eq!(day(&result, 2).anomaly_note, "⏰ 還差 0小時30分 滿9小時");
        assert_eq!(day(&result, 3).anomaly_note, "⚠️ 打卡不完整，請確認");
    }

    #[test]
    fn test_reconciliation_is_deterministic() {
        let events = vec![
            arrive("2025-06-02 09:00"),
            leave("2025-06-02 20:30"),
            arrive("2025-06-03 09:00"),
            leave("2025-06-04 08:00"),
        ];
        assert_eq!(reconcile(&events), reconcile(&events));
    }

    proptest! {
        #[test]
        fn prop_one_record_per_calendar_day(year in 1990i32..2100, month in 1u32..=12) {
            let month = ReportMonth::new(year, month).unwrap();
            let result = reconcile_month(
                &[],
                month,
                &PayrollRules::default(),
                &OvertimeTariff::standard(),
                &DurationCodec::default(),
            );
            prop_assert_eq!(result.records.len() as u32, month.days_in_month());
        }

        #[test]
        fn prop_overtime_never_negative(start_minute in 0i64..(12 * 60), length in 0i64..(14 * 60)) {
            let base = ClockEvent::parse("arrive", "2025-06-02 00:00").unwrap().timestamp;
            let events = vec![
                ClockEvent::new(ClockEventKind::Arrive, base + chrono::Duration::minutes(start_minute)),
                ClockEvent::new(
                    ClockEventKind::Leave,
                    base + chrono::Duration::minutes(start_minute + length),
                ),
            ];
            let result = reconcile(&events);
            let record = day(&result, 2);

            prop_assert_eq!(record.status, DayStatus::Worked);
            prop_assert!(record.overtime_pay.unwrap_or(0) >= 0);
            // Either overtime or shortage, never both.
            prop_assert!(record.overtime_hours.is_empty() || record.shortage.is_empty());
        }
    }
}
