//! Forecast run windows for the village forecast publication schedule.
//!
//! The upstream service publishes a new short-range forecast run eight times
//! a day. A run becomes queryable a few minutes after its nominal issue time,
//! so the "current" run is the latest one whose availability time has passed.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes between a run's nominal issue time and it becoming queryable.
pub const AVAILABILITY_DELAY_MINUTES: u32 = 10;

/// Offset of Korea Standard Time from UTC, the publisher's local time.
pub const KST_OFFSET_HOURS: i64 = 9;

/// Publication slots of the short-range forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueSlot {
    /// 02:00 run
    H0200,
    /// 05:00 run
    H0500,
    /// 08:00 run
    H0800,
    /// 11:00 run
    H1100,
    /// 14:00 run
    H1400,
    /// 17:00 run
    H1700,
    /// 20:00 run
    H2000,
    /// 23:00 run
    H2300,
}

impl IssueSlot {
    pub fn hour(&self) -> u32 {
        match self {
            IssueSlot::H0200 => 2,
            IssueSlot::H0500 => 5,
            IssueSlot::H0800 => 8,
            IssueSlot::H1100 => 11,
            IssueSlot::H1400 => 14,
            IssueSlot::H1700 => 17,
            IssueSlot::H2000 => 20,
            IssueSlot::H2300 => 23,
        }
    }

    /// Four-digit `HHMM` code (`base_time` parameter).
    pub fn code(&self) -> &'static str {
        match self {
            IssueSlot::H0200 => "0200",
            IssueSlot::H0500 => "0500",
            IssueSlot::H0800 => "0800",
            IssueSlot::H1100 => "1100",
            IssueSlot::H1400 => "1400",
            IssueSlot::H1700 => "1700",
            IssueSlot::H2000 => "2000",
            IssueSlot::H2300 => "2300",
        }
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::MIN + Duration::hours(self.hour() as i64)
    }

    /// All slots in chronological order.
    pub fn all() -> &'static [IssueSlot] {
        &[
            IssueSlot::H0200,
            IssueSlot::H0500,
            IssueSlot::H0800,
            IssueSlot::H1100,
            IssueSlot::H1400,
            IssueSlot::H1700,
            IssueSlot::H2000,
            IssueSlot::H2300,
        ]
    }

    /// Minute of the day at which this slot's run becomes queryable.
    fn available_from_minute(&self) -> u32 {
        self.hour() * 60 + AVAILABILITY_DELAY_MINUTES
    }
}

impl fmt::Display for IssueSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The published forecast run a batch is answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastWindow {
    /// Calendar date of the run
    pub issue_date: NaiveDate,
    /// Publication slot of the run
    pub issue_slot: IssueSlot,
}

impl ForecastWindow {
    pub fn new(issue_date: NaiveDate, issue_slot: IssueSlot) -> Self {
        Self {
            issue_date,
            issue_slot,
        }
    }

    /// The window currently valid by the wall clock in Korea Standard Time.
    pub fn now() -> Option<Self> {
        current_window(kst_now())
    }

    /// `YYYYMMDD` rendering for the `base_date` parameter.
    pub fn base_date(&self) -> String {
        self.issue_date.format("%Y%m%d").to_string()
    }

    /// `HHMM` rendering for the `base_time` parameter.
    pub fn base_time(&self) -> &'static str {
        self.issue_slot.code()
    }

    /// Nominal issue timestamp of the run.
    pub fn issued_at(&self) -> NaiveDateTime {
        self.issue_date.and_time(self.issue_slot.time())
    }
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base_date(), self.base_time())
    }
}

/// Compute the most recent queryable run for a local timestamp.
///
/// Slots are scanned latest to earliest; the first whose availability time
/// is not after `now` wins. Before 02:10 no slot of the current day is
/// available and the previous day's 23:00 run is used. Returns `None` only
/// when the previous day cannot be represented.
pub fn current_window(now: NaiveDateTime) -> Option<ForecastWindow> {
    let minute_of_day = now.hour() * 60 + now.minute();

    let slot = IssueSlot::all()
        .iter()
        .rev()
        .copied()
        .find(|slot| slot.available_from_minute() <= minute_of_day);

    match slot {
        Some(slot) => Some(ForecastWindow::new(now.date(), slot)),
        None => now
            .date()
            .pred_opt()
            .map(|previous_day| ForecastWindow::new(previous_day, IssueSlot::H2300)),
    }
}

/// Current wall-clock time in Korea Standard Time.
pub fn kst_now() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(KST_OFFSET_HOURS)
}
