//! Weekly time windows for time-conditional edge attributes.
//!
//! Windows are written in the opening-hours subset used by conditional OSM
//! tags:
//!
//! | Input                  | Meaning                                  |
//! |------------------------|------------------------------------------|
//! | `Mo-Fr 07:00-19:00`    | weekdays, 07:00 inclusive to 19:00 exclusive |
//! | `Sa,Su 10:00-18:00`    | weekend days                              |
//! | `22:00-06:00`          | every night; wraps past midnight          |
//! | `Su`                   | all of Sunday                             |
//!
//! An overnight window belongs to the day it starts on: `Fr 22:00-06:00`
//! covers Friday 22:00 through Saturday 05:59.

use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::{CoreError, CoreResult};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A set of weekdays plus a minute-of-day range `[start, end)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TimeWindow {
    /// Bit `n` set ⇔ weekday with `num_days_from_monday() == n` is included.
    days:      u8,
    start_min: u16,
    end_min:   u16,
}

impl TimeWindow {
    const ALL_DAYS: u8 = 0b0111_1111;

    /// A window on the given days.  `start_min > end_min` wraps past midnight.
    pub fn new(days: impl IntoIterator<Item = Weekday>, start_min: u16, end_min: u16) -> Self {
        let days = days
            .into_iter()
            .fold(0u8, |mask, d| mask | 1 << d.num_days_from_monday());
        Self {
            days,
            start_min: start_min.min(MINUTES_PER_DAY),
            end_min:   end_min.min(MINUTES_PER_DAY),
        }
    }

    /// A window that applies on every day of the week.
    pub fn daily(start_min: u16, end_min: u16) -> Self {
        Self {
            days: Self::ALL_DAYS,
            start_min: start_min.min(MINUTES_PER_DAY),
            end_min:   end_min.min(MINUTES_PER_DAY),
        }
    }

    #[inline]
    fn has_day(&self, day: Weekday) -> bool {
        self.days & (1 << day.num_days_from_monday()) != 0
    }

    /// `true` if `at` falls inside the window.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let minute = (at.hour() * 60 + at.minute()) as u16;
        let day = at.weekday();

        if self.start_min <= self.end_min {
            self.has_day(day) && minute >= self.start_min && minute < self.end_min
        } else {
            (self.has_day(day) && minute >= self.start_min)
                || (self.has_day(day.pred()) && minute < self.end_min)
        }
    }
}

impl FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let (days, range) = match tokens.as_slice() {
            [one] if one.contains(':') => (Self::ALL_DAYS, parse_time_range(one)?),
            [one] => (parse_days(one)?, (0, MINUTES_PER_DAY)),
            [days, range] => (parse_days(days)?, parse_time_range(range)?),
            _ => {
                return Err(CoreError::Parse(format!(
                    "time window {s:?}: expected \"[days] [HH:MM-HH:MM]\""
                )));
            }
        };
        Ok(Self { days, start_min: range.0, end_min: range.1 })
    }
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

fn parse_weekday(s: &str) -> CoreResult<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "mo" => Ok(Weekday::Mon),
        "tu" => Ok(Weekday::Tue),
        "we" => Ok(Weekday::Wed),
        "th" => Ok(Weekday::Thu),
        "fr" => Ok(Weekday::Fri),
        "sa" => Ok(Weekday::Sat),
        "su" => Ok(Weekday::Sun),
        other => Err(CoreError::Parse(format!("unknown weekday {other:?}"))),
    }
}

/// `Mo`, `Mo-Fr`, `Sa,Su`, `Fr-Mo` (ranges wrap through Sunday).
fn parse_days(s: &str) -> CoreResult<u8> {
    let mut mask = 0u8;
    for item in s.split(',') {
        match item.split_once('-') {
            Some((from, to)) => {
                let (mut day, last) = (parse_weekday(from)?, parse_weekday(to)?);
                loop {
                    mask |= 1 << day.num_days_from_monday();
                    if day == last {
                        break;
                    }
                    day = day.succ();
                }
            }
            None => mask |= 1 << parse_weekday(item)?.num_days_from_monday(),
        }
    }
    Ok(mask)
}

fn parse_time_range(s: &str) -> CoreResult<(u16, u16)> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| CoreError::Parse(format!("time range {s:?}: expected HH:MM-HH:MM")))?;
    Ok((parse_clock(start)?, parse_clock(end)?))
}

fn parse_clock(s: &str) -> CoreResult<u16> {
    let bad = || CoreError::Parse(format!("invalid time of day {s:?}"));
    let (h, m) = s.split_once(':').ok_or_else(bad)?;
    let h: u16 = h.parse().map_err(|_| bad())?;
    let m: u16 = m.parse().map_err(|_| bad())?;
    if m > 59 || h > 24 || (h == 24 && m != 0) {
        return Err(bad());
    }
    Ok(h * 60 + m)
}
