//! Legacy calendar arithmetic.
//!
//! Month addition clamps the day instead of overflowing and truncates
//! fractional month counts toward zero. Day spans are decomposed into whole
//! months by a forward search anchored at a start date. Term texts depend on
//! this exact behaviour.

use chrono::{Datelike, NaiveDate};

/// Which part of a day span [`decompose_span`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanPart {
    /// `months + remaining_days / 100`.
    MonthsAndDays,
    /// Whole months fitting in the span.
    FullMonths,
    /// Days left over after the whole months.
    RemainingDays,
}

/// A term split into years, months and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Term {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl Term {
    /// Split a month count into years and months; `days` is carried as given.
    pub fn from_months(months: i64, days: i64) -> Self {
        let mut years = 0;
        let mut months = months;
        if months > 11 {
            years = months / 12;
            months -= years * 12;
        }
        Self {
            years,
            months,
            days,
        }
    }
}

/// Add `months` to `date`, truncating fractional months toward zero and
/// clamping the day to the last day of the target month.
pub fn add_months(date: NaiveDate, months: f64) -> NaiveDate {
    let months = months.trunc() as i64;
    let total = (i64::from(date.year()) * 12 + i64::from(date.month0())).saturating_add(months);
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u32;
    let Ok(year) = i32::try_from(year) else {
        return if months < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    };
    let day = date.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if months < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Number of days covered by `months` calendar months starting at `start`.
pub fn days_for_months(start: NaiveDate, months: f64) -> i64 {
    (add_months(start, months) - start).num_days()
}

/// Maximal whole month count `m` with `days_for_months(start, m) <= total_days`.
///
/// No month is longer than 31 days, so the forward search starts at
/// `total_days / 31`. It stops early once the span no longer grows, which
/// happens when `add_months` saturates at the end of the date range.
pub fn full_months_in(start: NaiveDate, total_days: i64) -> i64 {
    let mut months = (total_days / 31).max(0);
    let mut covered = days_for_months(start, months as f64);
    loop {
        let next = days_for_months(start, (months + 1) as f64);
        if next > total_days || next <= covered {
            return months;
        }
        months += 1;
        covered = next;
    }
}

/// Decompose a span of `total_days` from `start` into months and days.
pub fn decompose_span(start: NaiveDate, total_days: i64, part: SpanPart) -> f64 {
    let months = full_months_in(start, total_days);
    let remainder = total_days - days_for_months(start, months as f64);
    match part {
        SpanPart::MonthsAndDays => months as f64 + remainder as f64 / 100.0,
        SpanPart::FullMonths => months as f64,
        SpanPart::RemainingDays => remainder as f64,
    }
}

/// Signed whole months from `start` to `stop`.
///
/// Computed from the calendar month difference, less one when adding that
/// many months to `start` overshoots `stop`.
pub fn months_between(start: NaiveDate, stop: NaiveDate) -> i64 {
    let mut months = 12 - i64::from(start.month())
        + i64::from(stop.month())
        + (i64::from(stop.year()) - i64::from(start.year()) - 1) * 12;
    if add_months(start, months as f64) > stop {
        months -= 1;
    }
    months
}

/// `months + days / 100` between two dates.
pub fn months_and_days_between(start: NaiveDate, stop: NaiveDate) -> f64 {
    let months = months_between(start, stop);
    let days = (stop - add_months(start, months as f64)).num_days();
    months as f64 + days as f64 / 100.0
}

/// Whole years between two dates, truncated toward zero.
///
/// Used for a person's age on the crime date.
pub fn whole_years_between(start: NaiveDate, stop: NaiveDate) -> i64 {
    months_between(start, stop) / 12
}

/// Convert a month count into an exact day span anchored at `anchor`, then
/// decompose that span back into years, months and days.
///
/// This round trip is what makes term texts match the legacy output: the
/// result depends on the month lengths following `anchor`.
pub fn term_via_day_span(anchor: NaiveDate, months: f64) -> Term {
    let days = days_for_months(anchor, months);
    let whole = full_months_in(anchor, days);
    let rest = days - days_for_months(anchor, whole as f64);
    Term::from_months(whole, rest)
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
