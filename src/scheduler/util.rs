use super::types::SchedError;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Tous les jours du mois, dans l'ordre.
pub(crate) fn month_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>, SchedError> {
    if !(1..=12).contains(&month) {
        return Err(SchedError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(SchedError::InvalidYear(year))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}

pub(super) fn shift(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

pub(super) fn shift_back(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

pub(super) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
