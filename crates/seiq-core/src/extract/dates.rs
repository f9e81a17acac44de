//! Closing date extraction and date form conversions.

use chrono::NaiveDate;

use super::patterns::CLOSE_DATE;

/// Extract the closing date (締切分) from page text.
///
/// A matching pattern whose components do not form a real calendar date is
/// treated as absent.
pub fn extract_close_date(text: &str) -> Option<NaiveDate> {
    let caps = CLOSE_DATE.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// YYMMDD form used as the filename date prefix.
pub fn short_date_form(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Expand a YYMMDD form back into a date, assuming a 2000s year.
pub fn date_from_short(short: &str) -> Option<NaiveDate> {
    if short.len() != 6 || !short.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = short[0..2].parse().ok()?;
    let month: u32 = short[2..4].parse().ok()?;
    let day: u32 = short[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
