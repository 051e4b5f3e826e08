//! Detection of management-style timestamp strings.
//!
//! The source reports datetimes as fixed-width text:
//!
//! ```text
//! YYYYMMDDHHMMSS.FFFFFF+TZO   e.g. 20101008181758.546000+060
//! ```
//!
//! where `TZO` is the offset from UTC in minutes. Parsing is positional and
//! strict; anything that does not match exactly is left for the next
//! formatting strategy.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

const LENGTH: usize = 25;
const DATE_TIME_DIGITS: usize = 8 + 6;
const FRACTION_DIGITS: usize = 6;
const OFFSET_DIGITS: usize = 3;

pub const MIN_YEAR: u32 = 1601;
pub const MAX_YEAR: u32 = 9998;

/// A parsed timestamp. The fraction is kept but not displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmiDateTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    /// True when the offset sign is `-`.
    pub offset_negative: bool,
    /// Offset magnitude in minutes.
    pub offset_minutes: u32,
}

impl WmiDateTime {
    /// Offset east of UTC, in minutes.
    pub fn signed_offset(&self) -> i32 {
        let minutes = self.offset_minutes as i32;
        if self.offset_negative {
            -minutes
        } else {
            minutes
        }
    }

    /// Calendar timestamp carrying the recorded offset. `None` when the offset
    /// is beyond what a fixed offset can represent.
    pub fn to_fixed_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.signed_offset() * 60)?;
        let naive = NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)?
            .and_hms_micro_opt(self.hour, self.minute, self.second, self.microsecond)?;
        offset.from_local_datetime(&naive).single()
    }

    fn naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)
    }
}

impl fmt::Display for WmiDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02} {}{:03}",
            self.day,
            self.month,
            self.year,
            self.hour,
            self.minute,
            self.second,
            if self.offset_negative { '-' } else { '+' },
            self.offset_minutes
        )
    }
}

/// Parse `raw` as a timestamp. Returns `None` for anything malformed or out of range.
pub fn try_parse(raw: &str) -> Option<WmiDateTime> {
    let bytes = raw.as_bytes();
    if bytes.len() != LENGTH {
        return None;
    }

    let mut pos = 0;
    let date_time = scan_digits(bytes, &mut pos, DATE_TIME_DIGITS)?;
    expect_byte(bytes, &mut pos, |b| b == b'.')?;
    let fraction = scan_digits(bytes, &mut pos, FRACTION_DIGITS)?;
    let sign = expect_byte(bytes, &mut pos, |b| b == b'+' || b == b'-')?;
    let offset = scan_digits(bytes, &mut pos, OFFSET_DIGITS)?;

    let parsed = WmiDateTime {
        year: number(&date_time[0..4]),
        month: number(&date_time[4..6]),
        day: number(&date_time[6..8]),
        hour: number(&date_time[8..10]),
        minute: number(&date_time[10..12]),
        second: number(&date_time[12..14]),
        microsecond: number(fraction),
        offset_negative: sign == b'-',
        offset_minutes: number(offset),
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&parsed.year)
        || !(1..=12).contains(&parsed.month)
        || !(1..=31).contains(&parsed.day)
        || parsed.hour > 23
        || parsed.minute > 59
        || parsed.second > 59
    {
        return None;
    }

    // Field ranges pass but the date may still not exist (e.g. 30 February).
    parsed.naive()?;

    Some(parsed)
}

/// Parse and render in display form, e.g. `08/10/2010 18:17:58 +060`.
pub fn try_format(raw: &str) -> Option<String> {
    try_parse(raw).map(|dt| dt.to_string())
}

fn scan_digits<'a>(bytes: &'a [u8], pos: &mut usize, count: usize) -> Option<&'a [u8]> {
    let end = *pos + count;
    let digits = bytes.get(*pos..end)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    *pos = end;
    Some(digits)
}

fn expect_byte(bytes: &[u8], pos: &mut usize, accept: impl Fn(u8) -> bool) -> Option<u8> {
    let b = *bytes.get(*pos)?;
    if !accept(b) {
        return None;
    }
    *pos += 1;
    Some(b)
}

fn number(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))
}
