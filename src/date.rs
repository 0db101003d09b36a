//! Calendar-independant date, and a civil date-time with minute resolution.

use std::fmt;
use std::ops::{Add, Sub};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the result date is out of supported range. Month
    /// and day are not checked against the calendar; see
    /// [`Date::from_gregorian_checked`].
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Like [`Date::from_gregorian`], but also returns `None` unless `month`
    /// is in `1..=12` and `day` exists in that month.
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// assert!(Date::from_gregorian_checked(2024, 2, 29).is_some());
    /// assert!(Date::from_gregorian_checked(2023, 2, 29).is_none());
    /// ```
    pub fn from_gregorian_checked(year: i32, month: i32, day: i32) -> Option<Self> {
        let month_u = u32::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
        let day_u = u32::try_from(day).ok()?;
        if day_u == 0 || day_u > days_in_month(year, month_u) {
            return None;
        }
        Self::from_gregorian(year, month, day)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        // JDN fits in i32 for every date this crate can produce.
        let jdn = self.jdn as i32;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month, day)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // 戊午
    /// ```
    pub fn sexagenary(&self) -> u32 {
        (self.jdn + 49) % 60 + 1
    }

    /// Moves the date by whole Gregorian months, clamping the day to the
    /// length of the target month (Jan 31 + 1 month is Feb 28 or 29).
    ///
    /// ```
    /// use sizhu::Date;
    ///
    /// let date = Date::from_gregorian(2023, 1, 31).unwrap();
    /// assert_eq!("2023-02-28", date.add_months(1).unwrap().iso_gregorian());
    /// assert_eq!("2022-12-31", date.add_months(-1).unwrap().iso_gregorian());
    /// ```
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let (y, m, d) = self.gregorian();
        let total = y * 12 + (m - 1) + months;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32 + 1;
        let day = (d as u32).min(days_in_month(year, month));
        Self::from_gregorian(year, month as i32, day as i32)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in `month` (`1..=12`) of Gregorian `year`.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as u32,
        _ => panic!("month {} not in 1..=12", month),
    }
}

/// A civil date and wall-clock time, to the minute, in no particular
/// timezone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DateTime {
    pub date: Date,
    pub hour: u32,
    pub minute: u32,
}

impl DateTime {
    /// Returns `None` unless the date exists and the time is within
    /// `00:00..=23:59`.
    ///
    /// ```
    /// use sizhu::DateTime;
    ///
    /// let dt = DateTime::from_gregorian(1990, 12, 5, 8, 1).unwrap();
    /// assert_eq!("1990-12-05 08:01", dt.to_string());
    /// assert!(DateTime::from_gregorian(1990, 12, 5, 24, 0).is_none());
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        let date = Date::from_gregorian_checked(year, month as i32, day as i32)?;
        Some(Self { date, hour, minute })
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// The date-time as a Julian date on its own wall clock (i.e. without any
    /// timezone shift applied).
    pub fn local_jd(&self) -> f64 {
        self.date.jdn() as f64 - 0.5 + self.minute_of_day() as f64 / 1440.0
    }

    /// Inverse of [`DateTime::local_jd`], truncating to the minute.
    pub fn from_local_jd(jd: f64) -> Self {
        // A hair of slack so that exact minutes survive the float round trip.
        let minutes = ((jd + 0.5) * 1440.0 + 1e-4).floor() as i64;
        let jdn = minutes.div_euclid(1440);
        let minute_of_day = minutes.rem_euclid(1440) as u32;
        Self {
            date: Date::from_jdn(jdn as u32),
            hour: minute_of_day / 60,
            minute: minute_of_day % 60,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.date, self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn checked_rejects_impossible_dates() {
        for (y, m, d) in [(2023, 2, 29), (2024, 4, 31), (2024, 13, 1), (2024, 0, 10), (2024, 1, 0)] {
            assert_eq!(None, Date::from_gregorian_checked(y, m, d), "{y}-{m}-{d}");
        }
        assert!(Date::from_gregorian_checked(2000, 2, 29).is_some());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(29, days_in_month(2000, 2));
        assert_eq!(28, days_in_month(1900, 2));
        assert_eq!(29, days_in_month(2024, 2));
        assert_eq!(28, days_in_month(2023, 2));
        assert_eq!(31, days_in_month(2023, 12));
        assert_eq!(30, days_in_month(2023, 11));
    }

    #[test]
    fn months_clamp_day() {
        let date = Date::from_gregorian(2024, 2, 29).unwrap();
        assert_eq!("2025-02-28", date.add_months(12).unwrap().iso_gregorian());
        assert_eq!("2028-02-29", date.add_months(48).unwrap().iso_gregorian());
        let date = Date::from_gregorian(2024, 3, 31).unwrap();
        assert_eq!("2024-04-30", date.add_months(1).unwrap().iso_gregorian());
    }

    #[test]
    fn local_jd_round_trip() {
        let dt = DateTime::from_gregorian(2000, 1, 1, 12, 0).unwrap();
        assert_eq!(2451545.0, dt.local_jd());
        for (h, m) in [(0, 0), (0, 1), (11, 59), (23, 59)] {
            let dt = DateTime::from_gregorian(1999, 12, 31, h, m).unwrap();
            assert_eq!(dt, DateTime::from_local_jd(dt.local_jd()));
        }
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
    }
}
