//! Civil clock time to local true solar time.
//!
//! Only the longitude offset from the reference meridian is applied, four
//! minutes per degree. The equation of time is left out.

use crate::date::{Date, DateTime, days_in_month};
use crate::error::{Error, Result};
use crate::location::DEFAULT_LONGITUDE;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// A civil birth time moved onto the local solar clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AdjustedInstant {
    /// Time as read off the civil clock.
    pub civil: DateTime,
    /// Corrected date and time, rolled over into the neighbouring day when
    /// needed.
    pub solar: DateTime,
    /// Longitude used, in degrees east.
    pub longitude: f64,
    /// Offset applied, before rounding to the minute.
    pub correction_minutes: f64,
}

impl AdjustedInstant {
    /// Corrected time of day as zero-padded `HH:mm`.
    pub fn solar_time(&self) -> String {
        format!("{:02}:{:02}", self.solar.hour, self.solar.minute)
    }
}

/// Clock offset in minutes of a place at `longitude` from the meridian
/// `reference`. Positive east of it.
pub fn correction_minutes(longitude: f64, reference: f64) -> f64 {
    (longitude - reference) * 4.0
}

/// Adjusts against the 120° E meridian of UTC+8.
///
/// ```
/// use sizhu::DateTime;
/// use sizhu::solar_time::adjust_to_true_solar_time;
///
/// let civil = DateTime::from_gregorian(1990, 12, 5, 8, 15).unwrap();
/// let adjusted = adjust_to_true_solar_time(civil, 116.4).unwrap();
/// assert_eq!("08:01", adjusted.solar_time());
/// ```
pub fn adjust_to_true_solar_time(civil: DateTime, longitude: f64) -> Result<AdjustedInstant> {
    adjust_with_meridian(civil, longitude, DEFAULT_LONGITUDE)
}

/// Adjusts against an arbitrary reference meridian.
///
/// Both longitudes must lie within `-180..=180`, which keeps the correction
/// within a day either way. Anything else is [`Error::InvalidLongitude`].
pub fn adjust_with_meridian(civil: DateTime, longitude: f64, reference: f64) -> Result<AdjustedInstant> {
    check_longitude("longitude", longitude)?;
    check_longitude("reference_meridian", reference)?;
    let correction = correction_minutes(longitude, reference);
    // Whole minutes first, so that 59.6 never prints as :60.
    let mut total = (civil.minute_of_day() as f64 + correction).round() as i32;

    let (mut year, month, day) = civil.date.gregorian();
    let mut month = month as u32;
    let mut day = day as u32;
    if total < 0 {
        total += MINUTES_PER_DAY;
        if day > 1 {
            day -= 1;
        } else {
            month -= 1;
            if month < 1 {
                month = 12;
                year -= 1;
            }
            day = days_in_month(year, month);
        }
    } else if total >= MINUTES_PER_DAY {
        total -= MINUTES_PER_DAY;
        day += 1;
        if day > days_in_month(year, month) {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
    }

    debug_assert!((0..MINUTES_PER_DAY).contains(&total));
    let date = Date::from_gregorian(year, month as i32, day as i32).ok_or(Error::OutOfRange(year))?;
    let total = total.rem_euclid(MINUTES_PER_DAY) as u32;
    let solar = DateTime {
        date,
        hour: total / 60,
        minute: total % 60,
    };
    log::trace!("{civil} at {longitude}° is {solar} solar ({correction:+.1} min)");
    Ok(AdjustedInstant {
        civil,
        solar,
        longitude,
        correction_minutes: correction,
    })
}

fn check_longitude(what: &str, longitude: f64) -> Result<()> {
    if (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err(Error::InvalidLongitude {
            alias: what.to_owned(),
            longitude,
        })
    }
}
