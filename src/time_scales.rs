//! Deals with different time scales, specifically, conversion between
//! TDB/TT and UT (UTC or UT1).
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Barycentric dynamic time](https://en.wikipedia.org/wiki/Barycentric_Dynamical_Time),
/// represented in Julian date (JD).
///
/// Ephemeris data are typically computed in this
/// time scale, and should be converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: Because TT differs no more than centisenconds from TDB during
/// thousands of years, they are treated numerically the same in this crate for
/// calendar calculation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl From<Tt> for Tdb {
    fn from(tt: Tt) -> Tdb {
        Tdb(tt.0)
    }
}

impl From<Tai> for Tt {
    fn from(tai: Tai) -> Tt {
        Tt(tai.0 + 32.184 / 86400.0)
    }
}

impl From<Ut> for Tt {
    /// Inverts [`Ut::convert`] by fixed-point iteration; the offset between
    /// the scales changes slowly enough that three rounds are exact to well
    /// under a millisecond.
    fn from(ut: Ut) -> Tt {
        let mut tt = Tt(ut.0);
        for _ in 0..3 {
            let offset = tt.0 - Ut::convert(tt).0;
            tt = Tt(ut.0 + offset);
        }
        tt
    }
}

/// [International atomic time](https://en.wikipedia.org/wiki/International_Atomic_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tai(pub f64);

impl From<Tt> for Tai {
    fn from(tt: Tt) -> Tai {
        Tai(tt.0 - 32.184 / 86400.0)
    }
}

impl From<Tdb> for Tai {
    fn from(tdb: Tdb) -> Tai {
        Tt::from(tdb).into()
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// This can be either UTC (coordinated universal time, based on TAI with leap
/// seconds) or UT1 (mean solar time on the Prime Meridian) depending on the
/// year. Specifically, UTC from 1972-01-01T00:00Z to the end of the known
/// leap second table, UT1 otherwise.
///
/// UT1 comes from a polynomial model of ΔT = TT − UT1, see [`delta_t`].
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TAI (or other time scale easily convertible to TAI) into
    /// UT.
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert<T>(time: T) -> Self
    where
        T: Into<Tai>,
    {
        let tai = time.into();
        let data = leap_seconds::data();

        if tai < data.starts {
            let tt = Tt::from(tai);
            return Ut(tt.0 - delta_t(decimal_year(tt.0)) / 86400.0);
        } else if tai > data.expires {
            let tt = Tt::from(tai);
            let diff = delta_t(decimal_year(tt.0)) + data.c2;
            return Ut(tt.0 - diff / 86400.0); // UT1, not UTC
        }

        let ls = match data.leap_seconds.partition_point(|ls| ls.tai <= tai) {
            0 => return Ut(tai.0 - 10.0 / 86400.0),
            i => &data.leap_seconds[i - 1],
        };
        // UTC holds still during the inserted second.
        let leap = ((tai.0 - ls.tai.0) * 86400.0).min(1.0);
        Ut(tai.0 - (ls.delta_secs as f64 + leap) / 86400.0)
    }
    /// Builds a UT instant from a wall-clock Julian date in a timezone ahead
    /// (east) of UTC by `tz_offset_minutes` minutes.
    pub fn from_local_jd(local_jd: f64, tz_offset_minutes: i32) -> Self {
        Ut(local_jd - tz_offset_minutes as f64 / 1440.0)
    }
    /// Wall-clock Julian date of the instant in a timezone ahead (east) of
    /// UTC by `tz_offset_minutes` minutes.
    pub fn local_jd(&self, tz_offset_minutes: i32) -> f64 {
        self.0 + tz_offset_minutes as f64 / 1440.0
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes`minutes.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use sizhu::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = self.local_jd(tz_offset_minutes).round() as u32;
        Date::from_jdn(jdn)
    }
}

fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - 2451544.5) / 365.2425
}

/// ΔT = TT − UT1 in seconds for a decimal Gregorian year, after the
/// polynomial expressions of Espenak & Meeus (2006).
///
/// ```
/// use sizhu::time_scales::delta_t;
/// assert!((delta_t(2000.0) - 63.86).abs() < 0.01);
/// ```
pub fn delta_t(year: f64) -> f64 {
    let y = year;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match y {
        y if y < 1700.0 => long_term(y),
        y if y < 1800.0 => {
            let t = y - 1700.0;
            8.83 + 0.1603 * t - 0.0059285 * t.powi(2) + 0.00013336 * t.powi(3)
                - t.powi(4) / 1174000.0
        }
        y if y < 1860.0 => {
            let t = y - 1800.0;
            13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
                - 0.00037436 * t.powi(4)
                + 0.0000121272 * t.powi(5)
                - 0.0000001699 * t.powi(6)
                + 0.000000000875 * t.powi(7)
        }
        y if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                - 0.0004473624 * t.powi(4)
                + t.powi(5) / 233174.0
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

mod leap_seconds {
    use super::{Tai, Tt, decimal_year, delta_t};
    use crate::date::Date;
    use std::sync::OnceLock;

    /// Last day of UTC before each inserted leap second.
    pub const DATES: &[(i32, i32, i32)] = &[
        (1972, 6, 30),
        (1972, 12, 31),
        (1973, 12, 31),
        (1974, 12, 31),
        (1975, 12, 31),
        (1976, 12, 31),
        (1977, 12, 31),
        (1978, 12, 31),
        (1979, 12, 31),
        (1981, 6, 30),
        (1982, 6, 30),
        (1983, 6, 30),
        (1985, 6, 30),
        (1987, 12, 31),
        (1989, 12, 31),
        (1990, 12, 31),
        (1992, 6, 30),
        (1993, 6, 30),
        (1994, 6, 30),
        (1995, 12, 31),
        (1997, 6, 30),
        (1998, 12, 31),
        (2005, 12, 31),
        (2008, 12, 31),
        (2012, 6, 30),
        (2015, 6, 30),
        (2016, 12, 31),
    ];
    /// No leap second has been announced up to the end of this day.
    pub const DATE_EXPIRES: (i32, i32, i32) = (2026, 6, 30);

    #[derive(Debug, Clone)]
    pub struct Data {
        pub starts: Tai,
        pub leap_seconds: Vec<LeapSecond>,
        pub expires: Tai,
        /// Keeps UT1 continuous with UTC where the table ends.
        pub c2: f64,
    }
    #[derive(Debug, Clone)]
    pub struct LeapSecond {
        /// Start of the inserted second.
        pub tai: Tai,
        /// TAI − UTC before the insertion.
        pub delta_secs: i32,
    }

    static DATA: OnceLock<Data> = OnceLock::new();

    /// JD of the midnight ending the given UTC day, shifted into TAI.
    fn end_of_day(date: (i32, i32, i32), tai_utc: i32) -> Tai {
        let (y, m, d) = date;
        let jdn = Date::from_gregorian(y, m, d)
            .unwrap_or_else(|| panic!("date not recognized: {:?}", date))
            .jdn();
        Tai(jdn as f64 + 0.5 + tai_utc as f64 / 86400.0)
    }

    pub fn data() -> &'static Data {
        DATA.get_or_init(|| {
            let starts = end_of_day((1971, 12, 31), 10);
            let leap_seconds = (10..)
                .zip(DATES)
                .map(|(delta_secs, &date)| LeapSecond {
                    tai: end_of_day(date, delta_secs),
                    delta_secs,
                })
                .collect::<Vec<_>>();
            let final_delta = 10 + DATES.len() as i32;
            let expires = end_of_day(DATE_EXPIRES, final_delta);
            let tt = Tt::from(expires);
            let c2 = final_delta as f64 + 32.184 - delta_t(decimal_year(tt.0));
            Data {
                starts,
                leap_seconds,
                expires,
                c2,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tdb_to_ut() {
        let tdb = Tdb(2451543.166666667);
        let ut = Ut::convert(tdb);
        assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
        let ut_midnight = Ut(ut.0 + (32.0 + 32.184) / 86400.0);
        let ut_before_midnight = Ut(ut_midnight.0 - 1.0 / 86400.0);
        assert_eq!(
            (1999, 12, 30),
            ut_before_midnight.date_in_timezone(480).gregorian()
        );
        assert_eq!(
            (1999, 12, 31),
            ut_midnight.date_in_timezone(480).gregorian()
        );
    }

    #[test]
    fn utc_offset_in_2000_is_32_leap_seconds() {
        let tt = Tt(2451545.0);
        let ut = Ut::convert(tt);
        assert!(((tt.0 - ut.0) * 86400.0 - 64.184).abs() < 1e-4);
    }

    #[test]
    fn before_1972_uses_delta_t() {
        let tt = Tt(Date::from_gregorian(1900, 1, 1).unwrap().jdn() as f64);
        let ut = Ut::convert(tt);
        let diff = (tt.0 - ut.0) * 86400.0;
        assert!((diff - delta_t(1900.0)).abs() < 0.1, "{diff}");
        assert!((diff + 2.79).abs() < 0.5, "{diff}");
    }

    #[test]
    fn continuous_past_the_table() {
        let expires = leap_seconds::data().expires;
        let before = Ut::convert(Tai(expires.0 - 1e-6));
        let after = Ut::convert(Tai(expires.0 + 1e-6));
        assert!(((after.0 - before.0) * 86400.0 - 2e-6 * 86400.0).abs() < 1e-3);
    }

    #[test]
    fn ut_round_trip() {
        for jd in [2378496.5, 2440587.5, 2451545.0, 2488069.5] {
            let ut = Ut(jd);
            let back = Ut::convert(Tt::from(ut));
            assert!((back.0 - ut.0).abs() * 86400.0 < 1e-3, "{jd}");
        }
    }

    #[test]
    fn delta_t_is_plausible() {
        for (year, expected, tolerance) in [
            (1800.0, 13.7, 1.0),
            (1900.0, -2.8, 1.0),
            (1950.0, 29.1, 1.0),
            (1990.0, 56.9, 1.0),
            (2010.0, 66.1, 1.5),
        ] {
            let dt = delta_t(year);
            assert!((dt - expected).abs() < tolerance, "{year}: {dt}");
        }
    }
}
