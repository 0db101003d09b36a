//! The calendrical conversions a chart is built from.

use crate::chinese::eight_char::{self, FourPillars, LuckCycle, LunarDate};
use crate::date::DateTime;
use crate::error::{Error, Result};

/// First supported Gregorian year.
pub const MIN_YEAR: i32 = 1800;
/// Last supported Gregorian year.
pub const MAX_YEAR: i32 = 2200;

/// Lunisolar conversions of a local date-time, as read on the UTC+8 civil
/// clock.
pub trait Lunisolar {
    /// Lunar year, month and day.
    fn lunar_date(&self, at: DateTime) -> Result<LunarDate>;
    /// Year, month, day and hour pillars.
    fn pillars(&self, at: DateTime) -> Result<FourPillars>;
    /// Luck cycle; `seed` is `1` for male, anything else for female.
    fn luck_cycle(&self, at: DateTime, seed: u8) -> Result<LuckCycle>;
}

/// [`Lunisolar`] backed by [`crate::chinese`], for Gregorian years
/// [`MIN_YEAR`]`..=`[`MAX_YEAR`].
///
/// ```
/// use sizhu::{Almanac, DateTime, Lunisolar};
///
/// let at = DateTime::from_gregorian(2000, 1, 1, 12, 0).unwrap();
/// assert_eq!("1999年冬月廿五", Almanac.lunar_date(at).unwrap().to_string());
///
/// let ancient = DateTime::from_gregorian(1700, 1, 1, 12, 0).unwrap();
/// assert!(Almanac.pillars(ancient).is_err());
/// ```
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Almanac;

impl Almanac {
    fn check(at: &DateTime) -> Result<()> {
        let year = at.date.gregorian().0;
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(())
        } else {
            Err(Error::OutOfRange(year))
        }
    }
}

impl Lunisolar for Almanac {
    fn lunar_date(&self, at: DateTime) -> Result<LunarDate> {
        Self::check(&at)?;
        eight_char::lunar_date(at).ok_or(Error::OutOfRange(at.date.gregorian().0))
    }

    fn pillars(&self, at: DateTime) -> Result<FourPillars> {
        Self::check(&at)?;
        Ok(eight_char::pillars(at))
    }

    fn luck_cycle(&self, at: DateTime, seed: u8) -> Result<LuckCycle> {
        Self::check(&at)?;
        Ok(eight_char::luck_cycle(at, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_edges() {
        for (y, m, d, ok) in [
            (1799, 12, 31, false),
            (1800, 1, 1, true),
            (2200, 12, 31, true),
            (2201, 1, 1, false),
        ] {
            let at = DateTime::from_gregorian(y, m, d, 12, 0).unwrap();
            assert_eq!(ok, Almanac.lunar_date(at).is_ok(), "{at}");
            assert_eq!(ok, Almanac.pillars(at).is_ok(), "{at}");
            assert_eq!(ok, Almanac.luck_cycle(at, 1).is_ok(), "{at}");
        }
    }

    #[test]
    fn out_of_range_names_the_year() {
        let at = DateTime::from_gregorian(1650, 6, 1, 0, 0).unwrap();
        assert!(matches!(Almanac.pillars(at), Err(Error::OutOfRange(1650))));
    }
}
