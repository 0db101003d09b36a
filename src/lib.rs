//! Four-pillar (八字) birth charts on the Chinese lunisolar calendar.
//!
//! A calculation runs in four stages:
//!
//! 1. the birth place is resolved to a longitude ([`location`]);
//! 2. the civil birth time is moved onto local solar time by that
//!    longitude's offset from the reference meridian ([`solar_time`]);
//! 3. the corrected time is read off the calendar through the
//!    [`Lunisolar`] trait: four pillars, lunar date and luck cycles
//!    ([`chart`]);
//! 4. everything is collected into a [`BaZiResult`] ([`result`]).
//!
//! The calendar itself is computed from the positions of the Sun and Moon
//! ([`astro`], [`chinese`]) and supports Gregorian years 1800 to 2200.
//!
//! # Examples
//!
//! ```
//! use sizhu::{Direction, Gender, UserInput};
//!
//! let input = UserInput::new("1990-12-05", "08:15", "Beijing", Gender::Male);
//! let result = sizhu::calculate(&input).unwrap();
//!
//! assert_eq!("08:01", result.solar_time);
//! assert_eq!("1990年十月十九", result.lunar_date);
//! assert_eq!("庚午 丁亥 甲辰 戊辰", result.bazi.to_string());
//! assert_eq!(Direction::Forward, result.direction);
//! assert_eq!("戊子", result.da_yun[0]);
//! ```
//!
//! Lower level, with [`Date`] and the lunisolar calendar:
//!
//! ```
//! use sizhu::Date;
//! use sizhu::chinese::{Annus, Month::*};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let annus = Annus::from_date(date).unwrap();
//!
//! assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
//! ```
//!
//! Settings such as extra place names can be read from TOML, see [`Config`].

use std::borrow::Cow;

pub mod astro;
pub mod chart;
pub mod chinese;
pub mod config;
pub mod date;
pub mod error;
pub mod input;
pub mod location;
pub mod lunisolar;
pub mod result;
pub mod solar_time;
pub mod time_scales;

pub use chart::{BaZiChart, ChartReading, Direction};
pub use config::Config;
pub use date::{Date, DateTime, YearType};
pub use error::{Error, Result};
pub use input::{Gender, UserInput};
pub use location::LongitudeTable;
pub use lunisolar::{Almanac, Lunisolar};
pub use result::BaZiResult;
pub use solar_time::AdjustedInstant;

/// Runs calculations with a fixed set of place names and settings.
///
/// ```
/// use sizhu::{Calculator, Config, Gender, UserInput};
///
/// let config = Config::from_toml_str("luck_cycles = 3\n[locations]\nlhasa = 91.1").unwrap();
/// let calculator = Calculator::from_config(&config).unwrap();
///
/// let input = UserInput::new("2001-06-01", "12:00", "Lhasa", Gender::Female);
/// let result = calculator.calculate(&input).unwrap();
/// assert_eq!(91.1, result.longitude);
/// assert_eq!(3, result.da_yun.len());
/// ```
#[derive(Debug, Clone)]
pub struct Calculator<L = Almanac> {
    lunisolar: L,
    table: Cow<'static, LongitudeTable>,
    reference_meridian: f64,
    luck_cycles: u32,
}

impl Calculator<Almanac> {
    /// Built-in place names, the 120° E meridian and ten luck cycles.
    pub fn new() -> Self {
        Self::with_lunisolar(Almanac)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_config(Almanac, config)
    }
}

impl Default for Calculator<Almanac> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lunisolar> Calculator<L> {
    pub fn with_lunisolar(lunisolar: L) -> Self {
        let config = Config::default();
        Self {
            lunisolar,
            table: Cow::Borrowed(LongitudeTable::builtin()),
            reference_meridian: config.reference_meridian,
            luck_cycles: config.luck_cycles,
        }
    }

    pub fn with_config(lunisolar: L, config: &Config) -> Result<Self> {
        config.validate()?;
        let table = if config.locations.is_empty() {
            Cow::Borrowed(LongitudeTable::builtin())
        } else {
            let extra = config.locations.iter().map(|(alias, &lon)| (alias, lon));
            Cow::Owned(LongitudeTable::with_extra(extra)?)
        };
        Ok(Self {
            lunisolar,
            table,
            reference_meridian: config.reference_meridian,
            luck_cycles: config.luck_cycles,
        })
    }

    pub fn calculate(&self, input: &UserInput) -> Result<BaZiResult> {
        let civil = input.civil_datetime()?;
        let longitude = self
            .table
            .resolve_or(&input.birth_location, self.reference_meridian);
        let instant =
            solar_time::adjust_with_meridian(civil, longitude, self.reference_meridian)?;
        log::debug!(
            "{civil} at {longitude}° corrected by {:+.1} min to {}",
            instant.correction_minutes,
            instant.solar
        );

        let reading =
            chart::assemble_chart(&self.lunisolar, &instant, input.gender, self.luck_cycles)?;
        log::debug!(
            "chart {} ({}), luck cycles {:?} from age {}",
            reading.chart,
            reading.lunar_date,
            reading.direction,
            reading.start_age
        );

        Ok(result::package(input.clone(), &instant, reading))
    }
}

/// Calculates with default settings; see [`Calculator`].
pub fn calculate(input: &UserInput) -> Result<BaZiResult> {
    Calculator::new().calculate(input)
}
