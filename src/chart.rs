//! Four pillars, lunar date and luck cycles of an adjusted birth time.

use serde::{Deserialize, Serialize};

use crate::chinese::eight_char::{DaYun, FourPillars};
use crate::error::Result;
use crate::input::Gender;
use crate::lunisolar::Lunisolar;
use crate::solar_time::AdjustedInstant;

/// Most luck cycles a chart lists.
pub const MAX_LUCK_CYCLES: u32 = 10;

/// Year, month, day and hour pillars.
pub type BaZiChart = FourPillars;

/// Order in which luck cycles step through the sexagenary cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn from_flag(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Everything read off the calendar for one birth.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartReading {
    pub chart: BaZiChart,
    /// Such as `1990年十月十九`.
    pub lunar_date: String,
    /// Whole years from birth to the first luck cycle.
    pub start_age: u32,
    pub direction: Direction,
    /// Pillars of the luck cycles, as two-character tokens.
    pub da_yun: Vec<String>,
    /// Years and ages covered by each of those cycles.
    pub luck_periods: Vec<DaYun>,
}

/// Reads the chart for `instant` from `lunisolar`, listing at most
/// `cycles` luck cycles, capped at [`MAX_LUCK_CYCLES`]. The pre-cycle
/// placeholder is left out.
pub fn assemble_chart<L>(
    lunisolar: &L,
    instant: &AdjustedInstant,
    gender: Gender,
    cycles: u32,
) -> Result<ChartReading>
where
    L: Lunisolar + ?Sized,
{
    let at = instant.solar;
    let lunar = lunisolar.lunar_date(at)?;
    let chart = lunisolar.pillars(at)?;
    let luck = lunisolar.luck_cycle(at, gender.seed())?;

    let cycles = cycles.min(MAX_LUCK_CYCLES);
    let luck_periods: Vec<DaYun> = luck
        .da_yun(cycles + 1)
        .into_iter()
        .skip(1)
        .filter(|d| d.pillar.is_some())
        .collect();
    let da_yun = luck_periods
        .iter()
        .filter_map(|d| d.pillar)
        .map(|p| p.to_string())
        .collect();

    Ok(ChartReading {
        chart,
        lunar_date: lunar.to_string(),
        start_age: luck.start_age(),
        direction: Direction::from_flag(luck.forward),
        da_yun,
        luck_periods,
    })
}
