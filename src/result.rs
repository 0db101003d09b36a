use serde::Serialize;

use crate::chart::{BaZiChart, ChartReading, Direction};
use crate::chinese::eight_char::DaYun;
use crate::input::UserInput;
use crate::solar_time::AdjustedInstant;

/// The outcome of one calculation. Serializes with camelCase keys:
/// `userInput`, `solarTime`, `lunarDate`, `bazi`, `startAge`, `direction`,
/// `daYun`, `longitude` and `luckPeriods`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaZiResult {
    pub user_input: UserInput,
    /// Corrected time of day, `HH:mm`.
    pub solar_time: String,
    pub lunar_date: String,
    pub bazi: BaZiChart,
    pub start_age: u32,
    pub direction: Direction,
    pub da_yun: Vec<String>,
    pub longitude: f64,
    pub luck_periods: Vec<DaYun>,
}

pub fn package(input: UserInput, instant: &AdjustedInstant, reading: ChartReading) -> BaZiResult {
    BaZiResult {
        user_input: input,
        solar_time: instant.solar_time(),
        lunar_date: reading.lunar_date,
        bazi: reading.chart,
        start_age: reading.start_age,
        direction: reading.direction,
        da_yun: reading.da_yun,
        longitude: instant.longitude,
        luck_periods: reading.luck_periods,
    }
}
