use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading input or configuration, or when a date falls
/// outside the supported calendar range.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time {0:?}, expected HH:mm")]
    InvalidTime(String),

    #[error("{0} is outside the supported range of years {min}..={max}", min = crate::lunisolar::MIN_YEAR, max = crate::lunisolar::MAX_YEAR)]
    OutOfRange(i32),

    #[error("longitude {longitude} for {alias:?} is not within -180..=180")]
    InvalidLongitude { alias: String, longitude: f64 },

    #[error("luck_cycles {0} is not within 0..={max}", max = crate::chart::MAX_LUCK_CYCLES)]
    InvalidLuckCycles(u32),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
