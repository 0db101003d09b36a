use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::MAX_LUCK_CYCLES;
use crate::error::{Error, Result};
use crate::location::DEFAULT_LONGITUDE;

/// Calculator settings, usually read from a TOML file:
///
/// ```toml
/// reference_meridian = 120.0
/// luck_cycles = 10
///
/// [locations]
/// "lhasa" = 91.1
/// "拉萨" = 91.1
/// ```
///
/// Every field is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Civil reference meridian in degrees east; also the longitude assumed
    /// for unknown locations.
    pub reference_meridian: f64,
    /// Number of luck cycles to list, at most [`MAX_LUCK_CYCLES`].
    pub luck_cycles: u32,
    /// Extra location aliases. On equal length they win over the built-in
    /// ones.
    pub locations: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_meridian: DEFAULT_LONGITUDE,
            luck_cycles: MAX_LUCK_CYCLES,
            locations: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loading configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the ranges that TOML parsing alone cannot. Extra locations
    /// are checked when the table is built.
    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.reference_meridian) {
            return Err(Error::InvalidLongitude {
                alias: "reference_meridian".to_owned(),
                longitude: self.reference_meridian,
            });
        }
        if self.luck_cycles > MAX_LUCK_CYCLES {
            return Err(Error::InvalidLuckCycles(self.luck_cycles));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        assert_eq!(Config::default(), Config::from_toml_str("").unwrap());
    }

    #[test]
    fn full() {
        let cfg = Config::from_toml_str(
            r#"
            reference_meridian = 135.0
            luck_cycles = 8

            [locations]
            "lhasa" = 91.1
            "#,
        )
        .unwrap();
        assert_eq!(135.0, cfg.reference_meridian);
        assert_eq!(8, cfg.luck_cycles);
        assert_eq!(Some(&91.1), cfg.locations.get("lhasa"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Config::from_toml_str("luck_cycles = \"ten\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("colour = 1"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("reference_meridian = 200.0"),
            Err(Error::InvalidLongitude { .. })
        ));
    }

    #[test]
    fn luck_cycles_are_bounded() {
        assert_eq!(10, Config::from_toml_str("luck_cycles = 10").unwrap().luck_cycles);
        assert!(matches!(
            Config::from_toml_str("luck_cycles = 11"),
            Err(Error::InvalidLuckCycles(11))
        ));
        assert!(matches!(
            Config::from_toml_str("luck_cycles = 4294967295"),
            Err(Error::InvalidLuckCycles(u32::MAX))
        ));
        // does not fit u32
        assert!(matches!(
            Config::from_toml_str("luck_cycles = -1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn validate_checks_hand_built_configs() {
        assert!(Config::default().validate().is_ok());
        let cfg = Config {
            reference_meridian: 1000.0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidLongitude { .. })));
        let cfg = Config {
            reference_meridian: f64::NAN,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = Config {
            luck_cycles: 100,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidLuckCycles(100))));
    }

    #[test]
    fn missing_file() {
        let err = Config::load("/nonexistent/sizhu.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/sizhu.toml"));
    }
}
