//! Place names to longitudes.
//!
//! Matching is by substring on a normalized form (lowercase, whitespace
//! removed), so `"Beijing, China"` and `"北京市朝阳区"` both find Beijing.
//! When several aliases match, the longest one wins, then the one listed
//! first. Unknown places get [`DEFAULT_LONGITUDE`].

use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Longitude of the UTC+8 civil reference meridian, in degrees east.
pub const DEFAULT_LONGITUDE: f64 = 120.0;

#[rustfmt::skip]
static BUILTIN_ALIASES: &[(&str, f64)] = &[
    ("北京", 116.4),   ("beijing", 116.4),
    ("上海", 121.5),   ("shanghai", 121.5),
    ("广州", 113.3),   ("guangzhou", 113.3),
    ("深圳", 114.1),   ("shenzhen", 114.1),
    ("杭州", 120.2),   ("hangzhou", 120.2),
    ("成都", 104.1),   ("chengdu", 104.1),
    ("重庆", 106.5),   ("chongqing", 106.5),
    ("武汉", 114.3),   ("wuhan", 114.3),
    ("西安", 108.9),   ("xian", 108.9),
    ("南京", 118.8),   ("nanjing", 118.8),
    ("天津", 117.2),   ("tianjin", 117.2),
    ("苏州", 120.6),   ("suzhou", 120.6),
    ("长沙", 113.0),   ("changsha", 113.0),
    ("郑州", 113.7),   ("zhengzhou", 113.7),
    ("沈阳", 123.4),   ("shenyang", 123.4),
    ("青岛", 120.4),   ("qingdao", 120.4),
    ("大连", 121.6),   ("dalian", 121.6),
    ("济南", 117.0),   ("jinan", 117.0),
    ("厦门", 118.1),   ("xiamen", 118.1),
    ("福州", 119.3),   ("fuzhou", 119.3),
    ("哈尔滨", 126.6), ("harbin", 126.6),
    ("长春", 125.3),   ("changchun", 125.3),
    ("昆明", 102.7),   ("kunming", 102.7),
    ("贵阳", 106.7),   ("guiyang", 106.7),
    ("南宁", 108.3),   ("nanning", 108.3),
    ("海口", 110.3),   ("haikou", 110.3),
    ("台北", 121.5),   ("taipei", 121.5),
    ("香港", 114.2),   ("hong kong", 114.2),
    ("澳门", 113.5),   ("macau", 113.5),     ("macao", 113.5),
    ("纽约", -74.0),   ("new york", -74.0),
    ("洛杉矶", -118.2), ("los angeles", -118.2),
    ("伦敦", -0.1),    ("london", -0.1),
    ("东京", 139.7),   ("tokyo", 139.7),
    ("首尔", 127.0),   ("seoul", 127.0),
    ("新加坡", 103.8), ("singapore", 103.8),
    ("悉尼", 151.2),   ("sydney", 151.2),
    ("巴黎", 2.3),     ("paris", 2.3),
    ("柏林", 13.4),    ("berlin", 13.4),
    ("莫斯科", 37.6),  ("moscow", 37.6),
    ("迪拜", 55.3),    ("dubai", 55.3),
    ("温哥华", -123.1), ("vancouver", -123.1),
    ("多伦多", -79.4), ("toronto", -79.4),
    ("旧金山", -122.4), ("san francisco", -122.4),
];

static BUILTIN: LazyLock<LongitudeTable> = LazyLock::new(|| LongitudeTable {
    entries: BUILTIN_ALIASES
        .iter()
        .map(|&(alias, longitude)| (normalize(alias), longitude))
        .collect(),
});

/// Lowercases `s` and drops all whitespace.
///
/// ```
/// assert_eq!("newyork", sizhu::location::normalize(" New  York\t"));
/// ```
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// An ordered list of normalized aliases and their longitudes in degrees
/// east.
#[derive(Debug, Clone, PartialEq)]
pub struct LongitudeTable {
    entries: Vec<(String, f64)>,
}

impl LongitudeTable {
    /// The built-in table of major Chinese and world cities.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// A table with `aliases` placed ahead of the built-in ones.
    ///
    /// Longitudes must lie in `-180..=180`. Aliases that normalize to the
    /// empty string are dropped since they would match everything.
    ///
    /// ```
    /// use sizhu::location::LongitudeTable;
    ///
    /// let table = LongitudeTable::with_extra([("Lhasa", 91.1)]).unwrap();
    /// assert_eq!(91.1, table.resolve("Lhasa, Tibet"));
    /// assert_eq!(116.4, table.resolve("Beijing"));
    /// assert!(LongitudeTable::with_extra([("Nowhere", 200.0)]).is_err());
    /// ```
    pub fn with_extra<I, S>(aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (alias, longitude) in aliases {
            let alias = alias.as_ref();
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(Error::InvalidLongitude {
                    alias: alias.to_owned(),
                    longitude,
                });
            }
            let key = normalize(alias);
            if key.is_empty() {
                log::warn!("ignoring empty location alias {alias:?}");
                continue;
            }
            entries.push((key, longitude));
        }
        entries.extend(BUILTIN.entries.iter().cloned());
        Ok(Self { entries })
    }

    /// Finds the best matching alias for `location`, returning it in
    /// normalized form along with its longitude.
    ///
    /// ```
    /// use sizhu::location::LongitudeTable;
    ///
    /// let table = LongitudeTable::builtin();
    /// assert_eq!(Some(("newyork", -74.0)), table.lookup("New York City"));
    /// assert_eq!(None, table.lookup("Atlantis"));
    /// ```
    pub fn lookup(&self, location: &str) -> Option<(&str, f64)> {
        let needle = normalize(location);
        let mut best: Option<(&str, f64)> = None;
        for (alias, longitude) in &self.entries {
            if !needle.contains(alias.as_str()) {
                continue;
            }
            // strictly longer only, so that earlier entries keep ties
            if best.is_none_or(|(b, _)| alias.chars().count() > b.chars().count()) {
                best = Some((alias.as_str(), *longitude));
            }
        }
        best
    }

    /// Longitude for `location`, or [`DEFAULT_LONGITUDE`] when nothing
    /// matches.
    pub fn resolve(&self, location: &str) -> f64 {
        self.resolve_or(location, DEFAULT_LONGITUDE)
    }

    /// Like [`LongitudeTable::resolve`] with a caller-chosen fallback.
    pub fn resolve_or(&self, location: &str, default: f64) -> f64 {
        match self.lookup(location) {
            Some((alias, longitude)) => {
                log::trace!("location {location:?} matched {alias:?} at {longitude}");
                longitude
            }
            None => {
                log::debug!("unknown location {location:?}, assuming {default}");
                default
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves `location` against the built-in table.
///
/// ```
/// use sizhu::location::resolve_longitude;
///
/// assert_eq!(116.4, resolve_longitude("Beijing"));
/// assert_eq!(120.0, resolve_longitude("Atlantis"));
/// ```
pub fn resolve_longitude(location: &str) -> f64 {
    LongitudeTable::builtin().resolve(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        for (std, location) in [
            (116.4, "Beijing, China"),
            (116.4, "北京市"),
            (114.2, "HongKong"),
            (114.2, "hong kong"),
            (-74.0, "NEW YORK"),
            (-122.4, "San Francisco, CA"),
        ] {
            assert_eq!(std, resolve_longitude(location), "{location}");
        }
        // only the simplified form is listed
        assert_eq!(139.7, resolve_longitude("东京"));
        assert_eq!(DEFAULT_LONGITUDE, resolve_longitude("東京"));
    }

    #[test]
    fn unknown_defaults_to_reference_meridian() {
        assert_eq!(DEFAULT_LONGITUDE, resolve_longitude("Atlantis"));
        assert_eq!(DEFAULT_LONGITUDE, resolve_longitude(""));
        assert_eq!(7.0, LongitudeTable::builtin().resolve_or("Atlantis", 7.0));
    }

    #[test]
    fn longest_alias_wins() {
        let table = LongitudeTable::with_extra([("york", -1.1)]).unwrap();
        assert_eq!(-74.0, table.resolve("New York"));
        assert_eq!(-1.1, table.resolve("York, England"));
    }

    #[test]
    fn earlier_entry_wins_ties() {
        let table = LongitudeTable::with_extra([("paris", 2.35)]).unwrap();
        assert_eq!(2.35, table.resolve("Paris"));
        // tokyo is listed before paris
        assert_eq!(139.7, resolve_longitude("Paris to Tokyo"));
    }

    #[test]
    fn extras_are_validated() {
        assert!(matches!(
            LongitudeTable::with_extra([("mars", -181.0)]),
            Err(Error::InvalidLongitude { .. })
        ));
        let table = LongitudeTable::with_extra([(" ", 10.0)]).unwrap();
        assert_eq!(LongitudeTable::builtin().len(), table.len());
        assert_eq!(DEFAULT_LONGITUDE, table.resolve("Atlantis"));
    }
}
