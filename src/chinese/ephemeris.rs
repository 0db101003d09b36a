//! 月相節氣曆表
//!
//! 各歲的節氣、合朔時刻於首次取用時以 [`crate::astro`] 推算，之後緩存。

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use crate::astro;
use crate::date::Date;
use crate::time_scales::Tdb;

/// 支持的首歲
pub const FIRST_ANNUS: i32 = 1799;
/// 支持的末歲
pub const LAST_ANNUS: i32 = 2201;

/// 保存一歲的曆表數據
#[derive(Debug)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在公元年
    pub annus: i32,
    /// 從冬至開始的各節氣時刻，亦含次歲冬至以便計算末日
    pub solar_term: [Tdb; 25],
    /// 合朔時刻，從冬至所在月之朔開始連續十五個
    pub new_moon: [Tdb; 15],
}

static CACHE: LazyLock<Mutex<HashMap<i32, &'static Annus>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

impl Annus {
    /// 取得公元 `annus` 年對應的歳的曆表。
    ///
    /// 不在 [`FIRST_ANNUS`]`..=`[`LAST_ANNUS`] 間則返回 `None`。
    pub fn get(annus: i32) -> Option<&'static Self> {
        if !(FIRST_ANNUS..=LAST_ANNUS).contains(&annus) {
            return None;
        }
        let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
        let rec = *cache.entry(annus).or_insert_with(|| {
            log::trace!("computing ephemeris for annus {annus}");
            let leaked: &'static Self = Box::leak(Box::new(Self::compute(annus)));
            leaked
        });
        Some(rec)
    }

    fn compute(annus: i32) -> Self {
        let mut solar_term = [Tdb(0.0); 25];
        // 冬至約在前一年 12 月 22 日
        let mut near = Tdb(winter_solstice_guess(annus));
        for (i, term) in solar_term.iter_mut().enumerate() {
            let longitude = (270.0 + 15.0 * i as f64).rem_euclid(360.0);
            *term = astro::sun_longitude_crossing(longitude, near);
            near = Tdb(term.0 + astro::TROPICAL_YEAR / 24.0);
        }

        // 冬至所在月之朔：朔日不晚於冬至日的最後一朔
        let ws = super::date_cst(solar_term[0]);
        let mut k = astro::lunation_before(solar_term[0]);
        while super::date_cst(astro::new_moon(k)) > ws {
            k -= 1;
        }
        while super::date_cst(astro::new_moon(k + 1)) <= ws {
            k += 1;
        }
        let new_moon = std::array::from_fn(|i| astro::new_moon(k + i as i32));

        Self {
            annus,
            solar_term,
            new_moon,
        }
    }
}

fn winter_solstice_guess(annus: i32) -> f64 {
    Date::from_gregorian(annus - 1, 12, 22)
        .map(|d| d.jdn() as f64)
        .unwrap_or(astro::J2000 + (annus - 2000) as f64 * astro::TROPICAL_YEAR - 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::date_cst;

    #[test]
    fn solar_terms() {
        let annus = Annus::get(2000).unwrap();
        let date = date_cst(annus.solar_term[0]);
        assert_eq!("1999-12-22", date.iso_gregorian());
        let date = date_cst(annus.solar_term[24]);
        assert_eq!("2000-12-21", date.iso_gregorian());
        // 立春
        let date = date_cst(annus.solar_term[3]);
        assert_eq!("2000-02-04", date.iso_gregorian());
    }

    #[test]
    fn new_moons() {
        let annus = Annus::get(2000).unwrap();
        let date = date_cst(annus.new_moon[0]);
        assert_eq!("1999-12-08", date.iso_gregorian());
        for pair in annus.new_moon.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            assert!((29.2..29.9).contains(&gap), "gap {gap}");
        }
    }

    #[test]
    fn range() {
        assert!(Annus::get(FIRST_ANNUS - 1).is_none());
        assert!(Annus::get(LAST_ANNUS + 1).is_none());
        assert_eq!(LAST_ANNUS, Annus::get(LAST_ANNUS).unwrap().annus);
    }

    #[test]
    fn cached() {
        let a = Annus::get(1990).unwrap();
        let b = Annus::get(1990).unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
