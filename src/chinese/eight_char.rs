//! 四柱八字與大運
//!
//! 本模塊所有時刻皆為北京時間（UTC+8）的民用時。
//!
//! - 年柱以立春交節時刻為界；
//! - 月柱以各「節」交節時刻為界，月干依「五虎遁」由年干推出；
//! - 日柱依儒略日數，子時不換日；
//! - 時柱地支依時辰，時干依「五鼠遁」由日干推出，23 時起用次日日干。

use std::fmt;

use serde::Serialize;

use super::ganzhi::{Branch, Pillar};
use super::{Annus, Month};
use crate::astro;
use crate::date::{Date, DateTime};
use crate::time_scales::{Tdb, Tt, Ut};

const CST: i32 = 480;

/// 年、月、日、時四柱
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl fmt::Display for FourPillars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// 農曆日期
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunarDate {
    /// 以正月初一為首的農曆年，記以公元年數
    pub year: i32,
    pub month: Month,
    /// `1..=30`
    pub day: u32,
    /// 農曆年的干支
    pub year_pillar: Pillar,
}

impl LunarDate {
    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }
}

/// 格式如 `1990年十月十九`。
impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::fmt::lunar_date(self.year, self.month, self.day))
    }
}

/// 「節」及其交節時刻
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Jie {
    /// 節氣序號，`1..=24` 分別為立春到大寒，節皆為奇數
    pub term: u32,
    /// 交節時刻，精確到分
    pub at: DateTime,
}

impl Jie {
    pub fn name(&self) -> &'static str {
        super::fmt::solar_term(self.term)
    }
}

/// 起運信息。起運歲數等依「三日折一年、一日折四月、一時辰折十日」計。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LuckCycle {
    /// 出生時刻
    pub birth: DateTime,
    /// 月柱，大運由此順逆推排
    pub month_pillar: Pillar,
    /// 順排為 `true`
    pub forward: bool,
    /// 出生後幾年起運
    pub start_years: u32,
    /// 另加幾月
    pub start_months: u32,
    /// 另加幾日
    pub start_days: u32,
    /// 起運日期
    pub start_date: Date,
    /// 出生前最近的節
    pub prev_jie: Jie,
    /// 出生後最近的節
    pub next_jie: Jie,
}

/// 大運一步
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaYun {
    /// 第幾步，`0` 為起運前
    pub index: u32,
    pub start_year: i32,
    pub end_year: i32,
    /// 虛歲
    pub start_age: i32,
    pub end_age: i32,
    /// 起運前無干支
    pub pillar: Option<Pillar>,
}

impl LuckCycle {
    /// 起運歲數，即 [`LuckCycle::start_years`]。
    pub fn start_age(&self) -> u32 {
        self.start_years
    }

    /// 列出前 `n` 步大運，首項為起運前的時段。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::DateTime;
    /// use sizhu::chinese::eight_char;
    ///
    /// let birth = DateTime::from_gregorian(1990, 12, 5, 8, 1).unwrap();
    /// let cycle = eight_char::luck_cycle(birth, 1);
    /// let da_yun = cycle.da_yun(3);
    ///
    /// assert!(da_yun[0].pillar.is_none());
    /// assert_eq!("戊子", da_yun[1].pillar.unwrap().to_string());
    /// assert_eq!(da_yun[1].start_year + 10, da_yun[2].start_year);
    /// ```
    pub fn da_yun(&self, n: u32) -> Vec<DaYun> {
        let birth_year = self.birth.date.gregorian().0;
        let start_year = self.start_date.gregorian().0;
        (0..n)
            .map(|index| {
                if index == 0 {
                    return DaYun {
                        index,
                        start_year: birth_year,
                        end_year: start_year - 1,
                        start_age: 1,
                        end_age: start_year - birth_year,
                        pillar: None,
                    };
                }
                let year = start_year + (index as i32 - 1) * 10;
                let age = year - birth_year + 1;
                let step = if self.forward { index as i32 } else { -(index as i32) };
                DaYun {
                    index,
                    start_year: year,
                    end_year: year + 9,
                    start_age: age,
                    end_age: age + 9,
                    pillar: Some(self.month_pillar.shift(step)),
                }
            })
            .collect()
    }
}

/// 北京時間轉為曆表時間。
fn instant(at: DateTime) -> Tdb {
    Tt::from(Ut::from_local_jd(at.local_jd(), CST)).into()
}

/// 曆表時間轉為北京時間，捨去秒數。
fn local_time(tdb: Tdb) -> DateTime {
    DateTime::from_local_jd(Ut::convert(tdb).local_jd(CST))
}

/// 寅月為 `0`，丑月為 `11`。
fn jie_month(longitude: f64) -> i32 {
    ((longitude - 315.0).rem_euclid(360.0) / 30.0).floor() as i32 % 12
}

/// 取得四柱。
///
/// # 用例
///
/// ```
/// use sizhu::DateTime;
/// use sizhu::chinese::eight_char;
///
/// let at = DateTime::from_gregorian(1990, 12, 5, 8, 1).unwrap();
/// assert_eq!("庚午 丁亥 甲辰 戊辰", eight_char::pillars(at).to_string());
/// ```
pub fn pillars(at: DateTime) -> FourPillars {
    let m = jie_month(astro::sun_apparent_longitude(instant(at)));
    let (y, mo, _) = at.date.gregorian();
    // 立春前的子、丑月屬上一年
    let year_num = if m >= 10 && mo <= 2 { y - 1 } else { y };
    let year = Pillar::from_sexagenary(super::sexagenary_for_year(year_num));

    let year_stem = year.stem().index() as i32;
    let month = Pillar::from_indices(year_stem * 2 + 2 + m, 2 + m);

    let day = Pillar::from_sexagenary(at.date.sexagenary());

    let hour_branch = Branch::for_hour(at.hour);
    let day_stem = if at.hour == 23 {
        Pillar::from_sexagenary((at.date + 1).sexagenary()).stem()
    } else {
        day.stem()
    };
    let hb = hour_branch.index() as i32;
    let hour = Pillar::from_indices(day_stem.index() as i32 % 5 * 2 + hb, hb);

    FourPillars {
        year,
        month,
        day,
        hour,
    }
}

/// 取得農曆日期。
///
/// 超出曆表支持範圍則返回 `None`。
///
/// # 用例
///
/// ```
/// use sizhu::DateTime;
/// use sizhu::chinese::eight_char;
///
/// let at = DateTime::from_gregorian(2000, 1, 1, 12, 0).unwrap();
/// let lunar = eight_char::lunar_date(at).unwrap();
/// assert_eq!("1999年冬月廿五", lunar.to_string());
/// assert_eq!("己卯", lunar.year_pillar.to_string());
/// ```
pub fn lunar_date(at: DateTime) -> Option<LunarDate> {
    let annus = Annus::from_date(at.date)?;
    let (year, month, day) = annus.ymd_for(at.date).ok()?;
    Some(LunarDate {
        year,
        month,
        day,
        year_pillar: Pillar::from_sexagenary(super::sexagenary_for_year(year)),
    })
}

/// 時辰序號，子時為 `0`，23 時記為亥時 `11`。
fn double_hour(at: &DateTime) -> i32 {
    if at.hour == 23 {
        11
    } else {
        Branch::for_hour(at.hour).index() as i32
    }
}

/// 排大運。`seed` 為 `1` 者按男命，其餘按女命：陽年男、陰年女順排，餘者逆排。
///
/// # 用例
///
/// ```
/// use sizhu::DateTime;
/// use sizhu::chinese::eight_char;
///
/// let birth = DateTime::from_gregorian(1990, 12, 5, 8, 1).unwrap();
///
/// let male = eight_char::luck_cycle(birth, 1);
/// assert!(male.forward);
/// assert_eq!("大雪", male.next_jie.name());
///
/// let female = eight_char::luck_cycle(birth, 0);
/// assert!(!female.forward);
/// assert_eq!("立冬", female.prev_jie.name());
/// assert_eq!(9, female.start_age());
/// ```
pub fn luck_cycle(birth: DateTime, seed: u8) -> LuckCycle {
    let four = pillars(birth);
    let forward = four.year.stem().is_yang() == (seed == 1);

    let tdb = instant(birth);
    let longitude = astro::sun_apparent_longitude(tdb);
    let days_per_degree = astro::TROPICAL_YEAR / 360.0;
    let prev_target = 15.0 + 30.0 * ((longitude - 15.0).rem_euclid(360.0) / 30.0).floor();
    let next_target = prev_target + 30.0;
    let prev_near = tdb.0 - (longitude - prev_target).rem_euclid(360.0) * days_per_degree;
    let next_near = tdb.0 + (next_target - longitude).rem_euclid(360.0) * days_per_degree;
    let jie = |target: f64, near: f64| Jie {
        term: ((target as i32 - 315) / 15).rem_euclid(24) as u32 + 1,
        at: local_time(astro::sun_longitude_crossing(target.rem_euclid(360.0), Tdb(near))),
    };
    let prev_jie = jie(prev_target, prev_near);
    let next_jie = jie(next_target, next_near);

    let (start, end) = if forward {
        (birth, next_jie.at)
    } else {
        (prev_jie.at, birth)
    };
    let mut day_diff = end.date - start.date;
    let mut hour_diff = double_hour(&end) - double_hour(&start);
    if hour_diff < 0 {
        hour_diff += 12;
        day_diff -= 1;
    }
    let month_diff = hour_diff * 10 / 30;
    let months = (day_diff * 4 + month_diff).max(0);
    let days = hour_diff * 10 - month_diff * 30;
    let (start_years, start_months) = (months / 12, months % 12);

    let start_date = birth
        .date
        .add_months(months)
        .map_or(birth.date, |d| d + days);
    log::trace!(
        "luck cycle for {birth}: forward={forward}, {} -> {}, starts {start_years}y{start_months}m{days}d",
        prev_jie.at,
        next_jie.at
    );

    LuckCycle {
        birth,
        month_pillar: four.month,
        forward,
        start_years: start_years as u32,
        start_months: start_months as u32,
        start_days: days as u32,
        start_date,
        prev_jie,
        next_jie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime {
        DateTime::from_gregorian(y, m, d, h, mi).unwrap()
    }

    #[test]
    fn year_switches_at_lichun() {
        // 2000 年立春：2 月 4 日 20:40 北京時間
        assert_eq!("己卯", pillars(at(2000, 2, 4, 20, 30)).year.to_string());
        assert_eq!("庚辰", pillars(at(2000, 2, 4, 20, 50)).year.to_string());
        assert_eq!("丁丑", pillars(at(2000, 2, 4, 20, 30)).month.to_string());
        assert_eq!("戊寅", pillars(at(2000, 2, 4, 20, 50)).month.to_string());
    }

    #[test]
    fn early_january_is_previous_year() {
        let p = pillars(at(2000, 1, 1, 12, 0));
        assert_eq!("己卯", p.year.to_string());
        assert_eq!("丙子", p.month.to_string());
        assert_eq!("戊午", p.day.to_string());
        assert_eq!("戊午", p.hour.to_string());
    }

    #[test]
    fn late_zi_hour_uses_next_day_stem() {
        // 2000-01-01 戊午日，次日己未；己日子時為甲子
        let p = pillars(at(2000, 1, 1, 23, 30));
        assert_eq!("戊午", p.day.to_string());
        assert_eq!("甲子", p.hour.to_string());
        // 戊日子時為壬子
        assert_eq!("壬子", pillars(at(2000, 1, 1, 0, 30)).hour.to_string());
    }

    #[test]
    fn pillars_keep_parity() {
        for h in 0..24 {
            let p = pillars(at(1984, 6, 15, h, 0));
            for pillar in [p.year, p.month, p.day, p.hour] {
                assert_eq!(pillar.stem().index() % 2, pillar.branch().index() % 2);
            }
        }
    }

    #[test]
    fn lunar_leap_month() {
        let lunar = lunar_date(at(2017, 7, 23, 10, 0)).unwrap();
        assert_eq!(Month::Leap(6), lunar.month);
        assert!(lunar.is_leap_month());
        assert_eq!("2017年闰六月初一", lunar.to_string());
    }

    #[test]
    fn luck_cycle_forward() {
        let cycle = luck_cycle(at(1990, 12, 5, 8, 1), 1);
        assert!(cycle.forward);
        assert_eq!(0, cycle.start_age());
        assert_eq!("1990-12-07", cycle.next_jie.at.date.iso_gregorian());
        assert_eq!("1991-09-25", cycle.start_date.iso_gregorian());
        let names: Vec<_> = cycle
            .da_yun(11)
            .iter()
            .skip(1)
            .map(|d| d.pillar.unwrap().to_string())
            .collect();
        assert_eq!(
            vec!["戊子", "己丑", "庚寅", "辛卯", "壬辰", "癸巳", "甲午", "乙未", "丙申", "丁酉"],
            names
        );
    }

    #[test]
    fn luck_cycle_backward() {
        let cycle = luck_cycle(at(1990, 12, 5, 8, 1), 0);
        assert!(!cycle.forward);
        assert_eq!("1990-11-08", cycle.prev_jie.at.date.iso_gregorian());
        // 立冬 00:23 子時至出生辰時：27 日又 4 時辰
        assert_eq!((9, 1, 10), (cycle.start_years, cycle.start_months, cycle.start_days));
        assert_eq!("2000-01-15", cycle.start_date.iso_gregorian());
        let da_yun = cycle.da_yun(2);
        assert_eq!(
            DaYun {
                index: 0,
                start_year: 1990,
                end_year: 1999,
                start_age: 1,
                end_age: 10,
                pillar: None,
            },
            da_yun[0]
        );
        assert_eq!(2000, da_yun[1].start_year);
        assert_eq!(11, da_yun[1].start_age);
        assert_eq!("丙戌", da_yun[1].pillar.unwrap().to_string());
    }

    #[test]
    fn start_date_from_leap_day() {
        // 驚蟄 2000-03-05 14:42，未時；出生午時：5 日又 1 時辰
        let cycle = luck_cycle(at(2000, 2, 29, 12, 0), 1);
        assert!(cycle.forward);
        assert_eq!((1, 8, 10), (cycle.start_years, cycle.start_months, cycle.start_days));
        // 二十個月一次加上，2 月 29 日不先截為 28 日
        assert_eq!("2001-11-08", cycle.start_date.iso_gregorian());
    }

    #[test]
    fn yin_year_reverses_direction() {
        // 1991 辛未年，陰年
        assert!(!luck_cycle(at(1991, 6, 1, 12, 0), 1).forward);
        assert!(luck_cycle(at(1991, 6, 1, 12, 0), 0).forward);
    }
}
