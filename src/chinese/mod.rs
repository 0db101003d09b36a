//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 夏曆依定氣、定朔編算，節氣與合朔時刻以天文算法推得，見 [`ephemeris`]。
//! 曆日一律以北京時間（UTC+8）計。
//!
//! - [`ganzhi`]：天干、地支、干支柱
//! - [`eight_char`]：四柱八字、大運
//! - [`fmt`]：漢字格式化

use crate::date::Date;
use crate::time_scales::{Tdb, Ut};

pub mod eight_char;
pub mod ephemeris;
pub mod fmt;
pub mod ganzhi;

/// 「歲」，相鄰兩冬至間的時段，或自冬至所在月（十一月）至下一冬至前月（十月或閏十月）的時段。
///
/// 支持的歲見 [`ephemeris::FIRST_ANNUS`] 與 [`ephemeris::LAST_ANNUS`]。
///
/// 注意：「歲」與「年」在曆法上不同，年以正月為首，但曆法編算須以兩冬至間的「歲」為基礎，本程序亦以「歲」編排，並依日期計算所在「年」。
///
/// # 用例
///
/// ```
/// use sizhu::Date;
/// use sizhu::chinese::{Annus, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let annus = Annus::from_date(date).unwrap();
///
/// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在的公元年
    pub annus: i32,
    /// 該歲的曆表
    pub ephemeris: &'static ephemeris::Annus,
    /// 全部月首，包括次一歲首月用以標記本歲最末日
    pub months: Vec<NewMoon>,
}
/// 月首信息
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}
/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
}

impl Annus {
    /// 取得與公元 `annus` 年對應的歲。
    ///
    /// 超出支持範圍則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::Annus;
    ///
    /// let annus = Annus::new(2000).unwrap();
    /// assert_eq!(13, annus.months.len());
    /// ```
    pub fn new(annus: i32) -> Option<Self> {
        use Month::*;

        let ephemeris = ephemeris::Annus::get(annus)?;
        let new_moon_dates: Vec<_> = ephemeris.new_moon.iter().map(|&tdb| date_cst(tdb)).collect();
        let ws = date_cst(ephemeris.solar_term[0]);
        let ws_next = date_cst(ephemeris.solar_term[24]);
        let m11_idx = new_moon_dates.partition_point(|date| date <= &ws) - 1;
        let m11n_idx = new_moon_dates.partition_point(|date| date < &ws_next) - 1;
        let mut needs_leap = match m11n_idx - m11_idx {
            12 => false,
            13 => true,
            _ => panic!("{} months between winter solstices", m11n_idx - m11_idx),
        };

        let mut months = Vec::with_capacity(m11n_idx - m11_idx + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11_idx..=m11n_idx {
            // 無中氣之月為閏月，只閏首個
            if needs_leap && new_moon_dates[i + 1] <= date_cst(ephemeris.solar_term[term]) {
                months.push(NewMoon {
                    month: Leap(month),
                    date: new_moon_dates[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date: new_moon_dates[i],
            });
            term += 2;
        }
        assert!(!needs_leap);

        Some(Annus {
            annus,
            ephemeris,
            months,
        })
    }
    /// 依特定日期取得其所在歲。
    ///
    /// 超出支持範圍則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::Date;
    /// use sizhu::chinese::Annus;
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(2000, annus.annus);
    /// ```
    pub fn from_date(date: Date) -> Option<Self> {
        let mut y = date.gregorian().0;
        loop {
            let annus = Self::new(y)?;
            let (start, end) = annus.span();

            if (start..end).contains(&date) {
                return Some(annus);
            }

            y += if date < start { -1 } else { 1 };
        }
    }

    /// 首日，與次歲首日（不含）。
    fn span(&self) -> (Date, Date) {
        (self.months[0].date, self.months[self.months.len() - 1].date)
    }

    /// 取得給定日期在該歲的年月日，返回格式為 `(年, 月, 日)`。
    ///
    /// 若所給日期不在該歲，則回報 `Err` 並指出該日期在該歲之前還是之後。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::Date;
    /// use sizhu::chinese::{Annus, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherAnnus> {
        let (begin, end) = self.span();

        if date < begin {
            return Err(OtherAnnus::Before);
        } else if date >= end {
            return Err(OtherAnnus::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = &self.months[idx];
        let d = date - m.date + 1;
        let y = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((y, m.month, d as u32))
    }
}

/// 表示給定日期不在該歲，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// 將給定曆表時間轉為北京時間（UTC+8）日期。
pub fn date_cst(tdb: Tdb) -> Date {
    Ut::convert(tdb).date_in_timezone(480)
}

/// 取得所給公元年的干支。
///
/// # 用例
///
/// ```
/// use sizhu::chinese::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// assert_eq!(7, sexagenary_for_year(1990)); // 庚午
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}
