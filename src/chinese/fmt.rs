//! 格式化日期相關功能
//!
//! 輸出用簡體字，與常見八字排盤一致。

use super::Month;

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 取得月名（不含「月」字）。正月稱「正」，十一、十二月稱「冬」「腊」，閏月冠以「闰」。
///
/// # 用例
///
/// ```
/// use sizhu::chinese::{self, Month::*};
///
/// assert_eq!("冬", chinese::fmt::month(Common(11)));
/// assert_eq!("闰正", chinese::fmt::month(Leap(1)));
/// ```
///
/// # Panics
///
/// 若月序號不在 `1..=12` 間則 panic。
pub fn month(m: Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => panic!("month {} not in 1..=12", num),
    };
    rt
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use sizhu::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// assert_eq!("三十", chinese::fmt::day(30));
/// ```
///
/// # Panics
///
/// 若日序號不在 `1..=30` 間則 panic。
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}

/// 農曆日期字串，如 `1990年十月十九`、`2017年闰六月初一`。年份用阿拉伯數字。
///
/// # 用例
///
/// ```
/// use sizhu::chinese::{self, Month::*};
///
/// assert_eq!("1999年冬月廿五", chinese::fmt::lunar_date(1999, Common(11), 25));
/// ```
pub fn lunar_date(year: i32, m: Month, d: u32) -> String {
    format!("{}年{}月{}", year, month(m), day(d))
}

/// 節氣序號轉為名稱。`1..=24` 分別為立春到大寒。
///
/// # 用例
///
/// ```
/// use sizhu::chinese;
///
/// assert_eq!("谷雨", chinese::fmt::solar_term(6));
/// assert_eq!("大寒", chinese::fmt::solar_term(24));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
        "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
        "冬至", "小寒",
    ];
    NAMES[term.rem_euclid(24) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month() {
        use Month::*;
        for (std, m) in [
            ("正", Common(1)),
            ("十", Common(10)),
            ("腊", Common(12)),
            ("闰六", Leap(6)),
        ] {
            assert_eq!(std, month(m));
        }
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("初一", 1),
            ("初十", 10),
            ("十一", 11),
            ("十九", 19),
            ("二十", 20),
            ("廿一", 21),
            ("三十", 30),
        ] {
            assert_eq!(std, day(d));
        }
    }

    #[test]
    fn test_lunar_date() {
        assert_eq!("1990年十月十九", lunar_date(1990, Month::Common(10), 19));
        assert_eq!("2017年闰六月初一", lunar_date(2017, Month::Leap(6), 1));
    }
}
