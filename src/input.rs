//! Birth data as submitted, and its parsing.

use serde::{Deserialize, Serialize};

use crate::date::{Date, DateTime};
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Seed for [`crate::Lunisolar::luck_cycle`]: `1` for male, `0` for
    /// female.
    pub fn seed(&self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }
}

/// Birth date, time and place, as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    /// `YYYY-MM-DD`
    pub birth_date: String,
    /// `HH:mm`, 24-hour civil clock
    pub birth_time: String,
    /// Free text, see [`crate::location`].
    pub birth_location: String,
    pub gender: Gender,
}

impl UserInput {
    pub fn new(
        birth_date: impl Into<String>,
        birth_time: impl Into<String>,
        birth_location: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: birth_time.into(),
            birth_location: birth_location.into(),
            gender,
        }
    }

    /// The civil date and time of birth.
    ///
    /// ```
    /// use sizhu::{Gender, UserInput};
    ///
    /// let input = UserInput::new("1990-12-05", "08:15", "Beijing", Gender::Male);
    /// assert_eq!("1990-12-05 08:15", input.civil_datetime().unwrap().to_string());
    /// ```
    pub fn civil_datetime(&self) -> Result<DateTime> {
        let date = parse_date(&self.birth_date)?;
        let (hour, minute) = parse_time(&self.birth_time)?;
        Ok(DateTime {
            date,
            hour,
            minute,
        })
    }
}

/// Splits `s` on `sep` into exactly `N` runs of ASCII digits whose lengths
/// lie in the given bounds.
fn numeric_fields<const N: usize>(s: &str, sep: char, widths: [(usize, usize); N]) -> Option<[u32; N]> {
    let mut out = [0; N];
    let mut parts = s.split(sep);
    for (slot, (min, max)) in out.iter_mut().zip(widths) {
        let part = parts.next()?;
        if !(min..=max).contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    parts.next().is_none().then_some(out)
}

/// Parses a `YYYY-MM-DD` Gregorian date, checking month and day.
///
/// ```
/// use sizhu::input::parse_date;
///
/// assert_eq!("2024-02-29", parse_date("2024-02-29").unwrap().iso_gregorian());
/// assert!(parse_date("2023-02-29").is_err());
/// assert!(parse_date("1990/12/05").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<Date> {
    let invalid = || Error::InvalidDate(s.to_owned());
    let [y, m, d] = numeric_fields(s.trim(), '-', [(4, 4), (1, 2), (1, 2)]).ok_or_else(invalid)?;
    Date::from_gregorian_checked(y as i32, m as i32, d as i32).ok_or_else(invalid)
}

/// Parses an `HH:mm` time on the 24-hour clock into `(hour, minute)`.
///
/// ```
/// use sizhu::input::parse_time;
///
/// assert_eq!((8, 15), parse_time("08:15").unwrap());
/// assert!(parse_time("24:00").is_err());
/// assert!(parse_time("8.15").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidTime(s.to_owned());
    let [h, m] = numeric_fields(s.trim(), ':', [(1, 2), (2, 2)]).ok_or_else(invalid)?;
    if h >= 24 || m >= 60 {
        return Err(invalid());
    }
    Ok((h, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        for ok in ["1990-12-05", "2000-1-1", " 2024-02-29 "] {
            assert!(parse_date(ok).is_ok(), "{ok}");
        }
        for bad in [
            "", "1990", "1990-12", "1990-13-01", "1990-00-10", "1990-04-31", "90-12-05",
            "1990-12-05-01", "1990-1a-05", "+990-12-05", "１９９０-12-05",
        ] {
            assert!(matches!(parse_date(bad), Err(Error::InvalidDate(_))), "{bad}");
        }
    }

    #[test]
    fn times() {
        assert_eq!((0, 0), parse_time("00:00").unwrap());
        assert_eq!((23, 59), parse_time("23:59").unwrap());
        assert_eq!((7, 5), parse_time("7:05").unwrap());
        for bad in ["", "12", "12:60", "24:00", "12:5", "-1:30", "12:30:00", "ab:cd"] {
            assert!(matches!(parse_time(bad), Err(Error::InvalidTime(_))), "{bad}");
        }
    }

    #[test]
    fn serde_names() {
        let input: UserInput = serde_json::from_str(
            r#"{"birthDate":"1990-12-05","birthTime":"08:15","birthLocation":"北京","gender":"FEMALE"}"#,
        )
        .unwrap();
        assert_eq!(Gender::Female, input.gender);
        assert_eq!(0, input.gender.seed());
        assert_eq!("北京", input.birth_location);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!("FEMALE", json["gender"]);
        assert_eq!("08:15", json["birthTime"]);
    }
}
