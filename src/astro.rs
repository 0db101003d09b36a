//! Positions of the Sun and phases of the Moon, to the accuracy the
//! calendar needs.
//!
//! - Solar longitude: Earth's heliocentric longitude and radius vector from
//!   a truncated VSOP87 series (Meeus, *Astronomical Algorithms*, 2nd ed.,
//!   appendix III), reduced to the apparent geocentric longitude with FK5,
//!   nutation and aberration corrections. Good to about a second of arc.
//! - New moons: Meeus ch. 49, true phase with periodic and planetary terms.
//!   Good to well under a minute over several centuries.
//!
//! All instants are dynamical time ([`Tdb`]).

use std::f64::consts::TAU;

use crate::time_scales::Tdb;

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2451545.0;
/// Mean length of the tropical year in days.
pub const TROPICAL_YEAR: f64 = 365.242_19;
/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_861;

const DAYS_PER_DEGREE: f64 = TROPICAL_YEAR / 360.0;
/// Reference epoch of lunation 0 (new moon of 2000-01-06).
const LUNATION_EPOCH: f64 = 2451550.097_66;

/// Julian centuries since J2000.0.
pub fn centuries(jd: Tdb) -> f64 {
    (jd.0 - J2000) / 36525.0
}

/// Wraps an angle in degrees into `-180.0..180.0`.
pub fn normalize_to_pm180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

// Each row: amplitude (1e-8 rad or 1e-8 AU), phase (rad), frequency (rad per millennium).
#[rustfmt::skip]
static EARTH_L0: [[f64; 3]; 64] = [
    [175347046.0, 0.0,       0.0],
    [3341656.0,   4.6692568, 6283.0758500],
    [34894.0,     4.62610,   12566.15170],
    [3497.0,      2.7441,    5753.3849],
    [3418.0,      2.8289,    3.5231],
    [3136.0,      3.6277,    77713.7715],
    [2676.0,      4.4181,    7860.4194],
    [2343.0,      6.1352,    3930.2097],
    [1324.0,      0.7425,    11506.7698],
    [1273.0,      2.0371,    529.6910],
    [1199.0,      1.1096,    1577.3435],
    [990.0,       5.233,     5884.927],
    [902.0,       2.045,     26.298],
    [857.0,       3.508,     398.149],
    [780.0,       1.179,     5223.694],
    [753.0,       2.533,     5507.553],
    [505.0,       4.583,     18849.228],
    [492.0,       4.205,     775.523],
    [357.0,       2.920,     0.067],
    [317.0,       5.849,     11790.629],
    [284.0,       1.899,     796.298],
    [271.0,       0.315,     10977.079],
    [243.0,       0.345,     5486.778],
    [206.0,       4.806,     2544.314],
    [205.0,       1.869,     5573.143],
    [202.0,       2.458,     6069.777],
    [156.0,       0.833,     213.299],
    [132.0,       3.411,     2942.463],
    [126.0,       1.083,     20.775],
    [115.0,       0.645,     0.980],
    [103.0,       0.636,     4694.003],
    [102.0,       0.976,     15720.839],
    [102.0,       4.267,     7.114],
    [99.0,        6.21,      2146.17],
    [98.0,        0.68,      155.42],
    [86.0,        5.98,      161000.69],
    [85.0,        1.30,      6275.96],
    [85.0,        3.67,      71430.70],
    [80.0,        1.81,      17260.15],
    [79.0,        3.04,      12036.46],
    [75.0,        1.76,      5088.63],
    [74.0,        3.50,      3154.69],
    [74.0,        4.68,      801.82],
    [70.0,        0.83,      9437.76],
    [62.0,        3.98,      8827.39],
    [61.0,        1.82,      7084.90],
    [57.0,        2.78,      6286.60],
    [56.0,        4.39,      14143.50],
    [56.0,        3.47,      6279.55],
    [52.0,        0.19,      12139.55],
    [52.0,        1.33,      1748.02],
    [51.0,        0.28,      5856.48],
    [49.0,        0.49,      1194.45],
    [41.0,        5.37,      8429.24],
    [41.0,        2.40,      19651.05],
    [39.0,        6.17,      10447.39],
    [37.0,        6.04,      10213.29],
    [37.0,        2.57,      1059.38],
    [36.0,        1.71,      2352.87],
    [36.0,        1.78,      6812.77],
    [33.0,        0.59,      17789.85],
    [30.0,        0.44,      83996.85],
    [30.0,        2.74,      1349.87],
    [25.0,        3.16,      4690.48],
];

#[rustfmt::skip]
static EARTH_L1: [[f64; 3]; 34] = [
    [628331966747.0, 0.0,      0.0],
    [206059.0,       2.678235, 6283.075850],
    [4303.0,         2.6351,   12566.1517],
    [425.0,          1.590,    3.523],
    [119.0,          5.796,    26.298],
    [109.0,          2.966,    1577.344],
    [93.0,           2.59,     18849.23],
    [72.0,           1.14,     529.69],
    [68.0,           1.87,     398.15],
    [67.0,           4.41,     5507.55],
    [59.0,           2.89,     5223.69],
    [56.0,           2.17,     155.42],
    [45.0,           0.40,     796.30],
    [36.0,           0.47,     775.52],
    [29.0,           2.65,     7.11],
    [21.0,           5.34,     0.98],
    [19.0,           1.85,     5486.78],
    [19.0,           4.97,     213.30],
    [17.0,           2.99,     6275.96],
    [16.0,           0.03,     2544.31],
    [16.0,           1.43,     2146.17],
    [15.0,           1.21,     10977.08],
    [12.0,           2.83,     1748.02],
    [12.0,           3.26,     5088.63],
    [12.0,           5.27,     1194.45],
    [12.0,           2.08,     4694.00],
    [11.0,           0.77,     553.57],
    [10.0,           1.30,     6286.60],
    [10.0,           4.24,     1349.87],
    [9.0,            2.70,     242.73],
    [9.0,            5.64,     951.72],
    [8.0,            5.30,     2352.87],
    [6.0,            2.65,     9437.76],
    [6.0,            4.67,     4690.48],
];

#[rustfmt::skip]
static EARTH_L2: [[f64; 3]; 20] = [
    [52919.0, 0.0,    0.0],
    [8720.0,  1.0721, 6283.0758],
    [309.0,   0.867,  12566.152],
    [27.0,    0.05,   3.52],
    [16.0,    5.19,   26.30],
    [16.0,    3.68,   155.42],
    [10.0,    0.76,   18849.23],
    [9.0,     2.06,   77713.77],
    [7.0,     0.83,   775.52],
    [5.0,     4.66,   1577.34],
    [4.0,     1.03,   7.11],
    [4.0,     3.44,   5573.14],
    [3.0,     5.14,   796.30],
    [3.0,     6.05,   5507.55],
    [3.0,     1.19,   242.73],
    [3.0,     6.12,   529.69],
    [3.0,     0.31,   398.15],
    [3.0,     2.28,   553.57],
    [2.0,     4.38,   5223.69],
    [2.0,     3.75,   0.98],
];

#[rustfmt::skip]
static EARTH_L3: [[f64; 3]; 7] = [
    [289.0, 5.844, 6283.076],
    [35.0,  0.0,   0.0],
    [17.0,  5.49,  12566.15],
    [3.0,   5.20,  155.42],
    [1.0,   4.72,  3.52],
    [1.0,   5.30,  18849.23],
    [1.0,   5.97,  242.73],
];

#[rustfmt::skip]
static EARTH_L4: [[f64; 3]; 3] = [
    [114.0, 3.142, 0.0],
    [8.0,   4.13,  6283.08],
    [1.0,   3.84,  12566.15],
];

#[rustfmt::skip]
static EARTH_L5: [[f64; 3]; 1] = [
    [1.0, 3.14, 0.0],
];

#[rustfmt::skip]
static EARTH_R0: [[f64; 3]; 6] = [
    [100013989.0, 0.0,       0.0],
    [1670700.0,   3.0984635, 6283.0758500],
    [13956.0,     3.05525,   12566.15170],
    [3084.0,      5.1985,    77713.7715],
    [1628.0,      1.1739,    5753.3849],
    [1576.0,      2.8469,    7860.4194],
];

#[rustfmt::skip]
static EARTH_R1: [[f64; 3]; 2] = [
    [103019.0, 1.107490, 6283.075850],
    [1721.0,   1.0644,   12566.1517],
];

#[rustfmt::skip]
static EARTH_R2: [[f64; 3]; 1] = [
    [4359.0, 5.7846, 6283.0758],
];

fn vsop_sum(series: &[[f64; 3]], tau: f64) -> f64 {
    series
        .iter()
        .map(|&[a, b, c]| a * (b + c * tau).cos())
        .sum::<f64>()
}

/// Evaluates `Σ Xₙ τⁿ`, scaled from 1e-8 units.
fn vsop_poly(terms: &[&[[f64; 3]]], tau: f64) -> f64 {
    terms
        .iter()
        .rev()
        .fold(0.0, |acc, series| acc * tau + vsop_sum(series, tau))
        / 1e8
}

/// Earth's heliocentric ecliptic longitude (radians, mean equinox of date)
/// and radius vector (AU).
fn earth_heliocentric(jd: Tdb) -> (f64, f64) {
    let tau = centuries(jd) / 10.0;
    let l = vsop_poly(
        &[
            &EARTH_L0[..],
            &EARTH_L1[..],
            &EARTH_L2[..],
            &EARTH_L3[..],
            &EARTH_L4[..],
            &EARTH_L5[..],
        ],
        tau,
    );
    let r = vsop_poly(&[&EARTH_R0[..], &EARTH_R1[..], &EARTH_R2[..]], tau);
    (l.rem_euclid(TAU), r)
}

/// Nutation in longitude, in degrees (Meeus ch. 22, leading terms).
pub fn nutation_in_longitude(jd: Tdb) -> f64 {
    let t = centuries(jd);
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();
    let arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    arcsec / 3600.0
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees, `0.0..360.0`.
///
/// ```
/// use sizhu::astro::sun_apparent_longitude;
/// use sizhu::time_scales::Tdb;
///
/// // Meeus, example 25.b: 1992 October 13.0 TD.
/// let lon = sun_apparent_longitude(Tdb(2448908.5));
/// assert!((lon - 199.90606).abs() < 1e-3);
/// ```
pub fn sun_apparent_longitude(jd: Tdb) -> f64 {
    let (l, r) = earth_heliocentric(jd);
    let geometric = l.to_degrees() + 180.0;
    // Conversion to the FK5 system.
    let fk5 = -0.09033 / 3600.0;
    let aberration = -20.4898 / 3600.0 / r;
    (geometric + fk5 + nutation_in_longitude(jd) + aberration).rem_euclid(360.0)
}

/// Finds the instant the Sun's apparent longitude reaches `longitude`
/// (degrees), starting the search from `near`. The result is the crossing
/// closest to `near`, within half a year of it.
///
/// ```
/// use sizhu::astro::sun_longitude_crossing;
/// use sizhu::time_scales::Tdb;
///
/// // Vernal equinox of 2000: March 20, 07:35 UT.
/// let equinox = sun_longitude_crossing(0.0, Tdb(2451623.0));
/// assert!((equinox.0 - 2451623.816).abs() < 0.01);
/// ```
pub fn sun_longitude_crossing(longitude: f64, near: Tdb) -> Tdb {
    let mut jd = near.0;
    for _ in 0..32 {
        let diff = normalize_to_pm180(longitude - sun_apparent_longitude(Tdb(jd)));
        let step = diff * DAYS_PER_DEGREE;
        jd += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    Tdb(jd)
}

/// Index `k` of the last lunation whose mean new moon is not after `jd`,
/// counted from the new moon of 2000-01-06.
pub fn lunation_before(jd: Tdb) -> i32 {
    ((jd.0 - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i32
}

/// Instant of the true new moon of lunation `k`.
///
/// ```
/// use sizhu::astro::new_moon;
///
/// // Meeus, example 49.a: the new moon of 1977 February.
/// assert!((new_moon(-283).0 - 2443192.65118).abs() < 1e-4);
/// ```
pub fn new_moon(k: i32) -> Tdb {
    let k = k as f64;
    let t = k / 1236.85;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let mean = LUNATION_EPOCH + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let periodic = -0.40720 * mp.sin()
        + 0.17241 * e * m.sin()
        + 0.01608 * (2.0 * mp).sin()
        + 0.01039 * (2.0 * f).sin()
        + 0.00739 * e * (mp - m).sin()
        - 0.00514 * e * (mp + m).sin()
        + 0.00208 * e * e * (2.0 * m).sin()
        - 0.00111 * (mp - 2.0 * f).sin()
        - 0.00057 * (mp + 2.0 * f).sin()
        + 0.00056 * e * (2.0 * mp + m).sin()
        - 0.00042 * (3.0 * mp).sin()
        + 0.00042 * e * (m + 2.0 * f).sin()
        + 0.00038 * e * (m - 2.0 * f).sin()
        - 0.00024 * e * (2.0 * mp - m).sin()
        - 0.00017 * omega.sin()
        - 0.00007 * (mp + 2.0 * m).sin()
        + 0.00004 * (2.0 * mp - 2.0 * f).sin()
        + 0.00004 * (3.0 * m).sin()
        + 0.00003 * (mp + m - 2.0 * f).sin()
        + 0.00003 * (2.0 * mp + 2.0 * f).sin()
        - 0.00003 * (mp + m + 2.0 * f).sin()
        + 0.00003 * (mp - m + 2.0 * f).sin()
        - 0.00002 * (mp - m - 2.0 * f).sin()
        - 0.00002 * (3.0 * mp + m).sin()
        + 0.00002 * (4.0 * mp).sin();

    #[rustfmt::skip]
    let planetary: [(f64, f64, f64); 14] = [
        (0.000325, 299.77 + 0.107408 * k - 0.009173 * t2, 0.0),
        (0.000165, 251.88, 0.016321),
        (0.000164, 251.83, 26.651886),
        (0.000126, 349.42, 36.412478),
        (0.000110, 84.66,  18.206239),
        (0.000062, 141.74, 53.303771),
        (0.000060, 207.14, 2.453732),
        (0.000056, 154.84, 7.306860),
        (0.000047, 34.52,  27.261239),
        (0.000042, 207.19, 0.121824),
        (0.000040, 291.34, 1.844379),
        (0.000037, 161.72, 24.198154),
        (0.000035, 239.56, 25.513099),
        (0.000023, 331.55, 3.592518),
    ];
    let additional = planetary
        .iter()
        .map(|&(coeff, base, rate)| coeff * (base + rate * k).to_radians().sin())
        .sum::<f64>();

    Tdb(mean + periodic + additional)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_of_meeus_example() {
        let jd = Tdb(2448908.5);
        let (l, r) = earth_heliocentric(jd);
        // -43.63484796 rad reduced into one turn.
        assert!((l - (-43.63484796f64).rem_euclid(TAU)).abs() < 1e-5);
        assert!((r - 0.99760775).abs() < 1e-4);
        assert!((sun_apparent_longitude(jd) - 199.906_06).abs() < 1e-3);
    }

    #[test]
    fn solstice_crossing_is_exact() {
        let ws = sun_longitude_crossing(270.0, Tdb(2451535.0));
        assert!(normalize_to_pm180(sun_apparent_longitude(ws) - 270.0).abs() < 1e-6);
        // 1999-12-22 07:44 UT.
        assert!((ws.0 - 2451534.823).abs() < 0.01, "{}", ws.0);
    }

    #[test]
    fn lunations_are_ordered() {
        let k = lunation_before(Tdb(2451545.0));
        assert_eq!(-1, k);
        let a = new_moon(k);
        let b = new_moon(k + 1);
        assert!(a.0 < 2451545.0 && 2451545.0 < b.0);
        assert!((b.0 - a.0 - SYNODIC_MONTH).abs() < 0.6);
    }

    #[test]
    fn pm180() {
        assert_eq!(-170.0, normalize_to_pm180(190.0));
        assert_eq!(10.0, normalize_to_pm180(-350.0));
        assert_eq!(-180.0, normalize_to_pm180(180.0));
    }
}
