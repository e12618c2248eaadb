//! Low-order solar ephemeris.
//!
//! Series for the sun's mean anomaly, equation of centre, apparent longitude
//! and obliquity (Meeus, *Astronomical Algorithms*, ch. 25 low-accuracy
//! method; the same series NOAA's solar calculator uses). Declination and
//! equation of time stay within a few seconds of time over several
//! centuries around J2000.
//!
//! Public functions take and return degrees (and minutes for the equation of
//! time); trigonometry is done in radians.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::types::SolarPosition;

pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Minutes of time per degree of hour angle or longitude.
pub const MINUTES_PER_DEGREE: f64 = 60.0 / DEGREES_PER_HOUR;
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Julian day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Julian day of 0h UT on the day before 0001-01-01 (proleptic Gregorian).
const JULIAN_DAY_BEFORE_CE: f64 = 1_721_424.5;
const JULIAN_DAY_UNIX_EPOCH: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Julian day at 0h UT of `date`.
pub fn julian_day(date: NaiveDate) -> f64 {
    JULIAN_DAY_BEFORE_CE + f64::from(date.num_days_from_ce())
}

/// Julian day of an instant, to the millisecond.
pub fn julian_day_at<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    JULIAN_DAY_UNIX_EPOCH + instant.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(julian_day: f64) -> f64 {
    (julian_day - J2000) / DAYS_PER_CENTURY
}

pub fn geometric_mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + t * (36_000.76983 + 0.000_303_2 * t))
}

pub fn mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35_999.05029 - 0.000_153_7 * t)
}

pub fn orbit_eccentricity(t: f64) -> f64 {
    0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t).to_radians();
    m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289
}

/// Longitude of the ascending node of the moon's orbit, driving nutation.
fn lunar_node(t: f64) -> f64 {
    125.04 - 1_934.136 * t
}

/// Apparent ecliptic longitude, corrected for nutation and aberration.
pub fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = geometric_mean_longitude(t) + equation_of_center(t);
    true_longitude - 0.00569 - 0.00478 * lunar_node(t).to_radians().sin()
}

/// Obliquity of the ecliptic, corrected for nutation.
pub fn obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813));
    let mean = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    mean + 0.00256 * lunar_node(t).to_radians().cos()
}

pub fn solar_declination(t: f64) -> f64 {
    let epsilon = obliquity(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Apparent minus mean solar time, in minutes.
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity(t).to_radians();
    let l0 = geometric_mean_longitude(t).to_radians();
    let e = orbit_eccentricity(t);
    let m = mean_anomaly(t).to_radians();
    let y = (epsilon / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    MINUTES_PER_DEGREE * eot.to_degrees()
}

/// Unsigned hour angle at which the sun's centre is `depression` degrees
/// below the horizon, or `None` when it never gets there:
///
/// `cos(H) = [sin(-depression) - sin(lat)·sin(δ)] / [cos(lat)·cos(δ)]`
pub fn hour_angle(latitude: f64, declination: f64, depression: f64) -> Option<f64> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let cos_h = ((-depression).to_radians().sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if !cos_h.is_finite() || cos_h.abs() > 1.0 {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let dec_rad = declination.to_radians();
    let ha_rad = hour_angle.to_radians();
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    cos_zenith.clamp(-1.0, 1.0).acos().to_degrees()
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Azimuth clockwise from north.
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let dec_rad = declination.to_radians();
    let ha_rad = hour_angle.to_radians();
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    normalize_angle(sin_az.atan2(cos_az).to_degrees())
}

/// Where the sun stands for an observer at `instant`.
pub fn solar_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    instant: &DateTime<Tz>,
) -> SolarPosition {
    let utc = instant.with_timezone(&Utc);
    let jd = julian_day_at(&utc);
    let t = julian_centuries(jd);
    let declination = solar_declination(t);
    let eot = equation_of_time(t);

    let minutes_of_day = (jd + 0.5).rem_euclid(1.0) * MINUTES_PER_DAY;
    let true_solar_minutes = minutes_of_day + eot + MINUTES_PER_DEGREE * longitude;
    let hour_angle = normalize_angle(true_solar_minutes / MINUTES_PER_DEGREE) - 180.0;

    let zenith = solar_zenith_angle(latitude, declination, hour_angle);
    SolarPosition {
        julian_day: jd,
        declination,
        equation_of_time: eot,
        hour_angle,
        zenith,
        altitude: solar_altitude(zenith),
        azimuth: solar_azimuth(latitude, declination, hour_angle),
    }
}
