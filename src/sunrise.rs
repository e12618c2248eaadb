//! Sunrise, sunset and depression-angle crossings.
//!
//! Each crossing is sought on the solar day nearest the location's civil
//! noon on the date: the first estimate is 12:00 local mean time, then the
//! declination and equation of time are re-evaluated at the estimated event
//! until it settles. Times are carried as minutes after 0h UTC of the date
//! and converted to an instant once, so a result may fall before or after
//! that UTC calendar day. A crossing that lands outside the civil date in the
//! location's time zone counts as absent.

use chrono::{DateTime, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use log::{debug, trace};

use crate::angles::{
    equation_of_time, hour_angle, julian_centuries, julian_day, solar_declination,
    MINUTES_PER_DAY, MINUTES_PER_DEGREE,
};
use crate::types::{Branch, HorizonConvention, Location};

/// Apparent solar radius in degrees.
pub const SOLAR_RADIUS: f64 = 16.0 / 60.0;
/// Mean refraction at the horizon in degrees.
pub const REFRACTION: f64 = 34.0 / 60.0;
/// Depression of the sun's centre at sea-level sunrise and sunset (≈0.833°).
pub const HORIZON_DEPRESSION: f64 = SOLAR_RADIUS + REFRACTION;
pub const EARTH_RADIUS_KM: f64 = 6356.9;

const SOLAR_NOON_MINUTES: f64 = 720.0;
const REFINEMENT_PASSES: usize = 3;

/// Dip of the visible horizon for an observer `elevation` meters up, in
/// degrees: `acos(R / (R + h))`.
pub fn elevation_adjustment(elevation: f64) -> f64 {
    let h = elevation / 1000.0;
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + h)).acos().to_degrees()
}

/// Depression angle that counts as sunrise or sunset under `convention`.
pub fn horizon_depression(location: &Location, convention: HorizonConvention) -> f64 {
    match convention {
        HorizonConvention::ElevationAdjusted => {
            HORIZON_DEPRESSION + elevation_adjustment(location.elevation())
        }
        HorizonConvention::SeaLevel => HORIZON_DEPRESSION,
    }
}

fn instant_from_minutes(date: NaiveDate, minutes: f64) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let offset = TimeDelta::try_milliseconds((minutes * 60_000.0).round() as i64)?;
    midnight.checked_add_signed(offset)
}

/// Whole days, in minutes, between the solar day that starts at 0h UTC of
/// `date` and the solar day nearest the location's civil noon on `date`.
///
/// Zero unless the civil zone is far from the longitude's solar time, e.g.
/// Kiritimati at UTC+14 and 157°W.
fn civil_day_shift(date: NaiveDate, location: &Location) -> f64 {
    let tz = location.timezone();
    let noon = date.and_time(NaiveTime::MIN + TimeDelta::hours(12));
    let offset = tz
        .offset_from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| tz.offset_from_utc_datetime(&noon))
        .fix()
        .local_minus_utc();
    let civil_noon = SOLAR_NOON_MINUTES - f64::from(offset) / 60.0;
    let mean_noon = SOLAR_NOON_MINUTES - MINUTES_PER_DEGREE * location.longitude();
    ((civil_noon - mean_noon) / MINUTES_PER_DAY).round() * MINUTES_PER_DAY
}

/// When the sun's centre is `depression` degrees below the horizon on the
/// given side of noon, or `None` if it never reaches that angle during the
/// location's civil day.
pub fn crossing_time(
    date: NaiveDate,
    location: &Location,
    depression: f64,
    branch: Branch,
) -> Option<DateTime<Utc>> {
    let jd = julian_day(date);
    let noon = SOLAR_NOON_MINUTES + civil_day_shift(date, location);
    let mut minutes = noon - MINUTES_PER_DEGREE * location.longitude();

    for pass in 0..REFINEMENT_PASSES {
        let t = julian_centuries(jd + minutes / MINUTES_PER_DAY);
        let declination = solar_declination(t);
        let eot = equation_of_time(t);
        let Some(ha) = hour_angle(location.latitude(), declination, depression) else {
            debug!(
                "no {:?} crossing at {}° below the horizon on {} for ({}, {})",
                branch,
                depression,
                date,
                location.latitude(),
                location.longitude()
            );
            return None;
        };
        let signed_ha = match branch {
            Branch::Morning => -ha,
            Branch::Evening => ha,
        };
        minutes = noon + MINUTES_PER_DEGREE * (signed_ha - location.longitude()) - eot;
        trace!(
            "pass {pass}: declination={declination:.5}° eot={eot:.4}min ha={signed_ha:.5}° -> {minutes:.4}min UTC"
        );
    }

    let instant = instant_from_minutes(date, minutes)?;
    let local_date = instant.with_timezone(&location.timezone()).date_naive();
    if local_date != date {
        debug!(
            "{:?} crossing at {}° below the horizon for {} falls on {}",
            branch, depression, date, local_date
        );
        return None;
    }
    Some(instant)
}

/// Meridian transit: the instant of local apparent noon on the location's
/// civil day. `None` only when the instant is not representable.
pub fn solar_noon(date: NaiveDate, location: &Location) -> Option<DateTime<Utc>> {
    let jd = julian_day(date);
    let mean_noon = SOLAR_NOON_MINUTES + civil_day_shift(date, location)
        - MINUTES_PER_DEGREE * location.longitude();
    let mut minutes = mean_noon;
    for _ in 0..REFINEMENT_PASSES {
        let t = julian_centuries(jd + minutes / MINUTES_PER_DAY);
        minutes = mean_noon - equation_of_time(t);
    }
    instant_from_minutes(date, minutes)
}

pub fn sunrise(
    date: NaiveDate,
    location: &Location,
    convention: HorizonConvention,
) -> Option<DateTime<Utc>> {
    crossing_time(
        date,
        location,
        horizon_depression(location, convention),
        Branch::Morning,
    )
}

pub fn sunset(
    date: NaiveDate,
    location: &Location,
    convention: HorizonConvention,
) -> Option<DateTime<Utc>> {
    crossing_time(
        date,
        location,
        horizon_depression(location, convention),
        Branch::Evening,
    )
}
