//! Halachic times derived from the sun's crossings.
//!
//! Every named zman is one of three things: a depression-angle crossing,
//! a fixed number of minutes from a crossing, or a number of halachic hours
//! after sunrise. A zman whose inputs are missing is missing
//! too; it is never replaced by a default.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use log::debug;

use crate::angles::solar_position;
use crate::error::Result;
use crate::sunrise::{self as engine, crossing_time, solar_noon};
use crate::types::{
    Branch, DayReference, Location, NamedZman, ShaahZmanis, ZmanimRequest, ZmanimSheet,
};

/// Alos Hashachar: sun 16.1° below the horizon in the morning.
pub const ALOS_DEPRESSION: f64 = 16.1;
/// Tzeis Hakochavim: sun 8.5° below the horizon in the evening.
pub const TZEIS_DEPRESSION: f64 = 8.5;
pub const MINCHA_GEDOLAH_MINUTES: f64 = 30.0;

/// Engine results for one request, resolved once and shared by every
/// derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseInstants {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Sunrise of the following date, under the same convention.
    pub next_sunrise: Option<DateTime<Utc>>,
    pub alos: Option<DateTime<Utc>>,
    pub tzeis: Option<DateTime<Utc>>,
    /// Morning reference of the selected shaah zmanis convention.
    pub day_start: Option<DateTime<Utc>>,
    /// Evening reference of the selected shaah zmanis convention.
    pub day_end: Option<DateTime<Utc>>,
}

fn minutes(minutes: f64) -> TimeDelta {
    TimeDelta::milliseconds((minutes * 60_000.0).round() as i64)
}

fn midpoint(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    let (start, end) = (start?, end?);
    Some(start + (end - start) / 2)
}

/// Resolves one end of the day against the already computed sunrise and
/// sunset.
pub fn resolve_reference(
    reference: DayReference,
    branch: Branch,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    date: NaiveDate,
    location: &Location,
) -> Option<DateTime<Utc>> {
    match (reference, branch) {
        (DayReference::Horizon, Branch::Morning) => sunrise,
        (DayReference::Horizon, Branch::Evening) => sunset,
        (DayReference::Depression(angle), _) => crossing_time(date, location, angle, branch),
        (DayReference::OffsetMinutes(offset), Branch::Morning) => {
            sunrise.map(|t| t - minutes(offset))
        }
        (DayReference::OffsetMinutes(offset), Branch::Evening) => {
            sunset.map(|t| t + minutes(offset))
        }
    }
}

impl BaseInstants {
    pub fn compute(request: &ZmanimRequest) -> Self {
        let ZmanimRequest {
            location,
            date,
            conventions,
        } = request;
        let date = *date;

        let sunrise = engine::sunrise(date, location, conventions.sunrise);
        let sunset = engine::sunset(date, location, conventions.sunset);
        let next_sunrise = date
            .succ_opt()
            .and_then(|next| engine::sunrise(next, location, conventions.sunrise));

        let boundaries = conventions.shaah_zmanis.boundaries();
        let day_start = resolve_reference(
            boundaries.morning,
            Branch::Morning,
            sunrise,
            sunset,
            date,
            location,
        );
        let day_end = resolve_reference(
            boundaries.evening,
            Branch::Evening,
            sunrise,
            sunset,
            date,
            location,
        );

        Self {
            sunrise,
            sunset,
            next_sunrise,
            alos: crossing_time(date, location, ALOS_DEPRESSION, Branch::Morning),
            tzeis: crossing_time(date, location, TZEIS_DEPRESSION, Branch::Evening),
            day_start,
            day_end,
        }
    }

    /// One twelfth of the selected day. `Ok(None)` when either end of the
    /// day has no crossing; an error when the ends are out of order.
    pub fn shaah_zmanis(&self) -> Result<Option<ShaahZmanis>> {
        let (Some(start), Some(end)) = (self.day_start, self.day_end) else {
            return Ok(None);
        };
        ShaahZmanis::between(start, end).map(Some)
    }

    pub fn chatzos(&self) -> Option<DateTime<Utc>> {
        midpoint(self.sunrise, self.sunset)
    }

    /// `hours` halachic hours after the selected sunrise. The convention
    /// decides the length of the hour, never the anchor.
    fn after_sunrise(&self, hours: f64) -> Result<Option<DateTime<Utc>>> {
        let shaah = self.shaah_zmanis()?;
        Ok(self
            .sunrise
            .zip(shaah)
            .map(|(sunrise, shaah)| sunrise + shaah.hours(hours)))
    }

    pub fn derive(&self, kind: NamedZman) -> Result<Option<DateTime<Utc>>> {
        match kind {
            NamedZman::Alos => Ok(self.alos),
            NamedZman::Sunrise => Ok(self.sunrise),
            NamedZman::SofZmanShma => self.after_sunrise(3.0),
            NamedZman::SofZmanTefillah => self.after_sunrise(4.0),
            NamedZman::Chatzos => Ok(self.chatzos()),
            NamedZman::MinchaGedolah => {
                Ok(self.chatzos().map(|t| t + minutes(MINCHA_GEDOLAH_MINUTES)))
            }
            NamedZman::MinchaGedolahProportional => {
                let shaah = self.shaah_zmanis()?;
                Ok(self
                    .chatzos()
                    .zip(shaah)
                    .map(|(chatzos, shaah)| chatzos + shaah.hours(0.5)))
            }
            NamedZman::MinchaKetanah => self.after_sunrise(9.5),
            NamedZman::PlagHamincha => self.after_sunrise(10.75),
            NamedZman::Sunset => Ok(self.sunset),
            NamedZman::Tzeis => Ok(self.tzeis),
            NamedZman::SolarMidnight => Ok(midpoint(self.sunset, self.next_sunrise)),
        }
    }
}

pub fn shaah_zmanis(request: &ZmanimRequest) -> Result<Option<ShaahZmanis>> {
    BaseInstants::compute(request).shaah_zmanis()
}

/// A single zman for `request`.
///
/// `Ok(None)` means the sun does not reach a required angle on that day.
/// `Err(ZmanimError::DegenerateDay)` means the selected reference pair
/// does not describe a day at all.
pub fn derive_zman(kind: NamedZman, request: &ZmanimRequest) -> Result<Option<DateTime<Utc>>> {
    BaseInstants::compute(request).derive(kind)
}

/// Derives the full set of zmanim for `request` in the location's time zone.
pub fn compute_zmanim(request: &ZmanimRequest) -> ZmanimSheet {
    let location = &request.location;
    debug!(
        "computing zmanim for {} on {} with {:?}",
        location.name(),
        request.date,
        request.conventions
    );

    let base = BaseInstants::compute(request);
    let tz = location.timezone();

    let (shaah_zmanis, degeneracy) = match base.shaah_zmanis() {
        Ok(shaah) => (shaah, None),
        Err(err) => {
            debug!("{}: {err}", request.date);
            (None, Some(err))
        }
    };

    let zmanim = NamedZman::ALL
        .iter()
        .map(|&kind| {
            let instant = base.derive(kind).ok().flatten();
            (kind, instant.map(|t| t.with_timezone(&tz)))
        })
        .collect::<BTreeMap<_, _>>();


    ZmanimSheet {
        location: location.clone(),
        date: request.date,
        conventions: request.conventions,
        zmanim,
        shaah_zmanis,
        degeneracy,
        transit: solar_noon(request.date, location)
            .map(|noon| solar_position(location.latitude(), location.longitude(), &noon)),
    }
}

impl ZmanimSheet {
    pub fn get(&self, kind: NamedZman) -> Option<DateTime<chrono_tz::Tz>> {
        self.zmanim.get(&kind).copied().flatten()
    }

    /// Whole minutes from one zman to another, rounded; negative when `to`
    /// comes first.
    pub fn minutes_between(&self, from: NamedZman, to: NamedZman) -> Option<i64> {
        let (from, to) = (self.get(from)?, self.get(to)?);
        let seconds = (to - from).num_milliseconds() as f64 / 1000.0;
        Some((seconds / 60.0).round() as i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NamedZman, Option<DateTime<chrono_tz::Tz>>)> + '_ {
        self.zmanim.iter().map(|(&kind, &instant)| (kind, instant))
    }
}

/// `HH:MM:SS` in the instant's own zone, or `N/A` when absent.
pub fn format_time<Tz: TimeZone>(instant: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match instant {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}
