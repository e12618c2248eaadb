use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{check_coordinates, check_elevation, Result, ZmanimError};

/// An observer on the Earth's surface.
///
/// Coordinates are validated on construction and never clamped. The time
/// zone only affects how results are presented; every computation runs in
/// UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    timezone: Tz,
}

impl Location {
    /// Builds a location from degrees (north and east positive), meters above
    /// sea level and an IANA time zone identifier such as `Asia/Jerusalem`.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone_id: &str,
    ) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_elevation(elevation)?;
        let timezone: Tz = timezone_id
            .parse()
            .map_err(|_| ZmanimError::UnknownTimeZone(timezone_id.to_string()))?;
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Meters above sea level.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// Which side of solar noon a crossing is sought on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Branch {
    Morning,
    Evening,
}

/// Whether sunrise or sunset accounts for the observer's elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonConvention {
    #[default]
    ElevationAdjusted,
    SeaLevel,
}

/// One end of a halachic day.
///
/// The same reference means different instants depending on the branch it
/// is resolved on: `Horizon` is sunrise in the morning and sunset in the
/// evening, `OffsetMinutes(72.0)` is 72 minutes before sunrise or after
/// sunset, and `Depression(16.1)` is the morning or evening crossing of
/// 16.1° below the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayReference {
    Horizon,
    Depression(f64),
    OffsetMinutes(f64),
}

/// The (start, end) pair whose twelfth is one shaah zmanis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBoundaries {
    pub morning: DayReference,
    pub evening: DayReference,
}

impl DayBoundaries {
    pub const fn symmetric(reference: DayReference) -> Self {
        Self {
            morning: reference,
            evening: reference,
        }
    }
}

/// How the length of a halachic hour is measured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ShaahZmanisConvention {
    /// Sunrise to sunset.
    #[default]
    #[serde(rename = "gra")]
    Gra,
    /// 72 minutes before sunrise to 72 minutes after sunset.
    #[serde(rename = "mga")]
    Mga,
    #[serde(rename = "16.1-degrees")]
    Degrees16Point1,
    #[serde(rename = "18-degrees")]
    Degrees18,
    #[serde(rename = "19.8-degrees")]
    Degrees19Point8,
    #[serde(rename = "90-minutes")]
    Minutes90,
    #[serde(rename = "96-minutes")]
    Minutes96,
    #[serde(rename = "120-minutes")]
    Minutes120,
    /// Any other pairing of references.
    #[serde(rename = "custom")]
    Custom(DayBoundaries),
}

impl ShaahZmanisConvention {
    /// Every named convention, in the order a selector would list them.
    pub const NAMED: [ShaahZmanisConvention; 8] = [
        Self::Gra,
        Self::Mga,
        Self::Degrees16Point1,
        Self::Degrees18,
        Self::Degrees19Point8,
        Self::Minutes90,
        Self::Minutes96,
        Self::Minutes120,
    ];

    /// The reference pair this convention measures the day between.
    pub fn boundaries(self) -> DayBoundaries {
        match self {
            Self::Gra => DayBoundaries::symmetric(DayReference::Horizon),
            Self::Mga => DayBoundaries::symmetric(DayReference::OffsetMinutes(72.0)),
            Self::Degrees16Point1 => DayBoundaries::symmetric(DayReference::Depression(16.1)),
            Self::Degrees18 => DayBoundaries::symmetric(DayReference::Depression(18.0)),
            Self::Degrees19Point8 => DayBoundaries::symmetric(DayReference::Depression(19.8)),
            Self::Minutes90 => DayBoundaries::symmetric(DayReference::OffsetMinutes(90.0)),
            Self::Minutes96 => DayBoundaries::symmetric(DayReference::OffsetMinutes(96.0)),
            Self::Minutes120 => DayBoundaries::symmetric(DayReference::OffsetMinutes(120.0)),
            Self::Custom(boundaries) => boundaries,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gra => "GRA (sunrise to sunset)",
            Self::Mga => "MGA (72 minutes)",
            Self::Degrees16Point1 => "16.1°",
            Self::Degrees18 => "18°",
            Self::Degrees19Point8 => "19.8°",
            Self::Minutes90 => "90 minutes",
            Self::Minutes96 => "96 minutes",
            Self::Minutes120 => "120 minutes",
            Self::Custom(_) => "Custom",
        }
    }
}

/// The three independent method selections.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    pub sunrise: HorizonConvention,
    pub sunset: HorizonConvention,
    pub shaah_zmanis: ShaahZmanisConvention,
}

/// Everything a sheet of zmanim is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ZmanimRequest {
    pub location: Location,
    pub date: NaiveDate,
    pub conventions: Conventions,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NamedZman {
    Alos,
    Sunrise,
    SofZmanShma,
    SofZmanTefillah,
    Chatzos,
    /// Chatzos plus 30 fixed minutes.
    MinchaGedolah,
    /// Chatzos plus half a shaah zmanis.
    MinchaGedolahProportional,
    MinchaKetanah,
    PlagHamincha,
    Sunset,
    Tzeis,
    SolarMidnight,
}

impl NamedZman {
    pub const ALL: [NamedZman; 12] = [
        Self::Alos,
        Self::Sunrise,
        Self::SofZmanShma,
        Self::SofZmanTefillah,
        Self::Chatzos,
        Self::MinchaGedolah,
        Self::MinchaGedolahProportional,
        Self::MinchaKetanah,
        Self::PlagHamincha,
        Self::Sunset,
        Self::Tzeis,
        Self::SolarMidnight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Alos => "Alos Hashachar",
            Self::Sunrise => "Sunrise (Netz)",
            Self::SofZmanShma => "Sof Zman Shma",
            Self::SofZmanTefillah => "Sof Zman Tefillah",
            Self::Chatzos => "Chatzos",
            Self::MinchaGedolah => "Mincha Gedolah",
            Self::MinchaGedolahProportional => "Mincha Gedolah (proportional)",
            Self::MinchaKetanah => "Mincha Ketanah",
            Self::PlagHamincha => "Plag HaMincha",
            Self::Sunset => "Sunset (Shkiah)",
            Self::Tzeis => "Tzeis Hakochavim",
            Self::SolarMidnight => "Chatzos HaLailah",
        }
    }
}

/// One halachic hour: a twelfth of a measured day. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaahZmanis(TimeDelta);

impl ShaahZmanis {
    /// A twelfth of `end - start`, or `DegenerateDay` when `end` is not
    /// after `start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(ZmanimError::DegenerateDay { start, end });
        }
        Ok(Self((end - start) / 12))
    }

    pub fn duration(self) -> TimeDelta {
        self.0
    }

    pub fn minutes(self) -> f64 {
        self.nanoseconds() / 60e9
    }

    /// `hours` halachic hours as a clock duration, rounded to the nanosecond.
    pub fn hours(self, hours: f64) -> TimeDelta {
        TimeDelta::nanoseconds((self.nanoseconds() * hours).round() as i64)
    }

    fn nanoseconds(self) -> f64 {
        self.0.num_seconds() as f64 * 1e9 + self.0.subsec_nanos() as f64
    }
}

impl fmt::Display for ShaahZmanis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.minutes().round() as i64;
        write!(f, "{}h {}m", total / 60, total % 60)
    }
}

impl Serialize for ShaahZmanis {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.minutes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    pub julian_day: f64,
    pub declination: f64,
    pub equation_of_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

/// The full derived set for one date, location and convention selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZmanimSheet {
    pub location: Location,
    pub date: NaiveDate,
    pub conventions: Conventions,
    pub zmanim: BTreeMap<NamedZman, Option<DateTime<Tz>>>,
    pub shaah_zmanis: Option<ShaahZmanis>,
    /// Set when the selected reference pair does not describe a positive day.
    pub degeneracy: Option<ZmanimError>,
    /// Sun's position at the meridian transit, for echoing δ and the
    /// equation of time alongside the results.
    pub transit: Option<SolarPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableConfig {
    pub location: Location,
    pub start: NaiveDate,
    pub days: u32,
    pub conventions: Conventions,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            location: Location {
                name: "Jerusalem".to_string(),
                latitude: 31.7683,
                longitude: 35.2137,
                elevation: 754.0,
                timezone: chrono_tz::Asia::Jerusalem,
            },
            start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            days: 30,
            conventions: Conventions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub total_days: usize,
    pub days_with_sunrise: usize,
    pub days_without_alos: usize,
    pub earliest_sunrise: Option<NaiveTime>,
    pub latest_sunset: Option<NaiveTime>,
    pub shortest_shaah_zmanis: Option<ShaahZmanis>,
    pub longest_shaah_zmanis: Option<ShaahZmanis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZmanimTable {
    pub config: TableConfig,
    pub days: Vec<ZmanimSheet>,
    pub summary: TableSummary,
}
