pub mod angles;
pub mod error;
pub mod sunrise;
pub mod table;
pub mod types;
pub mod zmanim;

pub use angles::{
    equation_of_time, hour_angle, julian_centuries, julian_day, normalize_angle,
    solar_azimuth, solar_declination, solar_position, solar_zenith_angle, DEGREES_PER_HOUR,
    MINUTES_PER_DEGREE,
};

pub use error::{Result, ZmanimError};

pub use sunrise::{
    crossing_time, elevation_adjustment, horizon_depression, solar_noon, sunrise, sunset,
    HORIZON_DEPRESSION,
};

pub use table::{column, generate_table, lookup, render_table, summarize, TableView};

pub use types::{
    Branch, Conventions, DayBoundaries, DayReference, HorizonConvention, Location, NamedZman,
    ShaahZmanis, ShaahZmanisConvention, SolarPosition, TableConfig, TableSummary,
    ZmanimRequest, ZmanimSheet, ZmanimTable,
};

pub use zmanim::{
    compute_zmanim, derive_zman, format_time, shaah_zmanis, BaseInstants, ALOS_DEPRESSION,
    TZEIS_DEPRESSION,
};
