use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveTime};

use zmanim_calc::error::ZmanimError;
use zmanim_calc::table::*;
use zmanim_calc::types::*;
use zmanim_calc::zmanim::compute_zmanim;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn polar_config(start: NaiveDate, days: u32) -> TableConfig {
    TableConfig {
        location: Location::new("Tromsø", 69.6492, 18.9553, 0.0, "Europe/Oslo").unwrap(),
        start,
        days,
        conventions: Conventions::default(),
    }
}

// ── Config ──

#[test]
fn test_default_config() {
    let c = TableConfig::default();
    assert_eq!(c.location.name(), "Jerusalem");
    assert_eq!(c.location.latitude(), 31.7683);
    assert_eq!(c.location.longitude(), 35.2137);
    assert_eq!(c.location.elevation(), 754.0);
    assert_eq!(c.location.timezone(), chrono_tz::Asia::Jerusalem);
    assert_eq!(c.start, date(2026, 1, 1));
    assert_eq!(c.days, 30);
    assert_eq!(c.conventions, Conventions::default());
}

// ── Date range ──

#[test]
fn test_date_range_crosses_year_end() {
    let dates: Vec<_> = date_range(date(2025, 12, 30), 4).collect();
    assert_eq!(
        dates,
        vec![date(2025, 12, 30), date(2025, 12, 31), date(2026, 1, 1), date(2026, 1, 2)]
    );
}

#[test]
fn test_date_range_leap_day() {
    let dates: Vec<_> = date_range(date(2024, 2, 28), 3).collect();
    assert_eq!(dates[1], date(2024, 2, 29));
    assert_eq!(dates[2], date(2024, 3, 1));
}

// ── Generation ──

#[test]
fn test_generate_default_table() {
    let config = TableConfig::default();
    let table = generate_table(&config).unwrap();
    assert_eq!(table.days.len(), 30);
    assert_eq!(table.config, config);
    for (i, day) in table.days.iter().enumerate() {
        assert_eq!(day.date, config.start + chrono::Days::new(i as u64));
        assert_eq!(day.location, config.location);
        assert!(day.degeneracy.is_none());
    }
}

#[test]
fn test_table_rows_match_single_day_sheets() {
    let config = TableConfig::default();
    let table = generate_table(&config).unwrap();
    let day = date(2026, 1, 17);
    let sheet = compute_zmanim(&ZmanimRequest {
        location: config.location.clone(),
        date: day,
        conventions: config.conventions,
    });
    assert_eq!(lookup(&table, day), Some(&sheet));
}

#[test]
fn test_zero_days_rejected() {
    let config = TableConfig {
        days: 0,
        ..TableConfig::default()
    };
    assert_eq!(generate_table(&config), Err(ZmanimError::InvalidTableLength));
}

// ── Lookup ──

#[test]
fn test_lookup_bounds() {
    let table = generate_table(&TableConfig::default()).unwrap();
    assert_eq!(lookup(&table, date(2026, 1, 1)).unwrap().date, date(2026, 1, 1));
    assert_eq!(lookup(&table, date(2026, 1, 30)).unwrap().date, date(2026, 1, 30));
    assert!(lookup(&table, date(2026, 1, 31)).is_none());
    assert!(lookup(&table, date(2025, 12, 31)).is_none());
}

// ── Column ──

#[test]
fn test_column_follows_the_days() {
    let table = generate_table(&TableConfig::default()).unwrap();
    let sunsets = column(&table, NamedZman::Sunset);
    assert_eq!(sunsets.len(), table.days.len());
    // sunset gets later through January
    let times: Vec<_> = sunsets.iter().map(|t| t.unwrap().time()).collect();
    for pair in times.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", pair);
    }
    for (sunset, day) in sunsets.iter().zip(&table.days) {
        assert_eq!(sunset.unwrap().date_naive(), day.date);
    }
}

// ── Summary ──

#[test]
fn test_summary_jerusalem_january() {
    let table = generate_table(&TableConfig::default()).unwrap();
    let s = &table.summary;
    assert_eq!(s.total_days, 30);
    assert_eq!(s.days_with_sunrise, 30);
    assert_eq!(s.days_without_alos, 0);

    let earliest = s.earliest_sunrise.unwrap();
    let latest = s.latest_sunset.unwrap();
    assert!(earliest > NaiveTime::from_hms_opt(6, 0, 0).unwrap());
    assert!(earliest < NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    assert!(latest > NaiveTime::from_hms_opt(16, 30, 0).unwrap());
    assert!(latest < NaiveTime::from_hms_opt(17, 30, 0).unwrap());

    let shortest = s.shortest_shaah_zmanis.unwrap();
    let longest = s.longest_shaah_zmanis.unwrap();
    assert!(shortest <= longest);
    // days lengthen after the winter solstice
    assert_eq!(Some(shortest), table.days[0].shaah_zmanis);
    assert_eq!(Some(longest), table.days[29].shaah_zmanis);
}

#[test]
fn test_summary_polar_night() {
    // Tromsø has no sunrise from late November to mid January
    let table = generate_table(&polar_config(date(2025, 12, 1), 31)).unwrap();
    let s = &table.summary;
    assert_eq!(s.total_days, 31);
    assert_eq!(s.days_with_sunrise, 0);
    assert_eq!(s.days_without_alos, 0);
    assert!(s.earliest_sunrise.is_none());
    assert!(s.latest_sunset.is_none());
    assert!(s.shortest_shaah_zmanis.is_none());
    for day in &table.days {
        assert!(day.get(NamedZman::Alos).is_some(), "{}", day.date);
        assert!(day.get(NamedZman::Tzeis).is_some(), "{}", day.date);
    }
}

#[test]
fn test_summary_midnight_sun() {
    let table = generate_table(&polar_config(date(2025, 6, 10), 10)).unwrap();
    let s = &table.summary;
    assert_eq!(s.days_with_sunrise, 0);
    assert_eq!(s.days_without_alos, 10);
}

#[test]
fn test_summarize_empty() {
    let s = summarize(&[]);
    assert_eq!(s.total_days, 0);
    assert_eq!(s.days_with_sunrise, 0);
    assert!(s.earliest_sunrise.is_none());
    assert!(s.longest_shaah_zmanis.is_none());
}

// ── Rendering ──

#[test]
fn test_render_table_layout() {
    let config = TableConfig {
        days: 3,
        ..TableConfig::default()
    };
    let table = generate_table(&config).unwrap();
    let kinds = [NamedZman::Sunrise, NamedZman::Chatzos, NamedZman::Sunset];
    let text = render_table(&table, &kinds);
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Date"));
    assert!(lines[0].contains("Sunrise (Netz)"));
    assert!(lines[0].contains("Sunset (Shkiah)"));
    assert!(lines[1].starts_with("2026-01-01"));
    assert!(lines[3].starts_with("2026-01-03"));
    // every row is the same width
    assert!(lines.iter().all(|line| line.chars().count() == lines[0].chars().count()));
}

#[test]
fn test_render_table_marks_absent_times() {
    let table = generate_table(&polar_config(date(2025, 12, 20), 2)).unwrap();
    let text = render_table(&table, &[NamedZman::Alos, NamedZman::Sunrise]);
    for line in text.lines().skip(1) {
        assert!(line.ends_with("N/A"), "{}", line);
        assert_eq!(line[..4].parse::<i32>().unwrap(), table.config.start.year());
    }
}

#[test]
fn test_table_view_display_matches_render() {
    let config = TableConfig {
        days: 5,
        ..TableConfig::default()
    };
    let table = generate_table(&config).unwrap();
    let kinds = [NamedZman::Alos, NamedZman::PlagHamincha, NamedZman::Tzeis];

    let mut out = String::new();
    write!(out, "{}", TableView::new(&table, &kinds)).unwrap();
    assert_eq!(out, render_table(&table, &kinds));
    assert_eq!(out.lines().count(), 6);
    assert!(out.ends_with('\n'));
}
