//! Zmanim over a run of consecutive dates.
//!
//! Each day is derived independently from the same location and
//! conventions, so a table is just a sequence of sheets plus a summary.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use log::debug;

use crate::error::{Result, ZmanimError};
use crate::types::{
    NamedZman, TableConfig, TableSummary, ZmanimRequest, ZmanimSheet, ZmanimTable,
};
use crate::zmanim::{compute_zmanim, format_time};

const DATE_COLUMN_WIDTH: usize = 10;
const MIN_COLUMN_WIDTH: usize = 8;

pub fn date_range(start: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(days as usize)
}

pub fn generate_table(config: &TableConfig) -> Result<ZmanimTable> {
    if config.days == 0 {
        return Err(ZmanimError::InvalidTableLength);
    }

    let days: Vec<ZmanimSheet> = date_range(config.start, config.days)
        .map(|date| {
            compute_zmanim(&ZmanimRequest {
                location: config.location.clone(),
                date,
                conventions: config.conventions,
            })
        })
        .collect();

    debug!(
        "generated {} days of zmanim for {} from {}",
        days.len(),
        config.location.name(),
        config.start
    );

    let summary = summarize(&days);
    Ok(ZmanimTable {
        config: config.clone(),
        days,
        summary,
    })
}

pub fn summarize(days: &[ZmanimSheet]) -> TableSummary {
    let local_times = |kind: NamedZman| {
        days.iter()
            .filter_map(move |day| day.get(kind))
            .map(|t| t.time())
    };
    let shaos = || days.iter().filter_map(|day| day.shaah_zmanis);

    TableSummary {
        total_days: days.len(),
        days_with_sunrise: days
            .iter()
            .filter(|day| day.get(NamedZman::Sunrise).is_some())
            .count(),
        days_without_alos: days
            .iter()
            .filter(|day| day.get(NamedZman::Alos).is_none())
            .count(),
        earliest_sunrise: local_times(NamedZman::Sunrise).min(),
        latest_sunset: local_times(NamedZman::Sunset).max(),
        shortest_shaah_zmanis: shaos().min(),
        longest_shaah_zmanis: shaos().max(),
    }
}

pub fn lookup(table: &ZmanimTable, date: NaiveDate) -> Option<&ZmanimSheet> {
    let offset = (date - table.config.start).num_days();
    let index = usize::try_from(offset).ok()?;
    table.days.get(index)
}

/// One zman across every day of the table.
pub fn column(table: &ZmanimTable, kind: NamedZman) -> Vec<Option<DateTime<Tz>>> {
    table.days.iter().map(|day| day.get(kind)).collect()
}

/// Fixed-width text layout of a table, one row per date and one column per
/// requested zman.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    table: &'a ZmanimTable,
    kinds: &'a [NamedZman],
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a ZmanimTable, kinds: &'a [NamedZman]) -> Self {
        Self { table, kinds }
    }

    fn widths(&self) -> impl Iterator<Item = (NamedZman, usize)> + 'a {
        self.kinds
            .iter()
            .map(|&kind| (kind, kind.label().chars().count().max(MIN_COLUMN_WIDTH)))
    }
}

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<DATE_COLUMN_WIDTH$}", "Date")?;
        for (kind, width) in self.widths() {
            write!(f, "  {:>width$}", kind.label())?;
        }
        writeln!(f)?;

        for day in &self.table.days {
            write!(f, "{:<DATE_COLUMN_WIDTH$}", day.date.to_string())?;
            for (kind, width) in self.widths() {
                write!(f, "  {:>width$}", format_time(day.get(kind).as_ref()))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn render_table(table: &ZmanimTable, kinds: &[NamedZman]) -> String {
    TableView::new(table, kinds).to_string()
}
