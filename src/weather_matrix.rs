use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use crate::models::{ForecastDataset, ForecastEntry};

/// Hour-of-day boundaries used to tell daytime readings from nighttime readings.
///
/// Daytime is the plain interval `[day_start, day_end)`. Nighttime is
/// `hour >= night_start || hour < night_end`, so it wraps over midnight. The two
/// windows are independent: unless `night_start == day_end` and `night_end == day_start`
/// some hours may belong to neither.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct DayNightWindow {
    pub day_start: u32,
    pub day_end: u32,
    pub night_start: u32,
    pub night_end: u32,
}

/// Outcome of classifying one reading's hour against a `DayNightWindow`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Period {
    Day,
    Night,
    Neither,
}

impl DayNightWindow {
    /// Classifies an hour of the day.
    ///
    /// The day test always wins. The night test is only consulted when the day test fails,
    /// which keeps an hour from ever counting as both.
    ///
    /// # Arguments
    ///
    /// * 'hour' - hour of the day (0-23)
    pub fn classify(&self, hour: u32) -> Period {
        if hour >= self.day_start && hour < self.day_end {
            Period::Day
        } else if hour >= self.night_start || hour < self.night_end {
            Period::Night
        } else {
            Period::Neither
        }
    }

    /// True when the night window covers exactly the hours the day window leaves out
    pub fn is_complementary(&self) -> bool {
        self.night_start == self.day_end && self.night_end == self.day_start
    }
}

/// Averaged readings for one calendar date (one row of the weather matrix).
///
/// An average over an empty bucket is reported as `0`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub average_day_temperature: f64,
    pub average_night_temperature: f64,
    pub average_pressure: f64,
}

/// Returns the entries whose timestamp falls on the given date.
///
/// # Arguments
///
/// * 'dataset' - forecast entries in any order
/// * 'date' - the calendar date to select
pub fn entries_for_date(dataset: &ForecastDataset, date: NaiveDate) -> impl Iterator<Item = &ForecastEntry> {
    dataset.entries.iter().filter(move |e| e.timestamp.date() == date)
}

/// Reduces one date's entries to a `DailySummary`.
///
/// Temperatures go to the day or night bucket according to `window`, pressure is averaged
/// over every entry regardless of its period.
///
/// # Arguments
///
/// * 'entries' - entries already restricted to `date`
/// * 'date' - the date being summarized
/// * 'window' - day/night hour boundaries
pub fn daily_summary<'a>(
    entries: impl IntoIterator<Item = &'a ForecastEntry>,
    date: NaiveDate,
    window: &DayNightWindow,
) -> DailySummary {
    let mut day_temps: Vec<f64> = Vec::new();
    let mut night_temps: Vec<f64> = Vec::new();
    let mut pressures: Vec<f64> = Vec::new();

    for entry in entries {
        match window.classify(entry.timestamp.hour()) {
            Period::Day => day_temps.push(entry.temperature),
            Period::Night => night_temps.push(entry.temperature),
            Period::Neither => {}
        }
        pressures.push(entry.pressure);
    }

    DailySummary {
        date,
        average_day_temperature: mean(&day_temps),
        average_night_temperature: mean(&night_temps),
        average_pressure: mean(&pressures),
    }
}

/// Arithmetic mean, `0` for an empty slice
///
/// # Arguments
///
/// * 'values' - values to average
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Builds the weather matrix: one summary per day from tomorrow and `horizon` days on.
///
/// Dates without any entries still get a summary, with all averages at `0`. Whether the
/// dataset actually covers the horizon is not checked.
///
/// # Arguments
///
/// * 'dataset' - the city's forecast entries
/// * 'horizon' - number of days to summarize, starting the day after `today`
/// * 'today' - reference date
/// * 'window' - day/night hour boundaries
pub fn weather_matrices(
    dataset: &ForecastDataset,
    horizon: u32,
    today: NaiveDate,
    window: &DayNightWindow,
) -> Vec<DailySummary> {
    today
        .iter_days()
        .skip(1)
        .take(horizon as usize)
        .map(|date| daily_summary(entries_for_date(dataset, date), date, window))
        .collect()
}
