use chrono::NaiveDateTime;

/// One raw forecast reading, at hourly resolution.
///
/// Temperature and pressure are kept in whatever unit the provider delivers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
}

/// All forecast entries returned for one city, in no particular order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastDataset {
    pub entries: Vec<ForecastEntry>,
}

impl ForecastDataset {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }
}
