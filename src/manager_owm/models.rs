use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, TimestampSeconds};

#[derive(Deserialize)]
pub struct Main {
    pub temp: f64,
    pub pressure: f64,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ListEntry {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: Main,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub list: Vec<ListEntry>,
}
