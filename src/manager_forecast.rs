use chrono::{NaiveDate, Utc};
use log::{error, info};
use crate::errors::ForecastError;
use crate::manager_owm::errors::OWMError;
use crate::models::ForecastDataset;
use crate::weather_matrix::{weather_matrices, DailySummary, DayNightWindow};

/// Anything that can hand out the raw forecast dataset for a city
pub trait ForecastSource {
    async fn fetch(&self, city: &str) -> Result<ForecastDataset, OWMError>;
}

/// Produces weather matrices for cities from a forecast source
pub struct ForecastService<S> {
    source: S,
    max_days: u32,
    window: DayNightWindow,
}

impl<S: ForecastSource> ForecastService<S> {
    /// Creates a new forecast service
    ///
    /// # Arguments
    ///
    /// * 'source' - where raw forecasts come from
    /// * 'max_days' - number of days to summarize, starting tomorrow
    /// * 'window' - day/night hour boundaries
    pub fn new(source: S, max_days: u32, window: DayNightWindow) -> Self {
        Self { source, max_days, window }
    }

    /// Returns the weather matrix for a city, one summary per day starting tomorrow (UTC)
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city
    pub async fn weather_matrices(&self, city: &str) -> Result<Vec<DailySummary>, ForecastError> {
        self.weather_matrices_from(city, Utc::now().date_naive()).await
    }

    /// Returns the weather matrix for a city relative to a given reference date
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city
    /// * 'today' - the reference date, summaries start the day after
    pub async fn weather_matrices_from(&self, city: &str, today: NaiveDate) -> Result<Vec<DailySummary>, ForecastError> {
        validate_city(city)?;

        let dataset = self.source.fetch(city).await.map_err(|e| {
            error!("failed to get forecast for {}: {}", city, e);
            ForecastError::from(e)
        })?;

        info!("aggregating {} entries for {} over {} days", dataset.entries.len(), city, self.max_days);

        Ok(weather_matrices(&dataset, self.max_days, today, &self.window))
    }
}

/// Checks that a city name is non-empty and only made of alphabetic characters
///
/// # Arguments
///
/// * 'city' - name of the city
pub fn validate_city(city: &str) -> Result<(), ForecastError> {
    if city.is_empty() || !city.chars().all(char::is_alphabetic) {
        return Err(ForecastError::BadCityName(city.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::ForecastEntry;

    struct FixedSource(Result<ForecastDataset, String>);

    impl ForecastSource for FixedSource {
        async fn fetch(&self, _city: &str) -> Result<ForecastDataset, OWMError> {
            self.0.clone().map_err(OWMError::Transport)
        }
    }

    const WINDOW: DayNightWindow = DayNightWindow { day_start: 6, day_end: 18, night_start: 18, night_end: 6 };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn dataset() -> ForecastDataset {
        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        ForecastDataset::new(vec![
            ForecastEntry { timestamp: tomorrow.and_hms_opt(9, 0, 0).unwrap(), temperature: 8.0, pressure: 1002.0 },
            ForecastEntry { timestamp: tomorrow.and_hms_opt(21, 0, 0).unwrap(), temperature: 2.0, pressure: 1004.0 },
        ])
    }

    #[test]
    fn alphabetic_city_names_are_accepted() {
        assert!(validate_city("London").is_ok());
        assert!(validate_city("München").is_ok());
    }

    #[test]
    fn other_city_names_are_rejected() {
        for city in ["", "New York", "Paris1", "Rome;drop", "a-b"] {
            assert!(matches!(validate_city(city), Err(ForecastError::BadCityName(_))), "{city}");
        }
    }

    #[tokio::test]
    async fn matrix_is_built_for_max_days() {
        let service = ForecastService::new(FixedSource(Ok(dataset())), 3, WINDOW);

        let result = service.weather_matrices_from("Oslo", today()).await.unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(result[0].average_day_temperature, 8.0);
        assert_eq!(result[0].average_night_temperature, 2.0);
        assert_eq!(result[0].average_pressure, 1003.0);
        assert_eq!(result[2].average_pressure, 0.0);
    }

    #[tokio::test]
    async fn bad_city_name_is_rejected_before_fetching() {
        let service = ForecastService::new(FixedSource(Err("must not be called".to_string())), 3, WINDOW);

        let result = service.weather_matrices_from("Oslo2", today()).await;

        assert!(matches!(result, Err(ForecastError::BadCityName(_))));
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let service = ForecastService::new(FixedSource(Err("timeout".to_string())), 3, WINDOW);

        let result = service.weather_matrices_from("Oslo", today()).await;

        assert!(matches!(result, Err(ForecastError::Provider(_))));
    }
}
