pub mod errors;
mod models;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use crate::manager_forecast::ForecastSource;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::FullForecast;
use crate::models::{ForecastDataset, ForecastEntry};

/// Struct for fetching weather forecasts from OpenWeatherMap
pub struct OWM {
    client: Client,
    api_key: String,
    forecast_url: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching forecasts from OpenWeatherMap
    ///
    /// The forecast url is a template where `{city}` and `{api_key}` are replaced
    /// on each request.
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap api key
    /// * 'forecast_url' - url template of the forecast endpoint
    /// * 'timeout_secs' - request timeout in seconds
    pub fn new(api_key: &str, forecast_url: &str, timeout_secs: u64) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            forecast_url: forecast_url.to_string(),
        })
    }

    /// Expands the url template for the given city
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city
    fn url(&self, city: &str) -> String {
        self.forecast_url
            .replace("{city}", city)
            .replace("{api_key}", &self.api_key)
    }

    /// Retrieves the raw forecast for a city from OpenWeatherMap.
    /// Every entry of the provider's forecast list is kept, timestamps are the naive UTC
    /// times the provider reports.
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city, already validated
    pub async fn new_forecast(&self, city: &str) -> Result<ForecastDataset, OWMError> {
        let req = self.client
            .get(self.url(city))
            .header(reqwest::header::ACCEPT, "application/json")
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::Status(status));
        }

        let json = req.text().await?;
        let tmp_forecast: FullForecast = serde_json::from_str(&json)?;

        let entries: Vec<ForecastEntry> = tmp_forecast.list
            .into_iter()
            .map(|e| ForecastEntry {
                timestamp: e.dt.naive_utc(),
                temperature: e.main.temp,
                pressure: e.main.pressure,
            })
            .collect();

        debug!("fetched {} forecast entries for {}", entries.len(), city);

        Ok(ForecastDataset::new(entries))
    }
}

impl ForecastSource for OWM {
    async fn fetch(&self, city: &str) -> Result<ForecastDataset, OWMError> {
        self.new_forecast(city).await
    }
}
