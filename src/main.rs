mod errors;
mod handlers;
mod initialization;
mod logging;
mod manager_cache;
mod manager_forecast;
mod manager_owm;
mod models;
mod weather_matrix;

use std::time::Duration;
use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::{health, weather_data};
use crate::initialization::config;
use crate::manager_cache::ForecastCache;
use crate::manager_forecast::ForecastService;
use crate::manager_owm::OWM;

struct AppState {
    forecast: ForecastService<ForecastCache<OWM>>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let owm = OWM::new(
        &config.open_weather_map.api_key,
        &config.open_weather_map.forecast_url,
        config.open_weather_map.timeout_secs,
    )?;
    let cache = ForecastCache::new(owm, Duration::from_secs(config.cache.ttl_secs));
    let forecast = ForecastService::new(cache, config.open_weather_map.max_days, config.day_night);
    let app_state = web::Data::new(AppState { forecast });

    info!("starting web server on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .service(weather_data)
            .service(health)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
