use actix_web::{get, web, HttpResponse, Responder};
use log::{info, warn};
use serde::Deserialize;
use crate::AppState;
use crate::errors::ForecastError;

#[derive(Deserialize, Debug)]
struct CityQuery {
    city: String,
}

#[get("/data")]
async fn weather_data(params: web::Query<CityQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.forecast.weather_matrices(&params.city).await {
        Ok(matrices) => HttpResponse::Ok().json(matrices),
        Err(e @ ForecastError::BadCityName(_)) => {
            warn!("{}", e);
            HttpResponse::BadRequest().body(e.to_string())
        },
        Err(ForecastError::Provider(_)) => HttpResponse::BadGateway().body("upstream provider error"),
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().finish()
}
