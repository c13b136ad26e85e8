use crate::{
    Config,
    config::ServiceId,
    model::{CurrentWeather, Forecast},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Where to fetch weather for: a free-form city name (user search) or a
/// coordinate (location fix / selected search result).
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coord { lat: f64, lon: f64 },
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => f.write_str(name),
            LocationQuery::Coord { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> anyhow::Result<CurrentWeather>;
    async fn forecast(&self, query: &LocationQuery) -> anyhow::Result<Forecast>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.service_api_key(ServiceId::OpenWeather).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service 'openweather'.\n\
                 Hint: run `stylecast configure openweather` and enter your API key."
        )
    })?;

    Ok(Box::new(OpenWeatherClient::new(api_key.to_owned())))
}
