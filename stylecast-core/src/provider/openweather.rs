use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{CurrentWeather, Forecast};
use crate::provider::LocationQuery;

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T> {
        let url = format!("{BASE_URL}/{endpoint}");

        let mut request = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")]);

        request = match query {
            LocationQuery::City(name) => request.query(&[("q", name.as_str())]),
            LocationQuery::Coord { lat, lon } => {
                request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            }
        };

        debug!(endpoint, %query, "requesting OpenWeather");

        let res = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                endpoint,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {endpoint} JSON"))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather> {
        self.get_json("weather", query).await
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast> {
        self.get_json("forecast", query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_bodies() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn parses_real_current_payload_shape() {
        let body = r#"{
            "coord": {"lon": 29.2333, "lat": 40.8667},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 11.3, "feels_like": 10.6, "temp_min": 10.0, "temp_max": 12.1,
                     "pressure": 1015, "humidity": 82},
            "dt": 1735639200,
            "name": "İçmeler",
            "cod": 200
        }"#;

        let parsed: CurrentWeather = serde_json::from_str(body).expect("should parse");
        assert_eq!(parsed.name, "İçmeler");
        assert_eq!(parsed.weather[0].id, 500);
    }

    #[test]
    fn parses_real_forecast_payload_shape() {
        let body = r#"{
            "cod": "200",
            "cnt": 2,
            "list": [
                {"dt": 1735725600,
                 "main": {"temp": 8.1, "feels_like": 6.2, "humidity": 70},
                 "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
                 "dt_txt": "2025-01-01 12:00:00"},
                {"dt": 1735736400,
                 "main": {"temp": 7.0, "feels_like": 5.0, "humidity": 75},
                 "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                 "dt_txt": "2025-01-01 15:00:00"}
            ],
            "city": {"id": 745044, "name": "Istanbul", "country": "TR", "timezone": 10800}
        }"#;

        let parsed: Forecast = serde_json::from_str(body).expect("should parse");
        assert_eq!(parsed.list.len(), 2);
        assert_eq!(parsed.city.name, "Istanbul");
        assert_eq!(parsed.city.timezone, 10800);
    }
}
