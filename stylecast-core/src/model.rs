use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition code assumed when the provider sends an empty condition list.
pub const DEFAULT_CONDITION_CODE: i64 = 800;

/// Internal weather classification used to pick visuals and prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Sunny,
    ClearCold,
    Cloudy,
    Rainy,
    Snowy,
    Thunderstorm,
    Drizzle,
    Fog,
}

impl WeatherKind {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherKind::Sunny => "Sunny",
            WeatherKind::ClearCold => "Clear and cold",
            WeatherKind::Cloudy => "Cloudy",
            WeatherKind::Rainy => "Rainy",
            WeatherKind::Snowy => "Snowy",
            WeatherKind::Thunderstorm => "Thunderstorm",
            WeatherKind::Drizzle => "Drizzle",
            WeatherKind::Fog => "Foggy",
        }
    }

    pub const fn all() -> &'static [WeatherKind] {
        &[
            WeatherKind::Sunny,
            WeatherKind::ClearCold,
            WeatherKind::Cloudy,
            WeatherKind::Rainy,
            WeatherKind::Snowy,
            WeatherKind::Thunderstorm,
            WeatherKind::Drizzle,
            WeatherKind::Fog,
        ]
    }
}

impl std::fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized, display-ready snapshot of weather for one day-part.
///
/// Constructed fresh on every fetch and replaced wholesale, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherScenario {
    pub temp_c: i32,
    pub feels_like_c: i32,
    pub condition: String,
    pub kind: WeatherKind,
    pub is_night: bool,
    pub timestamp: DateTime<Utc>,
}

/// One condition entry from the provider, e.g. id 500 "light rain".
#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thermal {
    pub temp: f64,
    pub feels_like: f64,
}

/// Current-weather payload as OpenWeather shapes it. Treated as untrusted
/// input: the condition list may be empty and `dt` may be out of range.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub main: Thermal,
    pub weather: Vec<Condition>,
    pub name: String,
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: Thermal,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    /// Shift from UTC in seconds for the forecast location.
    #[serde(default)]
    pub timezone: i32,
}

/// 5-day / 3-hour forecast payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_has_exactly_eight_variants() {
        assert_eq!(WeatherKind::all().len(), 8);
    }

    #[test]
    fn current_weather_parses_provider_payload() {
        let json = r#"{
            "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 60},
            "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
            "name": "Pendik",
            "dt": 1735639200
        }"#;

        let parsed: CurrentWeather = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(parsed.name, "Pendik");
        assert_eq!(parsed.weather[0].id, 801);
        assert!((parsed.main.feels_like - 17.9).abs() < f64::EPSILON);
    }

    #[test]
    fn forecast_parses_with_and_without_timezone() {
        let json = r#"{
            "list": [{"dt": 1735725600, "main": {"temp": 5.0, "feels_like": 2.0},
                      "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13d"}]}],
            "city": {"name": "Istanbul", "timezone": 10800}
        }"#;
        let parsed: Forecast = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(parsed.city.timezone, 10800);

        let json = r#"{"list": [], "city": {"name": "Istanbul"}}"#;
        let parsed: Forecast = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(parsed.city.timezone, 0);
    }
}
