//! Mapping from provider condition codes to the internal weather taxonomy,
//! plus the scenario builders that run after every successful fetch.

use chrono::{DateTime, Utc};

use crate::forecast::select_next_day_noon;
use crate::model::{
    Condition, CurrentWeather, DEFAULT_CONDITION_CODE, Forecast, ForecastEntry, WeatherKind,
    WeatherScenario,
};

/// Classify an OpenWeather condition code into a [`WeatherKind`].
///
/// Total over all integers: unmapped codes fall back to `Cloudy`. Code 800
/// (clear sky) splits on temperature, 10 °C and above reads as sunny.
pub fn classify(condition_code: i64, temp_c: f64) -> WeatherKind {
    match condition_code {
        200..=232 => WeatherKind::Thunderstorm,
        300..=321 => WeatherKind::Drizzle,
        500..=531 => WeatherKind::Rainy,
        600..=622 => WeatherKind::Snowy,
        701..=781 => WeatherKind::Fog,
        800 => {
            if temp_c < 10.0 {
                WeatherKind::ClearCold
            } else {
                WeatherKind::Sunny
            }
        }
        801..=804 => WeatherKind::Cloudy,
        _ => WeatherKind::Cloudy,
    }
}

/// Pick the condition entry that should drive classification.
///
/// Scans left to right for the first entry in a severe family (any id below
/// 700: thunderstorm, drizzle, rain, snow); otherwise returns the first entry
/// unmodified. `None` only for an empty list.
pub fn primary_condition(conditions: &[Condition]) -> Option<&Condition> {
    conditions
        .iter()
        .find(|c| c.id < 700)
        .or_else(|| conditions.first())
}

/// True iff the provider icon identifier marks a night-time observation.
/// Presentation hint only, not authoritative day/night state.
pub fn is_night_icon(icon: &str) -> bool {
    icon.ends_with('n')
}

/// Build the "today" scenario from a current-weather payload.
pub fn scenario_from_current(current: &CurrentWeather) -> WeatherScenario {
    let primary = primary_condition(&current.weather);
    WeatherScenario {
        temp_c: current.main.temp as i32,
        feels_like_c: current.main.feels_like as i32,
        condition: primary.map(|c| capitalize_words(&c.description)).unwrap_or_default(),
        kind: classify(
            primary.map_or(DEFAULT_CONDITION_CODE, |c| c.id),
            current.main.temp,
        ),
        is_night: primary.is_some_and(|c| is_night_icon(&c.icon)),
        timestamp: unix_to_utc(current.dt).unwrap_or_else(Utc::now),
    }
}

/// Build a "tomorrow" scenario from one forecast entry. Forecast scenarios
/// always read as daytime since the target slot is midday.
pub fn scenario_from_forecast(entry: &ForecastEntry) -> WeatherScenario {
    let primary = primary_condition(&entry.weather);
    WeatherScenario {
        temp_c: entry.main.temp as i32,
        feels_like_c: entry.main.feels_like as i32,
        condition: primary.map(|c| capitalize_words(&c.description)).unwrap_or_default(),
        kind: classify(
            primary.map_or(DEFAULT_CONDITION_CODE, |c| c.id),
            entry.main.temp,
        ),
        is_night: false,
        timestamp: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
    }
}

/// Reduce one fetch cycle to its display scenarios: today from the current
/// payload, tomorrow from the first midday forecast slot if the feed has one.
pub fn build_scenarios(
    current: &CurrentWeather,
    forecast: &Forecast,
    reference: DateTime<Utc>,
) -> (WeatherScenario, Option<WeatherScenario>) {
    let today = scenario_from_current(current);
    let tomorrow = select_next_day_noon(&forecast.list, reference, forecast.city.timezone)
        .map(scenario_from_forecast);
    (today, tomorrow)
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(id: i64, description: &str, icon: &str) -> Condition {
        Condition {
            id,
            main: String::new(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    #[test]
    fn classify_covers_documented_ranges() {
        for id in 200..=232 {
            assert_eq!(classify(id, 20.0), WeatherKind::Thunderstorm, "id {id}");
        }
        for id in 300..=321 {
            assert_eq!(classify(id, 20.0), WeatherKind::Drizzle, "id {id}");
        }
        for id in 500..=531 {
            assert_eq!(classify(id, 20.0), WeatherKind::Rainy, "id {id}");
        }
        for id in 600..=622 {
            assert_eq!(classify(id, 20.0), WeatherKind::Snowy, "id {id}");
        }
        for id in 701..=781 {
            assert_eq!(classify(id, 20.0), WeatherKind::Fog, "id {id}");
        }
        for id in 801..=804 {
            assert_eq!(classify(id, 20.0), WeatherKind::Cloudy, "id {id}");
        }
    }

    #[test]
    fn clear_sky_splits_on_ten_degrees() {
        assert_eq!(classify(800, 9.9), WeatherKind::ClearCold);
        assert_eq!(classify(800, 10.0), WeatherKind::Sunny);
        assert_eq!(classify(800, 25.0), WeatherKind::Sunny);
        assert_eq!(classify(800, -5.0), WeatherKind::ClearCold);
    }

    #[test]
    fn unmapped_codes_default_to_cloudy() {
        assert_eq!(classify(999, 20.0), WeatherKind::Cloudy);
        assert_eq!(classify(0, 20.0), WeatherKind::Cloudy);
        assert_eq!(classify(-1, 20.0), WeatherKind::Cloudy);
        assert_eq!(classify(233, 20.0), WeatherKind::Cloudy);
    }

    #[test]
    fn primary_condition_prefers_first_severe_entry() {
        let list = vec![cond(800, "clear sky", "01d"), cond(500, "light rain", "10d")];
        assert_eq!(primary_condition(&list).map(|c| c.id), Some(500));

        // First-match scanning order, not worst severity.
        let list = vec![cond(300, "drizzle", "09d"), cond(200, "thunderstorm", "11d")];
        assert_eq!(primary_condition(&list).map(|c| c.id), Some(300));
    }

    #[test]
    fn primary_condition_falls_back_to_first_entry() {
        let list = vec![cond(804, "overcast clouds", "04d"), cond(800, "clear sky", "01d")];
        assert_eq!(primary_condition(&list).map(|c| c.id), Some(804));
        assert!(primary_condition(&[]).is_none());
    }

    #[test]
    fn night_icon_detection() {
        assert!(is_night_icon("01n"));
        assert!(is_night_icon("10n"));
        assert!(!is_night_icon("01d"));
        assert!(!is_night_icon(""));
    }

    #[test]
    fn scenario_from_current_uses_primary_condition() {
        let current = CurrentWeather {
            main: crate::model::Thermal { temp: 4.6, feels_like: 1.2 },
            weather: vec![cond(800, "clear sky", "01n"), cond(500, "light rain", "10n")],
            name: "İçmeler, Türkiye".to_string(),
            dt: 1735639200,
        };

        let scenario = scenario_from_current(&current);
        assert_eq!(scenario.kind, WeatherKind::Rainy);
        assert_eq!(scenario.condition, "Light Rain");
        assert!(scenario.is_night);
        assert_eq!(scenario.temp_c, 4);
        assert_eq!(scenario.feels_like_c, 1);
    }

    #[test]
    fn empty_condition_list_defaults_to_clear_code() {
        let current = CurrentWeather {
            main: crate::model::Thermal { temp: 3.0, feels_like: 0.0 },
            weather: vec![],
            name: "Nowhere".to_string(),
            dt: 1735639200,
        };

        let scenario = scenario_from_current(&current);
        // Code 800 equivalent at 3 °C reads as clear-cold, description empty.
        assert_eq!(scenario.kind, WeatherKind::ClearCold);
        assert_eq!(scenario.condition, "");
        assert!(!scenario.is_night);
    }

    #[test]
    fn forecast_scenario_is_never_night() {
        let entry = ForecastEntry {
            dt: 1735725600,
            main: crate::model::Thermal { temp: 12.0, feels_like: 11.0 },
            weather: vec![cond(802, "scattered clouds", "03n")],
        };
        let scenario = scenario_from_forecast(&entry);
        assert!(!scenario.is_night);
        assert_eq!(scenario.kind, WeatherKind::Cloudy);
    }
}
