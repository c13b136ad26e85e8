//! Core library for the `stylecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather classification and scenario building
//! - City-name resolution (search override vs. reverse geocode vs. API name)
//! - The OpenWeather provider and the Gemini advice client
//! - Persisted outfit-style lists
//!
//! It is used by `stylecast-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod classify;
pub mod config;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod resolve;
pub mod styles;

pub use classify::{build_scenarios, classify, is_night_icon, primary_condition};
pub use config::{Config, ServiceConfig, ServiceId};
pub use model::{CurrentWeather, Forecast, ForecastEntry, WeatherKind, WeatherScenario};
pub use provider::{LocationQuery, WeatherProvider};
pub use resolve::{CityResolver, PlaceCandidate, resolve_display_name};
