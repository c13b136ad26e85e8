use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use stylecast_core::{
    CityResolver, Config, LocationQuery, ServiceId, WeatherScenario,
    advice::{build_stylist_prompt, generator_from_config},
    build_scenarios, geocode,
    provider::provider_from_config,
    resolve::district_name,
    styles::StyleBook,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "stylecast", version, about = "Weather-driven outfit advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to fetch weather for: a city name, or an explicit coordinate.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City name, e.g. "Ankara". Omit when passing --lat/--lon.
    pub city: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", conflicts_with = "city")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", conflicts_with = "city")]
    pub lon: Option<f64>,
}

impl LocationArgs {
    fn query(&self) -> anyhow::Result<LocationQuery> {
        match (&self.city, self.lat, self.lon) {
            (Some(city), None, None) => Ok(LocationQuery::City(city.clone())),
            (None, Some(lat), Some(lon)) => Ok(LocationQuery::Coord { lat, lon }),
            _ => bail!("Pass either a city name or both --lat and --lon."),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific service.
    Configure {
        /// Service short name, e.g. "openweather" or "gemini".
        service: String,
    },

    /// Show today's weather and, when available, tomorrow around noon.
    Show {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Ask the AI stylist what to wear.
    Advise {
        #[command(flatten)]
        location: LocationArgs,

        /// Get advice for tomorrow's midday forecast instead of now.
        #[arg(long)]
        tomorrow: bool,

        /// Preferred style, e.g. "Casual" (must exist in the style list).
        #[arg(long)]
        style: Option<String>,

        /// Gender the advice is for.
        #[arg(long)]
        gender: Option<String>,
    },

    /// Manage the persisted style list.
    Styles {
        #[command(subcommand)]
        action: StylesAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum StylesAction {
    /// List all styles.
    List,
    /// Add a new style.
    Add {
        name: String,
        /// Icon token shown next to the style.
        #[arg(long, default_value = "star")]
        icon: String,
    },
    /// Remove a user-added style.
    Remove { name: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Show { location } => show(&location).await,
            Command::Advise { location, tomorrow, style, gender } => {
                advise(&location, tomorrow, style, gender).await
            }
            Command::Styles { action } => styles(action),
        }
    }
}

fn configure(service: &str) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;

    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key must not be empty.");
    }

    config.upsert_service_api_key(id, api_key);
    config.save()?;

    println!("Saved credentials for '{id}' to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One fetch cycle: current + forecast, scenarios, resolved city name.
struct Report {
    city: String,
    today: WeatherScenario,
    tomorrow: Option<WeatherScenario>,
}

async fn fetch_report(location: &LocationArgs) -> anyhow::Result<Report> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let query = location.query()?;

    let mut resolver = CityResolver::new();
    let override_name = match &query {
        LocationQuery::City(city) => {
            resolver.begin_search();
            Some(city.clone())
        }
        LocationQuery::Coord { lat, lon } => {
            resolver.begin_location_fix();
            if let Some(place) = geocode::reverse_geocode(*lat, *lon).await {
                if let Some(name) = district_name(&place) {
                    resolver.record_geocoded(name);
                }
            }
            None
        }
    };

    let current = provider.current(&query).await?;
    let forecast = provider.forecast(&query).await?;

    let city = resolver.display_name(&current.name, override_name.as_deref());
    let (today, tomorrow) = build_scenarios(&current, &forecast, Utc::now());

    Ok(Report { city, today, tomorrow })
}

fn print_scenario(label: &str, scenario: &WeatherScenario) {
    println!(
        "{label}: {}°C (feels like {}°C), {} [{}{}]",
        scenario.temp_c,
        scenario.feels_like_c,
        scenario.condition,
        scenario.kind,
        if scenario.is_night { ", night" } else { "" },
    );
}

async fn show(location: &LocationArgs) -> anyhow::Result<()> {
    let report = fetch_report(location).await?;

    println!("Weather for {}", report.city);
    print_scenario("Now", &report.today);

    match &report.tomorrow {
        Some(scenario) => print_scenario("Tomorrow around noon", scenario),
        None => println!("Tomorrow around noon: no forecast entry available"),
    }

    Ok(())
}

async fn advise(
    location: &LocationArgs,
    tomorrow: bool,
    style: Option<String>,
    gender: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let generator = generator_from_config(&config)?;

    let style = style
        .or_else(|| config.default_style.clone())
        .unwrap_or_else(|| "Casual".to_string());
    let gender = gender
        .or_else(|| config.default_gender.clone())
        .unwrap_or_else(|| "Female".to_string());

    let book = StyleBook::load()?;
    if !book.contains(&style) {
        bail!(
            "Unknown style '{style}'. Available: {}.\n\
             Hint: run `stylecast styles add {style}` to create it.",
            style_names(&book),
        );
    }

    let report = fetch_report(location).await?;

    // A missing next-day slot falls back to today's scenario.
    let (scenario, for_tomorrow) = match (tomorrow, &report.tomorrow) {
        (true, Some(scenario)) => (scenario, true),
        (true, None) => {
            println!("No next-day forecast entry; advising for today instead.\n");
            (&report.today, false)
        }
        (false, _) => (&report.today, false),
    };

    let prompt = build_stylist_prompt(scenario, &report.city, &style, &gender, for_tomorrow);

    println!("Your stylist is putting outfits together...\n");
    let advice = generator.generate(&prompt).await?;

    println!("{advice}");
    Ok(())
}

fn styles(action: StylesAction) -> anyhow::Result<()> {
    let mut book = StyleBook::load()?;

    match action {
        StylesAction::List => {
            for item in book.items() {
                let marker = if item.removable { " " } else { "*" };
                println!("{marker} {} ({})", item.name, item.icon);
            }
            println!("\n(* built-in, cannot be removed)");
        }
        StylesAction::Add { name, icon } => {
            if !book.add(&name, &icon) {
                bail!("Style '{}' already exists or the name is empty.", name.trim());
            }
            book.save()?;
            println!("Added style '{}'.", name.trim());
        }
        StylesAction::Remove { name } => {
            if !book.remove(&name) {
                bail!(
                    "Cannot remove '{name}': not found or built-in. Available: {}.",
                    style_names(&book),
                );
            }
            book.save()?;
            println!("Removed style '{name}'.");
        }
    }

    Ok(())
}

fn style_names(book: &StyleBook) -> String {
    book.items().iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
}
