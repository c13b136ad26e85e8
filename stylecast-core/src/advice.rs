//! AI outfit advice: the stylist prompt and the text-generation seam.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{
    Config,
    advice::gemini::GeminiClient,
    config::ServiceId,
    model::WeatherScenario,
};

pub mod gemini;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Invalid response from server (status {0})")]
    InvalidResponse(u16),

    #[error("Too many requests. Please wait a moment and retry.")]
    RateLimited,

    #[error("API error: {0}")]
    Api(String),

    #[error("The response contained no advice text")]
    Empty,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait AdviceGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}

/// Construct the advice generator from config.
pub fn generator_from_config(config: &Config) -> anyhow::Result<Box<dyn AdviceGenerator>> {
    let api_key = config.service_api_key(ServiceId::Gemini).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service 'gemini'.\n\
                 Hint: run `stylecast configure gemini` and enter your API key."
        )
    })?;

    Ok(Box::new(GeminiClient::new(
        api_key.to_owned(),
        config.gemini_model().to_owned(),
    )))
}

/// Build the stylist prompt for one scenario.
///
/// The wording stays deliberately plain: the model is told to avoid fashion
/// jargon and answer in a fixed section format so the output can be shown
/// as-is.
pub fn build_stylist_prompt(
    scenario: &WeatherScenario,
    city: &str,
    style: &str,
    gender: &str,
    for_tomorrow: bool,
) -> String {
    let day_label = if for_tomorrow { "TOMORROW" } else { "TODAY" };
    let time_of_day = if scenario.is_night { "Night" } else { "Day" };

    format!(
        "You are a professional personal style consultant.\n\
        \n\
        SITUATION ANALYSIS:\n\
        - City: {city}\n\
        - Current temperature: {temp}°C\n\
        - Feels like: {feels_like}°C\n\
        - Conditions: {condition}\n\
        - Time of day: {time_of_day}\n\
        \n\
        USER PROFILE:\n\
        - Gender: {gender}\n\
        - Preferred style: {style}\n\
        \n\
        YOUR TASK:\n\
        Since we do not know every piece in the user's wardrobe, suggest simple,\n\
        general garment categories that suit these weather conditions instead of\n\
        pushing specific products. Remember this advice is for {day_label}.\n\
        \n\
        CRITICAL RULES:\n\
        1. USE VERY PLAIN, EVERYDAY LANGUAGE: never use hard-to-parse fashion\n\
           terms like \"canvas\", \"chino\", \"merino\", \"cashmere\", \"trench coat\",\n\
           \"blazer\" or \"loafer\".\n\
        2. USE THESE INSTEAD: words everyone knows, like \"fabric trousers\",\n\
           \"jeans\", \"thick sweater\", \"long coat\", \"sneakers\", \"boots\".\n\
        3. LAYERING: offer practical combinations such as \"a cardigan over a t-shirt\".\n\
        4. SHORT AND CLEAR: keep every bullet brief, no long explanations.\n\
        5. Do NOT break the format.\n\
        \n\
        ANSWER FORMAT:\n\
        \n\
        UPPER WEAR:\n\
        • [Short item description] (e.g. Cotton t-shirt)\n\
        • [Second layer if needed] (e.g. Zip-up cardigan)\n\
        • [General color suggestion]\n\
        \n\
        OUTERWEAR:\n\
        (Write \"Not needed\" if the weather is warm)\n\
        • [Short item description] (e.g. Waterproof coat)\n\
        \n\
        LOWER WEAR:\n\
        • [Short item description] (e.g. Jeans or joggers)\n\
        • [General color suggestion]\n\
        \n\
        SHOES:\n\
        • [Short item description] (e.g. Comfortable sneakers or boots)\n\
        \n\
        ACCESSORIES:\n\
        • [Short item description] (e.g. Umbrella or scarf)\n\
        \n\
        Give only the list.",
        temp = scenario.temp_c,
        feels_like = scenario.feels_like_c,
        condition = scenario.condition,
    )
}
