//! Narrative commentary on a valuation from a hosted language model.
//!
//! Prompt building and response parsing are plain functions; the HTTP client
//! is only compiled with the `ai` feature. Commentary never feeds back into
//! the valuation.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::{PropertyInputs, ValuationMethod, ValuationResult};

/// Message shown when commentary cannot be fetched.
pub const COMMENTARY_UNREACHABLE: &str =
    "Commentary service unreachable. Please check the API key.";

/// Builds the prompt for a valuation.
#[must_use]
pub fn build_prompt(inputs: &PropertyInputs, result: &ValuationResult) -> String {
    let land_percent = (result.land_share * 100.0).round();
    let building_percent = (result.building_share * 100.0).round();
    let method_check = match inputs.method {
        ValuationMethod::IncomeValue => format!(
            "Income value: critically review the capitalization rate of {}%.",
            inputs.capitalization_rate_percent
        ),
        ValuationMethod::AssetValue | ValuationMethod::ComparativeValue => format!(
            "{}: could an income-value calculation be more favourable if rents are low?",
            inputs.method.display_name()
        ),
    };

    format!(
        "You are a leading expert on German real-estate tax questions.\n\
         Analyse this purchase price allocation for an investor.\n\n\
         METHOD: {method}\n\n\
         DATA:\n\
         - Purchase price: {price} EUR\n\
         - Construction year: {construction} (age: {age} years)\n\
         - Living area: {living} m²\n\
         - Land share: {land}%\n\
         - Building share: {building}%\n\n\
         TASKS:\n\
         1. Assess the building share of {building}% (depreciation basis). Is it typical or unusual for construction year {construction}?\n\
         2. Briefly recommend whether an appraisal of the remaining useful life could pay off (based on an age of {age} years).\n\
         3. {method_check}\n\n\
         Answer professionally and concisely (max 150 words), formatted as Markdown.",
        method = inputs.method.display_name(),
        price = inputs.purchase_price,
        construction = inputs.construction_year,
        age = result.building_age_years,
        living = inputs.living_area_sqm,
        land = land_percent,
        building = building_percent,
        method_check = method_check,
    )
}

/// Request body for the `generateContent` endpoint.
#[must_use]
pub fn request_body(prompt: &str) -> Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// Extracts the generated text from a `generateContent` response.
///
/// An `error.message` in the response is returned as the error.
pub fn parse_response(response: &Value) -> Result<String> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        anyhow::bail!("Commentary service error: {}", message);
    }

    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("Commentary response contained no text")
}

#[cfg(feature = "ai")]
mod client {
    use anyhow::{Context, Result};
    use tracing::debug;

    use super::{build_prompt, parse_response, request_body};
    use crate::config::CommentaryConfig;
    use crate::models::{PropertyInputs, ValuationResult};

    /// HTTP client for the commentary service.
    #[derive(Debug, Clone)]
    pub struct CommentaryClient {
        http: reqwest::Client,
        endpoint: String,
        model: String,
        api_key: String,
    }

    impl CommentaryClient {
        /// Creates a client for the configured endpoint and model.
        #[must_use]
        pub fn new(config: &CommentaryConfig, api_key: impl Into<String>) -> Self {
            Self {
                http: reqwest::Client::new(),
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                model: config.model.clone(),
                api_key: api_key.into(),
            }
        }

        /// Creates a client with the key from the configured environment variable.
        pub fn from_config(config: &CommentaryConfig) -> Result<Self> {
            let api_key = config.api_key().with_context(|| {
                format!("Environment variable {} is not set", config.api_key_env)
            })?;
            Ok(Self::new(config, api_key))
        }

        fn url(&self) -> String {
            format!(
                "{}/{}:generateContent?key={}",
                self.endpoint, self.model, self.api_key
            )
        }

        /// Requests commentary for a valuation. Not retried.
        pub async fn generate(
            &self,
            inputs: &PropertyInputs,
            result: &ValuationResult,
        ) -> Result<String> {
            let prompt = build_prompt(inputs, result);
            debug!("Requesting commentary from model {}", self.model);

            let response = self
                .http
                .post(self.url())
                .json(&request_body(&prompt))
                .send()
                .await
                .context("Failed to reach commentary service")?;

            let body: serde_json::Value = response
                .json()
                .await
                .context("Failed to read commentary response")?;

            parse_response(&body)
        }
    }
}

#[cfg(feature = "ai")]
pub use client::CommentaryClient;
