use std::env;
use crate::error::{AppError, Result};
use dotenvy::dotenv;

/// Default image generation model. Text-only models will not return an
/// inline image part, so the default must be an image-capable one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
    /// True when the model was chosen explicitly (env var, CLI flag or
    /// [`Config::new`]) rather than falling back to [`DEFAULT_MODEL`].
    /// An explicit choice is never shadowed by persisted settings.
    pub model_overridden: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::Config("GEMINI_API_KEY must be set in environment or .env file".to_string()))?;

        let model_name = env::var("GEMINI_MODEL").ok();
        let model_overridden = model_name.is_some();
        let model_name = model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            gemini_api_key: api_key,
            model_name,
            model_overridden,
        })
    }

    /// Builds a config from explicit values, bypassing the environment.
    pub fn new(api_key: impl Into<String>, model_name: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::config("API key must not be empty"));
        }
        Ok(Self {
            gemini_api_key: api_key,
            model_name: model_name.into(),
            model_overridden: true,
        })
    }
}
