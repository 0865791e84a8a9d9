//! Sticker-Maker Core Library
//!
//! This library provides the core functionality for the AI Sticker Maker,
//! including image upload handling, the upload/generate/preview state
//! machine, and Gemini AI integration.
//!
//! # Overview
//!
//! The sticker maker takes a user-selected image, sends it to Google's
//! Gemini image generation API, and returns a "sticker" variant ready for
//! display and download. The library handles:
//!
//! - **Image Upload**: file decoding and data-URL encoding via [`image_file`]
//! - **Styles**: the generation mode chosen before upload via [`style`]
//! - **AI Integration**: Gemini image generation via [`gemini`]
//! - **State Machine**: the upload/generate/preview cycle via [`state`]
//! - **User Interface**: uploader and preview window via [`ui`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`StickerMaker`]
//! facade:
//!
//! ```ignore
//! use sticker_core::StickerMaker;
//!
//! // Initialize with environment configuration
//! let app = StickerMaker::new()?;
//!
//! // Launch the interactive window
//! app.run_interactive(None)?;
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`gemini`]: Gemini image generation client
//! - [`image_file`]: Upload decoding and data-URL handling
//! - [`state`]: The upload/generate/preview state machine
//! - [`style`]: Sticker style selection
//! - [`ui`]: User interface components

pub mod config;
pub mod error;
pub mod gemini;
pub mod image_file;
pub mod state;
pub mod style;
pub mod ui;

// Re-export primary types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use gemini::{GeminiClient, GeneratedSticker};
pub use image_file::ImageFile;
pub use state::{AppEvent, AppState, Phase};
pub use style::StickerStyle;

/// Main entry point for the sticker maker.
///
/// This struct provides a facade over the various subsystems,
/// handling initialization and orchestration. It's the recommended
/// way to use the library for most use cases.
///
/// # Example
///
/// ```ignore
/// use sticker_core::StickerMaker;
///
/// let app = StickerMaker::new()?;
/// app.run_interactive(None)?;
/// ```
pub struct StickerMaker {
    config: Config,
}

impl StickerMaker {
    /// Creates a new instance with environment-based configuration.
    ///
    /// Loads configuration from environment variables (including `.env`
    /// files).
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self { config })
    }

    /// Creates an instance with custom configuration.
    ///
    /// Use this when you need to override environment-based configuration,
    /// such as specifying a different model or API key.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Launches the interactive window.
    ///
    /// With `initial_image` set, the upload happens immediately on the
    /// first frame instead of showing the uploader.
    pub fn run_interactive(&self, initial_image: Option<ImageFile>) -> Result<()> {
        ui::run_app(self.config.clone(), initial_image)
    }

    /// Generates a sticker without any UI.
    ///
    /// One request, no retry: the image and the style captured in
    /// `style` are sent to the model and the generated sticker comes back
    /// for the caller to save or display.
    pub async fn generate(&self, image: &ImageFile, style: StickerStyle) -> Result<GeneratedSticker> {
        let client = GeminiClient::new(&self.config)?;
        client
            .generate_sticker(image.base64_payload.clone(), image.mime_type.clone(), style)
            .await
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    ///
    /// Allows modifying settings like the model name after initialization.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
pub fn init() {
    let _ = dotenvy::dotenv();
}
