use crate::config::Config;
use crate::error::{AppError, Result};
use crate::style::StickerStyle;
use gemini_rust::{Blob, Content, Gemini, Message, Part, Role};

/// Client for the Gemini image generation API.
pub struct GeminiClient {
    client: Gemini,
}

/// A generated sticker image as returned by the model.
#[derive(Debug, Clone)]
pub struct GeneratedSticker {
    /// Media type of the generated image (usually `image/png`).
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl GeneratedSticker {
    /// The sticker as a self-contained data URL, usable directly as an
    /// image source and as download content.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decodes the sticker back into raw image bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
        BASE64
            .decode(&self.data)
            .map_err(|e| AppError::image(format!("Invalid base64 in model response: {}", e)))
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Initialize the client with the API key and model, explicitly setting the base URL to avoid BadScheme error
        let base_url = url::Url::parse("https://generativelanguage.googleapis.com/v1beta/")
            .map_err(|e| AppError::Config(format!("Invalid base URL: {}", e)))?;

        let model_name = if config.model_name.starts_with("models/") {
            config.model_name.clone()
        } else {
            format!("models/{}", config.model_name)
        };
        let model_url = format!("https://generativelanguage.googleapis.com/v1beta/{}", model_name);

        let client = Gemini::with_model_and_base_url(&config.gemini_api_key, model_url, base_url)
            .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self { client })
    }

    /// Sends the uploaded image to the model and returns the generated sticker.
    ///
    /// Exactly one request per call: no retry, no client-side timeout. The
    /// style decides which instruction accompanies the image.
    pub async fn generate_sticker(
        &self,
        base64_payload: String,
        mime_type: String,
        style: StickerStyle,
    ) -> Result<GeneratedSticker> {
        // Construct image data blob
        let blob = Blob {
            mime_type,
            data: base64_payload,
        };

        let image_part = Part::InlineData { inline_data: blob };

        let text_part = Part::Text {
            text: style.prompt().to_string(),
            thought: None,
            thought_signature: None,
        };

        // Create the content payload
        let content = Content {
            role: Some(Role::User),
            parts: Some(vec![text_part, image_part]),
        };

        let message = Message {
            role: Role::User,
            content,
        };

        // Send request
        let response = self
            .client
            .generate_content()
            .with_messages(vec![message])
            .execute()
            .await
            .map_err(|e| AppError::GeminiApi(format!("API request failed: {:?}", e)))?;

        // Image generation models answer with an inline data part; any text
        // parts around it are commentary and are skipped.
        for candidate in &response.candidates {
            if let Some(parts) = &candidate.content.parts {
                for part in parts {
                    if let Part::InlineData { inline_data } = part {
                        return Ok(GeneratedSticker {
                            mime_type: inline_data.mime_type.clone(),
                            data: inline_data.data.clone(),
                        });
                    }
                }
            }
        }

        Err(AppError::NoImageInResponse)
    }
}
