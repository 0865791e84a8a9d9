//! Sticker generation styles.
//!
//! The style is chosen before an image is uploaded and decides which
//! instruction is sent to the model alongside the image.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the model should turn the uploaded image into a sticker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerStyle {
    /// Fully regenerate the subject as a cartoon-style sticker.
    #[default]
    Redraw,
    /// Keep the original image and add a die-cut sticker outline.
    Stickerify,
}

impl StickerStyle {
    /// All styles, in the order they are offered in the UI.
    pub const ALL: &'static [StickerStyle] = &[StickerStyle::Redraw, StickerStyle::Stickerify];

    /// The generation instruction sent to the model for this style.
    pub fn prompt(self) -> &'static str {
        match self {
            StickerStyle::Redraw => {
                "Redraw the main subject of this image as a die-cut cartoon sticker: \
                 bold clean outlines, vibrant flat colors, a thick white sticker border \
                 and a plain background. Respond with the sticker image only."
            }
            StickerStyle::Stickerify => {
                "Turn this image into a sticker while keeping the original photo intact: \
                 cut out the main subject, add a thick white die-cut outline around it \
                 and place it on a plain background. Respond with the sticker image only."
            }
        }
    }

    /// Short human-readable label for UI controls.
    pub fn label(self) -> &'static str {
        match self {
            StickerStyle::Redraw => "Redraw as cartoon",
            StickerStyle::Stickerify => "Stickerify original",
        }
    }
}

impl fmt::Display for StickerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StickerStyle::Redraw => write!(f, "redraw"),
            StickerStyle::Stickerify => write!(f, "stickerify"),
        }
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown style '{0}', expected 'redraw' or 'stickerify'")]
pub struct ParseStyleError(String);

impl FromStr for StickerStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redraw" => Ok(StickerStyle::Redraw),
            "stickerify" => Ok(StickerStyle::Stickerify),
            other => Err(ParseStyleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_styles_case_insensitively() {
        assert_eq!("redraw".parse::<StickerStyle>().unwrap(), StickerStyle::Redraw);
        assert_eq!("Stickerify".parse::<StickerStyle>().unwrap(), StickerStyle::Stickerify);
        assert!("outline".parse::<StickerStyle>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for style in StickerStyle::ALL {
            assert_eq!(style.to_string().parse::<StickerStyle>().unwrap(), *style);
        }
    }

    #[test]
    fn default_style_is_redraw() {
        assert_eq!(StickerStyle::default(), StickerStyle::Redraw);
    }
}
