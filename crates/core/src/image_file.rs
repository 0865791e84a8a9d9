//! Uploaded image handling and data-URL encoding.
//!
//! This module converts a user-selected file into the in-memory record the
//! rest of the application works with: a self-contained data URL for display
//! plus the raw base64 payload for API transmission.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

/// File name offered when saving a generated sticker.
pub const DOWNLOAD_FILE_NAME: &str = "sticker.png";

/// An uploaded image, decoded once at selection time.
///
/// Immutable after creation; replaced wholesale by the next upload and
/// discarded on reset. The base64 payload is exactly the portion of
/// `display_url` after its first comma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, as selected by the user.
    pub name: String,
    /// Declared media type, always starting with `image/`.
    pub mime_type: String,
    /// Size of the raw file in bytes.
    pub size_bytes: u64,
    /// `data:` URL usable directly as an image source.
    pub display_url: String,
    /// Base64-encoded bytes, without the data-URL header.
    pub base64_payload: String,
}

impl ImageFile {
    /// Builds an [`ImageFile`] from raw bytes and a declared media type.
    ///
    /// Returns `None` for anything that is not an image; non-image
    /// selections are ignored without surfacing an error.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Option<Self> {
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            return None;
        }

        let base64_payload = BASE64.encode(bytes);
        let display_url = format!("data:{};base64,{}", mime_type, base64_payload);

        Some(Self {
            name: name.into(),
            mime_type,
            size_bytes: bytes.len() as u64,
            display_url,
            base64_payload,
        })
    }

    /// Reads a file from disk and converts it to an [`ImageFile`].
    ///
    /// The media type is inferred from the file extension. Returns
    /// `Ok(None)` when the extension does not belong to an image format;
    /// read failures propagate as [`AppError::Io`].
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();

        let Some(mime_type) = mime_from_extension(path) else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::from_bytes(name, mime_type, &bytes))
    }
}

/// Maps a file extension to its image media type.
///
/// Returns `None` for non-image extensions so callers can skip the file
/// without reading it.
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Splits a data URL into its media type and base64 payload.
///
/// The payload is everything after the first comma, matching how the
/// upload path derives it during encoding.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64").unwrap_or(header);
    Some((mime, payload))
}

/// Decodes the payload of a data URL back into raw bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let (_, payload) = split_data_url(url)
        .ok_or_else(|| AppError::image(format!("Not a data URL: {:.32}...", url)))?;
    BASE64
        .decode(payload)
        .map_err(|e| AppError::image(format!("Invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn payload_matches_display_url_after_first_comma() {
        let file = ImageFile::from_bytes("cat.png", "image/png", PNG_MAGIC).unwrap();
        let after_comma = file.display_url.split_once(',').unwrap().1;
        assert_eq!(file.base64_payload, after_comma);
        assert!(file.display_url.starts_with("data:image/png;base64,"));
        assert_eq!(file.size_bytes, PNG_MAGIC.len() as u64);
    }

    #[test]
    fn non_image_media_types_are_ignored() {
        assert!(ImageFile::from_bytes("doc.pdf", "application/pdf", b"%PDF-1.4").is_none());
        assert!(ImageFile::from_bytes("note.txt", "text/plain", b"hello").is_none());
    }

    #[test]
    fn extension_mapping_covers_supported_formats() {
        assert_eq!(mime_from_extension(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_from_extension(Path::new("b.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_from_extension(Path::new("c.webp")), Some("image/webp"));
        assert_eq!(mime_from_extension(Path::new("d.pdf")), None);
        assert_eq!(mime_from_extension(Path::new("noext")), None);
    }

    #[test]
    fn data_url_decodes_back_to_original_bytes() {
        let file = ImageFile::from_bytes("cat.png", "image/png", PNG_MAGIC).unwrap();
        let (mime, _) = split_data_url(&file.display_url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decode_data_url(&file.display_url).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        assert!(decode_data_url("https://example.com/cat.png").is_err());
    }

    #[tokio::test]
    async fn from_path_skips_non_image_extensions_without_reading() {
        // The path does not exist; a non-image extension must short-circuit
        // before any read is attempted.
        let result = ImageFile::from_path("/nonexistent/doc.pdf").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn from_path_reads_and_encodes_image_files() {
        let dir = std::env::temp_dir().join("sticker-core-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cat.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let file = ImageFile::from_path(&path).await.unwrap().unwrap();
        assert_eq!(file.name, "cat.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(decode_data_url(&file.display_url).unwrap(), PNG_MAGIC);
    }
}
