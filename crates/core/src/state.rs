//! Application state machine.
//!
//! The upload / generate / preview cycle is modeled as a pure reducer:
//! [`AppState::apply`] consumes an [`AppEvent`] and optionally emits an
//! [`Effect`] for the shell to execute. No rendering or networking happens
//! here, so the whole cycle is testable in isolation.
//!
//! States, derived from the fields rather than stored:
//! `Idle` -> `Generating` (on upload) -> `Ready` (on success)
//!                                    \-> `Failed` (on failure)
//! `Ready` / `Failed` -> `Idle` (on reset)

use crate::image_file::ImageFile;
use crate::style::StickerStyle;

/// Message shown whenever a generation attempt fails, regardless of cause.
/// The underlying error is logged for diagnostics but never surfaced.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate sticker. Please try again with a different image.";

/// The phase of the upload/generate cycle, derived from [`AppState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No image uploaded yet; the uploader is shown.
    Idle,
    /// An image is uploaded and a generation call is in flight.
    Generating,
    /// A generated sticker is available for display and download.
    Ready,
    /// The last generation attempt failed.
    Failed,
}

/// Events that drive the state machine.
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// The user selected or dropped a valid image file.
    Upload(ImageFile),
    /// A generation request resolved, successfully or not.
    Resolved {
        /// Token of the request that resolved; stale tokens are discarded.
        request: u64,
        /// The generated sticker as a data URL, or the logged error text.
        outcome: std::result::Result<String, String>,
    },
    /// The user asked to start over.
    Reset,
    /// The user picked a different sticker style.
    SelectStyle(StickerStyle),
}

/// Side effect requested by the reducer, executed by the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Invoke the generation client and report back via
    /// [`AppEvent::Resolved`] with the same request token.
    Generate {
        request: u64,
        base64_payload: String,
        mime_type: String,
        style: StickerStyle,
    },
}

/// The single state container for the application.
///
/// Invariants: `is_generating` is true only between an upload and its
/// resolution; `generated` and `error` are never both set.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The uploaded image, if any.
    pub original: Option<ImageFile>,
    /// The generated sticker as a data URL.
    pub generated: Option<String>,
    /// Whether a generation call is in flight.
    pub is_generating: bool,
    /// User-facing error message from the last failed attempt.
    pub error: Option<String>,
    /// Style captured at upload time; retained across resets.
    pub style: StickerStyle,
    /// Monotonic token identifying the latest generation request.
    request_seq: u64,
}

impl AppState {
    /// Derives the current phase from the state fields.
    pub fn phase(&self) -> Phase {
        if self.is_generating {
            Phase::Generating
        } else if self.generated.is_some() {
            Phase::Ready
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Token of the latest generation request.
    pub fn current_request(&self) -> u64 {
        self.request_seq
    }

    /// Applies one event, returning the effect the shell must run, if any.
    pub fn apply(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::Upload(file) => {
                // The uploader is only shown in Idle; ignore anything else.
                if self.original.is_some() {
                    return None;
                }
                self.generated = None;
                self.error = None;
                self.is_generating = true;
                self.request_seq += 1;

                let effect = Effect::Generate {
                    request: self.request_seq,
                    base64_payload: file.base64_payload.clone(),
                    mime_type: file.mime_type.clone(),
                    style: self.style,
                };
                self.original = Some(file);
                Some(effect)
            }
            AppEvent::Resolved { request, outcome } => {
                // A reset or newer upload supersedes this resolution.
                if !self.is_generating || request != self.request_seq {
                    return None;
                }
                self.is_generating = false;
                match outcome {
                    Ok(data_url) => {
                        self.generated = Some(data_url);
                        self.error = None;
                    }
                    Err(cause) => {
                        eprintln!("Sticker generation failed: {}", cause);
                        self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                        self.generated = None;
                    }
                }
                None
            }
            AppEvent::Reset => {
                // Style survives; the request counter keeps counting so a
                // late resolution from before the reset stays stale.
                self.original = None;
                self.generated = None;
                self.error = None;
                self.is_generating = false;
                None
            }
            AppEvent::SelectStyle(style) => {
                // Style is captured at upload time; once an image exists
                // the selection has no effect.
                if self.original.is_none() {
                    self.style = style;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload(name: &str) -> ImageFile {
        ImageFile::from_bytes(name, "image/png", &[0x89, b'P', b'N', b'G']).unwrap()
    }

    fn jpeg_upload(name: &str) -> ImageFile {
        ImageFile::from_bytes(name, "image/jpeg", &[0xff, 0xd8, 0xff]).unwrap()
    }

    #[test]
    fn upload_enters_generating_and_emits_generate_effect() {
        let mut state = AppState::default();
        assert_eq!(state.phase(), Phase::Idle);

        let file = png_upload("cat.png");
        let effect = state.apply(AppEvent::Upload(file.clone()));

        assert_eq!(state.phase(), Phase::Generating);
        assert!(state.is_generating);
        let Some(Effect::Generate { request, base64_payload, mime_type, style }) = effect else {
            panic!("expected a generate effect");
        };
        assert_eq!(request, state.current_request());
        assert_eq!(base64_payload, file.base64_payload);
        assert_eq!(mime_type, "image/png");
        assert_eq!(style, StickerStyle::Redraw);
    }

    #[test]
    fn success_moves_to_ready_with_the_generated_image() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let request = state.current_request();

        state.apply(AppEvent::Resolved {
            request,
            outcome: Ok("data:image/png;base64,WA==".to_string()),
        });

        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.generated.as_deref(), Some("data:image/png;base64,WA=="));
        assert!(state.error.is_none());
        assert!(!state.is_generating);
    }

    #[test]
    fn failure_moves_to_failed_with_the_fixed_message() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(jpeg_upload("dog.jpg")));
        let request = state.current_request();

        state.apply(AppEvent::Resolved {
            request,
            outcome: Err("503 from upstream".to_string()),
        });

        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to generate sticker. Please try again with a different image.")
        );
        assert!(state.generated.is_none());
        assert!(!state.is_generating);
    }

    #[test]
    fn exactly_one_of_generated_or_error_after_resolution() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let request = state.current_request();
        state.apply(AppEvent::Resolved { request, outcome: Err("boom".into()) });
        assert!(state.generated.is_none() && state.error.is_some());

        // A fresh cycle clears the error before the next resolution.
        state.apply(AppEvent::Reset);
        state.apply(AppEvent::Upload(png_upload("cat2.png")));
        assert!(state.generated.is_none() && state.error.is_none());
        let request = state.current_request();
        state.apply(AppEvent::Resolved { request, outcome: Ok("data:image/png;base64,".into()) });
        assert!(state.generated.is_some() && state.error.is_none());
    }

    #[test]
    fn reset_returns_to_the_initial_state_but_keeps_the_style() {
        let mut state = AppState::default();
        state.apply(AppEvent::SelectStyle(StickerStyle::Stickerify));
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let request = state.current_request();
        state.apply(AppEvent::Resolved {
            request,
            outcome: Ok("data:image/png;base64,WA==".to_string()),
        });
        assert_eq!(state.phase(), Phase::Ready);

        state.apply(AppEvent::Reset);

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.original.is_none());
        assert!(state.generated.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_generating);
        assert_eq!(state.style, StickerStyle::Stickerify);
    }

    #[test]
    fn late_resolution_after_reset_is_discarded() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let stale_request = state.current_request();

        state.apply(AppEvent::Reset);
        state.apply(AppEvent::Resolved {
            request: stale_request,
            outcome: Ok("data:image/png;base64,WA==".to_string()),
        });

        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.generated.is_none());
    }

    #[test]
    fn resolution_with_a_stale_token_is_discarded() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let first = state.current_request();
        state.apply(AppEvent::Reset);
        state.apply(AppEvent::Upload(png_upload("cat2.png")));
        assert!(state.current_request() > first);

        state.apply(AppEvent::Resolved {
            request: first,
            outcome: Err("late failure".to_string()),
        });

        // Still waiting on the second request.
        assert_eq!(state.phase(), Phase::Generating);
        assert!(state.error.is_none());
    }

    #[test]
    fn upload_is_ignored_while_an_image_is_present() {
        let mut state = AppState::default();
        state.apply(AppEvent::Upload(png_upload("cat.png")));
        let request = state.current_request();

        let effect = state.apply(AppEvent::Upload(png_upload("other.png")));

        assert!(effect.is_none());
        assert_eq!(state.current_request(), request);
        assert_eq!(state.original.as_ref().unwrap().name, "cat.png");
    }

    #[test]
    fn style_selection_is_a_no_op_once_an_image_exists() {
        let mut state = AppState::default();
        state.apply(AppEvent::SelectStyle(StickerStyle::Stickerify));
        assert_eq!(state.style, StickerStyle::Stickerify);

        state.apply(AppEvent::Upload(png_upload("cat.png")));
        state.apply(AppEvent::SelectStyle(StickerStyle::Redraw));

        assert_eq!(state.style, StickerStyle::Stickerify);
    }

    #[test]
    fn upload_captures_the_style_selected_before_it() {
        let mut state = AppState::default();
        state.apply(AppEvent::SelectStyle(StickerStyle::Stickerify));

        let effect = state.apply(AppEvent::Upload(png_upload("cat.png")));

        let Some(Effect::Generate { style, .. }) = effect else {
            panic!("expected a generate effect");
        };
        assert_eq!(style, StickerStyle::Stickerify);
    }
}
