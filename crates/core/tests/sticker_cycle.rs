//! End-to-end reducer cycle through the public API, no UI or network.

use sticker_core::{AppEvent, AppState, ImageFile, Phase, StickerStyle};

fn cat_png() -> ImageFile {
    ImageFile::from_bytes("cat.png", "image/png", &[0x89, b'P', b'N', b'G', 0x0d, 0x0a]).unwrap()
}

#[test]
fn upload_generate_download_reset_cycle() {
    let mut state = AppState::default();

    // Style chosen before upload
    state.apply(AppEvent::SelectStyle(StickerStyle::Redraw));
    assert_eq!(state.phase(), Phase::Idle);

    // Upload starts a generation
    let effect = state.apply(AppEvent::Upload(cat_png()));
    assert!(effect.is_some());
    assert_eq!(state.phase(), Phase::Generating);

    // The client resolves with a sticker
    let sticker_url = "data:image/png;base64,WFla".to_string();
    state.apply(AppEvent::Resolved {
        request: state.current_request(),
        outcome: Ok(sticker_url.clone()),
    });
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.generated.as_ref(), Some(&sticker_url));

    // The generated data URL decodes to downloadable bytes
    let bytes = sticker_core::image_file::decode_data_url(state.generated.as_ref().unwrap()).unwrap();
    assert_eq!(bytes, b"XYZ");

    // Convert another: back to the initial state
    state.apply(AppEvent::Reset);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.original.is_none());
    assert!(state.generated.is_none());
    assert!(state.error.is_none());
    assert!(!state.is_generating);
}

#[test]
fn failed_generation_offers_a_retry_path_via_reset() {
    let mut state = AppState::default();
    state.apply(AppEvent::Upload(cat_png()));

    state.apply(AppEvent::Resolved {
        request: state.current_request(),
        outcome: Err("network unreachable".to_string()),
    });
    assert_eq!(state.phase(), Phase::Failed);

    // Reset re-enables the uploader for another attempt
    state.apply(AppEvent::Reset);
    assert_eq!(state.phase(), Phase::Idle);
    let effect = state.apply(AppEvent::Upload(cat_png()));
    assert!(effect.is_some());
    assert_eq!(state.phase(), Phase::Generating);
}
