//! Builds the `/api/tts` request payload from session settings.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::backend::api::TtsRequest;

pub const MAX_TEXT_CHARS: usize = 5000;

// Bounds enforced by the backend schema.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const PITCH_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=2.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text")]
    EmptyText,

    #[error("Text is too long: {0} characters (maximum {MAX_TEXT_CHARS})")]
    TextTooLong(usize),
}

/// Language code embedded in a voice id, like `en-US-GuyNeural` -> `en`.
/// Falls back to `"en"` when the id is empty or has no `-` separator.
pub fn derive_language(voice_id: &str) -> &str {
    match voice_id.split_once('-') {
        Some((lang, _)) if !lang.is_empty() => lang,
        _ => "en",
    }
}

pub fn build(
    text: &str,
    engine: &str,
    voice: &str,
    speed: f32,
    pitch: Option<f32>,
    volume: Option<f32>,
) -> Result<TtsRequest, ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong(chars));
    }

    Ok(TtsRequest {
        text: text.to_string(),
        engine: engine.to_string(),
        language: derive_language(voice).to_string(),
        voice: voice.to_string(),
        speed,
        pitch,
        volume,
    })
}
