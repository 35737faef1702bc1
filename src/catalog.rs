//! Voice catalog normalization: engine filtering, display ordering and
//! default voice selection over the raw `/api/tts/voices` payload.

use crate::backend::api::{EngineVoices, Voice};

/// Voices of the matching engine, in display order: locale then name.
/// The locale is only consulted when both sides carry one.
pub fn filter_and_sort(catalog: &[EngineVoices], engine: &str) -> Vec<Voice> {
    let Some(entry) = catalog.iter().find(|e| e.engine == engine) else {
        return Vec::new();
    };

    let mut voices = entry.voices.clone();

    voices.sort_by(|a, b| match (&a.locale, &b.locale) {
        (Some(a_locale), Some(b_locale)) => {
            a_locale.cmp(b_locale).then_with(|| a.name.cmp(&b.name))
        }
        _ => a.name.cmp(&b.name),
    });

    voices
}

/// The recommended initial selection. Only edge-tts has a preference
/// (first en-US voice); for other engines the caller falls back to the
/// first list entry.
pub fn pick_default<'a>(voices: &'a [Voice], engine: &str) -> Option<&'a Voice> {
    (engine == "edge-tts")
        .then(|| voices.iter().find(|v| v.id.starts_with("en-US")))
        .flatten()
}

pub fn display_name(voice: &Voice) -> String {
    match &voice.locale {
        Some(locale) => format!("{} ({locale})", voice.name),
        None => voice.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, name: &str, locale: Option<&str>) -> Voice {
        Voice {
            id: id.to_string(),
            name: name.to_string(),
            locale: locale.map(ToString::to_string),
            gender: None,
            sample_rate: None,
        }
    }

    fn catalog() -> Vec<EngineVoices> {
        vec![
            EngineVoices {
                engine: "edge-tts".to_string(),
                voices: vec![
                    voice("fr-FR-DeniseNeural", "Denise", Some("fr-FR")),
                    voice("en-US-GuyNeural", "Guy", Some("en-US")),
                    voice("en-GB-RyanNeural", "Ryan", Some("en-GB")),
                    voice("en-US-AriaNeural", "Aria", Some("en-US")),
                ],
            },
            EngineVoices {
                engine: "pyttsx3".to_string(),
                voices: vec![
                    voice("mbrola-fr1", "french", None),
                    voice("espeak-en", "english", None),
                ],
            },
        ]
    }

    #[test]
    fn unknown_engine_yields_empty_list() {
        assert!(filter_and_sort(&catalog(), "gtts").is_empty());
        assert!(filter_and_sort(&[], "edge-tts").is_empty());
    }

    #[test]
    fn voices_sort_by_locale_then_name() {
        let sorted = filter_and_sort(&catalog(), "edge-tts");

        let ids: Vec<&str> = sorted.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "en-GB-RyanNeural",
                "en-US-AriaNeural",
                "en-US-GuyNeural",
                "fr-FR-DeniseNeural",
            ]
        );
    }

    #[test]
    fn voices_without_locale_sort_by_name() {
        let sorted = filter_and_sort(&catalog(), "pyttsx3");

        let names: Vec<&str> = sorted.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["english", "french"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let twins = vec![EngineVoices {
            engine: "edge-tts".to_string(),
            voices: vec![
                voice("en-US-1", "Aria", Some("en-US")),
                voice("en-US-2", "Aria", Some("en-US")),
            ],
        }];

        let sorted = filter_and_sort(&twins, "edge-tts");
        assert_eq!(sorted[0].id, "en-US-1");
        assert_eq!(sorted[1].id, "en-US-2");
    }

    #[test]
    fn edge_tts_defaults_to_first_en_us_voice() {
        let voices = filter_and_sort(&catalog(), "edge-tts");

        let default = pick_default(&voices, "edge-tts").unwrap();
        assert_eq!(default.id, "en-US-AriaNeural");
    }

    #[test]
    fn default_pick_handles_engine_without_preference() {
        let voices = filter_and_sort(&catalog(), "pyttsx3");
        assert_eq!(pick_default(&voices, "pyttsx3"), None);

        let no_en_us = [voice("fr-FR-X", "X", Some("fr-FR"))];
        assert_eq!(pick_default(&no_en_us, "edge-tts"), None);
    }

    #[test]
    fn display_name_appends_locale_when_present() {
        assert_eq!(
            display_name(&voice("en-US-GuyNeural", "Guy", Some("en-US"))),
            "Guy (en-US)"
        );
        assert_eq!(display_name(&voice("espeak-en", "english", None)), "english");
    }
}
