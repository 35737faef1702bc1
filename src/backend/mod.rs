use anyhow::{Context, Result};
use reqwest::Url;
use tap::Tap;
use thiserror::Error;

pub mod api;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

#[derive(Clone, Debug)]
pub struct Backend {
    client: reqwest::Client,
    host: Url,
}

impl Backend {
    pub fn new(host: &str) -> Result<Self> {
        let host = Url::parse(host).with_context(|| format!("Invalid backend host: {host}"))?;

        if host.cannot_be_a_base() {
            anyhow::bail!("Backend host cannot be a base URL: {host}");
        }

        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!("console-tts/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, host })
    }

    pub async fn voices(&self, engine: Option<&str>) -> Result<Vec<api::EngineVoices>, BackendError> {
        let url = self.host.clone().tap_mut(|u| {
            u.path_segments_mut()
                .unwrap()
                .push("api")
                .push("tts")
                .push("voices");
        });

        let mut request = self.client.get(url);

        if let Some(engine) = engine {
            request = request.query(&[("engine", engine)]);
        }

        Ok(request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn synthesize(&self, request: &api::TtsRequest) -> Result<api::TtsResponse, BackendError> {
        let url = self.host.clone().tap_mut(|u| {
            u.path_segments_mut().unwrap().push("api").push("tts");
        });

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .json::<api::ErrorBody>()
                .await
                .map_or_else(|_| "Failed to convert text to speech".to_string(), |b| b.detail);

            return Err(BackendError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<api::Health, BackendError> {
        let url = self.host.clone().tap_mut(|u| {
            u.path_segments_mut()
                .unwrap()
                .push("api")
                .push("tts")
                .push("health");
        });

        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Resolves `audio_url` (usually server-relative, like `/static/audio/x.mp3`)
    /// against the backend host and fetches the raw bytes.
    pub async fn fetch_audio(&self, audio_url: &str) -> Result<Vec<u8>> {
        let url = self
            .host
            .join(audio_url)
            .with_context(|| format!("Invalid audio url: {audio_url}"))?;

        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch audio (connect)")?
            .error_for_status()
            .context("Failed to fetch audio (status_code)")?
            .bytes()
            .await
            .context("Failed to fetch audio (body)")?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_wire_format() {
        let body = r#"[
            {
                "engine": "edge-tts",
                "voices": [
                    {"id": "en-US-GuyNeural", "name": "Guy", "locale": "en-US", "gender": "Male", "sample_rate": 24000},
                    {"id": "fr-FR-DeniseNeural", "name": "Denise", "locale": "fr-FR"}
                ]
            },
            {"engine": "pyttsx3", "voices": [{"id": "english", "name": "English", "locale": null}]}
        ]"#;

        let catalog: Vec<api::EngineVoices> = serde_json::from_str(body).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].engine, "edge-tts");
        assert_eq!(catalog[0].voices[0].id, "en-US-GuyNeural");
        assert_eq!(catalog[0].voices[0].sample_rate, Some(24000));
        assert_eq!(catalog[0].voices[1].gender, None);
        assert_eq!(catalog[1].voices[0].locale, None);
    }

    #[test]
    fn request_wire_format_skips_unset_prosody() {
        let request = api::TtsRequest {
            text: "Hello".to_string(),
            engine: "gtts".to_string(),
            language: "en".to_string(),
            voice: "en".to_string(),
            speed: 1.0,
            pitch: None,
            volume: None,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["text"], "Hello");
        assert_eq!(body["language"], "en");
        assert!(body.get("pitch").is_none());
        assert!(body.get("volume").is_none());
    }

    #[test]
    fn response_wire_format() {
        let body = r#"{
            "status": "success",
            "audio_url": "/static/audio/tts_12345.mp3",
            "processing_time": 0.42,
            "text_preview": "Hello, world!",
            "file_size": 15360,
            "created_at": "2025-06-01T12:00:00",
            "engine": "edge-tts",
            "voice": "en-US-GuyNeural"
        }"#;

        let response: api::TtsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.audio_url, "/static/audio/tts_12345.mp3");
        assert_eq!(response.text_preview, "Hello, world!");
        assert_eq!(response.file_size, 15360);
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(Backend::new("not a url").is_err());
        assert!(Backend::new("mailto:tts@example.com").is_err());
        assert!(Backend::new("http://localhost:8000").is_ok());
    }
}
