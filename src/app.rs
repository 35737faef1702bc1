use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::backend::{api, Backend};
use crate::catalog;
use crate::command::Command;
use crate::request;

/// The last successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub audio_url: String,
    pub text_preview: String,
}

/// All session state, owned by the prompt loop.
#[derive(Debug)]
pub struct App {
    backend: Backend,
    download_dir: PathBuf,
    catalog: Vec<api::EngineVoices>,
    engine: String,
    voice: Option<String>,
    speed: f32,
    pitch: f32,
    volume: f32,
    artifact: Option<Artifact>,
}

impl App {
    pub fn new(backend: Backend, engine: String, download_dir: PathBuf) -> Self {
        Self {
            backend,
            download_dir,
            catalog: Vec::new(),
            engine,
            voice: None,
            speed: 1.0,
            pitch: 1.0,
            volume: 1.0,
            artifact: None,
        }
    }

    /// Dispatches one prompt line. Returns `false` when the loop should exit.
    pub async fn handle(&mut self, command: Command<'_>) -> bool {
        match command {
            Command::Quit => return false,
            Command::Help => print_help(),
            Command::Engines => self.list_engines(),
            Command::Voices => self.list_voices(),
            Command::Engine(id) => self.select_engine(id),
            Command::Voice(id) => self.select_voice(id),
            Command::Speed(value) => {
                self.speed = value;
                println!("Speaking speed set to {value:.2}");
            }
            Command::Pitch(value) => {
                self.pitch = value;
                println!("Voice pitch set to {value:.2}");
            }
            Command::Volume(value) => {
                self.volume = value;
                println!("Voice volume set to {value:.2}");
            }
            Command::Reload => self.reload_catalog().await,
            Command::Download => self.download().await,
            Command::Status => self.status().await,
            Command::Say(text) => self.convert(text).await,
            Command::Invalid(message) => println!("{message}"),
        }

        true
    }

    /// Fetches the full catalog. A failure keeps whatever was loaded before.
    pub async fn reload_catalog(&mut self) {
        match self.backend.voices(None).await {
            Ok(catalog) => {
                tracing::info!(engines = catalog.len(), "voice catalog loaded");
                self.catalog = catalog;
                self.reset_voice();

                match &self.voice {
                    Some(voice) => println!("Engine {}, voice {voice}", self.engine),
                    None => println!("Engine {}; no voices available", self.engine),
                }
            }
            Err(e) => {
                tracing::warn!("failed to load voice catalog: {e}");
                println!("Failed to load voices: {e}");
            }
        }
    }

    fn reset_voice(&mut self) {
        let voices = catalog::filter_and_sort(&self.catalog, &self.engine);

        self.voice = catalog::pick_default(&voices, &self.engine)
            .or_else(|| voices.first())
            .map(|v| v.id.clone());
    }

    fn list_engines(&self) {
        if self.catalog.is_empty() {
            println!("  (no engines available)");
            return;
        }

        for entry in &self.catalog {
            let marker = if entry.engine == self.engine { "*" } else { " " };
            println!("{marker} {} ({} voices)", entry.engine, entry.voices.len());
        }
    }

    fn list_voices(&self) {
        let voices = catalog::filter_and_sort(&self.catalog, &self.engine);

        if voices.is_empty() {
            println!("  (no voices available)");
            return;
        }

        for voice in &voices {
            let marker = if Some(&voice.id) == self.voice.as_ref() { "*" } else { " " };
            println!("{marker} {}  {}", voice.id, catalog::display_name(voice));
        }
    }

    fn select_engine(&mut self, id: &str) {
        if !self.catalog.iter().any(|e| e.engine == id) {
            println!("Unknown engine: {id} (try /engines)");
            return;
        }

        self.engine = id.to_string();
        self.reset_voice();

        match &self.voice {
            Some(voice) => println!("Engine set to {id}, voice {voice}"),
            None => println!("Engine set to {id}; no voices available"),
        }
    }

    fn select_voice(&mut self, id: &str) {
        let voices = catalog::filter_and_sort(&self.catalog, &self.engine);

        match voices.iter().find(|v| v.id == id) {
            Some(voice) => {
                self.voice = Some(voice.id.clone());
                println!("Voice set to {}", catalog::display_name(voice));
            }
            None => println!("Unknown voice for {}: {id} (try /voices)", self.engine),
        }
    }

    async fn convert(&mut self, text: &str) {
        let Some(voice) = self.voice.clone() else {
            println!("No voice selected (try /voices)");
            return;
        };

        let request = match request::build(
            text,
            &self.engine,
            &voice,
            self.speed,
            Some(self.pitch),
            Some(self.volume),
        ) {
            Ok(request) => request,
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        println!("Converting text to speech...");

        match self.backend.synthesize(&request).await {
            Ok(response) => self.apply_synthesis(&response),
            Err(e) => println!("Error: {e}"),
        }
    }

    fn apply_synthesis(&mut self, response: &api::TtsResponse) {
        self.artifact = Some(Artifact {
            audio_url: response.audio_url.clone(),
            text_preview: response.text_preview.clone(),
        });

        println!("\"{}\"", response.text_preview);
        println!(
            "Audio: {} ({} bytes, {:.2}s)",
            response.audio_url, response.file_size, response.processing_time
        );
        println!("Use /download to save it.");
    }

    async fn download(&self) {
        let Some(artifact) = &self.artifact else {
            println!("Nothing to download yet");
            return;
        };

        match self.save_artifact(artifact).await {
            Ok(path) => println!("Saved {path}"),
            Err(e) => println!("Download failed: {e:#}"),
        }
    }

    async fn save_artifact(&self, artifact: &Artifact) -> Result<String> {
        let audio = self.backend.fetch_audio(&artifact.audio_url).await?;

        let path = self.download_dir.join(artifact_filename(SystemTime::now()));
        std::fs::write(&path, &audio)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path.display().to_string())
    }

    async fn status(&self) {
        match self.backend.health().await {
            Ok(health) => {
                println!("{}: {}", health.status, health.message);
                println!(
                    "Uptime {:.0}s, {} requests served",
                    health.uptime, health.total_requests
                );
                if let Some(last) = &health.last_request {
                    println!("Last request at {last}");
                }
            }
            Err(e) => println!("Backend unreachable: {e}"),
        }
    }
}

fn artifact_filename(now: SystemTime) -> String {
    let secs = now.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    format!("speech-{secs}.mp3")
}

fn print_help() {
    println!("Type text and press Enter to convert it to speech.");
    println!();
    println!("  /engines            List available engines");
    println!("  /voices             List voices for the current engine");
    println!("  /engine <id>        Switch engine");
    println!("  /voice <id>         Select a voice");
    println!("  /speed <0.5-2.0>    Set speaking speed");
    println!("  /pitch <0.5-2.0>    Set voice pitch");
    println!("  /volume <0.0-2.0>   Set voice volume");
    println!("  /reload             Re-fetch the voice catalog");
    println!("  /download           Save the last conversion as an mp3");
    println!("  /status             Show backend health");
    println!("  /quit               Exit");
}
