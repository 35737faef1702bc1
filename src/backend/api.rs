use serde::{Deserialize, Serialize};

structstruck::strike! {
    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct EngineVoices {
        pub engine: String,
        pub voices: Vec<
            #[derive(Deserialize, Debug, Clone, PartialEq)]
            pub struct Voice {
                pub id: String,
                pub name: String,
                pub locale: Option<String>,
                pub gender: Option<String>,
                pub sample_rate: Option<u32>,
            },
        >,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TtsRequest {
    pub text: String,
    pub engine: String,
    pub language: String,
    pub voice: String,
    pub speed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsResponse {
    pub status: String,
    pub audio_url: String,
    pub processing_time: f32,
    pub text_preview: String,
    pub file_size: u64,
    pub created_at: String,
    pub engine: String,
    pub voice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub message: String,
    pub uptime: f32,
    pub total_requests: u64,
    pub last_request: Option<String>,
}
