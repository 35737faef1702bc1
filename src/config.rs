use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Deserialize, Debug)]
pub struct Config {
    pub backend_host: String,

    #[serde(default = "default_engine")]
    pub default_engine: String,

    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

fn default_engine() -> String {
    "edge-tts".to_string()
}

fn default_download_dir() -> String {
    ".".to_string()
}

pub fn init() -> Result<()> {
    if CONFIG.set(envy::from_env()?).is_err() {
        return Err(anyhow!("Failed to set CONFIG"));
    }

    Ok(())
}

pub fn get() -> &'static Config {
    CONFIG.get().unwrap()
}
