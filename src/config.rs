use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub capture: CaptureSettings,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the interview backend, e.g. "http://localhost:8080/api"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct CaptureSettings {
    pub sample_rate: u32,
    pub channels: u16,
    /// Directory for finalized answer recordings
    pub artifacts_path: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_secs: 30,
            },
            capture: CaptureSettings {
                sample_rate: 16000,
                channels: 1,
                artifacts_path: "recordings".to_string(),
            },
        }
    }
}
