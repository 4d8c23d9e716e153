/// Server configuration
use crate::error::{Result, ServerError};
use lathe_mastering::MasteringParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_mastering")]
    pub mastering: MasteringSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Default mastering parameters, overridable per request
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MasteringSettings {
    #[serde(default = "default_target_lufs")]
    pub target_lufs: f64,

    #[serde(default = "default_highpass_hz")]
    pub highpass_hz: f64,

    #[serde(default = "default_limiter_threshold")]
    pub limiter_threshold: f32,

    #[serde(default = "default_true_peak_db")]
    pub true_peak_db: f64,
}

impl MasteringSettings {
    /// Convert into chain parameters
    pub fn to_params(self) -> MasteringParams {
        MasteringParams {
            target_loudness_lufs: self.target_lufs,
            highpass_cutoff_hz: self.highpass_hz,
            limiter_threshold: self.limiter_threshold,
            true_peak_target_db: self.true_peak_db,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = std::path::PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with LATHE_)
        settings = settings.add_source(
            config::Environment::with_prefix("LATHE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.mastering.highpass_hz <= 0.0 {
            return Err(ServerError::Config(format!(
                "high-pass cutoff must be positive, got {}",
                self.mastering.highpass_hz
            )));
        }

        if self.mastering.limiter_threshold <= 0.0 || self.mastering.limiter_threshold > 1.0 {
            return Err(ServerError::Config(format!(
                "limiter threshold must be in (0, 1], got {}",
                self.mastering.limiter_threshold
            )));
        }

        if self.mastering.true_peak_db > 0.0 {
            return Err(ServerError::Config(format!(
                "true-peak target must not exceed full scale, got {} dB",
                self.mastering.true_peak_db
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_mastering() -> MasteringSettings {
    MasteringSettings {
        target_lufs: default_target_lufs(),
        highpass_hz: default_highpass_hz(),
        limiter_threshold: default_limiter_threshold(),
        true_peak_db: default_true_peak_db(),
    }
}

fn default_target_lufs() -> f64 {
    lathe_mastering::STREAMING_TARGET_LUFS
}

fn default_highpass_hz() -> f64 {
    lathe_mastering::DEFAULT_HIGHPASS_HZ
}

fn default_limiter_threshold() -> f32 {
    lathe_mastering::DEFAULT_LIMITER_THRESHOLD
}

fn default_true_peak_db() -> f64 {
    lathe_mastering::DEFAULT_TRUE_PEAK_DB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            mastering: default_mastering(),
        }
    }
}
