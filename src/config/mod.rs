use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    fn default_log_level(self) -> &'static str {
        match self {
            Self::Production => "info",
            Self::Test | Self::Development => "debug",
        }
    }
}

/// Top-level configuration for the batch driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data_dir: PathBuf,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("REVIEW_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = match env::var("REVIEW_DATA_DIR") {
            Ok(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDataDir),
            Ok(value) => PathBuf::from(value),
            Err(_) => PathBuf::from("./data"),
        };

        let log_level = env::var("REVIEW_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        Ok(Self {
            environment,
            data_dir,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDataDir => {
                write!(f, "REVIEW_DATA_DIR must name a directory when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
