use crate::config::ConfigError;
use crate::review::description::DescribeError;
use crate::review::domain::RuleKeyError;
use crate::review::routing::RoutingError;
use crate::snapshot::SnapshotError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Csv(csv::Error),
    Snapshot(SnapshotError),
    RuleKey(RuleKeyError),
    Describe(DescribeError),
    Routing(RoutingError),
    UnknownRule(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
            AppError::Snapshot(err) => write!(f, "snapshot error: {}", err),
            AppError::RuleKey(err) => write!(f, "rule key error: {}", err),
            AppError::Describe(err) => write!(f, "description error: {}", err),
            AppError::Routing(err) => write!(f, "routing error: {}", err),
            AppError::UnknownRule(key) => write!(f, "no rule {} in the snapshot", key),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Csv(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::RuleKey(err) => Some(err),
            AppError::Describe(err) => Some(err),
            AppError::Routing(err) => Some(err),
            AppError::UnknownRule(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SnapshotError> for AppError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<RuleKeyError> for AppError {
    fn from(value: RuleKeyError) -> Self {
        Self::RuleKey(value)
    }
}

impl From<DescribeError> for AppError {
    fn from(value: DescribeError) -> Self {
        Self::Describe(value)
    }
}

impl From<RoutingError> for AppError {
    fn from(value: RoutingError) -> Self {
        Self::Routing(value)
    }
}
