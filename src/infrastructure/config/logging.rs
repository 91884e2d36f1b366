//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
///
/// `format` is `pretty`, `compact` or `json`. Output goes to stderr so the
/// CLI's stdout stays machine-readable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` overrides `level`. A second call is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

        // `try_init` fails only when a global subscriber already exists.
        let _ = match self.format.as_str() {
            "json" => builder.json().try_init(),
            "compact" => builder.compact().try_init(),
            _ => builder.try_init(),
        };
    }

    /// Raise `level` for `-v` flags: one means `debug`, two or more `trace`.
    /// A configured level that is already more verbose is kept.
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let requested = match verbose {
            0 => return self,
            1 => "debug",
            _ => "trace",
        };
        if level_rank(requested) > level_rank(&self.level) {
            self.level = requested.to_string();
        }
        self
    }

    /// Whether `format` names a supported layout.
    #[must_use]
    pub fn is_known_format(&self) -> bool {
        matches!(self.format.as_str(), "pretty" | "compact" | "json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Rank of a plain level name; directive strings rank as `info`.
fn level_rank(level: &str) -> u8 {
    match level.to_ascii_lowercase().as_str() {
        "off" => 0,
        "error" => 1,
        "warn" => 2,
        "debug" => 4,
        "trace" => 5,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.is_known_format());
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: LoggingConfig = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
    }

    #[test]
    fn test_verbosity_raises_level() {
        let config = LoggingConfig {
            level: "warn".into(),
            format: "compact".into(),
        };
        assert_eq!(config.clone().with_verbosity(0).level, "warn");
        assert_eq!(config.clone().with_verbosity(1).level, "debug");
        assert_eq!(config.with_verbosity(3).level, "trace");
    }

    #[test]
    fn test_verbosity_never_lowers_level() {
        let config = LoggingConfig {
            level: "trace".into(),
            format: "pretty".into(),
        };
        assert_eq!(config.with_verbosity(1).level, "trace");
    }
}
