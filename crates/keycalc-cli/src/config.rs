//! CLI configuration
//!
//! Values come from an optional YAML file; command-line flags are applied on
//! top by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - warnings and errors
    #[default]
    Normal,
    /// Verbose - progress information
    Verbose,
    /// Debug - every command
    Debug,
    /// Trace - every reduction step
    Trace,
}

impl Verbosity {
    /// Derives the level from `-q` and the number of `-v` flags
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }

    /// `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Arithmetic service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Send permissive CORS headers
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors: false,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Arithmetic service used by `eval` (local arithmetic when unset)
    pub remote_url: Option<String>,
    /// Settings for `serve`
    pub server: ServerConfig,
    /// Number of finished expressions kept
    pub history_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            remote_url: None,
            server: ServerConfig::default(),
            history_limit: keycalc::core::history::History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML document; missing keys keep their defaults
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        serde_yaml_ng::from_str(text).map_err(|e| CliError::config(e.to_string()))
    }

    /// Loads a YAML configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the arithmetic service URL
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Set the bind host
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Set the bind port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Enable or disable CORS
    #[must_use]
    pub const fn with_cors(mut self, cors: bool) -> Self {
        self.server.cors = cors;
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(false, 9), Verbosity::Trace);
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Trace.is_verbose());
            assert!(Verbosity::Quiet.is_quiet());
        }

        #[test]
        fn test_filter_directive() {
            assert_eq!(Verbosity::Quiet.filter_directive(), "error");
            assert_eq!(Verbosity::Normal.filter_directive(), "warn");
            assert_eq!(Verbosity::Debug.filter_directive(), "debug");
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CliConfig::new();
            assert_eq!(config.verbosity, Verbosity::Normal);
            assert!(config.remote_url.is_none());
            assert_eq!(config.server.port, 5000);
            assert!(!config.server.cors);
            assert_eq!(config.history_limit, 100);
        }

        #[test]
        fn test_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Debug)
                .with_remote_url("http://localhost:5000")
                .with_host("0.0.0.0")
                .with_port(8080)
                .with_cors(true)
                .with_history_limit(5);
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.remote_url.as_deref(), Some("http://localhost:5000"));
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert!(config.server.cors);
            assert_eq!(config.history_limit, 5);
        }

        #[test]
        fn test_partial_yaml() {
            let config = CliConfig::from_yaml("server:\n  port: 9000\nhistory_limit: 3\n").unwrap();
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.history_limit, 3);
            assert_eq!(config.verbosity, Verbosity::Normal);
        }

        #[test]
        fn test_full_yaml() {
            let yaml = "verbosity: verbose\nremote_url: http://calc:5000\nserver:\n  host: 0.0.0.0\n  port: 80\n  cors: true\nhistory_limit: 10\n";
            let config = CliConfig::from_yaml(yaml).unwrap();
            assert_eq!(config.verbosity, Verbosity::Verbose);
            assert_eq!(config.remote_url.as_deref(), Some("http://calc:5000"));
            assert!(config.server.cors);
        }

        #[test]
        fn test_invalid_yaml() {
            let err = CliConfig::from_yaml("server: [1, 2").unwrap_err();
            assert!(matches!(err, CliError::Config { .. }));
        }

        #[test]
        fn test_missing_file() {
            let err = CliConfig::load(Path::new("/nonexistent/keycalc.yaml")).unwrap_err();
            assert!(err.to_string().contains("cannot read"));
        }

        #[test]
        fn test_load_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("keycalc.yaml");
            std::fs::write(&path, "history_limit: 7\n").unwrap();
            assert_eq!(CliConfig::load(&path).unwrap().history_limit, 7);
        }
    }
}
