//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg`, an optional YAML
//! configuration file, and the resolved [`ChatConfig`] a session is built
//! from.  Precedence is: command line, then `STAINLESS_ENDPOINT`, then the
//! YAML file, then defaults.

use std::path::Path;
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::Deserialize;
use tracing::debug;

use crate::chat::phrases::Locale;
use crate::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

/// Environment variable that overrides the endpoint from the config file.
pub const ENDPOINT_ENV: &str = "STAINLESS_ENDPOINT";

/// How long the web search indicator stays up.
const DEFAULT_SEARCH_INDICATOR_DELAY: Duration = Duration::from_secs(5);

/// Command-line arguments for the stainless-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Assistant endpoint URL.
    #[arrrg(optional, "Assistant endpoint URL", "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Locale of the fixed messages.
    #[arrrg(optional, "Message locale: en or zh-TW (default: en)", "LOCALE")]
    pub locale: Option<String>,

    /// Path to a YAML configuration file.
    #[arrrg(optional, "YAML configuration file", "PATH")]
    pub config: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// The YAML configuration file.  Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Assistant endpoint URL.
    pub endpoint: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Locale name.
    pub locale: Option<String>,
    /// Whether to use ANSI colors.
    pub color: Option<bool>,
    /// How long the web search indicator stays up, in seconds.
    pub search_indicator_secs: Option<u64>,
}

impl ConfigFile {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("cannot read {}", path.display()), err))?;
        Self::from_yaml(&content)
    }
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments, environment and config file with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Where requests are posted.
    pub endpoint: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Locale of the fixed messages.
    pub locale: Locale,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// How long the web search indicator stays visible.
    pub search_indicator_delay: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: [`DEFAULT_ENDPOINT`]
    /// - Timeout: 60 seconds
    /// - Locale: English
    /// - Color: enabled
    /// - Search indicator: 5 seconds
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
            use_color: true,
            search_indicator_delay: DEFAULT_SEARCH_INDICATOR_DELAY,
        }
    }

    /// Sets the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets how long the web search indicator stays visible.
    pub fn with_search_indicator_delay(mut self, delay: Duration) -> Self {
        self.search_indicator_delay = delay;
        self
    }

    /// Overlay the values present in `file`.
    pub fn merge_file(mut self, file: ConfigFile) -> Result<Self> {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(locale) = file.locale {
            self.locale = locale.parse()?;
        }
        if let Some(color) = file.color {
            self.use_color = color;
        }
        if let Some(secs) = file.search_indicator_secs {
            self.search_indicator_delay = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Resolve arguments against the process environment.
    pub fn from_args(args: ChatArgs) -> Result<Self> {
        Self::from_args_and_env(args, std::env::var(ENDPOINT_ENV).ok())
    }

    /// Resolve arguments against an explicit endpoint override.
    pub fn from_args_and_env(args: ChatArgs, env_endpoint: Option<String>) -> Result<Self> {
        let mut config = ChatConfig::new();
        if let Some(path) = &args.config {
            debug!(path = %path, "loading config file");
            config = config.merge_file(ConfigFile::load(path)?)?;
        }
        if let Some(endpoint) = env_endpoint.filter(|e| !e.trim().is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(endpoint) = args.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(secs) = args.timeout_secs {
            if secs == 0 {
                return Err(Error::validation(
                    "timeout must be at least one second",
                    Some("timeout-secs".to_string()),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(locale) = args.locale {
            config.locale = locale.parse()?;
        }
        if args.no_color {
            config.use_color = false;
        }
        Ok(config)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}
