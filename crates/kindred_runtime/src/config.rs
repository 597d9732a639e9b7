//! CLI and shell configuration.

use std::env;
use std::path::PathBuf;

use kindred_foundation::{Error, ErrorKind, Result};

/// Environment variable read for the log filter when `--log` is absent.
pub const LOG_ENV: &str = "KINDRED_LOG";

/// Log filter used when neither `--log` nor [`LOG_ENV`] is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration parsed from command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Command files to run before the shell starts.
    pub files: Vec<PathBuf>,
    /// Run the files and exit without starting the shell.
    pub batch_mode: bool,
    /// Start with the demonstration family instead of an empty one.
    pub seed_sample: bool,
    /// `tracing` filter directives.
    pub log_filter: String,
    /// Print help and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            batch_mode: false,
            seed_sample: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            show_help: false,
            show_version: false,
        }
    }
}

impl RuntimeConfig {
    /// Reads the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns a `Command` error for unknown options or a missing value.
    pub fn from_env() -> Result<Self> {
        Self::parse_args(env::args(), env::var(LOG_ENV).ok())
    }

    /// Parses arguments, the first of which is the program name.
    ///
    /// `env_log` is the value of [`LOG_ENV`], if set; `--log` overrides it.
    ///
    /// # Errors
    ///
    /// Returns a `Command` error for unknown options or a missing value.
    pub fn parse_args<I, S>(args: I, env_log: Option<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = env_log.filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        let mut args = args.into_iter().map(Into::<String>::into).skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "-V" | "--version" => config.show_version = true,
                "-b" | "--batch" => config.batch_mode = true,
                "--empty" => config.seed_sample = false,
                "--log" => {
                    config.log_filter = args.next().ok_or_else(|| {
                        Error::new(ErrorKind::Command("--log requires a value".to_string()))
                    })?;
                }
                option if option.starts_with('-') => {
                    return Err(Error::new(ErrorKind::Command(format!(
                        "unknown option: {option}"
                    ))));
                }
                path => config.files.push(PathBuf::from(path)),
            }
        }

        Ok(config)
    }
}

/// Prompts and banner settings for the interactive shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplConfig {
    /// Primary prompt.
    pub prompt: String,
    /// Prompt shown while a quote is still open.
    pub continuation_prompt: String,
    /// Whether to print the welcome banner.
    pub show_banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "kindred> ".to_string(),
            continuation_prompt: "....> ".to_string(),
            show_banner: true,
        }
    }
}

impl ReplConfig {
    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the continuation prompt.
    #[must_use]
    pub fn with_continuation_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.continuation_prompt = prompt.into();
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }
}
