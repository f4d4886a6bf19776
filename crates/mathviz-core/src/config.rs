//! Process configuration resolved once from the environment.
//!
//! Every stage receives its configuration at construction and never reads the
//! environment again. The `from_lookup` constructors take any key lookup so
//! tests can supply a map instead of mutating process state.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 120;
const DEFAULT_WORKER_COMMAND: &str = "mathviz-render-worker";
const DEFAULT_RENDERS_DIR: &str = "renders";
const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is present but cannot be interpreted.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// The offending variable name.
        var: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A required variable is absent.
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
}

/// Reads a variable from the process environment.
#[must_use]
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match non_empty(lookup, var) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            }),
    }
}

/// A program plus leading arguments, parsed with shell quoting rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments placed before any per-call arguments.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Splits a shell-style command line. Returns `Ok(None)` for blank input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when quoting is unbalanced.
    pub fn parse(var: &'static str, line: &str) -> Result<Option<Self>, ConfigError> {
        let mut words = shell_words::split(line).map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        })?;
        if words.is_empty() {
            return Ok(None);
        }
        let program = words.remove(0);
        Ok(Some(Self {
            program,
            args: words,
        }))
    }
}

/// Which text-completion backend the language stages use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelMode {
    /// No collaborator; deterministic offline generators only.
    Mock,
    /// A local generation server (`POST {base_url}/api/generate`).
    Local {
        /// Server root URL.
        base_url: String,
        /// Model name.
        model: String,
    },
    /// A hosted chat-completion API.
    Hosted {
        /// Bearer token.
        api_key: String,
        /// API root URL, e.g. `https://api.openai.com/v1`.
        base_url: String,
        /// Model name.
        model: String,
    },
}

impl ModelMode {
    /// Stable lowercase name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Local { .. } => "local",
            Self::Hosted { .. } => "hosted",
        }
    }
}

/// Configuration for the refinement and explanation stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Selected backend.
    pub mode: ModelMode,
    /// Per-call timeout for completion requests.
    pub timeout: Duration,
}

impl LanguageConfig {
    /// Offline configuration with no collaborator.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            mode: ModelMode::Mock,
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }

    /// Resolves the mode: `USE_OLLAMA=true` selects the local model, otherwise
    /// an `OPENAI_API_KEY` selects the hosted model, otherwise mock.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an unparsable timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let use_local = non_empty(&lookup, "USE_OLLAMA")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let mode = if use_local {
            ModelMode::Local {
                base_url: non_empty(&lookup, "OLLAMA_URL")
                    .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_owned()),
                model: non_empty(&lookup, "OLLAMA_MODEL")
                    .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_owned()),
            }
        } else if let Some(api_key) = non_empty(&lookup, "OPENAI_API_KEY") {
            ModelMode::Hosted {
                api_key,
                base_url: non_empty(&lookup, "OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
                model: non_empty(&lookup, "OPENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned()),
            }
        } else {
            ModelMode::Mock
        };

        Ok(Self {
            mode,
            timeout: seconds(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
        })
    }

    /// Resolves from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LanguageConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

/// Configuration for the render dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Root URL of the remote render service; enables the remote tier.
    /// Read from `RENDER_SERVICE_URL`, or the older `MANIM_MCP_URL`.
    pub remote_url: Option<String>,
    /// Timeout for the remote render call.
    pub remote_timeout: Duration,
    /// Local render-worker command; `None` disables the subprocess tier.
    pub worker: Option<CommandSpec>,
    /// Shared artifact directory.
    pub renders_dir: PathBuf,
    /// Encoder used by the placeholder tier.
    pub ffmpeg_program: String,
}

impl RenderConfig {
    /// Resolves the dispatcher configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an unparsable timeout or worker command.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let worker = match lookup("RENDER_WORKER_COMMAND") {
            Some(line) => CommandSpec::parse("RENDER_WORKER_COMMAND", &line)?,
            None => CommandSpec::parse("RENDER_WORKER_COMMAND", DEFAULT_WORKER_COMMAND)?,
        };

        Ok(Self {
            remote_url: non_empty(&lookup, "RENDER_SERVICE_URL")
                .or_else(|| non_empty(&lookup, "MANIM_MCP_URL"))
                .map(|url| url.trim_end_matches('/').to_owned()),
            remote_timeout: seconds(&lookup, "RENDER_TIMEOUT_SECS", DEFAULT_RENDER_TIMEOUT_SECS)?,
            worker,
            renders_dir: non_empty(&lookup, "RENDERS_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_RENDERS_DIR), PathBuf::from),
            ffmpeg_program: non_empty(&lookup, "FFMPEG_PATH")
                .unwrap_or_else(|| DEFAULT_FFMPEG.to_owned()),
        })
    }

    /// Resolves from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RenderConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

/// Configuration for the render service and render-worker CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    /// The opaque scene engine, invoked as `<cmd> <handle> <params> <output>`.
    pub engine: CommandSpec,
    /// Optional directory of scene definition files.
    pub plugin_dir: Option<PathBuf>,
    /// Where rendered scenes are written.
    pub renders_dir: PathBuf,
}

impl SceneConfig {
    /// Resolves the scene configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when `SCENE_ENGINE_COMMAND` is absent or
    /// blank, and `ConfigError::Invalid` when it cannot be split.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let line = lookup("SCENE_ENGINE_COMMAND")
            .ok_or(ConfigError::Missing("SCENE_ENGINE_COMMAND"))?;
        let engine = CommandSpec::parse("SCENE_ENGINE_COMMAND", &line)?
            .ok_or(ConfigError::Missing("SCENE_ENGINE_COMMAND"))?;

        Ok(Self {
            engine,
            plugin_dir: non_empty(&lookup, "SCENE_PLUGIN_DIR").map(PathBuf::from),
            renders_dir: non_empty(&lookup, "RENDERS_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_RENDERS_DIR), PathBuf::from),
        })
    }

    /// Resolves from the process environment.
    ///
    /// # Errors
    ///
    /// See [`SceneConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}
