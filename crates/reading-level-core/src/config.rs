//! Runtime settings for logging, input limits, and directory sweeps.
//!
//! Nothing here affects scoring: reading speeds, vocabulary, and level
//! thresholds are fixed tables. With no files and no environment the
//! defaults reproduce the standard behavior exactly.
//!
//! Layers, lowest to highest:
//!
//! 1. built-in defaults
//! 2. `config.<ext>` in the user config directory
//! 3. `.reading-level.<ext>` then `reading-level.<ext>` from the nearest
//!    directory (walking up from the search root, stopping at a `.git`
//!    directory) that has either
//! 4. files passed to [`ConfigLoader::with_file`], in order
//! 5. `READING_LEVEL_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml`, or `json`, merged in that order.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analyzer::DEFAULT_MAX_INPUT_BYTES;
use crate::batch::{BatchOptions, DEFAULT_TOP};
use crate::error::{ConfigError, ConfigResult};

const APP_NAME: &str = "reading-level";
const ENV_PREFIX: &str = "READING_LEVEL_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const PROJECT_BOUNDARY: &str = ".git";

/// Settings read from config files and the environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Level for the log file.
    pub log_level: LogLevel,
    /// Where the log file goes; platform data dir when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Per-file size limit in bytes (default 5 MiB).
    pub max_input_bytes: Option<u64>,
    /// Skip the size check entirely, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
    /// Globs, relative to the swept directory, left out of `directory` runs.
    pub exclude: Option<Vec<String>>,
    /// Entries in each `directory` ranking (default 5).
    pub top: Option<usize>,
}

impl Config {
    /// The effective per-file size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<u64> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// The effective ranking size.
    pub fn top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    /// Batch settings derived from this configuration.
    pub fn batch_options(&self) -> ConfigResult<BatchOptions> {
        let options = BatchOptions {
            max_input_bytes: self.input_limit(),
            top: self.top(),
            ..BatchOptions::default()
        };
        match self.exclude {
            Some(ref patterns) => options.with_exclude(patterns),
            None => Ok(options),
        }
    }
}

/// Log file verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-stage metrics.
    Debug,
    /// Batch progress and results (default).
    #[default]
    Info,
    /// Skipped files and other recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The config files that were merged, lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Every file merged, in merge order.
    pub files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file merged last, which wins any conflict between files.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files.last().map(Utf8PathBuf::as_path)
    }
}

/// Collects config sources and merges them into a [`Config`].
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads user config but searches no project directory.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            explicit: Vec::new(),
        }
    }

    /// Look for project config starting at `dir`.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config directory.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Merge `path` above discovered files; later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every layer and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let mut files = Vec::new();
        if self.user_config {
            files.extend(user_config_file());
        }
        if let Some(ref root) = self.search_root {
            files.extend(project_config_files(root));
        }
        files.extend(self.explicit);

        let figment = files
            .iter()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                |figment, file| merge_file(figment, file),
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        let sources = ConfigSources { files };
        tracing::debug!(
            files = sources.files.len(),
            primary = ?sources.primary_file(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// Config files in the nearest directory at or above `start` that has any.
///
/// Dotfiles come first so `reading-level.<ext>` overrides `.reading-level.<ext>`.
/// A directory holding `.git` is searched but nothing above it is.
fn project_config_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = [".", ""]
            .iter()
            .flat_map(|prefix| {
                EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{prefix}{APP_NAME}.{ext}")))
            })
            .filter(|candidate| candidate.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if dir.join(PROJECT_BOUNDARY).exists() {
            break;
        }
    }
    Vec::new()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Platform config directory for reading-level, e.g. `~/.config/reading-level`.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
