//! User configuration.
//!
//! An optional TOML file can:
//! - add categories or replace the extension list of a built-in one
//! - exclude files from organizing (names, extensions, globs, regexes, optionally hidden files)
//! - set the default source and destination folders
//!
//! # Configuration File Format
//!
//! ```toml
//! [paths]
//! source = "~/Downloads"
//! destination = "~/Downloads/Organized"
//!
//! [[categories]]
//! name = "Ebooks"
//! extensions = [".epub", "mobi"]
//!
//! [filters]
//! enable_hidden_files = true
//!
//! [filters.exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["tmp", ".crdownload"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```

use crate::file_category::{CategoryTable, extension_of, normalize_extension};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_NAME: &str = ".organizerrc.toml";

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    #[error("Invalid glob pattern '{0}'")]
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    IoError(String),
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerConfig {
    #[serde(default)]
    pub paths: PathDefaults,

    /// Extra or overriding categories, applied in order on top of the
    /// built-in table.
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,

    #[serde(default)]
    pub filters: FilterRules,
}

/// Default folders used when the command line does not name them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathDefaults {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
}

/// One `[[categories]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Filter rules deciding which discovered files get organized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether to organize hidden files (starting with "."). Defaults to true.
    #[serde(default = "default_true")]
    pub enable_hidden_files: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist, overrides every exclusion.
    #[serde(default)]
    pub include: IncludeRules,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            enable_hidden_files: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns matched against the file name (e.g. "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Extensions, with or without the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regexes matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl OrganizerConfig {
    /// Load configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if given (it must exist)
    /// 2. `.organizerrc.toml` in the current directory
    /// 3. `<config dir>/organizer/config.toml`
    /// 4. built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_NAME);
        if local_config.is_file() {
            return Self::load_from_file(&local_config);
        }

        if let Some(user_config) = user_config_path()
            && user_config.is_file()
        {
            return Self::load_from_file(&user_config);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    // Category names become folder names, so they must be a single path component.
    fn validate(&self) -> Result<(), ConfigError> {
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty()
                || name == "."
                || name == ".."
                || name.contains(['/', '\\'])
            {
                return Err(ConfigError::ConfigInvalid(format!(
                    "invalid category name '{}'",
                    category.name
                )));
            }
        }
        Ok(())
    }

    /// Built-in categories with this configuration's additions applied.
    pub fn category_table(&self) -> CategoryTable {
        let mut table = CategoryTable::builtin();
        for category in &self.categories {
            table.insert_category(category.name.trim(), &category.extensions);
        }
        table
    }

    /// Compile filter rules into matchers.
    pub fn compile_filters(&self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(&self.filters)
    }

    /// Source folder: configured value (with `~` expanded) or the user's
    /// download folder.
    pub fn source_dir(&self) -> PathBuf {
        self.paths
            .source
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(default_source_dir)
    }

    /// Destination folder: configured value or `<default source>/Organized`.
    pub fn destination_dir(&self) -> PathBuf {
        self.paths
            .destination
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| default_source_dir().join("Organized"))
    }
}

/// `<config dir>/organizer/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("organizer").join("config.toml"))
}

fn default_source_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Replaces a leading `~` with the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Pre-compiled filter rules.
#[derive(Debug)]
pub struct CompiledFilters {
    enable_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

impl CompiledFilters {
    fn new(rules: &FilterRules) -> Result<Self, ConfigError> {
        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enable_hidden_files: rules.enable_hidden_files,
            exclude_filenames: rules.exclude.filenames.iter().cloned().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .filter_map(|ext| normalize_extension(ext))
                .collect(),
            exclude_patterns: compile_globs(&rules.exclude.patterns)?,
            exclude_regexes,
            include_patterns: compile_globs(&rules.include.patterns)?,
        })
    }

    /// Returns true if `file_path` should be organized.
    ///
    /// Include patterns win over everything. Otherwise a file is dropped if
    /// it is hidden (when hidden files are disabled) or matches an excluded name, extension,
    /// glob or regex.
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.matches_any(&self.include_patterns, &file_name) {
            return true;
        }
        if !self.enable_hidden_files && file_name.starts_with('.') {
            return false;
        }
        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }
        if self.exclude_extensions.contains(&extension_of(file_path)) {
            return false;
        }
        if self.matches_any(&self.exclude_patterns, &file_name) {
            return false;
        }
        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }

    fn matches_any(&self, patterns: &[Pattern], file_name: &str) -> bool {
        patterns.iter().any(|pattern| pattern.matches(file_name))
    }

    /// Splits `files` into (kept, excluded), preserving order.
    pub fn partition(&self, files: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
        files.into_iter().partition(|path| self.should_include(path))
    }
}
