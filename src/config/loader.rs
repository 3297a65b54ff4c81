//! Configuration loader
//!
//! Loading pipeline:
//! 1. Size check and read
//! 2. Environment variable expansion (on raw text)
//! 3. YAML parsing into the typed schema
//! 4. Environment overrides (`COOKOFF_TICK_INTERVAL_MS`, `COOKOFF_CLOCK_SKEW_SECS`)
//! 5. Validation
//! 6. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cookoff_core::config::CookoffConfig;
use cookoff_core::error::Severity;

use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Limits guarding against oversized inputs.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,

    /// Maximum number of rows in a snapshot file.
    pub max_items: usize,

    /// Maximum snapshot file size in bytes.
    pub max_snapshot_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("COOKOFF_MAX_CONFIG_SIZE", 1024 * 1024),
            max_items: env_or("COOKOFF_MAX_ITEMS", 10_000),
            max_snapshot_size: env_or("COOKOFF_MAX_SNAPSHOT_SIZE", 10 * 1024 * 1024),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<CookoffConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    limits: ConfigLimits,
}

impl ConfigLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    /// Loads `path`, or the defaults (plus environment overrides) when no
    /// path is given.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_or_default(&self, path: Option<&Path>) -> Result<LoadResult, ConfigError> {
        match path {
            Some(path) => self.load(path),
            None => {
                let mut config = CookoffConfig::default();
                apply_env_overrides(&mut config);
                Self::finish(config, "<defaults>", Vec::new())
            }
        }
    }

    /// Loads a configuration file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - YAML parsing or deserialization fails
    /// - Validation reports errors
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.limits.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        let substituted = substitute_env(raw_content, path, &mut warnings);

        // An empty file is a valid "all defaults" configuration.
        let mut config: CookoffConfig = if substituted.trim().is_empty() {
            CookoffConfig::default()
        } else {
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        };

        apply_env_overrides(&mut config);

        Self::finish(config, &path.display().to_string(), warnings)
    }

    /// Limits in effect for this loader.
    #[must_use]
    pub const fn limits(&self) -> &ConfigLimits {
        &self.limits
    }

    fn finish(
        config: CookoffConfig,
        source: &str,
        mut warnings: Vec<LoadWarning>,
    ) -> Result<LoadResult, ConfigError> {
        let (errors, issues): (Vec<_>, Vec<_>) = config
            .validate()
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);

        if !errors.is_empty() {
            return Err(ConfigError::ValidationError {
                path: source.to_string(),
                errors,
            });
        }

        warnings.extend(issues.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Environment
// ============================================================================

fn apply_env_overrides(config: &mut CookoffConfig) {
    if let Some(ms) = env_opt::<u64>("COOKOFF_TICK_INTERVAL_MS") {
        config.clock.tick_interval = Duration::from_millis(ms);
    }
    if let Some(secs) = env_opt::<u64>("COOKOFF_CLOCK_SKEW_SECS") {
        config.ranking.clock_skew_tolerance = Duration::from_secs(secs);
    }
}

/// Expands `${VAR}` and `${VAR:-default}` in raw text; `$$` is a literal `$`.
///
/// Unset variables without a default expand to an empty string and
/// produce a warning.
fn substitute_env(raw: &str, source_path: &Path, warnings: &mut Vec<LoadWarning>) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(idx) = rest.find('$') {
        result.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("$$") {
            result.push('$');
            rest = after;
            continue;
        }

        let Some(spec_end) = tail.strip_prefix("${").and_then(|s| s.find('}')) else {
            result.push('$');
            rest = &tail[1..];
            continue;
        };

        let spec = &tail[2..2 + spec_end];
        let (name, default) = spec
            .split_once(":-")
            .map_or((spec, None), |(n, d)| (n, Some(d)));

        match (std::env::var(name), default) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => warnings.push(LoadWarning {
                message: format!("Environment variable '{name}' is not set, using empty string"),
                location: Some(source_path.display().to_string()),
            }),
        }
        rest = &tail[2 + spec_end + 1..];
    }

    result.push_str(rest);
    result
}

fn env_opt<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env_opt(name).unwrap_or(default)
}
