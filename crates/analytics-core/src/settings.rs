use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::{AnalyticsError, Result};

// ── Default file names ─────────────────────────────────────────────────────────

pub const DEFAULT_RESOURCES_DIR: &str = "resources";
pub const DEFAULT_USERS_FILE: &str = "users.csv";
pub const DEFAULT_CALL_LOGS_FILE: &str = "callLogs.csv";
pub const DEFAULT_ANALYTICS_FILE: &str = "testUserAnalytics.csv";
pub const DEFAULT_ORDERED_CALLS_FILE: &str = "testOrderedCalls.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Ingest user and call-log CSVs and write per-user call analytics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "call-analytics",
    about = "Ingest user and call-log CSVs and write per-user call analytics",
    version
)]
pub struct Settings {
    /// Directory holding the default input and output files
    #[arg(long, default_value = DEFAULT_RESOURCES_DIR)]
    pub resources_dir: PathBuf,

    /// Users source CSV (defaults to <resources-dir>/users.csv)
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Call-log source CSV (defaults to <resources-dir>/callLogs.csv)
    #[arg(long)]
    pub call_logs: Option<PathBuf>,

    /// Analytics report destination (defaults to <resources-dir>/testUserAnalytics.csv)
    #[arg(long)]
    pub analytics_out: Option<PathBuf>,

    /// Ordered call-log report destination (defaults to <resources-dir>/testOrderedCalls.csv)
    #[arg(long)]
    pub ordered_calls_out: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary_file: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging (logs every dropped row)
    #[arg(long)]
    pub debug: bool,
}

// ── PipelineConfig ─────────────────────────────────────────────────────────────

/// Fully resolved file locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub users_path: PathBuf,
    pub call_logs_path: PathBuf,
    pub analytics_path: PathBuf,
    pub ordered_calls_path: PathBuf,
}

impl PipelineConfig {
    /// The reference layout: all four files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            users_path: dir.join(DEFAULT_USERS_FILE),
            call_logs_path: dir.join(DEFAULT_CALL_LOGS_FILE),
            analytics_path: dir.join(DEFAULT_ANALYTICS_FILE),
            ordered_calls_path: dir.join(DEFAULT_ORDERED_CALLS_FILE),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Resolve the four pipeline paths. Explicit flags win over the
    /// resources-directory defaults.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::in_dir(&self.resources_dir);
        let config = PipelineConfig {
            users_path: self.users.clone().unwrap_or(defaults.users_path),
            call_logs_path: self.call_logs.clone().unwrap_or(defaults.call_logs_path),
            analytics_path: self.analytics_out.clone().unwrap_or(defaults.analytics_path),
            ordered_calls_path: self
                .ordered_calls_out
                .clone()
                .unwrap_or(defaults.ordered_calls_path),
        };

        let analytics = normalize_path(&config.analytics_path);
        let ordered = normalize_path(&config.ordered_calls_path);

        if analytics == ordered {
            return Err(AnalyticsError::Config(format!(
                "both reports would be written to {}",
                config.analytics_path.display()
            )));
        }
        for source in [&config.users_path, &config.call_logs_path] {
            let source_norm = normalize_path(source);
            if source_norm == analytics || source_norm == ordered {
                return Err(AnalyticsError::Config(format!(
                    "report path {} would overwrite a source file",
                    source.display()
                )));
            }
        }

        Ok(config)
    }
}

// ── Helper: path comparison ────────────────────────────────────────────────────

/// Absolute, lexically normalized form of `path` for collision checks.
///
/// Relative paths are anchored at the current directory, `.` segments are
/// dropped and `..` pops the previous segment. Symlinks are not resolved.
fn normalize_path(path: &Path) -> PathBuf {
    let anchored = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in anchored.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

// ── Tests ──────────────────────────────────────────────────────────────────────
