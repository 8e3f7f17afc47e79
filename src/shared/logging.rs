use super::state_paths::StatePaths;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const LOG_LEVEL_ENV_VAR: &str = "PROMPTCRAFT_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Appends JSON lines to the state root log file. Every write is best effort:
/// the terminal belongs to the wizard, so failures are dropped silently.
#[derive(Debug, Clone)]
pub struct WizardLog {
    path: Option<PathBuf>,
    min_level: LogLevel,
}

impl WizardLog {
    pub fn new(paths: Option<&StatePaths>, min_level: LogLevel) -> Self {
        Self {
            path: paths.map(StatePaths::log_path),
            min_level,
        }
    }

    pub fn from_env(paths: Option<&StatePaths>) -> Self {
        let min_level = std::env::var(LOG_LEVEL_ENV_VAR)
            .ok()
            .and_then(|raw| LogLevel::parse(&raw))
            .unwrap_or(LogLevel::Info);
        Self::new(paths, min_level)
    }

    pub fn disabled() -> Self {
        Self::new(None, LogLevel::Error)
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn append(&self, level: LogLevel, event: &str, message: &str) {
        if level < self.min_level {
            return;
        }
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let payload = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "level": level.as_str(),
            "event": event,
            "message": message,
        });
        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };
        let _ = writeln!(file, "{line}");
    }

    pub fn debug(&self, event: &str, message: &str) {
        self.append(LogLevel::Debug, event, message);
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append(LogLevel::Info, event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append(LogLevel::Warn, event, message);
    }

    pub fn error(&self, event: &str, message: &str) {
        self.append(LogLevel::Error, event, message);
    }
}
