use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

/// Which rendering backend a deployment uses. Evaluated once from the
/// configuration; never re-derived mid-request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Worker,
    Subprocess,
    Embedded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// XLSX template shipped to the worker / subprocess exporter.
    pub template: String,
    /// Directory for locally written artifacts.
    pub export_dir: String,
    #[serde(default)]
    pub worker_url: Option<String>,
    #[serde(default)]
    pub worker_token: Option<String>,
    #[serde(default = "default_worker_timeout")]
    pub worker_timeout_secs: u64,
    #[serde(default)]
    pub allow_subprocess: bool,
    #[serde(default)]
    pub exporter_cmd: Option<String>,
    #[serde(default)]
    pub soffice_path: Option<String>,
    #[serde(default)]
    pub enable_pdf: bool,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_worker_timeout() -> u64 {
    60
}

fn non_empty(v: String) -> Option<String> {
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn truthy(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "yes")
}
fn default_min_year() -> i32 {
    2000
}
fn default_max_year() -> i32 {
    2100
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            template: dir
                .join("wochenbericht_template.xlsx")
                .to_string_lossy()
                .to_string(),
            export_dir: dir.join("exports").to_string_lossy().to_string(),
            worker_url: None,
            worker_token: None,
            worker_timeout_secs: default_worker_timeout(),
            allow_subprocess: false,
            exporter_cmd: None,
            soffice_path: None,
            enable_pdf: false,
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            base.join("wochenbericht")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".wochenbericht")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("wochenbericht.conf")
    }

    /// Load configuration from the default file, or defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from a file, then apply environment overrides in
    /// one place. The result is read-only for the rest of the process.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var("WB_TEMPLATE") {
            self.template = v;
        }
        if let Ok(v) = env::var("WB_EXPORT_DIR") {
            self.export_dir = v;
        }
        if let Ok(v) = env::var("WB_WORKER_URL") {
            self.worker_url = non_empty(v);
        }
        if let Ok(v) = env::var("WB_WORKER_TOKEN") {
            self.worker_token = non_empty(v);
        }
        if let Ok(v) = env::var("WB_ALLOW_SUBPROCESS") {
            self.allow_subprocess = truthy(&v);
        }
        if let Ok(v) = env::var("WB_EXPORTER_CMD") {
            self.exporter_cmd = non_empty(v);
        }
        if let Ok(v) = env::var("WB_SOFFICE_PATH") {
            self.soffice_path = non_empty(v);
        }
        if let Ok(v) = env::var("WB_ENABLE_PDF") {
            self.enable_pdf = truthy(&v);
        }
    }

    /// Backend priority: Worker, then Subprocess, then the in-process
    /// writer as the always-available fallback.
    pub fn backend_kind(&self) -> BackendKind {
        if self
            .worker_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
        {
            BackendKind::Worker
        } else if self.allow_subprocess {
            BackendKind::Subprocess
        } else {
            BackendKind::Embedded
        }
    }

    /// Non-fatal configuration problems, for `config --check`.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match self.backend_kind() {
            BackendKind::Worker => {
                if !Path::new(&self.template).exists() {
                    problems.push(format!("template file not found: {}", self.template));
                }
            }
            BackendKind::Subprocess => {
                if self.exporter_cmd.is_none() {
                    problems.push("allow_subprocess is set but exporter_cmd is missing".to_string());
                }
                if !Path::new(&self.template).exists() {
                    problems.push(format!("template file not found: {}", self.template));
                }
            }
            BackendKind::Embedded => {}
        }

        if self.min_year > self.max_year {
            problems.push(format!(
                "min_year {} is greater than max_year {}",
                self.min_year, self.max_year
            ));
        }

        problems
    }

    /// Initialize the configuration file with defaults.
    pub fn init_all() -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;

        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        println!("✅ Config file: {:?}", Self::config_file());

        Ok(())
    }
}
