//! Configuration file support for eyebench.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/eyebench/config.toml` (lowest priority)
//! - Project-local: `.eyebench.toml` (searched up the directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Collection pipeline settings.
    pub collect: CollectSection,
    /// Detection service settings.
    pub service: ServiceConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Collection pipeline configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CollectSection {
    /// Downscale target long-edge length in pixels.
    pub long_edge: Option<u32>,
    /// Eye crop radius in pixels.
    pub eye_radius: Option<u32>,
    /// Gaussian blur standard deviations.
    pub sigmas: Option<Vec<f32>>,
    /// JPEG quality for service payloads (1-100).
    pub jpeg_quality: Option<u8>,
    /// Batch behavior on service failure: "skip" or "abort".
    pub on_service_error: Option<String>,
}

/// Detection service configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// DetectFaces endpoint URL.
    pub endpoint: Option<String>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Results CSV path.
    pub csv: Option<PathBuf>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/eyebench/config.toml`
    /// 2. Project-local: `.eyebench.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(q) = self.collect.jpeg_quality {
            if !(1..=100).contains(&q) {
                return Err(format!("collect.jpeg_quality must be 1-100, got {q}"));
            }
        }
        if let Some(sigmas) = &self.collect.sigmas {
            if sigmas.is_empty() {
                return Err(String::from("collect.sigmas must not be empty"));
            }
            if sigmas.iter().any(|s| *s < 0.0) {
                return Err(String::from("collect.sigmas must be non-negative"));
            }
        }
        if let Some(mode) = &self.collect.on_service_error {
            if mode != "skip" && mode != "abort" {
                return Err(format!(
                    "collect.on_service_error must be \"skip\" or \"abort\", got {mode:?}"
                ));
            }
        }
        Ok(())
    }

    /// Merge a higher-priority config into this one.
    fn merge(&mut self, other: Self) {
        merge_opt(&mut self.general.recursive, other.general.recursive);
        merge_opt(&mut self.collect.long_edge, other.collect.long_edge);
        merge_opt(&mut self.collect.eye_radius, other.collect.eye_radius);
        merge_opt(&mut self.collect.sigmas, other.collect.sigmas);
        merge_opt(&mut self.collect.jpeg_quality, other.collect.jpeg_quality);
        merge_opt(
            &mut self.collect.on_service_error,
            other.collect.on_service_error,
        );
        merge_opt(&mut self.service.endpoint, other.service.endpoint);
        merge_opt(&mut self.output.csv, other.output.csv);
        merge_opt(&mut self.output.progress, other.output.progress);
    }
}

fn merge_opt<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

/// Parse a TOML config file, logging failures as warnings.
fn load_file(path: &Path) -> Option<AppConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("warning: failed to read {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str(&text) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("warning: invalid config {}: {e}", path.display());
            None
        }
    }
}

/// Path of the XDG config file, if a home directory can be determined.
fn xdg_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("eyebench").join("config.toml"))
}

/// Search for `.eyebench.toml` from the current directory upwards.
fn find_project_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".eyebench.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
