//! The `collect` command: run the measurement pipeline over a battery of
//! face images and write the results table.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use eyebench_adapters::{CsvRecordSink, FsImageSource, HttpFaceDescriber};
use eyebench_core::{collect, CollectConfig, FailureMode};

use crate::config::AppConfig;
use crate::output::ProgressReporter;

use super::ExitCode;

/// Batch behavior when the detection service fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceErrorMode {
    /// Discard the image and continue with the rest of the battery.
    Skip,
    /// Stop the run on the first service failure.
    Abort,
}

/// Arguments for the collect command.
#[derive(Args, Clone)]
pub struct CollectArgs {
    /// Image files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Face detection endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Extra HTTP header for the detection service, as "Name: value"
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Downscale long edge in pixels
    #[arg(long)]
    pub long_edge: Option<u32>,

    /// Eye crop radius in pixels
    #[arg(long)]
    pub eye_radius: Option<u32>,

    /// Comma-separated blur standard deviations
    #[arg(long, value_delimiter = ',', value_name = "SIGMA")]
    pub sigma: Vec<f32>,

    /// JPEG quality for service payloads (1-100)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// What to do when the detection service fails
    #[arg(long, value_enum)]
    pub on_service_error: Option<ServiceErrorMode>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress the progress bar and the final summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl CollectArgs {
    /// Layer file configuration under CLI flags. Flags given on the command
    /// line win; unset flags fall back to the config file.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.recursive = self.recursive || config.general.recursive.unwrap_or(false);
        if self.output.is_none() {
            self.output.clone_from(&config.output.csv);
        }
        if self.endpoint.is_none() {
            self.endpoint.clone_from(&config.service.endpoint);
        }
        if self.long_edge.is_none() {
            self.long_edge = config.collect.long_edge;
        }
        if self.eye_radius.is_none() {
            self.eye_radius = config.collect.eye_radius;
        }
        if self.sigma.is_empty() {
            if let Some(sigmas) = &config.collect.sigmas {
                self.sigma.clone_from(sigmas);
            }
        }
        if self.jpeg_quality.is_none() {
            self.jpeg_quality = config.collect.jpeg_quality;
        }
        if self.on_service_error.is_none() {
            self.on_service_error = match config.collect.on_service_error.as_deref() {
                Some("abort") => Some(ServiceErrorMode::Abort),
                Some("skip") => Some(ServiceErrorMode::Skip),
                _ => None,
            };
        }
        if !self.no_progress {
            self.no_progress = !config.output.progress.unwrap_or(true);
        }
        self
    }

    /// Resolve the pipeline configuration from the layered arguments.
    fn pipeline_config(&self) -> Result<CollectConfig> {
        let mut config = CollectConfig::default();
        if let Some(long_edge) = self.long_edge {
            if long_edge == 0 {
                bail!("--long-edge must be positive");
            }
            config.long_edge = long_edge;
        }
        if let Some(eye_radius) = self.eye_radius {
            if eye_radius == 0 {
                bail!("--eye-radius must be positive");
            }
            config.eye_radius = eye_radius;
        }
        if !self.sigma.is_empty() {
            if self.sigma.iter().any(|s| *s < 0.0 || !s.is_finite()) {
                bail!("--sigma values must be finite and non-negative");
            }
            config.sigmas.clone_from(&self.sigma);
        }
        if let Some(quality) = self.jpeg_quality {
            if !(1..=100).contains(&quality) {
                bail!("--jpeg-quality must be between 1 and 100");
            }
            config.jpeg_quality = quality;
        }
        config.on_service_error = match self.on_service_error {
            Some(ServiceErrorMode::Abort) => FailureMode::AbortBatch,
            _ => FailureMode::SkipImage,
        };
        Ok(config)
    }
}

/// Parse a `"Name: value"` header flag.
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("invalid header {raw:?}, expected \"Name: value\""))?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
        bail!("invalid header {raw:?}, empty name");
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Execute the collect command.
pub fn run(args: &CollectArgs) -> Result<ExitCode> {
    for path in &args.paths {
        if !path.exists() {
            bail!("path does not exist: {}", path.display());
        }
    }

    let endpoint = args.endpoint.as_deref().with_context(|| {
        "no detection endpoint configured; pass --endpoint or set \
         [service] endpoint in the config file"
    })?;

    let config = args.pipeline_config()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("results.csv"));

    let mut describer = HttpFaceDescriber::new(endpoint)?;
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        describer = describer.with_header(name, value);
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let sink = CsvRecordSink::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let progress = ProgressReporter::new(!args.no_progress && !args.quiet);

    info!(
        output = %output.display(),
        blur_levels = config.sigmas.len(),
        "starting collection"
    );

    let stats = collect(&source, &describer, &sink, &progress, &config)?;

    if !args.quiet {
        eprintln!(
            "Committed {} image(s), skipped {}.",
            stats.committed, stats.skipped
        );
    }

    if stats.skipped > 0 {
        Ok(ExitCode::PartialBatch)
    } else {
        Ok(ExitCode::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> CollectArgs {
        CollectArgs {
            paths: vec![PathBuf::from(".")],
            recursive: false,
            output: None,
            endpoint: None,
            headers: Vec::new(),
            long_edge: None,
            eye_radius: None,
            sigma: Vec::new(),
            jpeg_quality: None,
            on_service_error: None,
            no_progress: true,
            quiet: false,
        }
    }

    #[test]
    fn test_defaults_match_pipeline_defaults() {
        let config = bare_args().pipeline_config().unwrap();
        let defaults = CollectConfig::default();
        assert_eq!(config.long_edge, defaults.long_edge);
        assert_eq!(config.eye_radius, defaults.eye_radius);
        assert_eq!(config.sigmas, defaults.sigmas);
        assert_eq!(config.jpeg_quality, defaults.jpeg_quality);
        assert_eq!(config.on_service_error, FailureMode::SkipImage);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut args = bare_args();
        args.sigma = vec![-1.0];
        assert!(args.pipeline_config().is_err());

        let mut args = bare_args();
        args.jpeg_quality = Some(0);
        assert!(args.pipeline_config().is_err());

        let mut args = bare_args();
        args.long_edge = Some(0);
        assert!(args.pipeline_config().is_err());
    }

    #[test]
    fn test_config_layering_prefers_flags() {
        let mut file: AppConfig = toml::from_str(
            "[collect]\nlong_edge = 600\nsigmas = [0.0, 1.0]\non_service_error = \"abort\"",
        )
        .unwrap();
        file.service.endpoint = Some(String::from("http://config/detect"));

        let mut args = bare_args();
        args.long_edge = Some(900);
        args.endpoint = Some(String::from("http://flag/detect"));
        let args = args.with_config(&file);

        assert_eq!(args.long_edge, Some(900));
        assert_eq!(args.endpoint.as_deref(), Some("http://flag/detect"));
        assert_eq!(args.sigma, vec![0.0, 1.0]);
        assert_eq!(args.on_service_error, Some(ServiceErrorMode::Abort));
    }

    #[test]
    fn test_parse_header() {
        let (name, value) = parse_header("Authorization: Bearer abc").unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer abc");

        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }
}
