//! CLI configuration management

use anyhow::{Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use model_eval_core::{EngineConfig, TestType};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Prefix for environment overrides, e.g. `MODEL_EVAL_ENGINE__ALPHA=0.01`
pub const ENV_PREFIX: &str = "MODEL_EVAL";

/// Layered CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output format
    pub output: OutputFormat,

    /// Enable colored output
    pub color: bool,

    /// Engine parameters
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputFormat::Table,
            color: true,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `config/default`, `config/local`, an optional
    /// explicit file and the environment, in increasing precedence
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Command-line flags take precedence over every file and environment layer
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.no_color {
            self.color = false;
        }

        let engine = &mut self.engine;
        if let Some(alpha) = cli.alpha {
            engine.alpha = alpha;
        }
        if let Some(confidence) = cli.confidence {
            engine.confidence_level = confidence;
        }
        if let Some(method) = cli.method {
            engine.interval_method = method.into();
        }
        if let Some(iterations) = cli.iterations {
            engine.bootstrap_iterations = iterations;
        }
        if cli.paired {
            engine.test_type = TestType::Paired;
        }
        if let Some(tail) = cli.tail {
            engine.tail = tail.into();
        }
        if let Some(seed) = cli.seed {
            engine.seed = Some(seed);
        }
        if cli.verbose {
            engine.verbose = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use model_eval_core::{IntervalMethod, Tail};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output, OutputFormat::Table);
        assert!(settings.color);
        assert_eq!(settings.engine, EngineConfig::default());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "output: json\nengine:\n  alpha: 0.01\n  interval_method: bootstrap\n  seed: 7"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.engine.alpha, 0.01);
        assert_eq!(settings.engine.interval_method, IntervalMethod::Bootstrap);
        assert_eq!(settings.engine.seed, Some(7));
        // untouched keys keep their defaults
        assert_eq!(settings.engine.confidence_level, 0.95);
        assert!(settings.color);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Some(Path::new("does/not/exist.yaml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "model-eval",
            "interval",
            "--input",
            "a.json",
            "--alpha",
            "0.1",
            "--confidence",
            "0.9",
            "--iterations",
            "250",
            "--tail",
            "right",
            "--seed",
            "3",
            "--no-color",
            "-v",
        ]);

        let mut settings = Settings::default();
        settings.apply_overrides(&cli);

        assert!(!settings.color);
        assert_eq!(settings.engine.alpha, 0.1);
        assert_eq!(settings.engine.confidence_level, 0.9);
        assert_eq!(settings.engine.bootstrap_iterations, 250);
        assert_eq!(settings.engine.tail, Tail::Right);
        assert_eq!(settings.engine.seed, Some(3));
        assert_eq!(settings.engine.test_type, TestType::Unpaired);
        assert!(settings.engine.verbose);
    }
}
