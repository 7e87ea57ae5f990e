//! Loading metric samples from disk

use anyhow::{bail, Context as _, Result};
use model_eval_core::MetricSamples;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One model's evaluation results, e.g. `{"model": "unet", "metrics": {"iou": [0.7, 0.8]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub model: String,
    #[serde(default)]
    pub metrics: MetricSamples,
}

impl ModelInput {
    /// Parse a JSON or YAML file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model results from {:?}", path))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let input: ModelInput = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON from {:?}", path))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {:?}", path))?,
            _ => bail!(
                "Unsupported input format for {:?}: expected .json, .yaml or .yml",
                path
            ),
        };

        tracing::debug!(
            model = %input.model,
            metrics = input.metrics.len(),
            path = %path.display(),
            "loaded model results"
        );

        Ok(input)
    }

    /// Samples for one metric, or an error naming the file's model
    pub fn metric(&self, name: &str) -> Result<&[f64]> {
        self.metrics
            .get(name)
            .with_context(|| format!("Metric '{}' not found for model '{}'", name, self.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"{"model": "Model A", "metrics": {"iou": [0.7, 0.72], "dice": [0.8]}}"#,
        );

        let input = ModelInput::load(file.path()).unwrap();

        assert_eq!(input.model, "Model A");
        assert_eq!(input.metrics.len(), 2);
        assert_eq!(input.metric("iou").unwrap(), &[0.7, 0.72]);
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(".yml", "model: Model B\nmetrics:\n  iou: [0.8, 0.82, 0.85]\n");

        let input = ModelInput::load(file.path()).unwrap();

        assert_eq!(input.model, "Model B");
        assert_eq!(input.metric("iou").unwrap().len(), 3);
    }

    #[test]
    fn test_missing_metric() {
        let input = ModelInput {
            model: "unet".to_string(),
            metrics: MetricSamples::new(),
        };

        let err = input.metric("iou").unwrap_err();
        assert_eq!(err.to_string(), "Metric 'iou' not found for model 'unet'");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".csv", "iou\n0.7\n");
        let err = ModelInput::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported input format"));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp(".json", "{\"model\": 3}");
        assert!(ModelInput::load(file.path()).is_err());
    }
}
