//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use model_eval_core::{ComparisonResult, ConfidenceCategory, ConfidenceInterval, EvalError, Reporter};
use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(
    Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    /// Write a single item
    pub fn write<T: Serialize + TableDisplay>(&self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                item.display_single();
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(item)?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(item)?;
                print!("{}", yaml);
            }
        }
        Ok(())
    }

    /// Write a warning message
    pub fn warning(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "⚠".yellow(), message);
        } else {
            eprintln!("Warning: {}", message);
        }
    }
}

impl Reporter for OutputWriter {
    fn report(&self, result: &ComparisonResult) -> model_eval_core::Result<()> {
        self.write(result)
            .map_err(|err| EvalError::Serialization(err.to_string()))
    }
}

/// Trait for displaying items in a table
pub trait TableDisplay {
    /// Display a single item in detail
    fn display_single(&self);
}

/// Table with the shared preset and cyan headers
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);
    table
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a list field
pub fn print_list_field(key: &str, values: &[String]) {
    if values.is_empty() {
        println!("  {}: {}", key.cyan(), "-".dimmed());
    } else {
        println!("  {}:", key.cyan());
        for v in values {
            println!("    - {}", v);
        }
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Format a p-value for display
pub fn format_p_value(p: f64) -> String {
    if p < 1e-4 {
        "< 0.0001".to_string()
    } else {
        format!("{:.4}", p)
    }
}

/// Format interval bounds as `[lower, upper]`
pub fn format_interval(ci: &ConfidenceInterval) -> String {
    format!("[{:.4}, {:.4}]", ci.lower, ci.upper)
}

/// Significance marker with color
pub fn significance_badge(significant: bool) -> String {
    if significant {
        "yes".green().bold().to_string()
    } else {
        "no".dimmed().to_string()
    }
}

/// Confidence category with color
pub fn confidence_badge(confidence: ConfidenceCategory) -> String {
    let label = confidence.to_string();
    match confidence {
        ConfidenceCategory::VeryHigh | ConfidenceCategory::High => label.green().to_string(),
        ConfidenceCategory::Medium => label.yellow().to_string(),
        ConfidenceCategory::Low | ConfidenceCategory::VeryLow => label.red().to_string(),
    }
}
