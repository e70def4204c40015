mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// A named sequence of values, ready for display or plotting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledSeries {
    pub label: String,
    pub values: Vec<i128>,
    /// Per-value x-axis labels; positions are used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_labels: Option<Vec<String>>,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, values: Vec<i128>) -> Self {
        Self {
            label: label.into(),
            values,
            x_labels: None,
        }
    }

    /// Attach x-axis labels, one per value
    pub fn with_x_labels(mut self, x_labels: Vec<String>) -> Self {
        debug_assert_eq!(x_labels.len(), self.values.len());
        self.x_labels = Some(x_labels);
        self
    }

    /// X-axis label for position `i`: the attached label, or the index itself
    pub fn x_label(&self, i: usize) -> String {
        self.x_labels
            .as_ref()
            .and_then(|labels| labels.get(i))
            .cloned()
            .unwrap_or_else(|| i.to_string())
    }

    pub fn from_samples(label: impl Into<String>, samples: &[i64]) -> Self {
        Self::new(label, samples.iter().map(|&s| i128::from(s)).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub trait Formatter {
    fn format(&self, series: &[LabeledSeries]) -> Result<String>;
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
