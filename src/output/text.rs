use rolling_stats::Stats;

use super::{Formatter, LabeledSeries};
use crate::error::Result;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, series: &[LabeledSeries]) -> Result<String> {
        let mut lines = Vec::with_capacity(series.len());

        for s in series {
            if s.is_empty() {
                lines.push(format!("{}: (empty)", s.label));
                continue;
            }

            let mut stats: Stats<f64> = Stats::new();
            for &v in &s.values {
                stats.update(v as f64);
            }
            lines.push(format!(
                "{}: n={} min={:.0} max={:.0} mean={:.3} std_dev={:.3}",
                s.label, stats.count, stats.min, stats.max, stats.mean, stats.std_dev
            ));

            if self.verbose {
                let values: Vec<String> = match &s.x_labels {
                    Some(_) => s
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| format!("{}={}", s.x_label(i), v))
                        .collect(),
                    None => s.values.iter().map(|v| v.to_string()).collect(),
                };
                lines.push(format!("  [{}]", values.join(", ")));
            }
        }

        Ok(lines.join("\n"))
    }
}
