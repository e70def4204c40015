use super::{Formatter, LabeledSeries};
use crate::error::Result;

/// One column per series, one row per sample index
///
/// The index column takes its values from the first series that carries
/// x-axis labels, if any.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, series: &[LabeledSeries]) -> Result<String> {
        let keyed = series.iter().find(|s| s.x_labels.is_some());

        let mut header = vec!["index".to_string()];
        header.extend(series.iter().map(|s| quote(&s.label)));

        let rows = series.iter().map(LabeledSeries::len).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(rows + 1);
        lines.push(header.join(","));

        for i in 0..rows {
            let key = keyed.map_or_else(|| i.to_string(), |s| quote(&s.x_label(i)));
            let mut fields = vec![key];
            // Shorter series leave the cell empty
            fields.extend(
                series
                    .iter()
                    .map(|s| s.values.get(i).map_or(String::new(), |v| v.to_string())),
            );
            lines.push(fields.join(","));
        }

        Ok(lines.join("\n"))
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_and_padding() {
        let series = [
            LabeledSeries::new("input", vec![1, 2, 3]),
            LabeledSeries::new("p0,cfg", vec![1, 3]),
        ];
        let out = CsvFormatter.format(&series).unwrap();
        assert_eq!(out, "index,input,\"p0,cfg\"\n0,1,1\n1,2,3\n2,3,");
    }

    #[test]
    fn test_index_column_uses_x_labels() {
        let series = [LabeledSeries::new("chip_hold", vec![12, 7, 16]).with_x_labels(vec![
            "A7".to_string(),
            "B,2".to_string(),
            "C0".to_string(),
        ])];
        let out = CsvFormatter.format(&series).unwrap();
        assert_eq!(out, "index,chip_hold\nA7,12\n\"B,2\",7\nC0,16");
    }

    #[test]
    fn test_no_series() {
        assert_eq!(CsvFormatter.format(&[]).unwrap(), "index");
    }
}
