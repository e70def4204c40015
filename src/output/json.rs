use serde::Serialize;

use super::{Formatter, LabeledSeries, iso8601_timestamp};
use crate::error::Result;

pub struct JsonFormatter;

#[derive(Serialize)]
struct Report<'a> {
    ts: String,
    series: &'a [LabeledSeries],
}

impl Formatter for JsonFormatter {
    fn format(&self, series: &[LabeledSeries]) -> Result<String> {
        let report = Report {
            ts: iso8601_timestamp(),
            series,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
