//! Logical-attribute layout: the repeating header group and where it occurs.

use serde::Serialize;

use tdedup_model::{LogicalAttribute, Record, TimestampGranularity};

use crate::timestamp;

/// The repeating header group and the column indices where each instance starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogicalLayout {
    /// Header names of one instance, in order.
    pub template: Vec<String>,
    /// Absolute column index of each instance, ascending.
    pub starts: Vec<usize>,
}

impl LogicalLayout {
    /// Infer the layout from the header row.
    pub fn infer(headers: &[String]) -> Self {
        let template = longest_repeated_temporal_span(headers);
        let starts = find_instances(headers, &template);
        Self { template, starts }
    }

    /// Number of columns in one instance.
    pub fn width(&self) -> usize {
        self.template.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// True when `column` belongs to some logical-attribute instance.
    pub fn covers(&self, column: usize) -> bool {
        let width = self.width();
        self.starts
            .iter()
            .any(|&start| column >= start && column < start + width)
    }

    /// Columns that belong to no logical attribute.
    pub fn scalar_columns(&self, column_count: usize) -> Vec<usize> {
        (0..column_count).filter(|&c| !self.covers(c)).collect()
    }

    /// Build a record from one data row.
    ///
    /// Every field is kept as a raw value. Each instance that starts within
    /// the row becomes a logical attribute; fields past the end of a short
    /// row read as blank.
    pub fn build_record(&self, id: usize, headers: &[String], row: &[String]) -> Record {
        let mut record = Record::new(id);
        for value in row {
            record.push_value(value.as_str());
        }

        for (relative, &start) in self
            .starts
            .iter()
            .take_while(|&&start| start < row.len())
            .enumerate()
        {
            let mut attribute = LogicalAttribute::new(relative);
            for column in start..start + self.width() {
                let value = row.get(column).map_or("", String::as_str);
                attribute.push_value(value);
                let granularity = headers
                    .get(column)
                    .and_then(|header| TimestampGranularity::from_header(header));
                if let Some(granularity) = granularity {
                    attribute.offer_timestamp(
                        timestamp::resolve(value, granularity),
                        granularity,
                        column,
                    );
                }
            }
            record.push_logical_attribute(attribute);
        }

        record.finish_read();
        record
    }
}

/// True when a header names a date, time, or timestamp.
pub fn is_temporal_header(header: &str) -> bool {
    TimestampGranularity::from_header(header).is_some()
}

/// Longest header span that occurs again, without overlap, elsewhere in the
/// header row and names at least one temporal column.
///
/// Ties go to the span that starts first. Empty when no such span exists.
pub fn longest_repeated_temporal_span(headers: &[String]) -> Vec<String> {
    let n = headers.len();
    // temporal_before[k]: temporal headers among headers[..k]
    let mut temporal_before = vec![0usize; n + 1];
    for (k, header) in headers.iter().enumerate() {
        temporal_before[k + 1] = temporal_before[k] + usize::from(is_temporal_header(header));
    }

    // suffix[i][j]: length of the common run ending at headers[i-1] and
    // headers[j-1], capped so the two runs never overlap
    let mut suffix = vec![vec![0usize; n + 1]; n + 1];
    let mut best: Option<(usize, usize)> = None;

    for i in 1..=n {
        for j in (i + 1)..=n {
            if headers[i - 1] != headers[j - 1] {
                continue;
            }
            let run = (suffix[i - 1][j - 1] + 1).min(j - i);
            suffix[i][j] = run;

            let start = i - run;
            if temporal_before[i] == temporal_before[start] {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_start, best_len)) => {
                    run > best_len || (run == best_len && start < best_start)
                }
            };
            if better {
                best = Some((start, run));
            }
        }
    }

    best.map(|(start, len)| headers[start..start + len].to_vec())
        .unwrap_or_default()
}

/// Left-to-right scan for instances of `template`; the scan resumes after
/// each instance found.
fn find_instances(headers: &[String], template: &[String]) -> Vec<usize> {
    let width = template.len();
    let mut starts = Vec::new();
    if width == 0 {
        return starts;
    }
    let mut column = 0;
    while column + width <= headers.len() {
        if headers[column..column + width] == *template {
            starts.push(column);
            column += width;
        } else {
            column += 1;
        }
    }
    starts
}
