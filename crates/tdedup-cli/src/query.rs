//! Interactive console for comparing two records field by field.

use std::io::{BufRead, Write};

use anyhow::Result;

use tdedup_model::{DedupError, Record};
use tdedup_report::diff_records;

/// Read record-id pairs from `input` and print their differing columns.
///
/// Ids are whitespace separated and may span lines. `END` or `QUIT` (any
/// case) stops the console, as does end of input. An unparsable or
/// out-of-range id ends the console with an error.
pub fn run_query<R: BufRead, W: Write>(records: &[Record], input: R, output: &mut W) -> Result<()> {
    writeln!(output, "************************************************")?;
    writeln!(
        output,
        "Enter two record IDs separated by a space to query their differences. Type END or QUIT to exit."
    )?;
    if !records.is_empty() {
        writeln!(
            output,
            "Valid record IDs are in the range of 0-{}",
            records.len() - 1
        )?;
    }
    output.flush()?;

    let mut pending: Option<String> = None;
    for line in input.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            if token.eq_ignore_ascii_case("END") || token.eq_ignore_ascii_case("QUIT") {
                return Ok(());
            }
            let Some(first) = pending.take() else {
                pending = Some(token.to_string());
                continue;
            };
            let left = lookup(records, &first)?;
            let right = lookup(records, token)?;
            let diffs = diff_records(left, right);
            if diffs.is_empty() {
                writeln!(output, "Records {} and {} are identical", left.id(), right.id())?;
            }
            for diff in diffs {
                writeln!(output, "{diff}")?;
            }
            output.flush()?;
        }
    }
    Ok(())
}

fn lookup<'a>(records: &'a [Record], token: &str) -> std::result::Result<&'a Record, DedupError> {
    let id: usize = token
        .parse()
        .map_err(|_| DedupError::Message(format!("'{token}' is not a record ID")))?;
    records.get(id).ok_or(DedupError::RecordOutOfRange {
        id,
        count: records.len(),
    })
}
