use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::trace;

use crate::core::StageCounts;
use crate::error::{FunnelError, FunnelResult};

use super::parse_count;

const STAGE_COLUMN: &str = "stage";
const COUNT_COLUMN: &str = "count";

/// Parses a `stage,count` table into ordered stage counts.
///
/// Header names are matched case-insensitively and may appear in any column
/// order. Rows with an empty stage or count are dropped, rows whose count is
/// not a finite number are skipped, and a repeated stage name keeps its first
/// position with the last value.
pub fn parse_stage_count_csv(input: &str) -> FunnelResult<StageCounts> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FunnelError::Format(format!("failed to read csv header: {e}")))?
        .clone();
    let stage_index = find_column(&headers, STAGE_COLUMN)?;
    let count_index = find_column(&headers, COUNT_COLUMN)?;

    let mut counts = StageCounts::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| FunnelError::Format(format!("failed to read csv row: {e}")))?;
        let stage = record.get(stage_index).unwrap_or_default();
        let raw_count = record.get(count_index).unwrap_or_default();
        if stage.is_empty() || raw_count.is_empty() {
            trace!(row, "dropping csv row with missing stage or count");
            continue;
        }
        let Some(count) = parse_count(raw_count) else {
            trace!(row, raw_count, "skipping csv row with non-numeric count");
            continue;
        };
        counts.insert(stage.to_owned(), count);
    }

    if counts.is_empty() {
        return Err(FunnelError::Format(
            "csv contains no usable stage rows".to_owned(),
        ));
    }
    Ok(counts)
}

fn find_column(headers: &StringRecord, name: &str) -> FunnelResult<usize> {
    headers
        .iter()
        .position(|header| {
            header
                .trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(name)
        })
        .ok_or_else(|| FunnelError::Format(format!("missing `{name}` column")))
}
