// Batch CSV pipeline: read rows, classify the activity column, write the
// same rows back with result columns appended.
//
// Input order is preserved row for row, and the original columns pass
// through untouched. The local path appends `isic_code` and `match_score`
// (two-decimal string); the remote path appends only `isic_code` since no
// confidence is modeled there. The activity column is checked against the
// header before any row is processed, so a bad column name fails fast
// instead of mid-batch.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::Error;
use crate::matcher::Matcher;
use crate::reference::ReferenceList;
use crate::remote::RemoteClassifier;

/// Conventional name of the activity-description column in survey exports.
pub const DEFAULT_ACTIVITY_COLUMN: &str = "d1a1x";

pub const CODE_COLUMN: &str = "isic_code";
pub const SCORE_COLUMN: &str = "match_score";

struct BatchFile {
    reader: csv::Reader<File>,
    writer: csv::Writer<File>,
    activity_idx: usize,
}

/// Open input and output, validate the header, and write the output header
/// with the given result columns appended.
fn open_batch(
    input: &Path,
    output: &Path,
    column: &str,
    result_columns: &[&str],
) -> Result<BatchFile, Error> {
    let input_file = File::open(input).map_err(|source| Error::FileAccess {
        path: input.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new().from_reader(input_file);

    let header = reader.headers()?.clone();
    let activity_idx = header
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })?;

    let output_file = File::create(output).map_err(|source| Error::FileAccess {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = WriterBuilder::new().from_writer(output_file);

    let mut out_header = header.clone();
    for name in result_columns {
        out_header.push_field(name);
    }
    writer.write_record(&out_header)?;

    Ok(BatchFile {
        reader,
        writer,
        activity_idx,
    })
}

/// Classify every row of `input` with the local matcher and write the
/// results to `output`. Returns the number of rows processed.
pub fn classify_file(
    input: &Path,
    output: &Path,
    column: &str,
    matcher: &Matcher<'_>,
) -> Result<usize, Error> {
    let mut batch = open_batch(input, output, column, &[CODE_COLUMN, SCORE_COLUMN])?;

    let mut rows = 0;
    for record in batch.reader.records() {
        let record = record?;
        let activity = record.get(batch.activity_idx).unwrap_or("");
        let result = matcher.classify(activity);

        let mut out = record.clone();
        out.push_field(result.code.as_deref().unwrap_or(""));
        out.push_field(&format!("{:.2}", result.score));
        batch.writer.write_record(&out)?;
        rows += 1;
    }
    batch.writer.flush().map_err(|source| Error::FileAccess {
        path: output.to_path_buf(),
        source,
    })?;

    info!(rows, input = %input.display(), "Batch classification complete");
    Ok(rows)
}

/// Classify every row of `input` via the remote classifier.
///
/// Rows are sent one at a time, at most once each, in file order. Any
/// remote failure aborts the batch with the row's error — a row is never
/// silently filled in with a local score instead.
pub async fn classify_file_remote(
    input: &Path,
    output: &Path,
    column: &str,
    remote: &dyn RemoteClassifier,
    references: &ReferenceList,
) -> Result<usize, Error> {
    let mut batch = open_batch(input, output, column, &[CODE_COLUMN])?;

    // Buffer the rows first so the progress bar has a length to show.
    let mut records = Vec::new();
    for record in batch.reader.records() {
        records.push(record?);
    }

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Classifying [{bar:30}] {pos}/{len} ({eta})")
            .expect("static template parses"),
    );

    let mut rows = 0;
    for record in &records {
        let activity = record.get(batch.activity_idx).unwrap_or("");
        let code = remote.pick_code(activity, references).await?;

        let mut out = record.clone();
        out.push_field(&code);
        batch.writer.write_record(&out)?;
        rows += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    batch.writer.flush().map_err(|source| Error::FileAccess {
        path: output.to_path_buf(),
        source,
    })?;

    info!(rows, input = %input.display(), "Remote batch classification complete");
    Ok(rows)
}
