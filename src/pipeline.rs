//! File boundary: load an activity log, analyze it, store the results.

use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::activity::ActivityLog;
use crate::analyzer::{AnalysisReport, Analyzer, UserResult};
use crate::error::FileOperationError;
use crate::scoring::{ScoringConfig, StandardScorer};

const OUTPUT_INDENT: &[u8] = b"    ";

/// Load an activity log from a JSON file.
///
/// The file must hold one object mapping user ids to lists of entries.
pub fn read_activity_log(path: &Path) -> Result<ActivityLog, FileOperationError> {
    let bytes = fs::read(path).map_err(|source| FileOperationError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| FileOperationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write results as an indented JSON array.
///
/// Goes through a temporary file that is renamed into place on commit, so a
/// failed write leaves any previous file untouched.
pub fn write_results(path: &Path, results: &[UserResult]) -> Result<(), FileOperationError> {
    let write_err = |source: std::io::Error| FileOperationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = AtomicWriteFile::open(path).map_err(write_err)?;

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut file, PrettyFormatter::with_indent(OUTPUT_INDENT));
    results
        .serialize(&mut serializer)
        .map_err(|e| write_err(e.into()))?;
    file.flush().map_err(write_err)?;

    file.commit().map_err(write_err)
}

/// Read `input_path`, score it with the standard scorer and write the top
/// entries per user to `output_path`.
///
/// Nothing is written when the input cannot be read or parsed.
pub fn process_engagement_data(
    input_path: &Path,
    output_path: &Path,
    config: &ScoringConfig,
) -> Result<AnalysisReport, FileOperationError> {
    let log = read_activity_log(input_path)?;
    tracing::debug!(
        users = log.len(),
        entries = log.entry_count(),
        path = %input_path.display(),
        "loaded activity log"
    );

    let analyzer = Analyzer::new(StandardScorer::new(*config));
    let report = analyzer.analyze(&log);

    write_results(output_path, &report.results)?;
    tracing::info!(
        users = report.results.len(),
        skipped = report.skipped.len(),
        path = %output_path.display(),
        "Successfully processed engagement data and wrote results"
    );

    Ok(report)
}
