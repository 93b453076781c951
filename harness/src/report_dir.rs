//! Report directory persistence: write/read/verify a [`RunReportV1`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json     -- canonical JSON report bytes
//!   run_digest.txt      -- ASCII digest string (e.g. "sha256:...")
//! ```
//!
//! Reading is fail-closed: a missing file, non-canonical report bytes, or a
//! stored digest that differs from the recomputed one is an error.

use std::path::{Path, PathBuf};

use lodestar_kernel::proof::canon::canonical_json_bytes;
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};

use crate::runner::RunReportV1;

pub const REPORT_FILENAME: &str = "run_report.json";
pub const DIGEST_FILENAME: &str = "run_digest.txt";

/// Error writing or reading a report directory.
#[derive(Debug, thiserror::Error)]
pub enum ReportDirError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing report file: {filename}")]
    MissingFile { filename: String },
    #[error("report is not valid JSON: {detail}")]
    Parse { detail: String },
    #[error("report bytes are not in canonical form")]
    NotCanonical,
    #[error("digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
}

/// A report as loaded from disk, with its digest already verified.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub bytes: Vec<u8>,
    pub digest: ContentHash,
    pub value: serde_json::Value,
}

/// Write `report` into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ReportDirError::Io`] on any filesystem failure.
pub fn write_report_dir(report: &RunReportV1, dir: &Path) -> Result<(), ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportDirError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    write_atomic(&dir.join(REPORT_FILENAME), &report.bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.digest.as_str().as_bytes())?;
    Ok(())
}

/// Read a report directory and verify its digest.
///
/// # Errors
///
/// Returns [`ReportDirError`] if a file is missing, the report is not
/// canonical JSON, or the stored digest does not match.
pub fn read_report_dir(dir: &Path) -> Result<StoredReport, ReportDirError> {
    let bytes = read_required(dir, REPORT_FILENAME)?;
    let stored = read_required(dir, DIGEST_FILENAME)?;
    let stored = String::from_utf8_lossy(&stored).trim().to_string();

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirError::Parse {
            detail: e.to_string(),
        })?;
    let canonical = canonical_json_bytes(&value).map_err(|_| ReportDirError::NotCanonical)?;
    if canonical != bytes {
        return Err(ReportDirError::NotCanonical);
    }

    let digest = canonical_hash(DOMAIN_RUN_REPORT, &bytes);
    if digest.as_str() != stored {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: digest.as_str().to_string(),
        });
    }
    Ok(StoredReport {
        bytes,
        digest,
        value,
    })
}

/// Write bytes via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let io_err = |source| ReportDirError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = path.with_file_name(format!(".tmp_{file_name}"));
    std::fs::write(&temp_path, content).map_err(io_err)?;
    std::fs::rename(&temp_path, path).map_err(io_err)
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirError::MissingFile {
        filename: filename.to_string(),
    })
}
