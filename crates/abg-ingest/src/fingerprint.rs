use std::path::Path;

use sha2::Digest;
use tracing::debug;

use abg_model::{SourceFingerprint, SourceTable};

use crate::csv_table::{CsvTable, parse_csv_bytes};
use crate::error::{IngestError, Result};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Read and parse a source file, recording its digest and row count.
pub fn read_source(path: &Path, table: SourceTable) -> Result<(CsvTable, SourceFingerprint)> {
    let bytes = std::fs::read(path).map_err(|error| IngestError::read(path, error))?;
    let parsed = parse_csv_bytes(&bytes, path)?;
    let fingerprint = SourceFingerprint {
        table,
        path: path.display().to_string(),
        rows: parsed.len(),
        sha256: sha256_hex(&bytes),
    };
    debug!(
        table = %table,
        path = %path.display(),
        rows = fingerprint.rows,
        columns = parsed.headers.len(),
        "source loaded"
    );
    Ok((parsed, fingerprint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
