use std::fs;

use abg_ingest::{IngestError, read_csv_table, read_source, sha256_hex};
use abg_model::SourceTable;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_header_and_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        &dir,
        "isolates.csv",
        b"Specimen,Patient,Organism\n1001,P1,Escherichia coli\n1002,P2, Candida  albicans \n",
    );
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers, vec!["Specimen", "Patient", "Organism"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(1, 2), "Candida  albicans");
}

#[test]
fn skips_blank_lines_and_pads_short_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        &dir,
        "ast.csv",
        b"\n,,\nSpecimen,Antimicrobial,Interpretation\n1001,Ampicillin\n\n1001,Meropenem,S\n",
    );
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0], vec!["1001", "Ampicillin", ""]);
    assert_eq!(table.value(1, 2), "S");
}

#[test]
fn strips_utf8_bom_from_first_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "bom.csv", b"\xEF\xBB\xBFSpecimen,Patient\n1,P1\n");
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.column_index("Specimen"), Some(0));
}

#[test]
fn rejects_utf16_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "utf16.csv", b"\xFF\xFES\x00p\x00");
    let err = read_csv_table(&path).expect_err("utf-16 rejected");
    assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_csv_table(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "empty.csv", b"Specimen,Patient\n");
    let table = read_csv_table(&path).expect("read csv");
    assert!(table.is_empty());
    assert_eq!(table.headers.len(), 2);
}

#[test]
fn source_fingerprint_matches_file_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let contents = b"Specimen,Antimicrobial,Interpretation\n1,Ampicillin,R\n";
    let path = write_file(&dir, "ast.csv", contents);
    let (table, fingerprint) = read_source(&path, SourceTable::Ast).expect("read source");
    assert_eq!(table.len(), 1);
    assert_eq!(fingerprint.rows, 1);
    assert_eq!(fingerprint.table, SourceTable::Ast);
    assert_eq!(fingerprint.sha256, sha256_hex(contents));
}
