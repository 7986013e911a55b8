#![allow(dead_code)]

use abg_ingest::CsvTable;

pub const ISOLATE_HEADERS: [&str; 5] = ["Specimen", "Patient", "Organism", "Sample Type", "Created on"];
pub const AST_HEADERS: [&str; 3] = ["Specimen", "Antimicrobial", "Interpretation"];

pub fn isolates_table(rows: &[[&str; 5]]) -> CsvTable {
    CsvTable::new(ISOLATE_HEADERS, rows.iter().map(|row| row.to_vec()))
}

pub fn ast_table(rows: &[[&str; 3]]) -> CsvTable {
    CsvTable::new(AST_HEADERS, rows.iter().map(|row| row.to_vec()))
}

/// Five Candida albicans isolates from distinct patients: 3 S, 2 R to Fluconazole.
pub fn candida_tables() -> (CsvTable, CsvTable) {
    let isolates = isolates_table(&[
        ["C1", "P1", "Candida albicans", "Blood", "2024-02-01"],
        ["C2", "P2", "Candida albicans", "Blood", "2024-02-02"],
        ["C3", "P3", "Candida albicans", "Blood", "2024-02-03"],
        ["C4", "P4", "Candida albicans", "Blood", "2024-02-04"],
        ["C5", "P5", "Candida albicans", "Blood", "2024-02-05"],
    ]);
    let ast = ast_table(&[
        ["C1", "Fluconazole", "S"],
        ["C2", "Fluconazole", "S"],
        ["C3", "Fluconazole", "S"],
        ["C4", "Fluconazole", "R"],
        ["C5", "Fluconazole", "R"],
    ]);
    (isolates, ast)
}
