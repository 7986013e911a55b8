use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use abg_ingest::table_from_frame;

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

#[test]
fn converts_string_frame() {
    let df = test_df(vec![
        ("Specimen", vec!["1001", "1002"]),
        ("Organism", vec!["Escherichia coli", " Klebsiella pneumoniae "]),
    ]);
    let table = table_from_frame(&df).expect("convert frame");
    assert_eq!(table.headers, vec!["Specimen", "Organism"]);
    assert_eq!(table.value(1, 1), "Klebsiella pneumoniae");
}

#[test]
fn float_accessions_render_without_fraction() {
    let specimen = Series::new("Specimen".into(), vec![Some(1001.0f64), None]).into_column();
    let df = DataFrame::new(vec![specimen]).unwrap();
    let table = table_from_frame(&df).expect("convert frame");
    assert_eq!(table.value(0, 0), "1001");
    assert_eq!(table.value(1, 0), "");
}
