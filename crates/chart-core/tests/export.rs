// File: crates/chart-core/tests/export.rs
// Purpose: CSV and JSON row export, dated file names, and record loading.

use chart_core::export::{export_at, export_filename, to_csv, to_parquet_json, DEFAULT_STEM};
use chart_core::{read_records_csv, read_records_json, ChartError, ExportFormat, ExportScope, MortalityRecord};
use chrono::{TimeZone, Utc};

fn sample() -> Vec<MortalityRecord> {
    let mut a = MortalityRecord::new(2020, "Brasil", "Masculino", "0", Some(0.012));
    a.id = Some(7);
    a.life_expectancy = Some(72.5);
    a.extra.insert("fonte".to_string(), serde_json::json!("IBGE, 2020"));
    let b = MortalityRecord::new(2020, "Brasil", "Feminino", "1-4", None);
    vec![a, b]
}

#[test]
fn csv_has_fixed_columns_then_extensions() {
    let text = String::from_utf8(to_csv(&sample()).unwrap()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "id,ano,local,sexo,faixa_etaria,nMx,nqx,nAx,lx,ndx,nLx,Tx,ex,fonte");
    assert_eq!(lines.next().unwrap(), r#"7,2020,Brasil,Masculino,0,0.012,,,,,,,72.5,"IBGE, 2020""#);
    assert_eq!(lines.next().unwrap(), ",2020,Brasil,Feminino,1-4,,,,,,,,,");
    assert!(lines.next().is_none());
}

#[test]
fn json_document_carries_schema_and_metadata() {
    let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
    let doc = to_parquet_json(&sample(), at).unwrap();
    assert_eq!(doc["metadata"]["rowCount"], 2);
    assert_eq!(doc["metadata"]["format"], "parquet-json");
    assert_eq!(doc["metadata"]["createdAt"], "2024-03-09T12:30:00.000Z");
    assert_eq!(doc["data"].as_array().unwrap().len(), 2);

    let schema = doc["schema"].as_array().unwrap();
    assert_eq!(schema[0], serde_json::json!({ "name": "id", "type": "number" }));
    assert_eq!(schema[2], serde_json::json!({ "name": "local", "type": "string" }));
    assert!(schema.contains(&serde_json::json!({ "name": "nqx", "type": "object" })));
    assert_eq!(schema.last().unwrap()["name"], "fonte");
}

#[test]
fn file_names_are_dated() {
    let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
    assert_eq!(
        export_filename(DEFAULT_STEM, ExportFormat::Csv, ExportScope::Filtered, at),
        "dados_mortalidade_2024-03-09.csv"
    );
    assert_eq!(
        export_filename("tabua", ExportFormat::Json, ExportScope::Full, at),
        "tabua_2024-03-09_completo.parquet.json"
    );
}

#[test]
fn export_builds_a_file() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let file = export_at(&sample(), ExportFormat::Json, "tabua", ExportScope::Filtered, at).unwrap();
    assert_eq!(file.filename, "tabua_2024-01-02.parquet.json");
    assert_eq!(file.mime_type, "application/json");
    let back: serde_json::Value = serde_json::from_slice(&file.bytes).unwrap();
    assert_eq!(back["data"][0]["sexo"], "Masculino");
}

#[test]
fn exporting_nothing_is_an_error() {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let err = export_at::<MortalityRecord>(&[], ExportFormat::Csv, "x", ExportScope::Full, at).unwrap_err();
    assert!(matches!(err, ChartError::NothingToExport));
}

#[test]
fn csv_loads_with_header_lookup() {
    let data = "Ano,Local,Sexo,Faixa_Etaria,nMx,ex,fonte\n\
                2020,Brasil,Masculino,0,0.012,72.5,IBGE\n\
                2020,Brasil,Feminino,1-4,,80.1,IBGE\n";
    let rows = read_records_csv(data.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year, 2020);
    assert_eq!(rows[0].rate, Some(0.012));
    assert_eq!(rows[0].life_expectancy, Some(72.5));
    assert_eq!(rows[0].extra["fonte"], "IBGE");
    assert_eq!(rows[1].rate, None);
}

#[test]
fn csv_requires_key_columns() {
    let err = read_records_csv("ano,local,faixa_etaria,nMx\n2020,Brasil,0,0.1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn("sexo")));

    let err = read_records_csv("ano,local,sexo,faixa_etaria\nxx,Brasil,Ambos,0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidValue { column: "ano", row: 1, .. }));
}

#[test]
fn json_loads_array_or_page() {
    let array = r#"[{"ano":2020,"local":"Brasil","sexo":"Ambos","faixa_etaria":"0","nMx":0.01,"extra_col":1}]"#;
    let rows: Vec<MortalityRecord> = read_records_json(array.as_bytes()).unwrap();
    assert_eq!(rows[0].rate, Some(0.01));
    assert_eq!(rows[0].extra["extra_col"], 1);

    let page = r#"{"data":[{"Ano":2019,"Local":"Recife","sexo":"Ambos","faixa_etaria":"5-9","nMx":null}],
                   "total":1,"page":1,"per_page":1000,"pages":1}"#;
    let rows: Vec<MortalityRecord> = read_records_json(page.as_bytes()).unwrap();
    assert_eq!(rows[0].locality, "Recife");
    assert_eq!(rows[0].rate, None);

    assert!(read_records_json::<MortalityRecord, _>("42".as_bytes()).is_err());
}
