// File: crates/chart-core/src/export.rs
// Summary: Tabular row export to CSV and to the JSON "parquet-like" document,
// plus dated download file names.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{ChartError, Result};
use crate::record::{Extension, ForecastRecord, InfantMortalityRecord, MortalityRecord};

/// File name stem used when the caller has none.
pub const DEFAULT_STEM: &str = "dados_mortalidade";

/// A row type with a fixed column order followed by free-form extension columns.
pub trait Tabular: Serialize {
    /// Wire names of the fixed fields, in output order.
    const COLUMNS: &'static [&'static str];
    fn extension(&self) -> &Extension;
}

impl Tabular for MortalityRecord {
    const COLUMNS: &'static [&'static str] =
        &["id", "ano", "local", "sexo", "faixa_etaria", "nMx", "nqx", "nAx", "lx", "ndx", "nLx", "Tx", "ex"];
    fn extension(&self) -> &Extension { &self.extra }
}

impl Tabular for ForecastRecord {
    const COLUMNS: &'static [&'static str] =
        &["id", "ano", "faixa_etaria", "local", "sexo", "previsao", "lower_95", "upper_95"];
    fn extension(&self) -> &Extension { &self.extra }
}

impl Tabular for InfantMortalityRecord {
    const COLUMNS: &'static [&'static str] = &["id", "ano", "Taxa", "local", "cod_IBGE", "codigo_DataSUS"];
    fn extension(&self) -> &Extension { &self.extra }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// JSON document with schema and metadata, standing in for Parquet.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "parquet.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Which rows the caller handed over: the current filtered view, or the full table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportScope {
    #[default]
    Filtered,
    Full,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `{stem}_{YYYY-MM-DD}[_completo].{ext}`, dated in UTC.
pub fn export_filename(stem: &str, format: ExportFormat, scope: ExportScope, now: DateTime<Utc>) -> String {
    let suffix = if scope == ExportScope::Full { "_completo" } else { "" };
    format!("{stem}_{}{suffix}.{}", now.format("%Y-%m-%d"), format.extension())
}

fn row_object<T: Tabular>(row: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(row)? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// CSV with the fixed columns first, then every extension key seen in any
/// row (sorted). Missing cells are empty.
pub fn to_csv<T: Tabular>(rows: &[T]) -> Result<Vec<u8>> {
    let extra: BTreeSet<&str> = rows.iter().flat_map(|r| r.extension().keys().map(String::as_str)).collect();
    let header: Vec<&str> = T::COLUMNS.iter().copied().chain(extra).collect();

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&header)?;
    for row in rows {
        let obj = row_object(row)?;
        wtr.write_record(header.iter().map(|h| cell_text(obj.get(*h))))?;
    }
    wtr.into_inner().map_err(|e| ChartError::Io(e.into_error()))
}

/// JavaScript-style `typeof` name for a JSON value.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

/// `{ schema, data, metadata }` document; the schema describes the first row.
pub fn to_parquet_json<T: Tabular>(rows: &[T], created_at: DateTime<Utc>) -> Result<Value> {
    let data: Vec<Map<String, Value>> = rows.iter().map(row_object).collect::<Result<_>>()?;
    let schema: Vec<Value> = match (rows.first(), data.first()) {
        (Some(first), Some(obj)) => T::COLUMNS
            .iter()
            .copied()
            .chain(first.extension().keys().map(String::as_str))
            .filter_map(|name| obj.get(name).map(|v| json!({ "name": name, "type": type_name(v) })))
            .collect(),
        _ => Vec::new(),
    };
    Ok(json!({
        "schema": schema,
        "data": data,
        "metadata": {
            "rowCount": rows.len(),
            "createdAt": created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "format": "parquet-json",
        },
    }))
}

/// Export with an explicit clock.
pub fn export_at<T: Tabular>(
    rows: &[T],
    format: ExportFormat,
    stem: &str,
    scope: ExportScope,
    now: DateTime<Utc>,
) -> Result<ExportFile> {
    if rows.is_empty() { return Err(ChartError::NothingToExport); }
    let bytes = match format {
        ExportFormat::Csv => to_csv(rows)?,
        ExportFormat::Json => serde_json::to_vec_pretty(&to_parquet_json(rows, now)?)?,
    };
    let filename = export_filename(stem, format, scope, now);
    tracing::info!(rows = rows.len(), file = %filename, "exported rows");
    Ok(ExportFile { filename, mime_type: format.mime_type(), bytes })
}

/// Export `rows` stamped with the current time. Zero rows is an error.
pub fn export<T: Tabular>(rows: &[T], format: ExportFormat, stem: &str, scope: ExportScope) -> Result<ExportFile> {
    export_at(rows, format, stem, scope, Utc::now())
}
