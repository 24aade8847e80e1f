// File: crates/chart-core/src/load.rs
// Summary: Record loading from CSV (header lookup) and JSON (plain array or
// paginated `{ "data": [...] }` envelope).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::{DeserializeOwned, Error as _};

use crate::error::{ChartError, Result};
use crate::record::MortalityRecord;

/// Parse life-table rows from CSV. Header names are matched case-insensitively;
/// unknown columns are kept in `extra`. Empty or non-numeric measure cells
/// load as missing, which keeps the row out of the chart but in exports.
pub fn read_records_csv<Rd: Read>(reader: Rd) -> Result<Vec<MortalityRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let raw_headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    let headers: Vec<String> = raw_headers.iter().map(|h| h.to_lowercase()).collect();
    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.iter().any(|want| h.as_str() == *want))
    };

    let i_year = idx(&["ano", "year"]).ok_or(ChartError::MissingColumn("ano"))?;
    let i_local = idx(&["local", "locality"]).ok_or(ChartError::MissingColumn("local"))?;
    let i_group = idx(&["sexo", "group"]).ok_or(ChartError::MissingColumn("sexo"))?;
    let i_age = idx(&["faixa_etaria", "age_band"]).ok_or(ChartError::MissingColumn("faixa_etaria"))?;
    let i_id = idx(&["id"]);
    let measures = [
        idx(&["nmx"]),
        idx(&["nqx"]),
        idx(&["nax"]),
        idx(&["lx"]),
        idx(&["ndx"]),
        idx(&["nlx"]),
        idx(&["tx"]),
        idx(&["ex"]),
    ];
    let known: Vec<usize> = [Some(i_year), Some(i_local), Some(i_group), Some(i_age), i_id]
        .into_iter()
        .chain(measures)
        .flatten()
        .collect();

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let cell = |i: usize| rec.get(i).unwrap_or("");
        let number = |i: Option<usize>| -> Option<f64> { i.and_then(|ix| cell(ix).parse::<f64>().ok()) };

        let year_text = cell(i_year);
        let year = year_text.parse::<i32>().map_err(|_| ChartError::InvalidValue {
            column: "ano",
            row: row + 1,
            value: year_text.to_string(),
        })?;

        let mut record = MortalityRecord::new(year, cell(i_local), cell(i_group), cell(i_age), number(measures[0]));
        record.id = i_id.and_then(|ix| cell(ix).parse::<i64>().ok());
        record.death_probability = number(measures[1]);
        record.person_years_fraction = number(measures[2]);
        record.survivors = number(measures[3]);
        record.deaths = number(measures[4]);
        record.person_years = number(measures[5]);
        record.total_person_years = number(measures[6]);
        record.life_expectancy = number(measures[7]);
        for (i, name) in raw_headers.iter().enumerate() {
            if known.contains(&i) { continue; }
            record.extra.insert(name.clone(), serde_json::Value::String(cell(i).to_string()));
        }
        out.push(record);
    }
    tracing::debug!(rows = out.len(), "loaded csv records");
    Ok(out)
}

/// Parse rows from JSON: either a bare array or an object carrying the rows
/// under `data` (the paginated response shape).
pub fn read_records_json<T: DeserializeOwned, Rd: Read>(reader: Rd) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let rows = match value {
        serde_json::Value::Array(rows) => serde_json::Value::Array(rows),
        serde_json::Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| serde_json::Error::custom("expected an array or an object with a `data` array"))?,
        _ => return Err(serde_json::Error::custom("expected an array of records").into()),
    };
    let out: Vec<T> = serde_json::from_value(rows)?;
    tracing::debug!(rows = out.len(), "loaded json records");
    Ok(out)
}

/// Load life-table rows from a `.json` or `.csv` file (by extension; CSV otherwise).
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<MortalityRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json { read_records_json(reader) } else { read_records_csv(reader) }
}
