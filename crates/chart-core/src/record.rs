// File: crates/chart-core/src/record.rs
// Summary: Row types as delivered by the backend, the Observation view used by the
// normalizer, the active filter Selection, and selector facets.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::age::sort_labels;

/// Unknown columns carried along untouched.
pub type Extension = BTreeMap<String, serde_json::Value>;

#[derive(Deserialize)]
#[serde(untagged)]
enum TextCell {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Text column that may also arrive as a number (integer age bands) or as null
/// (missing foreign key). Null reads as empty text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<TextCell>::deserialize(deserializer)? {
        None => String::new(),
        Some(TextCell::Text(s)) => s,
        Some(TextCell::Int(n)) => n.to_string(),
        Some(TextCell::Float(f)) => f.to_string(),
    })
}

/// One life-table observation for a (year, locality, group, age band) tuple.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MortalityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "ano", alias = "Ano")]
    pub year: i32,
    #[serde(rename = "local", alias = "Local", default, deserialize_with = "lenient_text")]
    pub locality: String,
    #[serde(rename = "sexo", default, deserialize_with = "lenient_text")]
    pub group: String,
    #[serde(rename = "faixa_etaria", default, deserialize_with = "lenient_text")]
    pub age_band: String,
    /// Central mortality rate (nMx).
    #[serde(rename = "nMx", default)]
    pub rate: Option<f64>,
    #[serde(rename = "nqx", default)]
    pub death_probability: Option<f64>,
    #[serde(rename = "nAx", default)]
    pub person_years_fraction: Option<f64>,
    #[serde(rename = "lx", default)]
    pub survivors: Option<f64>,
    #[serde(rename = "ndx", default)]
    pub deaths: Option<f64>,
    #[serde(rename = "nLx", default)]
    pub person_years: Option<f64>,
    #[serde(rename = "Tx", default)]
    pub total_person_years: Option<f64>,
    #[serde(rename = "ex", default)]
    pub life_expectancy: Option<f64>,
    #[serde(flatten)]
    pub extra: Extension,
}

impl MortalityRecord {
    pub fn new(
        year: i32,
        locality: impl Into<String>,
        group: impl Into<String>,
        age_band: impl Into<String>,
        rate: Option<f64>,
    ) -> Self {
        Self {
            year,
            locality: locality.into(),
            group: group.into(),
            age_band: age_band.into(),
            rate,
            ..Self::default()
        }
    }
}

/// Forecast row. The backend names the estimate and its bounds differently per
/// model (ARIMA/ETS, Lee-Carter, Lee-Miller, combined); the aliases fold them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "faixa_etaria", default, deserialize_with = "lenient_text")]
    pub age_band: String,
    /// Forecast tables carry no locality; empty then.
    #[serde(rename = "local", default, deserialize_with = "lenient_text")]
    pub locality: String,
    #[serde(rename = "sexo", default, deserialize_with = "lenient_text")]
    pub group: String,
    #[serde(rename = "previsao", alias = "previsto", alias = "Previsao", alias = "nMx", default)]
    pub value: Option<f64>,
    #[serde(
        rename = "lower_95",
        alias = "lmt_inf",
        alias = "Lower_95",
        alias = "limite_inferior",
        default
    )]
    pub lower: Option<f64>,
    #[serde(
        rename = "upper_95",
        alias = "lmt_max",
        alias = "Upper_95",
        alias = "limite_superior",
        default
    )]
    pub upper: Option<f64>,
    #[serde(flatten)]
    pub extra: Extension,
}

/// Infant mortality by locality and year. Not chartable by age band.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InfantMortalityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "Taxa", alias = "taxa", default)]
    pub rate: Option<f64>,
    #[serde(rename = "local", default, deserialize_with = "lenient_text")]
    pub locality: String,
    #[serde(rename = "cod_IBGE", default, skip_serializing_if = "Option::is_none")]
    pub ibge_code: Option<String>,
    #[serde(rename = "codigo_DataSUS", default, skip_serializing_if = "Option::is_none")]
    pub datasus_code: Option<String>,
    #[serde(flatten)]
    pub extra: Extension,
}

/// The fields the normalizer needs from a row.
pub trait Observation {
    fn year(&self) -> i32;
    fn locality(&self) -> &str;
    fn group(&self) -> &str;
    fn age_band(&self) -> &str;
    fn rate(&self) -> Option<f64>;

    /// Chart-eligible: rate present, finite and strictly positive.
    fn chartable_rate(&self) -> Option<f64> {
        self.rate().filter(|r| r.is_finite() && *r > 0.0)
    }
}

impl Observation for MortalityRecord {
    fn year(&self) -> i32 { self.year }
    fn locality(&self) -> &str { &self.locality }
    fn group(&self) -> &str { &self.group }
    fn age_band(&self) -> &str { &self.age_band }
    fn rate(&self) -> Option<f64> { self.rate }
}

impl Observation for ForecastRecord {
    fn year(&self) -> i32 { self.year }
    fn locality(&self) -> &str { &self.locality }
    fn group(&self) -> &str { &self.group }
    fn age_band(&self) -> &str { &self.age_band }
    fn rate(&self) -> Option<f64> { self.value }
}

/// Active filter. `None` leaves that field unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub locality: Option<String>,
    pub year: Option<i32>,
    pub age_band: Option<String>,
}

impl Selection {
    /// Selection for the age-band chart: one locality in one year.
    pub fn locality_year(locality: impl Into<String>, year: i32) -> Self {
        Self { locality: Some(locality.into()), year: Some(year), age_band: None }
    }

    /// Selection for the over-time chart: one locality and one age band.
    pub fn locality_age_band(locality: impl Into<String>, age_band: impl Into<String>) -> Self {
        Self { locality: Some(locality.into()), year: None, age_band: Some(age_band.into()) }
    }

    pub fn matches<O: Observation + ?Sized>(&self, row: &O) -> bool {
        self.locality.as_deref().map_or(true, |l| row.locality() == l)
            && self.year.map_or(true, |y| row.year() == y)
            && self.age_band.as_deref().map_or(true, |a| row.age_band() == a)
    }
}

/// Distinct values offered by the filter selectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Facets {
    /// Alphabetical.
    pub localities: Vec<String>,
    /// Most recent first.
    pub years: Vec<i32>,
    /// By age key.
    pub age_bands: Vec<String>,
}

impl Facets {
    pub fn collect<O: Observation>(rows: &[O]) -> Self {
        let localities: BTreeSet<&str> = rows.iter().map(|r| r.locality()).collect();
        let years: BTreeSet<i32> = rows.iter().map(|r| r.year()).collect();

        let mut seen = BTreeSet::new();
        let mut age_bands: Vec<String> = rows
            .iter()
            .map(|r| r.age_band())
            .filter(|a| seen.insert(*a))
            .map(str::to_owned)
            .collect();
        sort_labels(&mut age_bands);

        Self {
            localities: localities.into_iter().map(str::to_owned).collect(),
            years: years.into_iter().rev().collect(),
            age_bands,
        }
    }
}
