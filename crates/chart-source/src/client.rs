// File: crates/chart-source/src/client.rs
// Summary: Blocking HTTP client over the mortality backend endpoints.

use std::collections::BTreeMap;

use chart_core::{ForecastRecord, InfantMortalityRecord, MortalityRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{error_detail, ApiError, Result};
use crate::params::FilterParams;

/// One page of a list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub pages: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub database: String,
    #[serde(default)]
    pub database_file: String,
    #[serde(default)]
    pub tables: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub has_data: bool,
}

/// Forecast families served by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForecastModel {
    ArimaEts,
    LeeCarter,
    LeeMiller,
    Combined,
}

impl ForecastModel {
    pub const ALL: [ForecastModel; 4] =
        [ForecastModel::ArimaEts, ForecastModel::LeeCarter, ForecastModel::LeeMiller, ForecastModel::Combined];

    pub fn endpoint(self) -> &'static str {
        match self {
            ForecastModel::ArimaEts => "previsoes/arima-ets",
            ForecastModel::LeeCarter => "previsoes/lc",
            ForecastModel::LeeMiller => "previsoes/lm",
            ForecastModel::Combined => "previsoes/combinada",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ForecastModel::ArimaEts => "arima-ets",
            ForecastModel::LeeCarter => "lee-carter",
            ForecastModel::LeeMiller => "lee-miller",
            ForecastModel::Combined => "combinada",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "arima-ets" | "arima" | "ets" => Some(ForecastModel::ArimaEts),
            "lee-carter" | "lc" => Some(ForecastModel::LeeCarter),
            "lee-miller" | "lm" => Some(ForecastModel::LeeMiller),
            "combinada" | "combined" => Some(ForecastModel::Combined),
            _ => None,
        }
    }
}

/// Client for one backend. Build it once from an `ApiConfig` and pass it to
/// whatever needs data.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mortality-chart/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig { &self.config }

    /// GET `endpoint` and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: Option<&FilterParams>) -> Result<T> {
        let url = self.config.resolve(endpoint);
        let query = params.map(FilterParams::to_query).unwrap_or_default();
        tracing::debug!(%url, params = query.len(), "fetching");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&query)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let detail = error_detail(status.as_u16(), &body);
            tracing::warn!(%url, status = status.as_u16(), %detail, "request failed");
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn list<T: DeserializeOwned>(&self, endpoint: &str, params: &FilterParams) -> Result<Vec<T>> {
        let page: Paginated<T> = self.get_json(endpoint, Some(&params.with_default_page_size()))?;
        tracing::debug!(endpoint, rows = page.data.len(), total = page.total, "received page");
        Ok(page.data)
    }

    /// Life-table rows matching `params` (one page, sized by `limit` or 1000).
    pub fn life_table(&self, params: &FilterParams) -> Result<Vec<MortalityRecord>> {
        self.list("tabua-mortalidade", params)
    }

    /// Life-table page exactly as requested, with paging metadata.
    pub fn life_table_page(&self, params: &FilterParams) -> Result<Paginated<MortalityRecord>> {
        self.get_json("tabua-mortalidade", Some(params))
    }

    pub fn life_table_years(&self) -> Result<Vec<i32>> {
        self.get_json("tabua-mortalidade/anos", None)
    }

    pub fn life_table_localities(&self) -> Result<Vec<String>> {
        self.get_json("tabua-mortalidade/locais", None)
    }

    pub fn forecasts(&self, model: ForecastModel, params: &FilterParams) -> Result<Vec<ForecastRecord>> {
        self.list(model.endpoint(), params)
    }

    pub fn forecast_years(&self) -> Result<Vec<i32>> {
        self.get_json("previsoes/anos", None)
    }

    pub fn infant_mortality(&self, params: &FilterParams) -> Result<Vec<InfantMortalityRecord>> {
        self.list("mortalidade-infantil", params)
    }

    /// Raw health payload from the API root.
    pub fn health(&self) -> Result<serde_json::Value> {
        self.get_json("/health", None)
    }

    pub fn database_status(&self) -> Result<DatabaseStatus> {
        self.get_json("/database/status", None)
    }
}
