// File: crates/chart-source/src/params.rs
// Summary: Query filters shared by the list endpoints.

/// Optional filters; unset or empty values are left out of the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub ano_inicio: Option<i32>,
    pub ano_fim: Option<i32>,
    pub local: Option<String>,
    pub sexo: Option<String>,
    pub faixa_etaria: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl FilterParams {
    /// A single year (`ano_inicio == ano_fim`).
    pub fn year(year: i32) -> Self {
        Self { ano_inicio: Some(year), ano_fim: Some(year), ..Self::default() }
    }

    pub fn years(from: i32, to: i32) -> Self {
        Self { ano_inicio: Some(from), ano_fim: Some(to), ..Self::default() }
    }

    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }

    pub fn with_sexo(mut self, sexo: impl Into<String>) -> Self {
        self.sexo = Some(sexo.into());
        self
    }

    pub fn with_faixa_etaria(mut self, faixa: impl Into<String>) -> Self {
        self.faixa_etaria = Some(faixa.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Copy with `per_page` set to `limit`, or 1000 when no limit was given.
    pub fn with_default_page_size(&self) -> Self {
        let mut p = self.clone();
        p.per_page = Some(self.limit.filter(|l| *l > 0).unwrap_or(1000));
        p
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) { q.push((key, v)); }
        };
        push("ano_inicio", self.ano_inicio.map(|v| v.to_string()));
        push("ano_fim", self.ano_fim.map(|v| v.to_string()));
        push("local", self.local.clone());
        push("sexo", self.sexo.clone());
        push("faixa_etaria", self.faixa_etaria.clone());
        push("skip", self.skip.map(|v| v.to_string()));
        push("limit", self.limit.map(|v| v.to_string()));
        push("page", self.page.map(|v| v.to_string()));
        push("per_page", self.per_page.map(|v| v.to_string()));
        q
    }
}
