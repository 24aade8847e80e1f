// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, breakpoint, margins, animation timing).

/// Width used before the host container has been measured.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Height used before the host container has been measured.
pub const DEFAULT_HEIGHT: f64 = 450.0;

/// Containers narrower than this use the mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 640.0;

/// Stroke reveal duration per series, in milliseconds.
pub const REVEAL_DURATION_MS: f64 = 1500.0;
/// Delay between consecutive series reveals, in milliseconds.
pub const REVEAL_STAGGER_MS: f64 = 300.0;

/// Extra room (log units) added below the minimum and above the maximum value.
pub const VALUE_DOMAIN_PADDING: f64 = 0.3;
/// Fraction of a band step left empty between and around bands.
pub const BAND_PADDING: f64 = 0.1;

/// Plot margins around the inner drawing area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Room on the right for the vertical legend.
    pub const fn desktop() -> Self { Self::new(40.0, 130.0, 80.0, 70.0) }
    /// Room at the bottom for steep labels and the horizontal legend.
    pub const fn mobile() -> Self { Self::new(30.0, 20.0, 100.0, 50.0) }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Margins {
    fn default() -> Self { Self::desktop() }
}

/// Every piece of visible text the chart writes. Defaults are the Portuguese
/// captions of the life-table dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLabels {
    /// Chart title on wide layouts.
    pub title: String,
    /// Chart title on narrow layouts.
    pub title_short: String,
    /// X title when categories are age bands.
    pub x_title_age_band: String,
    /// X title when categories are years.
    pub x_title_year: String,
    /// Quantity wrapped by the transform in the Y title, e.g. `log₁₀(nMx)`.
    pub quantity: String,
    /// Header above the vertical legend.
    pub legend_title: String,
    pub placeholder: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Taxa Central de Mortalidade por Faixa Etária (escala logarítmica)".to_string(),
            title_short: "Taxa de Mortalidade (log)".to_string(),
            x_title_age_band: "Faixa Etária".to_string(),
            x_title_year: "Ano".to_string(),
            quantity: "nMx".to_string(),
            legend_title: "Sexo".to_string(),
            placeholder: "Nenhum dado disponível para visualização".to_string(),
        }
    }
}
