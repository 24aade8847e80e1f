// File: crates/chart-core/src/scale.rs
// Summary: Categorical band (X) and continuous value (Y) scales.

use crate::grid::{nice, ticks};
use crate::types::{BAND_PADDING, VALUE_DOMAIN_PADDING};

/// Categorical scale: every label gets a slot of uniform width across `[0, width]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` is applied both between bands and at the two outer edges,
    /// as a fraction of the step; the band block is centred in the range.
    pub fn new(labels: Vec<String>, width: f64, padding: f64) -> Self {
        let n = labels.len() as f64;
        let padding = padding.clamp(0.0, 1.0);
        let width = width.max(0.0);
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        let start = (width - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);
        Self { labels, start, step, bandwidth }
    }

    /// Band scale with the chart's default 0.1 padding.
    pub fn with_default_padding(labels: Vec<String>, width: f64) -> Self {
        Self::new(labels, width, BAND_PADDING)
    }

    pub fn labels(&self) -> &[String] { &self.labels }
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    pub fn step(&self) -> f64 { self.step }

    /// Left edge of the band for `label`, `None` for labels outside the domain.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Centre of the band for `label`.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|x| x + self.bandwidth / 2.0)
    }
}

/// Vertical value scale mapping a data range to [top, bottom] pixels (larger value -> smaller y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Scale over transformed values: observed extent padded by 0.3 on each side,
    /// then niced to round tick boundaries. `None` when no finite value exists.
    pub fn for_values<I>(values: I, inner_height: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        let (vmin, vmax) = nice(lo - VALUE_DOMAIN_PADDING, hi + VALUE_DOMAIN_PADDING, 10);
        Some(Self::new_linear(0.0, inner_height.max(0.0), vmin, vmax))
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        self.bottom_px - (v - self.vmin) / span * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> f64 {
        let height = self.bottom_px - self.top_px;
        if height.abs() < 1e-12 { return self.vmin; }
        self.vmin + (self.bottom_px - py) / height * (self.vmax - self.vmin)
    }

    /// Round tick values inside the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.vmin, self.vmax, count)
    }
}
