// File: crates/chart-core/src/series.rs
// Summary: Per-group line paths over the band/value scales, plus the stroke
// reveal animation timing.

use std::fmt::Write as _;

use crate::geometry::polyline_length;
use crate::normalize::{SeriesData, SeriesSet};
use crate::scale::{BandScale, ValueScale};
use crate::svg::{num, SvgWriter};
use crate::theme::Color;
use crate::types::{REVEAL_DURATION_MS, REVEAL_STAGGER_MS};

pub const STROKE_WIDTH: f64 = 2.5;

/// Stroke reveal: the dash offset runs linearly from `length` to 0 over
/// `duration_ms`, starting after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub length: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl Reveal {
    /// Timing for the series at `index` (delays stagger by index).
    pub fn for_series(length: f64, index: usize) -> Self {
        Self { length, duration_ms: REVEAL_DURATION_MS, delay_ms: REVEAL_STAGGER_MS * index as f64 }
    }

    /// Dash offset `t_ms` after the render started.
    pub fn offset_at(&self, t_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 { return 0.0; }
        let progress = ((t_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.length * (1.0 - progress)
    }

    pub fn is_done(&self, t_ms: f64) -> bool { t_ms >= self.delay_ms + self.duration_ms }

    pub fn dasharray(&self) -> String { format!("{} {}", num(self.length), num(self.length)) }
}

/// One series placed on the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPath {
    pub group: String,
    pub index: usize,
    pub color: Color,
    /// Placed vertices in drawing order.
    pub points: Vec<(f64, f64)>,
    /// SVG path data, `M x,y L x,y ...`.
    pub d: String,
    pub reveal: Reveal,
}

/// Path data through the placeable points. `None` entries are skipped and
/// the line continues from the previous placed point.
pub fn path_data<I>(points: I) -> (Vec<(f64, f64)>, String)
where
    I: IntoIterator<Item = Option<(f64, f64)>>,
{
    let placed: Vec<(f64, f64)> = points.into_iter().flatten().collect();
    let mut d = String::with_capacity(placed.len() * 16);
    for (i, &(x, y)) in placed.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 { d.push(' '); }
        let _ = write!(d, "{cmd}{},{}", num(x), num(y));
    }
    (placed, d)
}

impl SeriesPath {
    /// `None` when no point of the series can be placed.
    pub fn layout(series: &SeriesData, x: &BandScale, y: &ValueScale) -> Option<Self> {
        let (points, d) = path_data(series.points.iter().map(|p| {
            let px = x.center(&p.label)?;
            p.value.is_finite().then(|| (px, y.to_px(p.value)))
        }));
        if points.is_empty() { return None; }
        let reveal = Reveal::for_series(polyline_length(&points), series.index);
        Some(Self { group: series.group.clone(), index: series.index, color: series.color, points, d, reveal })
    }

    /// CSS class naming the group, e.g. `linha-masculino`.
    pub fn class_name(&self) -> String {
        let slug: String = self
            .group
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        format!("linha-{slug}")
    }

    pub fn write_svg(&self, w: &mut SvgWriter, animate: bool) -> std::fmt::Result {
        let mut attrs = vec![
            ("class", self.class_name()),
            ("d", self.d.clone()),
            ("fill", "none".to_string()),
            ("stroke", self.color.to_string()),
            ("stroke-width", num(STROKE_WIDTH)),
        ];
        if !animate {
            return w.leaf("path", &attrs);
        }
        attrs.push(("stroke-dasharray", self.reveal.dasharray()));
        attrs.push(("stroke-dashoffset", num(self.reveal.length)));
        w.open("path", &attrs)?;
        w.leaf(
            "animate",
            &[
                ("attributeName", "stroke-dashoffset".to_string()),
                ("from", num(self.reveal.length)),
                ("to", "0".to_string()),
                ("begin", format!("{}ms", num(self.reveal.delay_ms))),
                ("dur", format!("{}ms", num(self.reveal.duration_ms))),
                ("calcMode", "linear".to_string()),
                ("fill", "freeze".to_string()),
            ],
        )?;
        w.close("path")
    }
}

/// Paths for every series that has at least one placeable point, in index order.
pub fn layout_all(set: &SeriesSet, x: &BandScale, y: &ValueScale) -> Vec<SeriesPath> {
    set.series.iter().filter_map(|s| SeriesPath::layout(s, x, y)).collect()
}
