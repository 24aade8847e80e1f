// File: crates/chart-core/src/legend.rs
// Summary: Legend placement (vertical at the right on desktop, horizontal row
// under the plot on mobile) and its SVG output.

use crate::layout::Viewport;
use crate::series::{SeriesPath, STROKE_WIDTH};
use crate::svg::{num, SvgWriter};
use crate::theme::{Color, Theme};

const SAMPLE_WIDTH: f64 = 20.0;
const DOT_RADIUS: f64 = 3.0;
const ROW_HEIGHT: f64 = 25.0;
const COLUMN_WIDTH: f64 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub group: String,
    pub color: Color,
    /// Entry anchor relative to the legend origin.
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    /// Translation of the legend group in surface coordinates.
    pub origin: (f64, f64),
    /// Shown on desktop only.
    pub header: Option<String>,
    pub entries: Vec<LegendEntry>,
    pub font_px: f64,
}

impl LegendLayout {
    /// Entries for the rendered series only. Each entry takes the slot of its
    /// series index, the same index that staggers the reveal.
    pub fn compute(viewport: &Viewport, series: &[SeriesPath], header: &str) -> Self {
        let m = viewport.margins;
        let mobile = viewport.is_mobile;
        let mut ordered: Vec<&SeriesPath> = series.iter().collect();
        ordered.sort_by_key(|s| s.index);
        let entries = ordered
            .into_iter()
            .map(|s| {
                let i = s.index;
                let (x, y) = if mobile {
                    (i as f64 * COLUMN_WIDTH, 0.0)
                } else {
                    (0.0, i as f64 * ROW_HEIGHT + 15.0)
                };
                LegendEntry { group: s.group.clone(), color: s.color, x, y }
            })
            .collect();
        if mobile {
            Self { origin: (m.left, viewport.height - 15.0), header: None, entries, font_px: 10.0 }
        } else {
            Self {
                origin: (viewport.width - m.right + 10.0, m.top + 20.0),
                header: Some(header.to_string()),
                entries,
                font_px: 12.0,
            }
        }
    }

    pub fn write_svg(&self, w: &mut SvgWriter, theme: &Theme) -> std::fmt::Result {
        w.open(
            "g",
            &[
                ("class", "legend".to_string()),
                ("transform", format!("translate({},{})", num(self.origin.0), num(self.origin.1))),
            ],
        )?;
        if let Some(header) = &self.header {
            w.text(
                "text",
                &[
                    ("x", "0".to_string()),
                    ("y", "-5".to_string()),
                    ("font-size", "12px".to_string()),
                    ("font-weight", "600".to_string()),
                    ("fill", theme.title.to_string()),
                ],
                header,
            )?;
        }
        for e in &self.entries {
            let color = e.color.to_string();
            w.leaf(
                "line",
                &[
                    ("x1", num(e.x)),
                    ("x2", num(e.x + SAMPLE_WIDTH)),
                    ("y1", num(e.y)),
                    ("y2", num(e.y)),
                    ("stroke", color.clone()),
                    ("stroke-width", num(STROKE_WIDTH)),
                ],
            )?;
            w.leaf(
                "circle",
                &[
                    ("cx", num(e.x + SAMPLE_WIDTH / 2.0)),
                    ("cy", num(e.y)),
                    ("r", num(DOT_RADIUS)),
                    ("fill", color),
                    ("stroke", theme.legend_dot_stroke.to_string()),
                    ("stroke-width", "0.5".to_string()),
                ],
            )?;
            w.text(
                "text",
                &[
                    ("x", num(e.x + 26.0)),
                    ("y", num(e.y + 4.0)),
                    ("font-size", format!("{}px", num(self.font_px))),
                    ("fill", theme.axis_label.to_string()),
                ],
                &e.group,
            )?;
        }
        w.close("g")
    }
}
