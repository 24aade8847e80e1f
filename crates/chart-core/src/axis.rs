// File: crates/chart-core/src/axis.rs
// Summary: Axis, grid and title layout (as data) and its SVG output.

use crate::layout::Viewport;
use crate::scale::{BandScale, ValueScale};
use crate::svg::{num, SvgWriter};
use crate::theme::Theme;

/// Ticks requested for the horizontal grid, independent of the layout.
pub const GRID_TICKS: usize = 8;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Offset along the axis inside the plot area.
    pub pos: f64,
    pub label: String,
}

/// Positioned text: `x`/`y` before `rotate` is applied, as SVG does.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
    pub font_px: f64,
    pub weight: u16,
}

impl Title {
    fn write_svg(&self, w: &mut SvgWriter, theme: &Theme) -> std::fmt::Result {
        let mut attrs = vec![
            ("x", num(self.x)),
            ("y", num(self.y)),
            ("text-anchor", "middle".to_string()),
            ("font-size", format!("{}px", num(self.font_px))),
            ("font-weight", self.weight.to_string()),
            ("fill", theme.title.to_string()),
        ];
        if self.rotate != 0.0 { attrs.push(("transform", format!("rotate({})", num(self.rotate)))); }
        w.text("text", &attrs, &self.text)
    }
}

/// Texts placed around the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitles {
    pub chart: String,
    pub x: String,
    pub y: String,
}

/// Everything the axis renderer draws, in plot-area coordinates (surface
/// coordinates for the chart title).
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    pub inner_width: f64,
    pub inner_height: f64,
    /// One tick per category at the band centre.
    pub x_ticks: Vec<Tick>,
    /// Label rotation in degrees (negative is counter-clockwise).
    pub x_label_rotation: f64,
    pub y_ticks: Vec<Tick>,
    pub tick_font_px: f64,
    /// Y offsets of the dashed grid lines.
    pub grid: Vec<f64>,
    pub x_title: Title,
    pub y_title: Title,
    pub chart_title: Title,
}

impl AxisLayout {
    pub fn compute(viewport: &Viewport, x: &BandScale, y: &ValueScale, titles: AxisTitles) -> Self {
        let mobile = viewport.is_mobile;
        let inner_width = viewport.inner_width();
        let inner_height = viewport.inner_height();

        let x_ticks = x
            .labels()
            .iter()
            .filter_map(|l| x.center(l).map(|pos| Tick { pos, label: l.clone() }))
            .collect();

        let y_ticks = y
            .ticks(if mobile { 5 } else { 8 })
            .into_iter()
            .map(|v| Tick { pos: y.to_px(v), label: format!("{v:.1}") })
            .collect();

        let grid = y.ticks(GRID_TICKS).into_iter().map(|v| y.to_px(v)).collect();

        let title_px = if mobile { 11.0 } else { 13.0 };
        Self {
            inner_width,
            inner_height,
            x_ticks,
            x_label_rotation: if mobile { -65.0 } else { -45.0 },
            y_ticks,
            tick_font_px: if mobile { 9.0 } else { 11.0 },
            grid,
            x_title: Title {
                text: titles.x,
                x: inner_width / 2.0,
                y: inner_height + if mobile { 85.0 } else { 65.0 },
                rotate: 0.0,
                font_px: title_px,
                weight: 500,
            },
            y_title: Title {
                text: titles.y,
                x: -inner_height / 2.0,
                y: if mobile { -35.0 } else { -50.0 },
                rotate: -90.0,
                font_px: title_px,
                weight: 500,
            },
            chart_title: Title {
                text: titles.chart,
                x: viewport.width / 2.0,
                y: if mobile { 18.0 } else { 25.0 },
                rotate: 0.0,
                font_px: if mobile { 12.0 } else { 16.0 },
                weight: 600,
            },
        }
    }

    /// Grid first so the axes and series paint over it.
    pub fn write_grid(&self, w: &mut SvgWriter, theme: &Theme) -> std::fmt::Result {
        w.open("g", &[("class", "grid".to_string())])?;
        for &py in &self.grid {
            w.leaf(
                "line",
                &[
                    ("x1", "0".to_string()),
                    ("x2", num(self.inner_width)),
                    ("y1", num(py)),
                    ("y2", num(py)),
                    ("stroke", theme.grid.to_string()),
                    ("stroke-dasharray", "3,3".to_string()),
                ],
            )?;
        }
        w.close("g")
    }

    pub fn write_axes(&self, w: &mut SvgWriter, theme: &Theme) -> std::fmt::Result {
        let line = theme.axis_line.to_string();
        let label = theme.axis_label.to_string();
        let font = format!("{}px", num(self.tick_font_px));

        w.open(
            "g",
            &[("class", "x-axis".to_string()), ("transform", format!("translate(0,{})", num(self.inner_height)))],
        )?;
        w.leaf(
            "path",
            &[
                ("class", "domain".to_string()),
                ("d", format!("M0,{t}V0H{w}V{t}", t = num(TICK_SIZE), w = num(self.inner_width))),
                ("fill", "none".to_string()),
                ("stroke", line.clone()),
            ],
        )?;
        for tick in &self.x_ticks {
            w.open("g", &[("class", "tick".to_string()), ("transform", format!("translate({},0)", num(tick.pos)))])?;
            w.leaf("line", &[("y2", num(TICK_SIZE)), ("stroke", line.clone())])?;
            w.text(
                "text",
                &[
                    ("y", num(TICK_SIZE + TICK_PADDING)),
                    ("dx", "-0.5em".to_string()),
                    ("dy", "0.5em".to_string()),
                    ("transform", format!("rotate({})", num(self.x_label_rotation))),
                    ("text-anchor", "end".to_string()),
                    ("font-size", font.clone()),
                    ("fill", label.clone()),
                ],
                &tick.label,
            )?;
            w.close("g")?;
        }
        w.close("g")?;

        w.open("g", &[("class", "y-axis".to_string())])?;
        w.leaf(
            "path",
            &[
                ("class", "domain".to_string()),
                ("d", format!("M-{t},{h}H0V0H-{t}", t = num(TICK_SIZE), h = num(self.inner_height))),
                ("fill", "none".to_string()),
                ("stroke", line.clone()),
            ],
        )?;
        for tick in &self.y_ticks {
            w.open("g", &[("class", "tick".to_string()), ("transform", format!("translate(0,{})", num(tick.pos)))])?;
            w.leaf("line", &[("x2", num(-TICK_SIZE)), ("stroke", line.clone())])?;
            w.text(
                "text",
                &[
                    ("x", num(-(TICK_SIZE + TICK_PADDING))),
                    ("dy", "0.32em".to_string()),
                    ("text-anchor", "end".to_string()),
                    ("font-size", font.clone()),
                    ("fill", label.clone()),
                ],
                &tick.label,
            )?;
            w.close("g")?;
        }
        w.close("g")?;

        self.x_title.write_svg(w, theme)?;
        self.y_title.write_svg(w, theme)
    }

    /// Chart title; written outside the translated plot group.
    pub fn write_title(&self, w: &mut SvgWriter, theme: &Theme) -> std::fmt::Result {
        self.chart_title.write_svg(w, theme)
    }
}
