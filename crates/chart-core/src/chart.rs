// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and the SVG rendering pipeline (scales, grid, axes,
// series, legend, titles), or a placeholder when nothing is chartable.

use std::path::Path;

use crate::axis::{AxisLayout, AxisTitles};
use crate::error::Result;
use crate::layout::Viewport;
use crate::legend::LegendLayout;
use crate::normalize::{normalize, Dimension, NormalizeOptions, SeriesSet};
use crate::record::{Observation, Selection};
use crate::scale::{BandScale, ValueScale};
use crate::series::{layout_all, SeriesPath};
use crate::svg::{num, SvgWriter};
use crate::theme::Theme;
use crate::types::ChartLabels;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub normalize: NormalizeOptions,
    pub theme: Theme,
    pub labels: ChartLabels,
    /// Emit the stroke reveal animation; off for static exports.
    pub animate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            theme: Theme::light(),
            labels: ChartLabels::default(),
            animate: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Chart,
    Placeholder,
}

/// One complete rendering of the chart surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub svg: String,
    pub kind: FrameKind,
    pub viewport: Viewport,
    /// Redraw counter of the owning view; 0 for one-off renders.
    pub generation: u64,
}

/// Every laid-out element of a chart frame, before serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub x: BandScale,
    pub y: ValueScale,
    pub axes: AxisLayout,
    pub series: Vec<SeriesPath>,
    pub legend: LegendLayout,
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub data: SeriesSet,
    pub options: RenderOptions,
}

impl Chart {
    pub fn new(data: SeriesSet, options: RenderOptions) -> Self { Self { data, options } }

    /// Normalize `records` under `selection` and wrap the result.
    pub fn from_records<R: Observation>(records: &[R], selection: &Selection, options: RenderOptions) -> Self {
        let data = normalize(records, selection, options.normalize, &options.theme.palette);
        Self { data, options }
    }

    /// Lay the chart out for `viewport`. `None` means the placeholder is shown.
    pub fn scene(&self, viewport: &Viewport) -> Option<Scene> {
        if self.data.is_empty() { return None; }
        let x = BandScale::with_default_padding(self.data.category_labels(), viewport.inner_width());
        let y = ValueScale::for_values(self.data.values(), viewport.inner_height())?;
        let series = layout_all(&self.data, &x, &y);
        if series.is_empty() { return None; }

        let labels = &self.options.labels;
        let titles = AxisTitles {
            chart: if viewport.is_mobile { labels.title_short.clone() } else { labels.title.clone() },
            x: match self.data.options.dimension {
                Dimension::AgeBand => labels.x_title_age_band.clone(),
                Dimension::Year => labels.x_title_year.clone(),
            },
            y: self.data.options.transform.axis_title(&labels.quantity),
        };
        let axes = AxisLayout::compute(viewport, &x, &y, titles);
        let legend = LegendLayout::compute(viewport, &series, &labels.legend_title);
        Some(Scene { x, y, axes, series, legend })
    }

    /// Render a full SVG document for `viewport`.
    pub fn render(&self, viewport: &Viewport) -> Result<Frame> {
        let Some(scene) = self.scene(viewport) else {
            tracing::debug!(width = viewport.width, "no chartable rows, rendering placeholder");
            let svg = render_placeholder(viewport, &self.options.theme, &self.options.labels.placeholder)?;
            return Ok(Frame { svg, kind: FrameKind::Placeholder, viewport: *viewport, generation: 0 });
        };

        let theme = &self.options.theme;
        let mut w = SvgWriter::document(viewport.width, viewport.height)?;
        write_background(&mut w, viewport, theme)?;

        let plot = viewport.plot_rect();
        w.open("g", &[("class", "plot".to_string()), ("transform", format!("translate({},{})", num(plot.left), num(plot.top)))])?;
        scene.axes.write_grid(&mut w, theme)?;
        scene.axes.write_axes(&mut w, theme)?;
        for s in &scene.series {
            s.write_svg(&mut w, self.options.animate)?;
        }
        w.close("g")?;

        scene.axes.write_title(&mut w, theme)?;
        scene.legend.write_svg(&mut w, theme)?;
        let svg = w.finish()?;

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            mobile = viewport.is_mobile,
            series = scene.series.len(),
            categories = scene.x.labels().len(),
            "rendered chart"
        );
        Ok(Frame { svg, kind: FrameKind::Chart, viewport: *viewport, generation: 0 })
    }

    /// Render for `viewport` and write the SVG to `output_svg_path`, creating
    /// parent directories as needed.
    pub fn render_to_svg(&self, viewport: &Viewport, output_svg_path: impl AsRef<Path>) -> Result<Frame> {
        let frame = self.render(viewport)?;
        if let Some(parent) = output_svg_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_svg_path, frame.svg.as_bytes())?;
        Ok(frame)
    }
}

// ---- helpers ----------------------------------------------------------------

fn write_background(w: &mut SvgWriter, viewport: &Viewport, theme: &Theme) -> std::fmt::Result {
    match theme.background {
        Some(bg) => w.leaf(
            "rect",
            &[
                ("width", num(viewport.width)),
                ("height", num(viewport.height)),
                ("fill", bg.to_string()),
            ],
        ),
        None => Ok(()),
    }
}

/// Surface-sized document with `message` centred in it.
pub fn render_placeholder(viewport: &Viewport, theme: &Theme, message: &str) -> Result<String> {
    let mut w = SvgWriter::document(viewport.width, viewport.height)?;
    write_background(&mut w, viewport, theme)?;
    w.text(
        "text",
        &[
            ("class", "placeholder".to_string()),
            ("x", num(viewport.width / 2.0)),
            ("y", num(viewport.height / 2.0)),
            ("text-anchor", "middle".to_string()),
            ("dominant-baseline", "middle".to_string()),
            ("font-size", "14px".to_string()),
            ("fill", theme.placeholder.to_string()),
        ],
        message,
    )?;
    Ok(w.finish()?)
}
