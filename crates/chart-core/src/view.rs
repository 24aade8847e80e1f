// File: crates/chart-core/src/view.rs
// Summary: Stateful chart instance owning rows, filter, options and layout;
// every input change produces a fresh full frame.

use crate::chart::{Chart, Frame, RenderOptions};
use crate::error::Result;
use crate::layout::{LayoutController, Viewport};
use crate::record::{Observation, Selection};

/// One mounted chart. Each instance keeps its own layout state, so any number
/// of views can coexist.
#[derive(Clone, Debug)]
pub struct ChartView<R> {
    records: Vec<R>,
    selection: Selection,
    options: RenderOptions,
    layout: LayoutController,
    generation: u64,
}

impl<R: Observation> ChartView<R> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            records: Vec::new(),
            selection: Selection::default(),
            options,
            layout: LayoutController::new(),
            generation: 0,
        }
    }

    pub fn records(&self) -> &[R] { &self.records }
    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn options(&self) -> &RenderOptions { &self.options }
    pub fn viewport(&self) -> Viewport { self.layout.viewport() }
    /// Number of frames produced so far.
    pub fn generation(&self) -> u64 { self.generation }

    /// Replace the rows and redraw.
    pub fn set_records(&mut self, records: Vec<R>) -> Result<Frame> {
        self.records = records;
        self.render()
    }

    /// Replace the filter and redraw.
    pub fn set_selection(&mut self, selection: Selection) -> Result<Frame> {
        self.selection = selection;
        self.render()
    }

    pub fn set_options(&mut self, options: RenderOptions) -> Result<Frame> {
        self.options = options;
        self.render()
    }

    /// Feed a container width. Redraws only when the derived viewport changed.
    pub fn observe_width(&mut self, width: f64) -> Result<Option<Frame>> {
        match self.layout.observe(width) {
            Some(_) => self.render().map(Some),
            None => Ok(None),
        }
    }

    /// Full rebuild from the current inputs. Restarts every reveal animation.
    pub fn render(&mut self) -> Result<Frame> {
        let chart = Chart::from_records(&self.records, &self.selection, self.options.clone());
        let mut frame = chart.render(&self.layout.viewport())?;
        self.generation += 1;
        frame.generation = self.generation;
        tracing::trace!(generation = self.generation, kind = ?frame.kind, "chart view redrawn");
        Ok(frame)
    }
}

impl<R: Observation> Default for ChartView<R> {
    fn default() -> Self { Self::new(RenderOptions::default()) }
}
