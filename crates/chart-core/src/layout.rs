// File: crates/chart-core/src/layout.rs
// Summary: Responsive viewport dimensions derived from the measured container width.

use crate::geometry::{clamp, Rect};
use crate::types::{Margins, DEFAULT_HEIGHT, DEFAULT_WIDTH, MOBILE_BREAKPOINT};

/// Chart surface size plus the margins around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub is_mobile: bool,
}

impl Viewport {
    /// Dimensions for a container `width` units wide.
    ///
    /// Desktop height follows half the width within [350, 500]; narrow
    /// containers use 80% of the width capped at 400.
    pub fn for_width(width: f64) -> Self {
        let width = width.max(0.0);
        let is_mobile = width < MOBILE_BREAKPOINT;
        let height = if is_mobile {
            (width * 0.8).min(400.0)
        } else {
            clamp(width * 0.5, 350.0, 500.0)
        };
        let margins = if is_mobile { Margins::mobile() } else { Margins::desktop() };
        Self { width, height, margins, is_mobile }
    }

    pub fn inner_width(&self) -> f64 { (self.width - self.margins.hsum()).max(0.0) }
    pub fn inner_height(&self) -> f64 { (self.height - self.margins.vsum()).max(0.0) }

    /// Plot area in surface coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::from_ltwh(self.margins.left, self.margins.top, self.inner_width(), self.inner_height())
    }
}

impl Default for Viewport {
    /// The size assumed before the first measurement arrives.
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margins: Margins::desktop(),
            is_mobile: false,
        }
    }
}

/// Tracks the host container width; a changed viewport is the signal to redraw.
#[derive(Clone, Debug, Default)]
pub struct LayoutController {
    current: Viewport,
    measured: bool,
}

impl LayoutController {
    pub fn new() -> Self { Self::default() }

    pub fn viewport(&self) -> Viewport { self.current }

    /// Feed a width measurement. Returns the new viewport when the derived
    /// dimensions changed, `None` when nothing needs redrawing. Non-finite
    /// or non-positive widths are ignored.
    pub fn observe(&mut self, width: f64) -> Option<Viewport> {
        if !width.is_finite() || width <= 0.0 {
            tracing::debug!(width, "ignoring unusable container width");
            return None;
        }
        let next = Viewport::for_width(width);
        if self.measured && next == self.current {
            return None;
        }
        if self.current.is_mobile != next.is_mobile {
            tracing::debug!(width, mobile = next.is_mobile, "layout breakpoint crossed");
        }
        self.current = next;
        self.measured = true;
        Some(next)
    }
}
