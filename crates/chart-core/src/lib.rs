// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for record
// normalization, chart layout, SVG rendering and row export.

pub mod age;
pub mod axis;
pub mod chart;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod legend;
pub mod load;
pub mod normalize;
pub mod record;
pub mod scale;
pub mod series;
pub mod svg;
pub mod theme;
pub mod types;
pub mod view;

pub use age::{age_key, AgeBand};
pub use axis::AxisLayout;
pub use chart::{Chart, Frame, FrameKind, RenderOptions, Scene};
pub use error::{ChartError, Result};
pub use export::{export, ExportFile, ExportFormat, ExportScope};
pub use layout::{LayoutController, Viewport};
pub use legend::LegendLayout;
pub use load::{load_records, read_records_csv, read_records_json};
pub use normalize::{normalize, Dimension, NormalizeOptions, SeriesSet, ValueTransform};
pub use record::{Facets, ForecastRecord, InfantMortalityRecord, MortalityRecord, Observation, Selection};
pub use scale::{BandScale, ValueScale};
pub use series::{Reveal, SeriesPath};
pub use theme::Theme;
pub use types::ChartLabels;
pub use view::ChartView;
