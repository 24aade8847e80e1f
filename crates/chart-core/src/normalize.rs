// File: crates/chart-core/src/normalize.rs
// Summary: Row normalization: filter chartable records, key them by category,
// group by series key, order and transform values.

use std::collections::{BTreeMap, HashSet};

use crate::age::age_key;
use crate::record::{Observation, Selection};
use crate::theme::{Color, Palette};

/// What the categorical X axis enumerates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dimension {
    /// Age bands of one year, ordered by age key.
    #[default]
    AgeBand,
    /// Years of one age band, ordered chronologically.
    Year,
}

impl Dimension {
    pub fn label_of<O: Observation + ?Sized>(self, row: &O) -> String {
        match self {
            Dimension::AgeBand => row.age_band().to_string(),
            Dimension::Year => row.year().to_string(),
        }
    }

    pub fn key_of<O: Observation + ?Sized>(self, row: &O) -> i64 {
        match self {
            Dimension::AgeBand => i64::from(age_key(row.age_band())),
            Dimension::Year => i64::from(row.year()),
        }
    }
}

/// Transform applied to the rate before it reaches the value scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueTransform {
    #[default]
    Log10,
    Ln,
}

impl ValueTransform {
    #[inline]
    pub fn apply(self, rate: f64) -> f64 {
        match self {
            ValueTransform::Log10 => rate.log10(),
            ValueTransform::Ln => rate.ln(),
        }
    }

    /// Axis title for values under this transform, e.g. `log₁₀(nMx)`.
    pub fn axis_title(self, quantity: &str) -> String {
        match self {
            ValueTransform::Log10 => format!("log₁₀({quantity})"),
            ValueTransform::Ln => format!("ln({quantity})"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub dimension: Dimension,
    pub transform: ValueTransform,
}

/// One slot on the categorical axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub key: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// Category label the point sits on.
    pub label: String,
    pub key: i64,
    /// Raw rate as delivered.
    pub rate: f64,
    /// Rate after the value transform.
    pub value: f64,
}

/// All points of one group key, ordered by category key.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesData {
    pub group: String,
    /// Position in ascending group-key order; drives both the reveal delay
    /// and the legend slot.
    pub index: usize,
    pub color: Color,
    pub points: Vec<Point>,
}

/// Normalizer output: the category domain plus every non-empty series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSet {
    pub categories: Vec<Category>,
    pub series: Vec<SeriesData>,
    pub options: NormalizeOptions,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool { self.series.is_empty() }

    pub fn category_labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label.clone()).collect()
    }

    /// Every transformed value across all series.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.points.iter().map(|p| p.value))
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn groups(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.group.as_str()).collect()
    }
}

/// Rows matching `selection` with a chartable rate, in input order.
pub fn chartable_rows<'a, R: Observation>(records: &'a [R], selection: &Selection) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| selection.matches(*r) && r.chartable_rate().is_some())
        .collect()
}

/// Turn raw rows into ordered, transformed series.
///
/// Rows outside `selection` or without a finite positive rate are dropped.
/// Groups are emitted in ascending key order and numbered from 0; a group
/// with no surviving rows does not appear at all. Points and categories are
/// ordered by category key; equal keys keep their input order.
pub fn normalize<R: Observation>(
    records: &[R],
    selection: &Selection,
    options: NormalizeOptions,
    palette: &Palette,
) -> SeriesSet {
    let rows: Vec<(&R, f64)> = records
        .iter()
        .filter(|r| selection.matches(*r))
        .filter_map(|r| r.chartable_rate().map(|rate| (r, rate)))
        .collect();

    let mut seen = HashSet::new();
    let mut categories: Vec<Category> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<Point>> = BTreeMap::new();

    for &(row, rate) in &rows {
        let label = options.dimension.label_of(row);
        let key = options.dimension.key_of(row);
        if seen.insert(label.clone()) {
            categories.push(Category { label: label.clone(), key });
        }
        groups.entry(row.group()).or_default().push(Point {
            label,
            key,
            rate,
            value: options.transform.apply(rate),
        });
    }

    categories.sort_by_key(|c| c.key);

    let series: Vec<SeriesData> = groups
        .into_iter()
        .enumerate()
        .map(|(index, (group, mut points))| {
            points.sort_by_key(|p| p.key);
            SeriesData {
                group: group.to_string(),
                index,
                color: palette.color_for(group),
                points,
            }
        })
        .collect();

    tracing::debug!(
        input = records.len(),
        chartable = rows.len(),
        categories = categories.len(),
        series = series.len(),
        "normalized rows"
    );

    SeriesSet { categories, series, options }
}
