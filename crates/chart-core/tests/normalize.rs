// File: crates/chart-core/tests/normalize.rs
// Purpose: Row normalizer: filtering, age ordering, grouping, transforms and
// the point-count / idempotence properties.

use approx::assert_relative_eq;
use chart_core::normalize::chartable_rows;
use chart_core::theme::Palette;
use chart_core::{
    age_key, normalize, AgeBand, Dimension, Facets, ForecastRecord, MortalityRecord, NormalizeOptions, Selection, ValueTransform,
};
use proptest::prelude::*;

fn rec(group: &str, age: &str, rate: Option<f64>) -> MortalityRecord {
    MortalityRecord::new(2020, "Brasil", group, age, rate)
}

#[test]
fn age_bands_sort_numerically() {
    let rows: Vec<MortalityRecord> =
        ["10-14", "1-4", "90+", "5-9"].iter().map(|a| rec("Ambos", a, Some(0.01))).collect();
    let set = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
    assert_eq!(set.category_labels(), ["1-4", "5-9", "10-14", "90+"]);
    let points: Vec<&str> = set.series[0].points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(points, ["1-4", "5-9", "10-14", "90+"]);
}

#[test]
fn age_key_parses_leading_digits() {
    assert_eq!(age_key("0"), 0);
    assert_eq!(age_key("45-49"), 45);
    assert_eq!(age_key(" 90+"), 90);
    assert_eq!(age_key("Total"), 0);
    assert_eq!(age_key(""), 0);
}

#[test]
fn age_band_orders_by_key() {
    let mut bands: Vec<AgeBand> = ["90+", "10-14", "0", "1-4"].iter().map(|l| AgeBand::new(*l)).collect();
    bands.sort();
    let labels: Vec<&str> = bands.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["0", "1-4", "10-14", "90+"]);
    assert_eq!(AgeBand::new("45-49").key, 45);
}

#[test]
fn zero_rate_is_skipped_without_a_gap() {
    let rows = vec![
        rec("Masculino", "0", Some(0.02)),
        rec("Masculino", "1-4", Some(0.0)),
        rec("Masculino", "5-9", Some(0.0001)),
    ];
    let set = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
    let labels: Vec<&str> = set.series[0].points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["0", "5-9"]);
    // No category slot is reserved for the dropped row.
    assert_eq!(set.category_labels(), ["0", "5-9"]);
}

#[test]
fn invalid_group_is_absent() {
    let rows = vec![
        rec("Ambos", "0", Some(-1.0)),
        rec("Ambos", "1-4", None),
        rec("Ambos", "5-9", Some(f64::NAN)),
        rec("Feminino", "0", Some(0.01)),
    ];
    let set = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
    assert_eq!(set.groups(), ["Feminino"]);
    assert_eq!(set.series[0].index, 0);
}

#[test]
fn selection_restricts_rows() {
    let rows = vec![
        MortalityRecord::new(2020, "Brasil", "Ambos", "0", Some(0.01)),
        MortalityRecord::new(2019, "Brasil", "Ambos", "0", Some(0.01)),
        MortalityRecord::new(2020, "Recife", "Ambos", "0", Some(0.01)),
    ];
    let sel = Selection::locality_year("Brasil", 2020);
    assert_eq!(chartable_rows(&rows, &sel).len(), 1);
    let set = normalize(&rows, &sel, NormalizeOptions::default(), &Palette::default());
    assert_eq!(set.point_count(), 1);
}

#[test]
fn transforms_apply_to_values() {
    let rows = vec![rec("Ambos", "0", Some(0.01))];
    let log10 = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
    assert_relative_eq!(log10.series[0].points[0].value, -2.0, epsilon = 1e-12);
    assert_relative_eq!(log10.series[0].points[0].rate, 0.01);

    let opts = NormalizeOptions { transform: ValueTransform::Ln, ..NormalizeOptions::default() };
    let ln = normalize(&rows, &Selection::default(), opts, &Palette::default());
    assert_relative_eq!(ln.series[0].points[0].value, 0.01f64.ln(), epsilon = 1e-12);
    assert_eq!(ValueTransform::Ln.axis_title("nMx"), "ln(nMx)");
}

#[test]
fn year_dimension_orders_chronologically() {
    let rows = vec![
        MortalityRecord::new(2021, "Brasil", "Ambos", "60-64", Some(0.02)),
        MortalityRecord::new(2019, "Brasil", "Ambos", "60-64", Some(0.01)),
        MortalityRecord::new(2020, "Brasil", "Ambos", "60-64", Some(0.015)),
        MortalityRecord::new(2020, "Brasil", "Ambos", "0-4", Some(0.015)),
    ];
    let opts = NormalizeOptions { dimension: Dimension::Year, ..NormalizeOptions::default() };
    let set = normalize(&rows, &Selection::locality_age_band("Brasil", "60-64"), opts, &Palette::default());
    assert_eq!(set.category_labels(), ["2019", "2020", "2021"]);
}

#[test]
fn forecasts_normalize_like_life_tables() {
    let rows = vec![
        ForecastRecord { year: 2030, age_band: "5-9".into(), locality: "Brasil".into(), group: "Ambos".into(), value: Some(0.001), ..Default::default() },
        ForecastRecord { year: 2030, age_band: "0".into(), locality: "Brasil".into(), group: "Ambos".into(), value: Some(0.01), ..Default::default() },
    ];
    let set = normalize(&rows, &Selection::locality_year("Brasil", 2030), NormalizeOptions::default(), &Palette::default());
    assert_eq!(set.category_labels(), ["0", "5-9"]);
}

#[test]
fn palette_colors_follow_group() {
    let rows = vec![rec("Masculino", "0", Some(0.01)), rec("Outro", "0", Some(0.01))];
    let set = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
    assert_eq!(set.series[0].color.to_string(), "#3b82f6");
    assert_eq!(set.series[1].color.to_string(), "#6366f1");
}

#[test]
fn facets_list_distinct_selector_values() {
    let rows = vec![
        MortalityRecord::new(2019, "Recife", "Ambos", "10-14", Some(0.001)),
        MortalityRecord::new(2021, "Brasil", "Ambos", "90+", Some(0.2)),
        MortalityRecord::new(2020, "Recife", "Feminino", "0", None),
        MortalityRecord::new(2021, "Brasil", "Masculino", "5-9", Some(0.0)),
        MortalityRecord::new(2019, "Olinda", "Ambos", "10-14", Some(0.001)),
    ];
    let facets = Facets::collect(&rows);
    assert_eq!(facets.localities, ["Brasil", "Olinda", "Recife"]);
    assert_eq!(facets.years, [2021, 2020, 2019]);
    assert_eq!(facets.age_bands, ["0", "5-9", "10-14", "90+"]);
    assert_eq!(Facets::collect::<MortalityRecord>(&[]), Facets::default());
}

fn arb_record() -> impl Strategy<Value = MortalityRecord> {
    let group = prop::sample::select(vec!["Masculino", "Feminino", "Ambos"]);
    let age = prop::sample::select(vec!["0", "1-4", "5-9", "10-14", "90+"]);
    let locality = prop::sample::select(vec!["Brasil", "Recife"]);
    let year = 2019i32..=2020;
    let rate = prop_oneof![
        Just(None),
        Just(Some(0.0)),
        (-1.0f64..1.0).prop_map(Some),
        (1e-6f64..1.0).prop_map(Some),
    ];
    (group, age, locality, year, rate).prop_map(|(g, a, l, y, r)| MortalityRecord::new(y, l, g, a, r))
}

proptest! {
    #[test]
    fn point_count_matches_eligible_rows(rows in prop::collection::vec(arb_record(), 0..60)) {
        let sel = Selection::locality_year("Brasil", 2020);
        let set = normalize(&rows, &sel, NormalizeOptions::default(), &Palette::default());
        for series in &set.series {
            let expected = rows
                .iter()
                .filter(|r| r.locality == "Brasil" && r.year == 2020 && r.group == series.group)
                .filter(|r| r.rate.is_some_and(|v| v.is_finite() && v > 0.0))
                .count();
            prop_assert!(expected > 0);
            prop_assert_eq!(series.points.len(), expected);
        }
        let total = rows
            .iter()
            .filter(|r| r.locality == "Brasil" && r.year == 2020)
            .filter(|r| r.rate.is_some_and(|v| v > 0.0))
            .count();
        prop_assert_eq!(set.point_count(), total);
        let indices: Vec<usize> = set.series.iter().map(|s| s.index).collect();
        prop_assert_eq!(indices, (0..set.series.len()).collect::<Vec<_>>());
    }

    #[test]
    fn normalization_is_idempotent(rows in prop::collection::vec(arb_record(), 0..60)) {
        let sel = Selection::locality_year("Brasil", 2020);
        let a = normalize(&rows, &sel, NormalizeOptions::default(), &Palette::default());
        let b = normalize(&rows, &sel, NormalizeOptions::default(), &Palette::default());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn points_are_ordered_by_age(rows in prop::collection::vec(arb_record(), 0..60)) {
        let set = normalize(&rows, &Selection::default(), NormalizeOptions::default(), &Palette::default());
        for series in &set.series {
            prop_assert!(series.points.windows(2).all(|w| w[0].key <= w[1].key));
        }
        prop_assert!(set.categories.windows(2).all(|w| w[0].key <= w[1].key));
    }
}
