// File: crates/chart-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests: the two-group scenario, file output
// and the placeholder path.

use chart_core::{Chart, FrameKind, MortalityRecord, RenderOptions, Selection, Viewport};

fn brasil_2020() -> Vec<MortalityRecord> {
    vec![
        MortalityRecord::new(2020, "Brasil", "Masculino", "0", Some(0.012)),
        MortalityRecord::new(2020, "Brasil", "Feminino", "0", Some(0.010)),
    ]
}

#[test]
fn two_groups_render_two_series_and_two_legend_entries() {
    let chart = Chart::from_records(&brasil_2020(), &Selection::locality_year("Brasil", 2020), RenderOptions::default());
    let scene = chart.scene(&Viewport::default()).expect("chartable rows");

    assert_eq!(scene.series.len(), 2);
    assert!(scene.series.iter().all(|s| s.points.len() == 1));
    let groups: Vec<&str> = scene.legend.entries.iter().map(|e| e.group.as_str()).collect();
    assert_eq!(groups, ["Feminino", "Masculino"]);
    // Reveal delays follow the legend order.
    assert_eq!(scene.series[0].group, "Feminino");
    assert_eq!(scene.series[0].reveal.delay_ms, 0.0);
    assert_eq!(scene.series[1].reveal.delay_ms, 300.0);
}

#[test]
fn render_smoke_svg() {
    let chart = Chart::from_records(&brasil_2020(), &Selection::locality_year("Brasil", 2020), RenderOptions::default());
    let out = std::path::PathBuf::from("target/test_out/smoke.svg");

    let frame = chart.render_to_svg(&Viewport::default(), &out).expect("render should succeed");
    assert_eq!(frame.kind, FrameKind::Chart);
    let written = std::fs::read_to_string(&out).expect("output exists");
    assert_eq!(written, frame.svg);

    assert!(frame.svg.starts_with("<?xml"));
    assert!(frame.svg.contains(r##"stroke="#ec4899""##), "Feminino in pink");
    assert!(frame.svg.contains(r##"stroke="#3b82f6""##), "Masculino in blue");
    assert!(frame.svg.contains("Taxa Central de Mortalidade por Faixa Etária (escala logarítmica)"));
    assert!(frame.svg.contains("log₁₀(nMx)"));
    assert!(frame.svg.contains(r#"attributeName="stroke-dashoffset""#));
    assert!(frame.svg.trim_end().ends_with("</svg>"));
}

#[test]
fn static_render_has_no_animation() {
    let opts = RenderOptions { animate: false, ..RenderOptions::default() };
    let chart = Chart::from_records(&brasil_2020(), &Selection::default(), opts);
    let frame = chart.render(&Viewport::default()).expect("render");
    assert!(!frame.svg.contains("<animate"));
    assert!(!frame.svg.contains("stroke-dashoffset"));
}

#[test]
fn empty_input_renders_placeholder() {
    let chart = Chart::from_records::<MortalityRecord>(&[], &Selection::default(), RenderOptions::default());
    let frame = chart.render(&Viewport::default()).expect("placeholder is not an error");
    assert_eq!(frame.kind, FrameKind::Placeholder);
    assert!(frame.svg.contains("Nenhum dado disponível para visualização"));
    assert!(!frame.svg.contains("<path"));
}

#[test]
fn no_eligible_rows_renders_placeholder() {
    let rows = vec![
        MortalityRecord::new(2020, "Brasil", "Masculino", "0", Some(0.0)),
        MortalityRecord::new(2020, "Brasil", "Feminino", "0", None),
        MortalityRecord::new(2019, "Brasil", "Feminino", "0", Some(0.01)),
    ];
    let chart = Chart::from_records(&rows, &Selection::locality_year("Brasil", 2020), RenderOptions::default());
    assert!(chart.scene(&Viewport::default()).is_none());
    let frame = chart.render(&Viewport::default()).expect("render");
    assert_eq!(frame.kind, FrameKind::Placeholder);
}

#[test]
fn labels_are_escaped() {
    let rows = vec![MortalityRecord::new(2020, "Brasil", "A<B & C", "0", Some(0.01))];
    let frame = Chart::from_records(&rows, &Selection::default(), RenderOptions::default())
        .render(&Viewport::default())
        .expect("render");
    assert!(frame.svg.contains("A&lt;B &amp; C"));
    assert!(!frame.svg.contains("A<B"));
}
