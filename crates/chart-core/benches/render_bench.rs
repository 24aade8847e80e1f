use anyhow::Result;
use chart_core::{Chart, MortalityRecord, RenderOptions, Selection, Viewport};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const AGES: [&str; 19] = [
    "0", "1-4", "5-9", "10-14", "15-19", "20-24", "25-29", "30-34", "35-39", "40-44",
    "45-49", "50-54", "55-59", "60-64", "65-69", "70-74", "75-79", "80-84", "90+",
];

fn life_table(groups: &[&str]) -> Vec<MortalityRecord> {
    let mut rows = Vec::new();
    for (g, group) in groups.iter().enumerate() {
        for (i, age) in AGES.iter().enumerate() {
            let rate = 0.0003 * 1.35f64.powi(i as i32) * (1.0 + 0.1 * g as f64);
            rows.push(MortalityRecord::new(2020, "Brasil", *group, *age, Some(rate)));
        }
    }
    rows
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let rows = life_table(&["Masculino", "Feminino", "Ambos"]);
    let chart = Chart::from_records(&rows, &Selection::locality_year("Brasil", 2020), RenderOptions::default());
    for &width in &[375.0f64, 800.0, 1440.0] {
        group.bench_function(format!("w{width}"), |b| {
            let viewport = Viewport::for_width(width);
            b.iter(|| -> Result<()> {
                let frame = chart.render(&viewport)?;
                black_box(frame);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
