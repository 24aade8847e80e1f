use chart_core::theme::Palette;
use chart_core::{normalize, MortalityRecord, NormalizeOptions, Selection};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Full table: every locality and year, as a "_completo" download would return.
fn build_rows(localities: usize, years: usize) -> Vec<MortalityRecord> {
    let ages = ["0", "1-4", "5-9", "10-14", "20-24", "40-44", "60-64", "80-84", "90+"];
    let groups = ["Masculino", "Feminino", "Ambos"];
    let mut rows = Vec::with_capacity(localities * years * ages.len() * groups.len());
    for l in 0..localities {
        for y in 0..years {
            for (i, age) in ages.iter().enumerate() {
                for group in groups {
                    let rate = if (i + y) % 11 == 0 { 0.0 } else { 0.0005 * 1.8f64.powi(i as i32) };
                    rows.push(MortalityRecord::new(2000 + y as i32, format!("Local {l}"), group, *age, Some(rate)));
                }
            }
        }
    }
    rows
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for &(localities, years) in &[(5usize, 10usize), (30, 24)] {
        let rows = build_rows(localities, years);
        let sel = Selection::locality_year("Local 3", 2005);
        let palette = Palette::default();
        group.bench_function(format!("rows_{}", rows.len()), |b| {
            b.iter(|| black_box(normalize(black_box(&rows), &sel, NormalizeOptions::default(), &palette)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
