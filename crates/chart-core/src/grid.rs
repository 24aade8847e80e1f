// File: crates/chart-core/src/grid.rs
// Summary: Tick and "nice" domain helpers (1/2/5 x 10^k steps).

// Step-size thresholds: an error ratio above sqrt(50) rounds to 10, above sqrt(10) to 5,
// above sqrt(2) to 2.
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

fn step_factor(error: f64) -> f64 {
    if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 }
}

/// Tick step for roughly `count` ticks over `[start, stop]`.
/// Positive values are the step itself; negative values are `-1/step` so that
/// fractional steps stay exact.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Integer tick range `[i1, i2]` and increment; see `ticks`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let pos = 10f64.powf(-power) / factor;
        i1 = (start * pos).round();
        i2 = (stop * pos).round();
        if i1 / pos < start { i1 += 1.0; }
        if i2 / pos > stop { i2 -= 1.0; }
        inc = -pos;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start { i1 += 1.0; }
        if i2 * inc > stop { i2 -= 1.0; }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Round tick values covering `[start, stop]`, about `count` of them.
/// Values are computed as integer multiples of the step to avoid drift.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() { return Vec::new(); }
    if start == stop { return vec![start]; }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) { return Vec::new(); }
    let n = (i2 - i1) as usize + 1;
    let value = |k: usize| {
        let i = i1 + k as f64;
        if inc < 0.0 { i / -inc } else { i * inc }
    };
    let mut out: Vec<f64> = (0..n).map(value).collect();
    if reverse { out.reverse(); }
    out
}

/// Extend `[start, stop]` outward to multiples of the tick step for `count` ticks.
/// Repeats until the step stabilises (at most 10 rounds).
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop { return (start, stop); }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut prestep: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if prestep == Some(step) { break; }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    if reverse { (hi, lo) } else { (lo, hi) }
}
