//! Band and linear scales mapping aggregated rows into plot-area pixels.
//!
//! Coordinates are relative to the plot area (origin at its top-left corner);
//! the plan builder adds the margins.

use crate::error::ChartError;
use crate::models::{AggregatedRow, ParameterSpec};
use ahash::AHashMap;

/// Fraction of each category's slot left empty around its band.
pub const BAND_PADDING: f64 = 0.2;
/// Horizontal gap between neighbouring parameter bars of one category.
pub const BAR_GAP_PX: f64 = 2.0;
/// Tick count hint used for nicing the value domain and generating ticks.
pub const VALUE_TICK_COUNT: usize = 10;

/// Categorical scale: one equally wide band per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: AHashMap<String, usize>,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    /// Bands over `[0, width]`: each category owns `width / n`, of which
    /// `padding` is split evenly on both sides of its band.
    pub fn new(domain: Vec<String>, width: f64, padding: f64) -> Self {
        let n = domain.len().max(1) as f64;
        let step = width / n;
        let index = domain
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            domain,
            index,
            step,
            bandwidth: step * (1.0 - padding),
            offset: step * padding / 2.0,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the category's band.
    pub fn position(&self, category: &str) -> Result<f64, ChartError> {
        self.index
            .get(category)
            .map(|&i| i as f64 * self.step + self.offset)
            .ok_or_else(|| ChartError::UnknownCategory(category.to_string()))
    }

    /// Horizontal center of the category's band.
    pub fn center(&self, category: &str) -> Result<f64, ChartError> {
        Ok(self.position(category)? + self.bandwidth / 2.0)
    }
}

/// Linear value scale from `[d0, d1]` onto `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a value to pixels. A collapsed domain maps everything onto `r0`.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Extend the domain outward so both ends land on multiples of a round tick step.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || start == stop {
            return self;
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prestep == Some(step) {
                break;
            }
            let (next_start, next_stop) = if step > 0.0 {
                ((start / step).floor() * step, (stop / step).ceil() * step)
            } else if step < 0.0 {
                ((start * step).ceil() / step, (stop * step).floor() / step)
            } else {
                break;
            };
            // Rounding up next to f64::MAX can overflow; keep the last finite bounds.
            if !(next_start.is_finite() && next_stop.is_finite()) {
                break;
            }
            (start, stop) = (next_start, next_stop);
            prestep = Some(step);
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !(d0.is_finite() && d1.is_finite()) {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        let Some((i1, i2, inc)) = tick_range(lo, hi, count as f64) else {
            return Vec::new();
        };
        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| {
                if inc < 0.0 {
                    i as f64 / -inc
                } else {
                    i as f64 * inc
                }
            })
            .collect();
        if d1 < d0 {
            ticks.reverse();
        }
        ticks
    }

    /// Decimal places needed to print ticks of `ticks(count)` exactly.
    pub fn tick_precision(&self, count: usize) -> usize {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        if lo == hi {
            return 0;
        }
        let step = tick_increment(lo, hi, count);
        if step < 0.0 {
            ((-step).log10() - 1e-9).ceil().max(0.0) as usize
        } else {
            0
        }
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick indices and the increment; a negative increment `-k` means
/// ticks are `i / k`, which keeps fractional steps exact.
fn tick_range(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_range(start, stop, count * 2.0);
    }
    (i2 >= i1).then_some((i1 as i64, i2 as i64, inc))
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_range(start, stop, count as f64)
        .map(|(_, _, inc)| inc)
        .unwrap_or(0.0)
}

/// Both scales for one aggregation pass, plus the parameter count used for
/// sub-banding. Rebuilt from scratch whenever the rows change.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub x: BandScale,
    pub y: LinearScale,
    params: usize,
}

impl Scales {
    pub fn build(
        rows: &[AggregatedRow],
        spec: &ParameterSpec,
        plot_width: f64,
        plot_height: f64,
    ) -> Self {
        let x = BandScale::new(
            rows.iter().map(|r| r.category.clone()).collect(),
            plot_width,
            BAND_PADDING,
        );
        let max = max_defined_mean(rows).unwrap_or(0.0).max(0.0);
        let y = LinearScale::new((0.0, max), (plot_height, 0.0)).nice(VALUE_TICK_COUNT);
        Self {
            x,
            y,
            params: spec.len().max(1),
        }
    }

    /// Width of one parameter's slot inside a category band (gap included).
    pub fn sub_band_step(&self) -> f64 {
        self.x.bandwidth() / self.params as f64
    }

    /// Left edge and width of the bar for the `param_index`-th parameter.
    pub fn bar_slot(&self, category: &str, param_index: usize) -> Result<(f64, f64), ChartError> {
        let step = self.sub_band_step();
        let left = self.x.position(category)? + param_index as f64 * step;
        Ok((left, (step - BAR_GAP_PX).max(0.0)))
    }

    /// Top edge and height of a bar; undefined or negative values collapse onto the baseline.
    pub fn bar_extent(&self, value: Option<f64>) -> (f64, f64) {
        let baseline = self.y.range().0;
        match value {
            Some(v) if v > 0.0 => {
                let top = self.y.map(v).min(baseline);
                (top, baseline - top)
            }
            _ => (baseline, 0.0),
        }
    }
}

/// Largest defined mean over all rows and parameters.
pub fn max_defined_mean(rows: &[AggregatedRow]) -> Option<f64> {
    rows.iter()
        .flat_map(|r| r.means.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}
