use crate::models::{AggregatedRow, ParameterSpec, Record};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Running mean and count of the defined values of one parameter. The mean is
/// updated incrementally so finite inputs never overflow to infinity.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    mean: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, v: f64) {
        self.count += 1;
        let n = self.count as f64;
        // Divide before subtracting: `v - mean` alone can overflow for opposite-sign extremes.
        self.mean += v / n - self.mean / n;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

struct Group<'a> {
    category: &'a str,
    records: usize,
    acc: Vec<Accumulator>,
}

/// Group records by category (first-seen order) and accumulate every parameter.
fn group_records<'a>(records: &'a [Record], spec: &ParameterSpec) -> Vec<Group<'a>> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();
    for r in records {
        let gi = *index.entry(r.category.as_str()).or_insert_with(|| {
            groups.push(Group {
                category: r.category.as_str(),
                records: 0,
                acc: vec![Accumulator::default(); spec.len()],
            });
            groups.len() - 1
        });
        let group = &mut groups[gi];
        group.records += 1;
        for (i, param) in spec.iter() {
            if let Some(v) = r.value(&param.name).filter(|v| v.is_finite()) {
                group.acc[i].add(v);
            }
        }
    }
    groups
}

/// Mean of every parameter per category, one row per distinct category in
/// first-seen order. A parameter no record of the category defines stays `None`.
pub fn aggregate_by_category(records: &[Record], spec: &ParameterSpec) -> Vec<AggregatedRow> {
    group_records(records, spec)
        .into_iter()
        .map(|g| AggregatedRow {
            category: g.category.to_string(),
            means: g.acc.iter().map(Accumulator::mean).collect(),
        })
        .collect()
}

/// Per (category, parameter) statistics behind an aggregated mean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub category: String,
    pub parameter: String,
    pub count: usize,
    pub missing: usize,
    pub mean: Option<f64>,
}

/// Same grouping as [`aggregate_by_category`], reported per parameter with
/// defined/missing counts. Ordered by category (first seen), then parameter order.
pub fn summaries(records: &[Record], spec: &ParameterSpec) -> Vec<Summary> {
    let mut out = Vec::new();
    for g in group_records(records, spec) {
        for (i, param) in spec.iter() {
            let acc = g.acc[i];
            out.push(Summary {
                category: g.category.to_string(),
                parameter: param.name.clone(),
                count: acc.count,
                missing: g.records - acc.count,
                mean: acc.mean(),
            });
        }
    }
    out
}
