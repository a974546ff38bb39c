use crate::error::ChartError;
use crate::style::{RIVER_BLUES, Rgb, office_color};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Field holding the category (state name) in the river pollution data sets.
pub const DEFAULT_CATEGORY_FIELD: &str = "STATE";

/// One input row: a category plus whichever parameters were measured.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub category: String,
    /// Only finite values are stored; anything else counts as missing.
    pub values: BTreeMap<String, f64>,
}

impl Record {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style setter; non-finite values are dropped.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        if value.is_finite() {
            self.values.insert(name.into(), value);
        }
        self
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Convert a loosely-typed host row (e.g. one JSON object) into a record.
    ///
    /// Numbers are taken as-is and numeric strings are parsed; null, empty,
    /// non-numeric and non-finite cells are treated as missing. A row without a
    /// usable `category_field` is a precondition violation.
    pub fn from_json_fields(
        row: usize,
        category_field: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, ChartError> {
        use serde_json::Value;

        let category = match fields.get(category_field) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(ChartError::MissingCategory {
                    row,
                    field: category_field.to_string(),
                });
            }
        };

        let mut record = Record::new(category);
        for (name, value) in fields {
            if name == category_field {
                continue;
            }
            let parsed = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => parse_cell(s),
                _ => None,
            };
            if let Some(v) = parsed {
                record = record.with(name.clone(), v);
            }
        }
        Ok(record)
    }

    /// Same as [`Record::from_json_fields`] for a CSV row with its header.
    pub fn from_csv_fields<'a>(
        row: usize,
        category_field: &str,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ChartError> {
        let mut category = None;
        let mut values = Vec::new();
        for (name, cell) in fields {
            if name == category_field {
                let c = cell.trim();
                if !c.is_empty() {
                    category = Some(c.to_string());
                }
            } else if let Some(v) = parse_cell(cell) {
                values.push((name.to_string(), v));
            }
        }
        let category = category.ok_or_else(|| ChartError::MissingCategory {
            row,
            field: category_field.to_string(),
        })?;
        Ok(values
            .into_iter()
            .fold(Record::new(category), |r, (name, v)| r.with(name, v)))
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A measured parameter and the color its bars and legend swatch use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub color: Rgb,
}

impl Parameter {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Ordered, validated parameter list shared by aggregation, bars and legend.
///
/// The position of a parameter in this list is its identity for the rest of the
/// pipeline: aggregated means, sub-band slot, color and legend row all use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    params: Vec<Parameter>,
}

impl ParameterSpec {
    pub fn new(params: Vec<Parameter>) -> Result<Self, ChartError> {
        if params.is_empty() {
            return Err(ChartError::EmptyParameterSpec);
        }
        let mut seen = HashSet::new();
        for (i, p) in params.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(ChartError::BlankParameterName(i));
            }
            if !seen.insert(p.name.as_str()) {
                return Err(ChartError::DuplicateParameter(p.name.clone()));
            }
        }
        Ok(Self { params })
    }

    /// Temperature, dissolved oxygen, pH and biochemical oxygen demand means.
    pub fn river_pollution() -> Self {
        let params = ["TempMean", "DOMean", "PHMean", "BODMean"]
            .into_iter()
            .zip(RIVER_BLUES)
            .map(|(name, color)| Parameter::new(name, color))
            .collect();
        Self { params }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set has no parameters; `ParameterSpec::new` rejects that case.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// `(index, parameter)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Parameter)> {
        self.params.iter().enumerate()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

impl Default for ParameterSpec {
    fn default() -> Self {
        Self::river_pollution()
    }
}

/// Parse `NAME=#rrggbb` entries separated by comma or semicolon.
/// Entries without a color get one from the fallback palette.
pub fn parse_param_list(s: &str) -> Result<ParameterSpec, ChartError> {
    let mut params = Vec::new();
    for (i, entry) in s
        .split([',', ';'])
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .enumerate()
    {
        let param = match entry.split_once('=') {
            Some((name, color)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ChartError::InvalidParameterEntry(entry.to_string()));
                }
                Parameter::new(name, Rgb::from_hex(color)?)
            }
            None => Parameter::new(entry, office_color(i)),
        };
        params.push(param);
    }
    ParameterSpec::new(params)
}

/// Mean of every parameter for one category. `means[i]` belongs to the i-th
/// parameter in the set; `None` means no record of the category defined it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub category: String,
    pub means: Vec<Option<f64>>,
}

impl AggregatedRow {
    pub fn mean(&self, index: usize) -> Option<f64> {
        self.means.get(index).copied().flatten()
    }
}
