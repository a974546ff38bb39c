//! Host-side file I/O: read measurement rows, write aggregated rows.
//!
//! Rows without a category are skipped with a warning so the rest of the file
//! still reaches the chart.

use crate::models::{AggregatedRow, ParameterSpec, Record};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};
use log::warn;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Records read from a file plus the number of rows dropped for lacking a category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub skipped: usize,
}

impl Loaded {
    fn push(&mut self, result: Result<Record, crate::error::ChartError>) {
        match result {
            Ok(r) => self.records.push(r),
            Err(e) => {
                warn!("skipping row: {e}");
                self.skipped += 1;
            }
        }
    }
}

/// Read a CSV file with a header row. Row numbers in warnings are 1-based data rows.
pub fn load_csv<P: AsRef<Path>>(path: P, category_field: &str) -> Result<Loaded> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.clone();
    if !headers.iter().any(|h| h == category_field) {
        bail!(
            "{} has no `{}` column (columns: {})",
            path.display(),
            category_field,
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    }
    let mut out = Loaded::default();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        out.push(Record::from_csv_fields(
            i + 1,
            category_field,
            headers.iter().zip(row.iter()),
        ));
    }
    Ok(out)
}

/// Read a JSON array of objects.
pub fn load_json<P: AsRef<Path>>(path: P, category_field: &str) -> Result<Loaded> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{} is not a JSON array", path.display()))?;
    let mut out = Loaded::default();
    for (i, row) in rows.iter().enumerate() {
        match row.as_object() {
            Some(fields) => out.push(Record::from_json_fields(i + 1, category_field, fields)),
            None => {
                warn!("skipping row {}: not a JSON object", i + 1);
                out.skipped += 1;
            }
        }
    }
    Ok(out)
}

/// Load by extension: `.json` as JSON, anything else as CSV.
pub fn load_records<P: AsRef<Path>>(path: P, category_field: &str) -> Result<Loaded> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => load_json(path, category_field),
        _ => load_csv(path, category_field),
    }
}

/// Save aggregated rows as CSV: one column per parameter, empty cell when undefined.
pub fn save_rows_csv<P: AsRef<Path>>(
    rows: &[AggregatedRow],
    spec: &ParameterSpec,
    category_field: &str,
    path: P,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let header: Vec<&str> = std::iter::once(category_field).chain(spec.names()).collect();
    wtr.write_record(&header)?;
    for row in rows {
        let mut rec = vec![row.category.clone()];
        rec.extend(
            (0..spec.len()).map(|i| row.mean(i).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save aggregated rows as a pretty JSON array of objects, `null` when undefined.
pub fn save_rows_json<P: AsRef<Path>>(
    rows: &[AggregatedRow],
    spec: &ParameterSpec,
    category_field: &str,
    path: P,
) -> Result<()> {
    let objects: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let mut obj = serde_json::Map::new();
            obj.insert(category_field.to_string(), row.category.clone().into());
            for (i, param) in spec.iter() {
                obj.insert(param.name.clone(), row.mean(i).into());
            }
            serde_json::Value::Object(obj)
        })
        .collect();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&objects)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
