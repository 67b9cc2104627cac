//! Output-shape conversions for [`SeriesResult`]
//!
//! [`normalize`] is lossless. [`Tabular::to_table`] coerces every value to
//! `f64` and is the only place in the crate where precision is given up.

use crate::series::{MetricValue, SeriesResult};
use cm_core::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A flat row: `time` plus one entry per metric, in metric order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub time: String,
  pub values: Vec<(String, Option<MetricValue>)>,
}

impl Record {
  /// Value of `metric` in this row
  pub fn get(&self, metric: &str) -> Option<&MetricValue> {
    self.values.iter().find(|(name, _)| name == metric).and_then(|(_, v)| v.as_ref())
  }
}

impl Serialize for Record {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
    map.serialize_entry("time", &self.time)?;
    for (metric, value) in &self.values {
      map.serialize_entry(metric, value)?;
    }
    map.end()
  }
}

/// Merge each row's timestamp with its metric values
pub fn normalize(data: &SeriesResult) -> Vec<Record> {
  data
    .series
    .iter()
    .map(|row| Record {
      time: row.time.clone(),
      values: data.metrics.iter().cloned().zip(row.values.iter().cloned()).collect(),
    })
    .collect()
}

/// Float table indexed by timestamp with one column per metric.
///
/// Missing values are `NaN`. Equality treats two `NaN` cells as equal so a
/// table compares equal to its own conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
  pub index: Vec<String>,
  pub columns: Vec<String>,
  pub data: Vec<Vec<f64>>,
}

impl Table {
  /// All cells of one column. Rows too short to reach it read as `NaN`.
  pub fn column(&self, name: &str) -> Option<Vec<f64>> {
    let idx = self.columns.iter().position(|c| c == name)?;
    Some(self.data.iter().map(|row| row.get(idx).copied().unwrap_or(f64::NAN)).collect())
  }

  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }
}

impl PartialEq for Table {
  fn eq(&self, other: &Self) -> bool {
    self.index == other.index
      && self.columns == other.columns
      && self.data.len() == other.data.len()
      && self.data.iter().zip(&other.data).all(|(a, b)| {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
      })
  }
}

/// Anything that can be viewed as a [`Table`].
pub trait Tabular {
  fn to_table(&self) -> Result<Table>;
}

impl Tabular for Table {
  /// Already tabular: handed back unchanged
  fn to_table(&self) -> Result<Table> {
    Ok(self.clone())
  }
}

impl Tabular for SeriesResult {
  fn to_table(&self) -> Result<Table> {
    self.validate()?;

    let data = self
      .series
      .iter()
      .map(|row| {
        row
          .values
          .iter()
          .map(|v| match v {
            Some(value) => value.to_f64(),
            None => Ok(f64::NAN),
          })
          .collect::<Result<Vec<f64>>>()
      })
      .collect::<Result<Vec<_>>>()
      .map_err(|e| Error::Parse(format!("cannot tabulate series: {e}")))?;

    Ok(Table {
      index: self.series.iter().map(|row| row.time.clone()).collect(),
      columns: self.metrics.clone(),
      data,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::series::SeriesRow;

  fn sample() -> SeriesResult {
    SeriesResult {
      metrics: vec!["PriceUSD".into(), "BlkCnt".into()],
      series: vec![
        SeriesRow {
          time: "2019-01-01T00:00:00.000Z".into(),
          values: vec![Some("3809.47638155000000000001".into()), Some("152".into())],
        },
        SeriesRow { time: "2019-01-02T00:00:00.000Z".into(), values: vec![Some("3941.3".into()), None] },
      ],
    }
  }

  #[test]
  fn test_normalize_keeps_text_per_metric() {
    let data = sample();
    let records = normalize(&data);
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.time, "2019-01-01T00:00:00.000Z");
    for (i, metric) in data.metrics.iter().enumerate() {
      assert_eq!(first.get(metric), data.series[0].values[i].as_ref());
    }
    assert_eq!(first.get("PriceUSD").unwrap().as_str(), "3809.47638155000000000001");
    assert!(records[1].get("BlkCnt").is_none());
  }

  #[test]
  fn test_record_serializes_flat() {
    let records = normalize(&sample());
    let json = serde_json::to_value(&records[1]).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"time": "2019-01-02T00:00:00.000Z", "PriceUSD": "3941.3", "BlkCnt": null})
    );
  }

  #[test]
  fn test_table_shape_and_nan() {
    let table = sample().to_table().unwrap();
    assert_eq!(table.columns, vec!["PriceUSD", "BlkCnt"]);
    assert_eq!(table.index.len(), 2);
    assert_eq!(table.column("BlkCnt").unwrap()[0], 152.0);
    assert!(table.column("BlkCnt").unwrap()[1].is_nan());
  }

  #[test]
  fn test_table_is_idempotent() {
    let table = sample().to_table().unwrap();
    let again = table.to_table().unwrap();
    assert_eq!(again, table);
    assert_eq!(again.to_table().unwrap(), table);
  }

  #[test]
  fn test_table_rejects_non_numeric() {
    let mut data = sample();
    data.series[0].values[0] = Some("n/a".into());
    assert!(matches!(data.to_table(), Err(Error::Parse(_))));
  }

  #[test]
  fn test_ragged_table_column_reads_nan() {
    let table: Table = serde_json::from_str(
      r#"{"index":["2019-01-01","2019-01-02"],"columns":["x","y"],"data":[[1.0],[2.0,3.0]]}"#,
    )
    .unwrap();
    assert_eq!(table.column("x").unwrap(), vec![1.0, 2.0]);
    let y = table.column("y").unwrap();
    assert!(y[0].is_nan());
    assert_eq!(y[1], 3.0);
  }
}
