//! Tabular projection of JSON records into a polars [`DataFrame`].
//!
//! Records become rows and the union of their keys becomes the columns, in
//! order of first appearance. A record lacking a key gets a null in that
//! column. Each column's dtype is inferred from its non-null values:
//!
//! | values | dtype |
//! |---|---|
//! | booleans | `Boolean` |
//! | integers | `Int64` |
//! | numbers | `Float64` |
//! | strings | `String` |
//! | anything else | `String` holding the JSON text |

use std::collections::HashSet;

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::{Result, error::FmpError};

/// Convert a decoded response into a table.
///
/// An array of objects gives one row per element; a single object gives a
/// one-row table; an empty array gives an empty table.
///
/// # Errors
///
/// Returns [`FmpError::Table`] for scalars and for arrays holding anything
/// other than objects.
pub fn to_table(value: &Value) -> Result<DataFrame> {
    let records: Vec<&Map<String, Value>> = match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| {
                    FmpError::Table(format!("element {i} is {}, not an object", kind(item)))
                })
            })
            .collect::<Result<_>>()?,
        other => {
            return Err(FmpError::Table(format!(
                "expected an array of objects, got {}",
                kind(other)
            )));
        }
    };

    if records.is_empty() {
        return Ok(DataFrame::empty());
    }

    let columns = column_names(&records)
        .into_iter()
        .map(|name| {
            let cells: Vec<Option<&Value>> = records
                .iter()
                .map(|record| record.get(name).filter(|v| !v.is_null()))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Union of record keys in first-appearance order.
fn column_names<'a>(records: &[&'a Map<String, Value>]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                names.push(key.as_str());
            }
        }
    }
    names
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Empty,
    Bool,
    Int,
    Float,
    Str,
    Mixed,
}

impl Kind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() => Self::Int,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::Str,
            Value::Array(_) | Value::Object(_) => Self::Mixed,
        }
    }

    const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, k) | (k, Self::Empty) => k,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            (a, b) if a as u8 == b as u8 => a,
            _ => Self::Mixed,
        }
    }
}

fn build_column(name: &str, cells: &[Option<&Value>]) -> Column {
    let kind = cells
        .iter()
        .flatten()
        .fold(Kind::Empty, |acc, v| acc.merge(Kind::of(v)));
    let name = PlSmallStr::from(name);

    match kind {
        Kind::Bool => {
            let values: Vec<Option<bool>> =
                cells.iter().map(|c| c.and_then(Value::as_bool)).collect();
            Column::new(name, values)
        }
        Kind::Int => {
            let values: Vec<Option<i64>> =
                cells.iter().map(|c| c.and_then(Value::as_i64)).collect();
            Column::new(name, values)
        }
        Kind::Float => {
            let values: Vec<Option<f64>> =
                cells.iter().map(|c| c.and_then(Value::as_f64)).collect();
            Column::new(name, values)
        }
        Kind::Empty | Kind::Str | Kind::Mixed => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|c| {
                    c.map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .collect();
            Column::new(name, values)
        }
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_rows_and_column_union() {
        let records = json!([
            {"symbol": "AAPL", "price": 190.5},
            {"symbol": "MSFT", "price": 410.0, "pe": 35.1},
            {"symbol": "GOOG", "volume": 1200}
        ]);
        let df = to_table(&records).unwrap();

        assert_eq!(df.height(), 3);
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["symbol", "price", "pe", "volume"]);
        assert_eq!(df.column("pe").unwrap().null_count(), 2);
        assert_eq!(df.column("volume").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_dtype_inference() {
        let records = json!([
            {"b": true, "i": 1, "f": 1, "s": "x", "n": null, "nested": {"a": 1}},
            {"b": false, "i": 2, "f": 2.5, "s": "y", "n": null, "nested": [1, 2]}
        ]);
        let df = to_table(&records).unwrap();

        assert_eq!(df.column("b").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("i").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("f").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("s").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("n").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("n").unwrap().null_count(), 2);

        let nested: Vec<Option<&str>> = df
            .column("nested")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(nested, [Some(r#"{"a":1}"#), Some("[1,2]")]);

        let floats: Vec<f64> = df
            .column("f")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_relative_eq!(floats[0], 1.0);
        assert_relative_eq!(floats[1], 2.5);
    }

    #[test]
    fn test_mixed_scalars_fall_back_to_text() {
        let df = to_table(&json!([{"v": 1}, {"v": "n/a"}])).unwrap();
        let values: Vec<Option<&str>> = df
            .column("v")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, [Some("1"), Some("n/a")]);
    }

    #[test]
    fn test_single_object_is_one_row() {
        let df = to_table(&json!({"symbol": "AAPL", "dcf": 150.2})).unwrap();
        assert_eq!(df.shape(), (1, 2));
    }

    #[test]
    fn test_empty_array() {
        let df = to_table(&json!([])).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn test_rejects_non_records() {
        assert!(matches!(to_table(&json!(42)), Err(FmpError::Table(_))));
        assert!(matches!(
            to_table(&json!([{"a": 1}, 2])),
            Err(FmpError::Table(msg)) if msg.contains("element 1")
        ));
    }
}
