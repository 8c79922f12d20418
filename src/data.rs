use crate::builder::{init_default_bar, init_default_line, init_default_map, init_default_pie};
use crate::csv_reader::CsvData;
use crate::defaults::ChartDefaults;
use crate::error::OptionResult;
use crate::formatter::Formatter;
use crate::legend::LegendEntry;
use crate::option::ChartOption;
use crate::ChartKind;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::{json, Number, Value};

/// Everything the default builders need, gathered from CSV or a JSON request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
    #[serde(default)]
    pub series: Vec<Value>,
    #[serde(default, rename = "xAxis")]
    pub x_axis: Vec<Value>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Tooltip template such as `"{b}: {c}"`.
    #[serde(default)]
    pub tooltip: Option<String>,
}

impl ChartInput {
    /// Parse a JSON request object.
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(anyhow!("Chart request must be a JSON object"));
        }
        serde_json::from_value(value.clone()).context("Invalid chart request")
    }

    /// Interpret a CSV table for `kind`.
    ///
    /// - line/bar: first column holds categories, every other column a series.
    /// - pie: `name,value` rows, one slice each.
    /// - map: first column holds region names, every other column a series.
    pub fn from_csv(csv: &CsvData, kind: ChartKind) -> Result<Self> {
        if csv.headers.len() < 2 {
            anyhow::bail!(
                "{} chart needs at least two CSV columns, found {}",
                kind,
                csv.headers.len()
            );
        }

        let mut input = ChartInput::default();
        match kind {
            ChartKind::Line | ChartKind::Bar => {
                input.x_axis = csv.rows.iter().map(|row| cell_at(row, 0)).collect();
                for (col, header) in csv.headers.iter().enumerate().skip(1) {
                    input.legend.push(LegendEntry::from(header.as_str()));
                    let data: Vec<Value> = csv.rows.iter().map(|row| cell_at(row, col)).collect();
                    input.series.push(Value::Array(data));
                }
            }
            ChartKind::Pie => {
                for row in &csv.rows {
                    let name = row.first().cloned().unwrap_or_default();
                    input.legend.push(LegendEntry::from(name.as_str()));
                    input.series.push(json!({ "name": name, "value": cell_at(row, 1) }));
                }
            }
            ChartKind::Map => {
                for (col, header) in csv.headers.iter().enumerate().skip(1) {
                    input.legend.push(LegendEntry::from(header.as_str()));
                    let data: Vec<Value> = csv
                        .rows
                        .iter()
                        .map(|row| json!({ "name": cell_at(row, 0), "value": cell_at(row, col) }))
                        .collect();
                    input.series.push(Value::Array(data));
                }
            }
        }
        Ok(input)
    }

    /// Run the default builder for `kind`.
    pub fn build(&self, kind: ChartKind, defaults: &ChartDefaults) -> OptionResult<ChartOption> {
        let tooltip = self.tooltip.as_deref().map(Formatter::template);
        match kind {
            ChartKind::Line => init_default_line(
                &self.title,
                &self.legend,
                &self.series,
                tooltip,
                &self.x_axis,
                defaults,
            ),
            ChartKind::Bar => init_default_bar(
                &self.title,
                &self.legend,
                &self.series,
                tooltip,
                &self.x_axis,
                defaults,
            ),
            ChartKind::Pie => init_default_pie(
                &self.title,
                &self.legend,
                &self.series,
                tooltip,
                self.max,
                defaults,
            ),
            ChartKind::Map => init_default_map(
                &self.title,
                &self.legend,
                &self.series,
                tooltip,
                self.max,
                defaults,
            ),
        }
    }
}

fn cell_at(row: &[String], col: usize) -> Value {
    row.get(col).map_or(Value::Null, |s| cell_value(s))
}

/// Numbers become JSON numbers, blanks become null, the rest stay strings.
fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> CsvData {
        CsvData {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_cartesian_from_csv() {
        let csv = table(
            &["month", "Low", "High"],
            &[&["May", "12", "22"], &["June", "15.5", ""]],
        );
        let input = ChartInput::from_csv(&csv, ChartKind::Line).unwrap();
        assert_eq!(input.x_axis, vec![json!("May"), json!("June")]);
        assert_eq!(input.legend.len(), 2);
        assert_eq!(input.series[0], json!([12, 15.5]));
        assert_eq!(input.series[1], json!([22, null]));
    }

    #[test]
    fn test_pie_from_csv() {
        let csv = table(&["name", "value"], &[&["A", "1"], &["B", "3"]]);
        let input = ChartInput::from_csv(&csv, ChartKind::Pie).unwrap();
        assert_eq!(input.legend[1].display_name(), "B");
        assert_eq!(input.series[0], json!({"name": "A", "value": 1}));

        let option = input.build(ChartKind::Pie, &ChartDefaults::default()).unwrap();
        assert_eq!(option.pointer("/series/0/data/1/value"), Some(&json!(3)));
    }

    #[test]
    fn test_map_from_csv() {
        let csv = table(&["province", "visits"], &[&["Beijing", "120"]]);
        let input = ChartInput::from_csv(&csv, ChartKind::Map).unwrap();
        assert_eq!(input.series[0], json!([{"name": "Beijing", "value": 120}]));
    }

    #[test]
    fn test_single_column_rejected() {
        let csv = table(&["month"], &[&["May"]]);
        assert!(ChartInput::from_csv(&csv, ChartKind::Bar).is_err());
    }

    #[test]
    fn test_json_request() {
        let request = json!({
            "title": "Temp",
            "legend": ["Low", {"name": "High"}],
            "series": [[12, 15, 16], [22, 25, 32]],
            "xAxis": ["May", "June", "July"],
            "tooltip": "{b}: {c}",
        });
        let input = ChartInput::from_json(&request).unwrap();
        let option = input.build(ChartKind::Bar, &ChartDefaults::default()).unwrap();
        assert_eq!(option.pointer("/yAxis/1/name"), Some(&json!("High")));
        assert_eq!(option.pointer("/tooltip/formatter"), Some(&json!("{b}: {c}")));
        assert!(ChartInput::from_json(&json!([1, 2])).is_err());
    }
}
