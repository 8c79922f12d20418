// Library exports for echarts-config

pub mod csv_reader;
pub mod data;
pub mod defaults;
pub mod error;
pub mod formatter;
pub mod legend;
pub mod option;
pub mod telemetry;

// Builders and setters
pub mod axis;
pub mod builder;
pub mod component;
pub mod series;

pub use defaults::ChartDefaults;
pub use error::{OptionError, OptionResult};
pub use formatter::{FormatParams, Formatter};
pub use legend::LegendEntry;
pub use option::ChartOption;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chart families the default builder knows how to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Map,
}

impl ChartKind {
    /// The ECharts `type` string.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Map => "map",
        }
    }

    /// Line and bar charts share the cartesian layout.
    pub fn is_cartesian(self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Bar)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "map" => Ok(ChartKind::Map),
            other => Err(OptionError::UnknownChartKind(other.to_string())),
        }
    }
}
