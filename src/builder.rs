//! Default option assembly.
//!
//! Every chart starts from the same skeleton (title, palette, legend) and
//! then gets the series, tooltip and toolbox layout of its kind. The
//! `init_default_*` entry points add the per-kind extras on top.

use crate::axis::customize_axes;
use crate::defaults::ChartDefaults;
use crate::error::{OptionError, OptionResult};
use crate::formatter::Formatter;
use crate::legend::LegendEntry;
use crate::option::{child_object, ChartOption};
use crate::ChartKind;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Legend and series must describe the same number of traces.
fn verify_data_length(legend: &[LegendEntry], series: &[Value]) -> OptionResult<()> {
    if legend.len() != series.len() {
        warn!(
            legend = legend.len(),
            series = series.len(),
            "legend and series data lengths differ"
        );
        return Err(OptionError::LengthMismatch {
            legend: legend.len(),
            series: series.len(),
        });
    }
    Ok(())
}

/// Assemble the baseline option for `kind`.
///
/// `series` holds one element per legend entry: the data array of a line,
/// bar or map trace, or a `{name, value}` slice for pies. The tooltip
/// formatter, when given, is written to `tooltip.formatter`.
pub fn build_default(
    kind: ChartKind,
    title: &str,
    legend: &[LegendEntry],
    series: &[Value],
    tooltip: Option<Formatter>,
    defaults: &ChartDefaults,
) -> OptionResult<ChartOption> {
    verify_data_length(legend, series)?;

    let mut option = ChartOption::new();
    option.insert("title", json!({ "text": title, "show": true }));
    option.insert("color", defaults.palette().to_vec());
    let legend_data: Vec<Value> = legend.iter().map(LegendEntry::to_value).collect();
    option.insert("legend", json!({ "data": legend_data }));

    if kind.is_cartesian() {
        default_cartesian_series(&mut option, kind, legend, series, defaults);
    } else if kind == ChartKind::Map {
        default_map_series(&mut option, legend, series, defaults)?;
    } else {
        default_pie_series(&mut option, series, defaults);
    }

    if let Some(formatter) = tooltip {
        option
            .object_mut("tooltip")?
            .insert("formatter".to_string(), formatter.to_value());
        option.register_formatter("/tooltip/formatter".to_string(), formatter);
    }

    debug!(kind = %kind, series = series.len(), "assembled default option");
    Ok(option)
}

/// Line chart with a category x-axis built from `x_axis`.
pub fn init_default_line(
    title: &str,
    legend: &[LegendEntry],
    series: &[Value],
    tooltip: Option<Formatter>,
    x_axis: &[Value],
    defaults: &ChartDefaults,
) -> OptionResult<ChartOption> {
    let mut option = build_default(ChartKind::Line, title, legend, series, tooltip, defaults)?;
    customize_axes(&mut option, x_axis, legend, ChartKind::Line, defaults)?;
    Ok(option)
}

/// Bar chart with a category x-axis built from `x_axis`.
pub fn init_default_bar(
    title: &str,
    legend: &[LegendEntry],
    series: &[Value],
    tooltip: Option<Formatter>,
    x_axis: &[Value],
    defaults: &ChartDefaults,
) -> OptionResult<ChartOption> {
    let mut option = build_default(ChartKind::Bar, title, legend, series, tooltip, defaults)?;
    customize_axes(&mut option, x_axis, legend, ChartKind::Bar, defaults)?;
    Ok(option)
}

/// Map chart. `max` bounds the color scale, which then starts at 0.
pub fn init_default_map(
    title: &str,
    legend: &[LegendEntry],
    series: &[Value],
    tooltip: Option<Formatter>,
    max: Option<f64>,
    defaults: &ChartDefaults,
) -> OptionResult<ChartOption> {
    let mut option = build_default(ChartKind::Map, title, legend, series, tooltip, defaults)?;
    if let Some(max) = max {
        set_data_range_bounds(&mut option, max)?;
    }
    Ok(option)
}

/// Pie chart. `max` caps the funnel the toolbox can switch to.
pub fn init_default_pie(
    title: &str,
    legend: &[LegendEntry],
    series: &[Value],
    tooltip: Option<Formatter>,
    max: Option<f64>,
    defaults: &ChartDefaults,
) -> OptionResult<ChartOption> {
    let mut option = build_default(ChartKind::Pie, title, legend, series, tooltip, defaults)?;
    if let Some(max) = max {
        set_funnel_max(&mut option, max)?;
    }
    Ok(option)
}

/// `dataRange.min = 0`, `dataRange.max = max`.
pub fn set_data_range_bounds(option: &mut ChartOption, max: f64) -> OptionResult<()> {
    let range = option.object_mut("dataRange")?;
    range.insert("min".to_string(), json!(0));
    range.insert("max".to_string(), json!(max));
    Ok(())
}

/// `toolbox.feature.magicType.option.funnel.max = max`.
pub fn set_funnel_max(option: &mut ChartOption, max: f64) -> OptionResult<()> {
    let toolbox = option.object_mut("toolbox")?;
    let feature = child_object(toolbox, "feature")?;
    let magic = child_object(feature, "magicType")?;
    let magic_option = child_object(magic, "option")?;
    let funnel = child_object(magic_option, "funnel")?;
    funnel.insert("max".to_string(), json!(max));
    Ok(())
}

fn item_tooltip(defaults: &ChartDefaults) -> Value {
    json!({
        "trigger": "item",
        "showDelay": defaults.show_delay,
        "transitionDuration": defaults.transition_duration,
        "enterable": true,
    })
}

fn default_cartesian_series(
    option: &mut ChartOption,
    kind: ChartKind,
    legend: &[LegendEntry],
    series: &[Value],
    defaults: &ChartDefaults,
) {
    // Up to two series each get their own y-axis.
    let own_axis = series.len() <= 2;
    let entries: Vec<Value> = legend
        .iter()
        .zip(series)
        .enumerate()
        .map(|(i, (entry, data))| {
            let mut s = json!({
                "type": kind.as_str(),
                "symbolSize": 0,
                "name": entry.display_name(),
                "data": data,
            });
            if own_axis {
                s["yAxisIndex"] = json!(i);
            }
            s
        })
        .collect();

    option.insert("series", entries);
    option.insert(
        "tooltip",
        json!({
            "trigger": "axis",
            "axisPointer": {
                "type": "line",
                "lineStyle": {
                    "color": defaults.axis_color,
                    "width": 2,
                    "type": "solid",
                },
            },
        }),
    );
    option.insert(
        "toolbox",
        json!({
            "show": true,
            "x": "right",
            "y": "top",
            "feature": {
                "magicType": { "show": true, "type": ["line", "bar"] },
                "restore": { "show": true },
                "saveAsImage": { "show": true },
            },
        }),
    );
    option.insert("calculable", true);
}

fn default_map_series(
    option: &mut ChartOption,
    legend: &[LegendEntry],
    series: &[Value],
    defaults: &ChartDefaults,
) -> OptionResult<()> {
    let formatter = Formatter::Integer;
    option.insert(
        "dataRange",
        json!({
            "x": "left",
            "y": "bottom",
            "text": ["高", "低"],
            "calculable": true,
            "formatter": formatter.to_value(),
        }),
    );
    option.register_formatter("/dataRange/formatter".to_string(), formatter);

    let own_axis = series.len() <= 2;
    let entries: Vec<Value> = legend
        .iter()
        .zip(series)
        .enumerate()
        .map(|(i, (entry, data))| {
            let mut s = json!({
                "type": ChartKind::Map.as_str(),
                "mapType": defaults.map_type,
                "roam": false,
                "itemStyle": {
                    "normal": { "label": { "show": true } },
                    "emphasis": { "label": { "show": true } },
                },
                "name": entry.display_name(),
                "data": data,
            });
            if own_axis {
                s["yAxisIndex"] = json!(i);
            }
            s
        })
        .collect();

    option.insert("series", entries);
    option.insert("tooltip", item_tooltip(defaults));
    option
        .object_mut("legend")?
        .insert("show".to_string(), json!(false));
    option.insert(
        "toolbox",
        json!({
            "show": true,
            "orient": "horizontal",
            "x": "right",
            "y": "top",
            "feature": {
                "restore": { "show": true },
                "saveAsImage": { "show": true },
            },
        }),
    );
    Ok(())
}

fn default_pie_series(option: &mut ChartOption, series: &[Value], defaults: &ChartDefaults) {
    let data: Vec<Value> = series
        .iter()
        .map(|item| {
            json!({
                "value": item.get("value").cloned().unwrap_or(Value::Null),
                "name": item.get("name").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();

    let mut pie = Map::new();
    pie.insert("type".to_string(), json!(ChartKind::Pie.as_str()));
    pie.insert("radius".to_string(), json!(defaults.pie_radius));
    pie.insert("minAngle".to_string(), json!(defaults.min_angle));
    if let Some(center) = &defaults.pie_center {
        pie.insert("center".to_string(), json!(center));
    }
    pie.insert("data".to_string(), Value::Array(data));

    option.insert("series", vec![Value::Object(pie)]);
    option.insert("tooltip", item_tooltip(defaults));
    option.insert(
        "toolbox",
        json!({
            "show": true,
            "x": "right",
            "y": "top",
            "feature": {
                "magicType": {
                    "show": true,
                    "type": ["pie", "funnel"],
                    "option": {
                        "funnel": {
                            "x": "25%",
                            "width": "50%",
                            "funnelAlign": "center",
                        },
                    },
                },
                "restore": { "show": true },
                "saveAsImage": { "show": true },
            },
        }),
    );
    option.insert("calculable", false);
}
