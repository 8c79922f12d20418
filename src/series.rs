//! Series-level setters: line styling, mark lines, pie and map tweaks.
//!
//! Pie setters address one series by index, since a nested pie adds a second
//! ring to the same option.

use crate::defaults::ChartDefaults;
use crate::error::{OptionError, OptionResult};
use crate::formatter::Formatter;
use crate::option::{child_object, merge_into, ChartOption};
use crate::ChartKind;
use serde_json::{json, Map, Value};
use tracing::debug;

const SERIES: &str = "series";

fn series_mut(option: &mut ChartOption, index: usize) -> OptionResult<&mut Map<String, Value>> {
    option.entry_mut(SERIES, index)
}

fn series_data_mut(option: &mut ChartOption, index: usize) -> OptionResult<&mut Vec<Value>> {
    let path = format!("series[{}].data", index);
    match series_mut(option, index)?.get_mut("data") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(OptionError::NotAnArray { path }),
        None => Err(OptionError::MissingField { path }),
    }
}

fn set_field(option: &mut ChartOption, index: usize, field: &str, value: Value) -> OptionResult<()> {
    series_mut(option, index)?.insert(field.to_string(), value);
    Ok(())
}

// === Cartesian series ===

pub fn set_series_smooth(option: &mut ChartOption, smooth: bool) -> OptionResult<()> {
    for s in option.entries_mut(SERIES)? {
        s.insert("smooth".to_string(), json!(smooth));
    }
    Ok(())
}

/// Set `z` on every series called `name`.
pub fn set_series_z(option: &mut ChartOption, z: i64, name: &str) -> OptionResult<()> {
    for s in option.entries_mut(SERIES)? {
        if s.get("name").and_then(Value::as_str) == Some(name) {
            s.insert("z".to_string(), json!(z));
        }
    }
    Ok(())
}

/// Plot every series against the first y-axis.
pub fn set_series_same_y_axis(option: &mut ChartOption) -> OptionResult<()> {
    for s in option.entries_mut(SERIES)? {
        s.insert("yAxisIndex".to_string(), json!(0));
    }
    Ok(())
}

/// Merge `params` into one series, or into all of them when `index` is `None`.
/// An index past the end changes nothing.
pub fn set_series_attr(
    option: &mut ChartOption,
    params: &Map<String, Value>,
    index: Option<usize>,
) -> OptionResult<()> {
    match index {
        None => {
            for s in option.entries_mut(SERIES)? {
                merge_into(s, params);
            }
        }
        Some(i) => match series_mut(option, i) {
            Ok(s) => merge_into(s, params),
            Err(OptionError::IndexOutOfRange { len, .. }) => {
                debug!(index = i, len, "series index out of range, attributes skipped");
            }
            Err(e) => return Err(e),
        },
    }
    Ok(())
}

/// Merge `styles[i]` into `series[i]`. Series without a style are untouched.
pub fn set_series_item_style(option: &mut ChartOption, styles: &[Map<String, Value>]) -> OptionResult<()> {
    for (s, style) in option.entries_mut(SERIES)?.into_iter().zip(styles) {
        merge_into(s, style);
    }
    Ok(())
}

/// Same merge as [`set_series_item_style`], for `areaStyle`-style payloads.
pub fn set_series_area_style(option: &mut ChartOption, area_styles: &[Map<String, Value>]) -> OptionResult<()> {
    set_series_item_style(option, area_styles)
}

fn mark_point(x_value: &Value, y_value: Value, label: &Formatter) -> Value {
    json!({
        "xAxis": x_value,
        "yAxis": y_value,
        "itemStyle": {
            "normal": {
                "label": {
                    "show": true,
                    "formatter": label.to_value(),
                    "textStyle": { "fontSize": "14", "fontWeight": "bold" },
                },
            },
        },
    })
}

/// Append `line` to `markLine.data`, returning its position there.
fn push_mark_line(series: &mut Map<String, Value>, line: Value) -> OptionResult<usize> {
    let mark_line = child_object(series, "markLine")?;
    let data = mark_line
        .entry("data".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !data.is_array() {
        *data = Value::Array(Vec::new());
    }
    let items = data.as_array_mut().ok_or_else(|| OptionError::NotAnArray {
        path: "markLine.data".to_string(),
    })?;
    items.push(line);
    Ok(items.len() - 1)
}

/// Add a vertical guide at category `x_value`, `length` units tall, labelled
/// `label` verbatim. With `single` only the first series gets it.
pub fn set_x_axis_mark_line(
    option: &mut ChartOption,
    label: &str,
    x_value: impl Into<Value>,
    single: bool,
    length: impl Into<Value>,
) -> OptionResult<()> {
    // A constant callback keeps ECharts from expanding `{a}`-style slots.
    let label = Formatter::script(format!(
        "function () {{ return {}; }}",
        serde_json::to_string(label)?
    ));
    let x_value = x_value.into();
    let line = json!([
        mark_point(&x_value, json!(0), &label),
        mark_point(&x_value, length.into(), &label),
    ]);

    let targets = option.entries_mut(SERIES)?;
    let take = if single { 1 } else { targets.len() };
    let mut pointers = Vec::new();
    for (i, s) in targets.into_iter().take(take).enumerate() {
        let slot = push_mark_line(s, line.clone())?;
        for end in 0..2 {
            pointers.push(format!(
                "/series/{}/markLine/data/{}/{}/itemStyle/normal/label/formatter",
                i, slot, end
            ));
        }
    }
    for pointer in pointers {
        option.register_formatter(pointer, label.clone());
    }
    Ok(())
}

// === Pie ===

/// Turn the pie into a ring, e.g. `radius = ["50%", "70%"]`.
pub fn set_pie_hollow(option: &mut ChartOption, radius: impl Into<Value>, index: usize) -> OptionResult<()> {
    set_field(option, index, "radius", radius.into())
}

pub fn set_pie_z(option: &mut ChartOption, z: i64, index: usize) -> OptionResult<()> {
    set_field(option, index, "z", json!(z))
}

/// Draw the hovered slice label inside a hollow pie.
pub fn set_pie_label_to_center(option: &mut ChartOption, text_style: &Value, index: usize) -> OptionResult<()> {
    let label = json!({
        "label": {
            "show": true,
            "position": "center",
            "textStyle": text_style,
        },
    });
    set_field(
        option,
        index,
        "itemStyle",
        json!({ "normal": label.clone(), "emphasis": label }),
    )
}

/// Show or hide slice labels together with their guide lines.
pub fn set_pie_label_visible(option: &mut ChartOption, visible: bool, index: usize) -> OptionResult<()> {
    set_field(
        option,
        index,
        "itemStyle",
        json!({
            "normal": {
                "label": { "show": visible },
                "labelLine": { "show": visible },
            },
        }),
    )
}

/// Move the pie, e.g. `center = ["40%", "60%"]`.
pub fn set_pie_position(option: &mut ChartOption, center: impl Into<Value>, index: usize) -> OptionResult<()> {
    set_field(option, index, "center", center.into())
}

/// Give slice `i` the `itemStyle` of `styles[i]`.
pub fn set_pie_item_style(option: &mut ChartOption, styles: &[Value], index: usize) -> OptionResult<()> {
    let data = series_data_mut(option, index)?;
    for (slice, style) in data.iter_mut().zip(styles) {
        if let (Some(slice), Some(item_style)) = (slice.as_object_mut(), style.get("itemStyle")) {
            slice.insert("itemStyle".to_string(), item_style.clone());
        }
    }
    Ok(())
}

/// Set `key` on the slice whose name is `data_name`.
pub fn set_pie_series_data_attr(
    option: &mut ChartOption,
    data_name: &str,
    key: &str,
    value: Value,
    index: usize,
) -> OptionResult<()> {
    let data = series_data_mut(option, index)?;
    for slice in data.iter_mut().filter_map(Value::as_object_mut) {
        if slice.get("name").and_then(Value::as_str) == Some(data_name) {
            slice.insert(key.to_string(), value.clone());
        }
    }
    Ok(())
}

/// Replace the series-wide `itemStyle` of a pie.
pub fn set_series_pie_item_style(option: &mut ChartOption, style: Value, index: usize) -> OptionResult<()> {
    set_field(option, index, "itemStyle", style)
}

/// Append an inner or outer ring to a pie chart.
pub fn add_nested_pie(
    option: &mut ChartOption,
    data: Vec<Value>,
    radius: impl Into<Value>,
    defaults: &ChartDefaults,
) -> OptionResult<()> {
    option.array_mut(SERIES)?.push(json!({
        "data": data,
        "type": ChartKind::Pie.as_str(),
        "radius": radius.into(),
        "minAngle": defaults.min_angle,
    }));
    Ok(())
}

/// Whether hovered slices grow.
pub fn set_series_hover_animation(option: &mut ChartOption, enabled: bool, index: usize) -> OptionResult<()> {
    set_field(option, index, "hoverAnimation", json!(enabled))
}

// === Map ===

/// Drill into a region: level 2 shows `name`, anything else returns to the
/// default map.
pub fn set_specific_map(
    option: &mut ChartOption,
    name: &str,
    level: u32,
    defaults: &ChartDefaults,
) -> OptionResult<()> {
    let map_type = if level == 2 { name } else { defaults.map_type.as_str() };
    set_field(option, 0, "mapType", json!(map_type))
}

pub fn set_map_attr(option: &mut ChartOption, params: &Map<String, Value>) -> OptionResult<()> {
    merge_into(series_mut(option, 0)?, params);
    Ok(())
}
