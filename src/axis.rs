//! Cartesian axis layout and axis-level setters.

use crate::defaults::ChartDefaults;
use crate::error::{OptionError, OptionResult};
use crate::formatter::Formatter;
use crate::legend::LegendEntry;
use crate::option::{child_object, merge_into, ChartOption};
use crate::ChartKind;
use serde_json::{json, Map, Value};

const X_AXIS: &str = "xAxis";
const Y_AXIS: &str = "yAxis";

/// Which axes of a list a setter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTarget {
    Index(usize),
    All,
}

/// Replace `xAxis`/`yAxis` with the default cartesian layout.
///
/// One category x-axis carries `x_axis_data`. One or two legend entries get a
/// value axis each, named after the entry and tinted with its palette color;
/// three or more share a single plain value axis.
pub fn customize_axes(
    option: &mut ChartOption,
    x_axis_data: &[Value],
    legend: &[LegendEntry],
    kind: ChartKind,
    defaults: &ChartDefaults,
) -> OptionResult<()> {
    let x_axis = json!({
        "data": x_axis_data,
        "type": "category",
        "splitLine": {
            "boundaryGap": kind != ChartKind::Line,
            "show": false,
        },
        "axisLine": {
            "lineStyle": { "color": defaults.axis_color },
        },
    });

    let y_axes: Vec<Value> = if legend.len() > 2 {
        vec![json!({ "type": "value" })]
    } else {
        let split_number = if legend.len() == 1 {
            Value::Null
        } else {
            json!(defaults.split_number)
        };
        legend
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                json!({
                    "type": "value",
                    "name": entry.display_name(),
                    "splitNumber": split_number,
                    "axisLine": {
                        "lineStyle": { "color": defaults.axis_color },
                    },
                    "axisLabel": {
                        "textStyle": { "color": defaults.color_at(i) },
                    },
                })
            })
            .collect()
    };

    option.insert(X_AXIS, vec![x_axis]);
    option.insert(Y_AXIS, y_axes);
    Ok(())
}

fn set_nested(
    option: &mut ChartOption,
    axis_key: &str,
    child: &str,
    field: &str,
    value: &Value,
) -> OptionResult<()> {
    for axis in option.entries_mut(axis_key)? {
        child_object(axis, child)?.insert(field.to_string(), value.clone());
    }
    Ok(())
}

fn resolve_targets(
    option: &mut ChartOption,
    axis_key: &str,
    target: AxisTarget,
) -> OptionResult<Vec<usize>> {
    let len = option.array_mut(axis_key)?.len();
    match target {
        AxisTarget::All => Ok((0..len).collect()),
        AxisTarget::Index(index) if index < len => Ok(vec![index]),
        AxisTarget::Index(index) => Err(OptionError::IndexOutOfRange {
            field: axis_key.to_string(),
            index,
            len,
        }),
    }
}

fn set_y_axis_formatter(
    option: &mut ChartOption,
    index: usize,
    formatter: Formatter,
) -> OptionResult<()> {
    let axis = option.entry_mut(Y_AXIS, index)?;
    child_object(axis, "axisLabel")?.insert("formatter".to_string(), formatter.to_value());
    option.register_formatter(format!("/yAxis/{}/axisLabel/formatter", index), formatter);
    Ok(())
}

/// Show or hide the axis lines.
pub fn set_axis_line_visible(option: &mut ChartOption, x_show: bool, y_show: bool) -> OptionResult<()> {
    set_nested(option, X_AXIS, "axisLine", "show", &json!(x_show))?;
    set_nested(option, Y_AXIS, "axisLine", "show", &json!(y_show))
}

pub fn set_axis_label_visible(option: &mut ChartOption, x_show: bool, y_show: bool) -> OptionResult<()> {
    set_nested(option, X_AXIS, "axisLabel", "show", &json!(x_show))?;
    set_nested(option, Y_AXIS, "axisLabel", "show", &json!(y_show))
}

pub fn set_split_line_visible(option: &mut ChartOption, x_show: bool, y_show: bool) -> OptionResult<()> {
    set_nested(option, X_AXIS, "splitLine", "show", &json!(x_show))?;
    set_nested(option, Y_AXIS, "splitLine", "show", &json!(y_show))
}

pub fn set_axis_tick_visible(option: &mut ChartOption, x_show: bool, y_show: bool) -> OptionResult<()> {
    set_nested(option, X_AXIS, "axisTick", "show", &json!(x_show))?;
    set_nested(option, Y_AXIS, "axisTick", "show", &json!(y_show))
}

/// Set `axisLabel.textStyle`; a `None` side is left alone.
pub fn set_axis_label_style(
    option: &mut ChartOption,
    x_style: Option<&Value>,
    y_style: Option<&Value>,
) -> OptionResult<()> {
    if let Some(style) = x_style {
        set_nested(option, X_AXIS, "axisLabel", "textStyle", style)?;
    }
    if let Some(style) = y_style {
        set_nested(option, Y_AXIS, "axisLabel", "textStyle", style)?;
    }
    Ok(())
}

/// Whether the x-axis leaves a gap at both ends.
pub fn set_x_axis_boundary_gap(option: &mut ChartOption, gap: bool) -> OptionResult<()> {
    for axis in option.entries_mut(X_AXIS)? {
        axis.insert("boundaryGap".to_string(), json!(gap));
    }
    Ok(())
}

/// Rotate x labels 40° and draw every one of them.
pub fn set_x_axis_label_tilt_and_show_all(option: &mut ChartOption) -> OptionResult<()> {
    for axis in option.entries_mut(X_AXIS)? {
        let label = child_object(axis, "axisLabel")?;
        label.insert("interval".to_string(), json!(0));
        label.insert("rotate".to_string(), json!(40));
    }
    Ok(())
}

/// Label the selected y-axes as percentages of a 0..1 range.
pub fn set_y_axis_percent(option: &mut ChartOption, target: AxisTarget) -> OptionResult<()> {
    for index in resolve_targets(option, Y_AXIS, target)? {
        set_y_axis_formatter(option, index, Formatter::Percent)?;
    }
    Ok(())
}

pub fn set_y_axis_label_formatter(option: &mut ChartOption, formatter: Formatter) -> OptionResult<()> {
    for index in resolve_targets(option, Y_AXIS, AxisTarget::All)? {
        set_y_axis_formatter(option, index, formatter.clone())?;
    }
    Ok(())
}

/// Set the y-axis name, or blank it when `visible` is false.
pub fn set_y_axis_name_visible(
    option: &mut ChartOption,
    visible: bool,
    target: AxisTarget,
    name: &str,
) -> OptionResult<()> {
    let name = if visible { name } else { "" };
    for index in resolve_targets(option, Y_AXIS, target)? {
        option
            .entry_mut(Y_AXIS, index)?
            .insert("name".to_string(), json!(name));
    }
    Ok(())
}

pub fn set_x_axis_attr(option: &mut ChartOption, params: &Map<String, Value>) -> OptionResult<()> {
    for axis in option.entries_mut(X_AXIS)? {
        merge_into(axis, params);
    }
    Ok(())
}

pub fn set_y_axis_attr(option: &mut ChartOption, params: &Map<String, Value>) -> OptionResult<()> {
    for axis in option.entries_mut(Y_AXIS)? {
        merge_into(axis, params);
    }
    Ok(())
}
