//! Setters for the chart furniture: title, legend, toolbox, tooltip, grid and
//! the map-only visual map and roam controller.

use crate::defaults::ChartDefaults;
use crate::error::{OptionError, OptionResult};
use crate::formatter::Formatter;
use crate::option::{merge_into, ChartOption};
use serde_json::{json, Map, Value};

/// Layout direction for the legend and toolbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Horizontal,
    Vertical,
}

impl Orient {
    pub fn as_str(self) -> &'static str {
        match self {
            Orient::Horizontal => "horizontal",
            Orient::Vertical => "vertical",
        }
    }
}

fn set(option: &mut ChartOption, component: &str, field: &str, value: Value) -> OptionResult<()> {
    option
        .object_mut(component)?
        .insert(field.to_string(), value);
    Ok(())
}

fn set_formatter(option: &mut ChartOption, component: &str, formatter: Formatter) -> OptionResult<()> {
    set(option, component, "formatter", formatter.to_value())?;
    option.register_formatter(format!("/{}/formatter", component), formatter);
    Ok(())
}

/// Place a component. `x` takes `"left" | "center" | "right"` or pixels, `y`
/// takes `"top" | "center" | "bottom"` or pixels.
fn set_position(
    option: &mut ChartOption,
    component: &str,
    orient: Option<Orient>,
    x: Value,
    y: Value,
) -> OptionResult<()> {
    let target = option.object_mut(component)?;
    if let Some(orient) = orient {
        target.insert("orient".to_string(), json!(orient.as_str()));
    }
    target.insert("x".to_string(), x);
    target.insert("y".to_string(), y);
    Ok(())
}

// === Title ===

/// Set the heading text, creating `title` when the option has none.
pub fn set_title_text(option: &mut ChartOption, text: &str) -> OptionResult<()> {
    if !matches!(option.get("title"), Some(Value::Object(_))) {
        option.insert("title", json!({ "text": text }));
        return Ok(());
    }
    set(option, "title", "text", json!(text))
}

pub fn set_title_visible(option: &mut ChartOption, show: bool) -> OptionResult<()> {
    set(option, "title", "show", json!(show))
}

pub fn set_title_position(
    option: &mut ChartOption,
    x: impl Into<Value>,
    y: impl Into<Value>,
) -> OptionResult<()> {
    set_position(option, "title", None, x.into(), y.into())
}

// === Legend ===

pub fn set_legend_visible(option: &mut ChartOption, show: bool) -> OptionResult<()> {
    set(option, "legend", "show", json!(show))
}

pub fn set_legend_position(
    option: &mut ChartOption,
    orient: Orient,
    x: impl Into<Value>,
    y: impl Into<Value>,
) -> OptionResult<()> {
    set_position(option, "legend", Some(orient), x.into(), y.into())
}

pub fn set_legend_attr(option: &mut ChartOption, params: &Map<String, Value>) -> OptionResult<()> {
    merge_into(option.object_mut("legend")?, params);
    Ok(())
}

pub fn set_legend_text_style(option: &mut ChartOption, text_style: &Value) -> OptionResult<()> {
    set(option, "legend", "textStyle", text_style.clone())
}

/// Give every legend entry `icon`, a built-in shape name or `image://` path.
/// Plain string entries become `{name, icon}` objects.
pub fn set_legend_icon(option: &mut ChartOption, icon: &str) -> OptionResult<()> {
    let legend = option.object_mut("legend")?;
    let Some(Value::Array(entries)) = legend.get_mut("data") else {
        return Err(OptionError::MissingField {
            path: "legend.data".to_string(),
        });
    };
    for entry in entries.iter_mut() {
        match entry {
            Value::Object(obj) => {
                obj.insert("icon".to_string(), json!(icon));
            }
            Value::String(name) => {
                let name = std::mem::take(name);
                *entry = json!({ "name": name, "icon": icon });
            }
            _ => {}
        }
    }
    Ok(())
}

/// `true`, `false`, `"single"` or `"multiple"`.
pub fn set_legend_selected_mode(option: &mut ChartOption, mode: impl Into<Value>) -> OptionResult<()> {
    set(option, "legend", "selectedMode", mode.into())
}

pub fn set_legend_formatter(option: &mut ChartOption, formatter: Formatter) -> OptionResult<()> {
    set_formatter(option, "legend", formatter)
}

// === Toolbox ===

pub fn set_toolbox_visible(option: &mut ChartOption, show: bool) -> OptionResult<()> {
    set(option, "toolbox", "show", json!(show))
}

pub fn disable_toolbox(option: &mut ChartOption) -> OptionResult<()> {
    set_toolbox_visible(option, false)
}

pub fn set_toolbox_position(
    option: &mut ChartOption,
    orient: Orient,
    x: impl Into<Value>,
    y: impl Into<Value>,
) -> OptionResult<()> {
    set_position(option, "toolbox", Some(orient), x.into(), y.into())
}

// === Tooltip ===

pub fn set_tooltip_text_style(option: &mut ChartOption, text_style: &Value) -> OptionResult<()> {
    set(option, "tooltip", "textStyle", text_style.clone())
}

pub fn set_tooltip_formatter(option: &mut ChartOption, formatter: Formatter) -> OptionResult<()> {
    set_formatter(option, "tooltip", formatter)
}

/// A fixed `[x, y]` pair, or anything else ECharts accepts for `position`.
pub fn set_tooltip_position(option: &mut ChartOption, position: impl Into<Value>) -> OptionResult<()> {
    set(option, "tooltip", "position", position.into())
}

pub fn set_tooltip_attr(option: &mut ChartOption, params: &Map<String, Value>) -> OptionResult<()> {
    merge_into(option.object_mut("tooltip")?, params);
    Ok(())
}

// === Grid ===

/// Plot-area margins, created when the option has no `grid` yet.
pub fn set_grid(
    option: &mut ChartOption,
    left: impl Into<Value>,
    top: impl Into<Value>,
    right: impl Into<Value>,
    bottom: impl Into<Value>,
) -> OptionResult<()> {
    let bounds = [
        ("left", left.into()),
        ("top", top.into()),
        ("right", right.into()),
        ("bottom", bottom.into()),
    ];
    if option.get("grid").is_none() {
        option.insert("grid", Map::new());
    }
    let grid = option.object_mut("grid")?;
    for (key, value) in bounds {
        grid.insert(key.to_string(), value);
    }
    Ok(())
}

// === Map extras ===

pub fn set_visual_map(option: &mut ChartOption, visual_map: Value) -> OptionResult<()> {
    option.insert("visualMap", visual_map);
    Ok(())
}

/// Add the pan/zoom controller for map charts.
pub fn set_map_roam(option: &mut ChartOption, defaults: &ChartDefaults) -> OptionResult<()> {
    let mut map_type_control = Map::new();
    map_type_control.insert(defaults.map_type.clone(), json!(true));
    option.insert(
        "roamController",
        json!({
            "show": true,
            "x": "left",
            "width": 50,
            "height": 80,
            "handleColor": defaults.axis_color,
            "mapTypeControl": map_type_control,
        }),
    );
    Ok(())
}
