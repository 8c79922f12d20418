use echarts_config::axis::{self, AxisTarget};
use echarts_config::builder::{build_default, init_default_bar, init_default_line, init_default_pie};
use echarts_config::component::{self, Orient};
use echarts_config::legend::plain_entries;
use echarts_config::series;
use echarts_config::{ChartDefaults, ChartKind, FormatParams, Formatter, LegendEntry, OptionError};
use serde_json::{json, Value};

fn temps() -> (Vec<LegendEntry>, Vec<Value>) {
    (
        plain_entries(["Low", "High"]),
        vec![json!([12, 15, 16]), json!([22, 25, 32])],
    )
}

#[test]
fn line_example_has_two_named_series_and_one_x_axis() {
    let (legend, data) = temps();
    let option = init_default_line(
        "Temp",
        &legend,
        &data,
        Some(Formatter::template("{b}: {c}")),
        &[json!("May"), json!("June"), json!("July")],
        &ChartDefaults::default(),
    )
    .expect("equal lengths build");

    assert_eq!(option.len_of("series"), 2);
    assert_eq!(option.pointer("/series/0/name"), Some(&json!("Low")));
    assert_eq!(option.len_of("xAxis"), 1);
}

#[test]
fn pie_length_mismatch_is_rejected() {
    let result = build_default(
        ChartKind::Pie,
        "Share",
        &plain_entries(["A", "B"]),
        &[json!({"name": "A", "value": 1})],
        None,
        &ChartDefaults::default(),
    );
    assert!(matches!(result, Err(OptionError::LengthMismatch { .. })));
}

#[test]
fn y_axis_count_follows_legend_size() {
    let defaults = ChartDefaults::default();
    for n in 1..=4usize {
        let names: Vec<String> = (0..n).map(|i| format!("s{}", i)).collect();
        let legend = plain_entries(names);
        let data: Vec<Value> = (0..n).map(|i| json!([i, i + 1])).collect();
        let option = init_default_bar("t", &legend, &data, None, &[json!("a"), json!("b")], &defaults)
            .unwrap();

        if n <= 2 {
            assert_eq!(option.len_of("yAxis"), n);
            for i in 0..n {
                assert_eq!(
                    option.pointer(&format!("/yAxis/{}/axisLabel/textStyle/color", i)),
                    Some(&json!(defaults.palette()[i]))
                );
            }
        } else {
            assert_eq!(option.len_of("yAxis"), 1);
        }
    }
}

#[test]
fn percent_formatter_renders_half_as_fifty() {
    let (legend, data) = temps();
    let mut option = init_default_line("Temp", &legend, &data, None, &[], &ChartDefaults::default())
        .unwrap();
    axis::set_y_axis_percent(&mut option, AxisTarget::Index(0)).unwrap();

    assert_eq!(
        option.format_at("/yAxis/0/axisLabel/formatter", &FormatParams::value(0.5)),
        Some("50%".to_string())
    );
    assert_eq!(option.formatter("/yAxis/1/axisLabel/formatter"), None);
}

#[test]
fn setters_chain_on_a_built_option() {
    let (legend, data) = temps();
    let defaults = ChartDefaults::default();
    let mut option = init_default_line(
        "Temp",
        &legend,
        &data,
        None,
        &[json!("May"), json!("June"), json!("July")],
        &defaults,
    )
    .unwrap();

    component::set_legend_position(&mut option, Orient::Horizontal, "center", "bottom").unwrap();
    component::set_grid(&mut option, "10%", 40, "10%", 60).unwrap();
    component::disable_toolbox(&mut option).unwrap();
    axis::set_x_axis_label_tilt_and_show_all(&mut option).unwrap();
    series::set_series_smooth(&mut option, true).unwrap();
    series::set_x_axis_mark_line(&mut option, "start", "June", true, 30).unwrap();

    let value = option.clone().into_value();
    assert_eq!(value["legend"]["y"], "bottom");
    assert_eq!(value["grid"]["left"], "10%");
    assert_eq!(value["toolbox"]["show"], false);
    assert_eq!(value["xAxis"][0]["axisLabel"]["rotate"], 40);
    assert_eq!(value["series"][1]["smooth"], true);
    assert_eq!(value["series"][0]["markLine"]["data"][0][1]["yAxis"], 30);
}

#[test]
fn pie_setters_require_series() {
    let mut option = init_default_pie(
        "Share",
        &plain_entries(["A"]),
        &[json!({"name": "A", "value": 1})],
        None,
        None,
        &ChartDefaults::default(),
    )
    .unwrap();
    series::set_pie_hollow(&mut option, json!(["50%", "70%"]), 0).unwrap();
    assert!(matches!(
        series::set_pie_hollow(&mut option, json!("30%"), 1),
        Err(OptionError::IndexOutOfRange { index: 1, len: 1, .. })
    ));

    let mut bare = echarts_config::ChartOption::new();
    assert!(matches!(
        series::set_series_smooth(&mut bare, true),
        Err(OptionError::MissingField { .. })
    ));
}

#[test]
fn option_serializes_as_bare_object() {
    let (legend, data) = temps();
    let option = build_default(ChartKind::Line, "Temp", &legend, &data, None, &ChartDefaults::default())
        .unwrap();
    let text = serde_json::to_string(&option).unwrap();
    let round: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(round["title"]["text"], "Temp");
    assert_eq!(round, option.into_value());
}
