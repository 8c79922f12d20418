use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run echarts-config with arguments and stdin input
fn run_echarts_config(args: &[&str], stdin_content: &str) -> Result<String, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_echarts-config"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_content.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn run_json(args: &[&str], stdin_content: &str) -> Value {
    let out = run_echarts_config(args, stdin_content).expect("command failed");
    serde_json::from_str(&out).expect("output is not valid JSON")
}

#[test]
fn test_end_to_end_line_chart() {
    let csv = fs::read_to_string("test/temperature.csv").expect("Failed to read test CSV");
    let option = run_json(&["line", "--title", "Temp"], &csv);
    assert_eq!(option["title"]["text"], "Temp");
    assert_eq!(option["series"].as_array().unwrap().len(), 2);
    assert_eq!(option["series"][0]["name"], "Low");
    assert_eq!(option["series"][1]["data"], serde_json::json!([22, 25, 32]));
    assert_eq!(option["xAxis"][0]["data"], serde_json::json!(["May", "June", "July"]));
    assert_eq!(option["yAxis"].as_array().unwrap().len(), 2);
}

#[test]
fn test_end_to_end_bar_chart_from_json() {
    let request = fs::read_to_string("test/request.json").expect("Failed to read request");
    let option = run_json(&["bar", "--format", "json"], &request);
    assert_eq!(option["title"]["text"], "Rainfall");
    assert_eq!(option["series"][0]["type"], "bar");
    assert_eq!(option["series"][0]["name"], "Evaporation");
    // three series share one value axis
    assert_eq!(option["yAxis"], serde_json::json!([{"type": "value"}]));
    assert_eq!(option["tooltip"]["formatter"], "{b}: {c} mm");
}

#[test]
fn test_end_to_end_pie_chart() {
    let csv = fs::read_to_string("test/share.csv").expect("Failed to read test CSV");
    let option = run_json(&["pie", "--max", "400", "--compact"], &csv);
    assert_eq!(option["series"].as_array().unwrap().len(), 1);
    assert_eq!(option["series"][0]["data"].as_array().unwrap().len(), 3);
    assert_eq!(option["legend"]["data"], serde_json::json!(["Search", "Direct", "Email"]));
    assert_eq!(
        option["toolbox"]["feature"]["magicType"]["option"]["funnel"]["max"],
        400.0
    );
}

#[test]
fn test_end_to_end_map_with_config() {
    let csv = fs::read_to_string("test/provinces.csv").expect("Failed to read test CSV");
    let option = run_json(&["map", "--config", "test/defaults.json"], &csv);
    assert_eq!(option["series"][0]["mapType"], "world");
    assert_eq!(option["series"][1]["data"][2]["value"], Value::Null);
    assert_eq!(option["color"], serde_json::json!(["#112233", "#445566"]));
    assert_eq!(option["legend"]["show"], false);
}

#[test]
fn test_js_output_inlines_functions() {
    let csv = fs::read_to_string("test/provinces.csv").expect("Failed to read test CSV");
    let out = run_echarts_config(&["map", "--js"], &csv).expect("command failed");
    assert!(out.contains("\"formatter\": function (value) { return parseInt(value, 10); }"));
}

#[test]
fn test_mismatched_request_fails() {
    let request = r#"{"title": "Share", "legend": ["A", "B"], "series": [{"name": "A", "value": 1}]}"#;
    let result = run_echarts_config(&["pie", "--format", "json"], request);
    let err = result.expect_err("mismatched lengths should fail");
    assert!(err.contains("legend has 2 entries but series data has 1"), "stderr: {}", err);
}

#[test]
fn test_unknown_kind_fails() {
    let result = run_echarts_config(&["radar"], "a,b\n1,2\n");
    assert!(result.is_err());
}
