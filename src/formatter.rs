//! Label formatters.
//!
//! ECharts accepts either a template string (`"{b}: {c}"`) or a JavaScript
//! callback for every `formatter` field. The callbacks this crate ships are
//! modelled as variants so they can be evaluated on the Rust side too;
//! arbitrary callbacks travel as opaque source text.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alphanumeric1, char},
    combinator::map,
    multi::many0,
    sequence::delimited,
    IResult,
};
use serde_json::Value;

const PERCENT_SOURCE: &str = "function (value) { return value * 100 + '%'; }";
const INTEGER_SOURCE: &str = "function (value) { return parseInt(value, 10); }";

#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// ECharts string template, e.g. `"{value} °C"`.
    Template(String),
    /// `value * 100 + '%'`
    Percent,
    /// `parseInt(value, 10)`
    Integer,
    /// JavaScript function source, passed through untouched.
    Script(String),
}

/// Values available to a formatter. Mirrors the `{a}` `{b}` `{c}` `{d}` slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatParams {
    pub series_name: Option<String>,
    pub name: Option<String>,
    pub value: Value,
    pub percent: Option<f64>,
}

impl FormatParams {
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

impl Formatter {
    pub fn template(text: impl Into<String>) -> Self {
        Formatter::Template(text.into())
    }

    pub fn script(source: impl Into<String>) -> Self {
        Formatter::Script(source.into())
    }

    /// True when the serialized form is function source rather than a template.
    pub fn is_script(&self) -> bool {
        !matches!(self, Formatter::Template(_))
    }

    /// What ends up in the option tree.
    pub fn to_value(&self) -> Value {
        match self {
            Formatter::Template(text) => Value::String(text.clone()),
            Formatter::Percent => Value::String(PERCENT_SOURCE.to_string()),
            Formatter::Integer => Value::String(INTEGER_SOURCE.to_string()),
            Formatter::Script(source) => Value::String(source.clone()),
        }
    }

    /// Render label text. `Script` formatters cannot run here and yield `None`.
    pub fn format(&self, params: &FormatParams) -> Option<String> {
        match self {
            Formatter::Template(text) => Some(render_template(text, params)),
            Formatter::Percent => {
                let n = to_number(&params.value);
                Some(format!("{}%", js_number(n * 100.0)))
            }
            Formatter::Integer => Some(parse_int(&params.value)),
            Formatter::Script(_) => None,
        }
    }

    pub fn format_value(&self, value: impl Into<Value>) -> Option<String> {
        self.format(&FormatParams::value(value))
    }
}

// === Template parsing ===

#[derive(Debug, Clone, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn placeholder(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(char('{'), alphanumeric1, char('}')),
        Segment::Placeholder,
    )(input)
}

fn literal(input: &str) -> IResult<&str, Segment<'_>> {
    map(is_not("{"), Segment::Literal)(input)
}

fn lone_brace(input: &str) -> IResult<&str, Segment<'_>> {
    map(tag("{"), Segment::Literal)(input)
}

fn parse_template(input: &str) -> IResult<&str, Vec<Segment<'_>>> {
    many0(alt((placeholder, literal, lone_brace)))(input)
}

fn render_template(text: &str, params: &FormatParams) -> String {
    let segments = match parse_template(text) {
        Ok((_, segments)) => segments,
        Err(_) => return text.to_string(),
    };

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Placeholder(name) => {
                // {a0}, {b1} ... index into multi-series tooltips; a single
                // params record answers every index.
                let key = name.trim_end_matches(|c: char| c.is_ascii_digit());
                match key {
                    "a" => out.push_str(params.series_name.as_deref().unwrap_or("")),
                    "b" => out.push_str(params.name.as_deref().unwrap_or("")),
                    "c" | "value" => out.push_str(&value_text(&params.value)),
                    "d" => {
                        if let Some(p) = params.percent {
                            out.push_str(&js_number(p));
                        }
                    }
                    _ => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
            }
        }
    }
    out
}

// === JavaScript value semantics ===

/// Print a number the way JavaScript's `String(n)` does: shortest
/// round-trip digits, exponent form below 1e-6 and from 1e21 up.
pub(crate) fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        format!("{}", n)
    } else {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(js_number).unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    }
}

fn parse_int(value: &Value) -> String {
    let text = value_text(value);
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return "NaN".to_string();
    }
    let trimmed = digits[..end].trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        format!("{}{}", sign, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percent() {
        assert_eq!(Formatter::Percent.format_value(0.5), Some("50%".to_string()));
        assert_eq!(Formatter::Percent.format_value(1), Some("100%".to_string()));
        assert_eq!(Formatter::Percent.format_value("0.25"), Some("25%".to_string()));
    }

    #[test]
    fn test_integer() {
        assert_eq!(Formatter::Integer.format_value(12.7), Some("12".to_string()));
        assert_eq!(Formatter::Integer.format_value("-3.9x"), Some("-3".to_string()));
        assert_eq!(Formatter::Integer.format_value("abc"), Some("NaN".to_string()));
    }

    #[test]
    fn test_template_placeholders() {
        let params = FormatParams {
            series_name: Some("Sales".to_string()),
            name: Some("May".to_string()),
            value: json!(42),
            percent: Some(12.5),
        };
        let f = Formatter::template("{a}<br/>{b}: {c} ({d}%)");
        assert_eq!(f.format(&params).unwrap(), "Sales<br/>May: 42 (12.5%)");

        let f = Formatter::template("{b0}: {value} °C");
        assert_eq!(f.format(&params).unwrap(), "May: 42 °C");
    }

    #[test]
    fn test_template_unknown_and_unclosed() {
        let f = Formatter::template("{x} and {value");
        assert_eq!(f.format_value(1).unwrap(), "{x} and {value");
    }

    #[test]
    fn test_script_is_opaque() {
        let f = Formatter::script("function (p) { return p.name; }");
        assert!(f.is_script());
        assert_eq!(f.format_value(1), None);
        assert_eq!(f.to_value(), json!("function (p) { return p.name; }"));
    }

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(50.0), "50");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(0.125), "0.125");
        assert_eq!(js_number(1e20), "100000000000000000000");
        assert_eq!(js_number(0.000001), "0.000001");
    }

    #[test]
    fn test_js_number_exponent_form() {
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(-2.5e30), "-2.5e+30");
        assert_eq!(js_number(1e-7), "1e-7");
        assert_eq!(
            Formatter::Percent.format_value(1e-9),
            Some("1.0000000000000001e-7%".to_string())
        );
        assert_eq!(Formatter::Integer.format_value(1e21), Some("1".to_string()));
    }
}
