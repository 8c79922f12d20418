use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A legend label as ECharts accepts it: a bare string or an object with `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegendEntry {
    Plain(String),
    Named(NamedLabel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLabel {
    pub name: String,
    /// Per-entry legend keys such as `icon` or `textStyle`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegendEntry {
    pub fn named(name: impl Into<String>) -> Self {
        LegendEntry::Named(NamedLabel {
            name: name.into(),
            extra: Map::new(),
        })
    }

    /// The text shown for this entry, whichever form it takes.
    pub fn display_name(&self) -> &str {
        match self {
            LegendEntry::Plain(name) => name,
            LegendEntry::Named(label) => &label.name,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            LegendEntry::Plain(name) => Value::String(name.clone()),
            LegendEntry::Named(label) => {
                let mut obj = label.extra.clone();
                obj.insert("name".to_string(), Value::String(label.name.clone()));
                Value::Object(obj)
            }
        }
    }
}

impl From<&str> for LegendEntry {
    fn from(name: &str) -> Self {
        LegendEntry::Plain(name.to_string())
    }
}

impl From<String> for LegendEntry {
    fn from(name: String) -> Self {
        LegendEntry::Plain(name)
    }
}

/// Build plain legend entries from anything string-like.
pub fn plain_entries<I, S>(names: I) -> Vec<LegendEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(|n| LegendEntry::Plain(n.into())).collect()
}
