//! The option object handed to ECharts.
//!
//! The tree itself is schemaless JSON. Formatters written into it are also
//! remembered by JSON pointer so they can be evaluated or emitted as raw
//! JavaScript later.

use crate::error::{OptionError, OptionResult};
use crate::formatter::{FormatParams, Formatter};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOption {
    root: Map<String, Value>,
    formatters: BTreeMap<String, Formatter>,
}

impl ChartOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing option tree. The root must be an object.
    pub fn from_value(value: Value) -> OptionResult<Self> {
        match value {
            Value::Object(root) => Ok(Self {
                root,
                formatters: BTreeMap::new(),
            }),
            _ => Err(OptionError::InvalidRoot),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// RFC 6901 lookup, e.g. `"/series/0/name"`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let value = self.root.get(&head)?;
        if tail.is_empty() {
            Some(value)
        } else {
            value.pointer(tail)
        }
    }

    /// Set a top-level field, returning the previous value.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.root.insert(key.to_string(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.remove(key)
    }

    /// Length of a top-level array such as `series`; 0 when absent.
    pub fn len_of(&self, key: &str) -> usize {
        self.root
            .get(key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    // === Formatters ===

    /// The formatter registered at `pointer`, provided the tree still holds it.
    pub fn formatter(&self, pointer: &str) -> Option<&Formatter> {
        let formatter = self.formatters.get(pointer)?;
        (self.pointer(pointer)? == &formatter.to_value()).then_some(formatter)
    }

    pub fn format_at(&self, pointer: &str, params: &FormatParams) -> Option<String> {
        self.formatter(pointer)?.format(params)
    }

    pub(crate) fn register_formatter(&mut self, pointer: String, formatter: Formatter) {
        self.formatters.insert(pointer, formatter);
    }

    // === Serialization ===

    pub fn to_json(&self) -> OptionResult<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn to_json_pretty(&self) -> OptionResult<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Pretty JSON with script formatters inlined as JavaScript functions,
    /// ready to paste into `chart.setOption(...)`.
    pub fn to_js_literal(&self) -> OptionResult<String> {
        let mut tree = Value::Object(self.root.clone());
        let mut inlined = Vec::new();
        for (pointer, formatter) in &self.formatters {
            if !formatter.is_script() || self.formatter(pointer).is_none() {
                continue;
            }
            if let (Some(slot), Value::String(source)) =
                (tree.pointer_mut(pointer), formatter.to_value())
            {
                let token = format!("__echarts_fn_{}__", inlined.len());
                *slot = Value::String(token.clone());
                inlined.push((token, source));
            }
        }

        let mut text = serde_json::to_string_pretty(&tree)?;
        for (token, source) in inlined {
            text = text.replace(&format!("\"{}\"", token), &source);
        }
        Ok(text)
    }

    // === Checked access used by the setters ===

    pub(crate) fn object_mut(&mut self, key: &str) -> OptionResult<&mut Map<String, Value>> {
        match self.root.get_mut(key) {
            Some(Value::Object(obj)) => Ok(obj),
            Some(_) => Err(OptionError::NotAnObject {
                path: key.to_string(),
            }),
            None => Err(OptionError::MissingField {
                path: key.to_string(),
            }),
        }
    }

    pub(crate) fn array_mut(&mut self, key: &str) -> OptionResult<&mut Vec<Value>> {
        match self.root.get_mut(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(OptionError::NotAnArray {
                path: key.to_string(),
            }),
            None => Err(OptionError::MissingField {
                path: key.to_string(),
            }),
        }
    }

    /// The `index`-th object of a top-level array.
    pub(crate) fn entry_mut(
        &mut self,
        key: &str,
        index: usize,
    ) -> OptionResult<&mut Map<String, Value>> {
        let items = self.array_mut(key)?;
        let len = items.len();
        match items.get_mut(index) {
            Some(Value::Object(obj)) => Ok(obj),
            Some(_) => Err(OptionError::NotAnObject {
                path: format!("{}[{}]", key, index),
            }),
            None => Err(OptionError::IndexOutOfRange {
                field: key.to_string(),
                index,
                len,
            }),
        }
    }

    /// Every object of a top-level array, in order.
    pub(crate) fn entries_mut(&mut self, key: &str) -> OptionResult<Vec<&mut Map<String, Value>>> {
        self.array_mut(key)?
            .iter_mut()
            .enumerate()
            .map(|(i, item)| {
                item.as_object_mut().ok_or_else(|| OptionError::NotAnObject {
                    path: format!("{}[{}]", key, i),
                })
            })
            .collect()
    }
}

/// Get or create the object stored under `key`. A non-object value is replaced.
pub(crate) fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> OptionResult<&'a mut Map<String, Value>> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut().ok_or_else(|| OptionError::NotAnObject {
        path: key.to_string(),
    })
}

/// Copy every key of `params` onto `target`.
pub(crate) fn merge_into(target: &mut Map<String, Value>, params: &Map<String, Value>) {
    for (key, value) in params {
        target.insert(key.clone(), value.clone());
    }
}

impl Serialize for ChartOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl From<ChartOption> for Value {
    fn from(option: ChartOption) -> Self {
        option.into_value()
    }
}
