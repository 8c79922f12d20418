//! Shared constants for every generated option.
//!
//! `ChartDefaults` is read-only once built. Builders and the few setters that
//! need a palette entry or the default map take it by reference.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartDefaults {
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_axis_color")]
    pub axis_color: String,
    #[serde(default = "default_split_number")]
    pub split_number: u32,
    #[serde(default = "default_map_type")]
    pub map_type: String,
    #[serde(default = "default_pie_radius")]
    pub pie_radius: String,
    /// Pie `center`; left to ECharts when unset.
    #[serde(default)]
    pub pie_center: Option<Vec<String>>,
    #[serde(default = "default_min_angle")]
    pub min_angle: u32,
    /// Tooltip delay in ms for item-triggered charts (pie, map).
    #[serde(default = "default_show_delay")]
    pub show_delay: u32,
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f64,
}

fn default_palette() -> Vec<String> {
    ["#6265F0", "#F8AF29", "#FB4444", "#FF7A3A"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}
fn default_axis_color() -> String { "#55B9F7".to_string() }
fn default_split_number() -> u32 { 5 }
fn default_map_type() -> String { "china".to_string() }
fn default_pie_radius() -> String { "45%".to_string() }
fn default_min_angle() -> u32 { 5 }
fn default_show_delay() -> u32 { 200 }
fn default_transition_duration() -> f64 { 0.8 }

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            axis_color: default_axis_color(),
            split_number: default_split_number(),
            map_type: default_map_type(),
            pie_radius: default_pie_radius(),
            pie_center: None,
            min_angle: default_min_angle(),
            show_delay: default_show_delay(),
            transition_duration: default_transition_duration(),
        }
    }
}

impl ChartDefaults {
    /// Load defaults from a JSON file. Missing keys keep their built-in value.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let defaults: Self = serde_json::from_str(text)?;
        if defaults.palette.is_empty() {
            anyhow::bail!("palette must contain at least one color");
        }
        Ok(defaults)
    }

    /// The color cycle written to `option.color`.
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Palette entry for the i-th series, wrapping around.
    pub fn color_at(&self, index: usize) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        Some(&self.palette[index % self.palette.len()])
    }
}
