//! View-model adapter: query results reshaped for a charting collaborator.
//!
//! Nothing in here filters; every function is a pure mapping that keeps the
//! query layer's ordering. All view-models serialize to JSON.

use serde::{Deserialize, Serialize};

pub mod controls;
pub mod pie;
pub mod scatter;

pub use controls::{payload_slider, site_options, RangeSlider, SiteOption, SliderMark};
pub use pie::{pie_view, PieView};
pub use scatter::{scatter_view, HoverInfo, LegendEntry, ScatterView};

/// Cosmetic choices that differ between dashboard variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewOptions {
    /// Dropdown label for the all-sites entry.
    pub all_sites_label: String,
    pub dropdown_placeholder: String,
    pub pie_style: PieStyle,
    pub point_size: PointSize,
    pub slider: SliderOptions,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            all_sites_label: "All Sites".to_string(),
            dropdown_placeholder: "Select a Launch Site here".to_string(),
            pie_style: PieStyle::default(),
            point_size: PointSize::default(),
            slider: SliderOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieStyle {
    #[default]
    Labelled,
    /// Ring chart; `hole` is the inner radius fraction.
    Donut { hole: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointSize {
    Fixed { size: f64 },
    /// Linear in payload mass across the dataset's payload domain.
    Payload { min: f64, max: f64 },
}

impl Default for PointSize {
    fn default() -> Self {
        PointSize::Fixed { size: 8.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderOptions {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub mark_every: f64,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            mark_every: 2_500.0,
        }
    }
}
