use serde::Serialize;

use super::{PointSize, ViewOptions};
use crate::color::ColorMap;
use crate::data::filter::SiteSelector;
use crate::data::model::{columns, Dataset, LaunchRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverInfo {
    pub launch_site: String,
    pub booster_version: Option<String>,
    pub mission_outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
}

/// Parallel arrays for the payload/outcome scatter plot; index `i` of
/// every array describes the same launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    pub category: Vec<String>,
    pub color: Vec<String>,
    pub size: Vec<f64>,
    pub hover: Vec<HoverInfo>,
    /// Categories present in this view, first-appearance order.
    pub legend: Vec<LegendEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScatterView {
    fn empty(title: String) -> Self {
        Self {
            title,
            x_label: columns::PAYLOAD_MASS.to_string(),
            y_label: columns::CLASS.to_string(),
            x: Vec::new(),
            y: Vec::new(),
            category: Vec::new(),
            color: Vec::new(),
            size: Vec::new(),
            hover: Vec::new(),
            legend: Vec::new(),
            message: None,
        }
    }

    /// An empty chart carrying a user-visible message.
    pub fn placeholder(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(title.into())
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

pub fn scatter_title(selector: &SiteSelector, options: &ViewOptions) -> String {
    let scope = selector.site().unwrap_or(&options.all_sites_label);
    format!("Correlation between Payload and Success for {scope}")
}

/// `dataset` supplies the colour map and the payload domain for sizing;
/// only `records` are plotted.
pub fn scatter_view(
    records: &[&LaunchRecord],
    selector: &SiteSelector,
    dataset: &Dataset,
    options: &ViewOptions,
) -> ScatterView {
    let title = scatter_title(selector, options);
    if records.is_empty() {
        return ScatterView::placeholder(title, "No launches in the selected payload range");
    }

    let colors = ColorMap::new(dataset.booster_categories());
    let mut view = ScatterView::empty(title);

    for rec in records {
        view.x.push(rec.payload_mass_kg);
        view.y.push(rec.outcome.value());
        view.category.push(rec.booster_category.clone());
        view.color.push(colors.color_for(&rec.booster_category).to_string());
        view.size.push(point_size(rec.payload_mass_kg, dataset, options.point_size));
        view.hover.push(HoverInfo {
            launch_site: rec.launch_site.clone(),
            booster_version: rec.booster_version.clone(),
            mission_outcome: rec.mission_outcome.clone(),
        });
        if !view.legend.iter().any(|e| e.category == rec.booster_category) {
            view.legend.push(LegendEntry {
                category: rec.booster_category.clone(),
                color: colors.color_for(&rec.booster_category).to_string(),
            });
        }
    }
    view
}

fn point_size(mass: f64, dataset: &Dataset, sizing: PointSize) -> f64 {
    match sizing {
        PointSize::Fixed { size } => size,
        PointSize::Payload { min, max } => {
            let span = dataset.max_payload() - dataset.min_payload();
            if span <= 0.0 {
                return min;
            }
            let t = ((mass - dataset.min_payload()) / span).clamp(0.0, 1.0);
            min + t * (max - min)
        }
    }
}
