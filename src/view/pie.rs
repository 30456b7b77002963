use serde::Serialize;

use super::{PieStyle, ViewOptions};
use crate::data::filter::SiteSelector;
use crate::query::ProportionResult;

/// Labeled-value series for the proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieView {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    /// Shown instead of slices when there is nothing to draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PieView {
    /// An empty chart carrying a user-visible message.
    pub fn placeholder(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            labels: Vec::new(),
            values: Vec::new(),
            hole: None,
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn pie_title(selector: &SiteSelector, result: &ProportionResult, options: &ViewOptions) -> String {
    match (selector, result) {
        (SiteSelector::AllSites, ProportionResult::BySite(_)) => {
            "Total Success Launches by Site".to_string()
        }
        (SiteSelector::AllSites, ProportionResult::ByClass(_)) => {
            format!("Total Success vs Failure for {}", options.all_sites_label)
        }
        (SiteSelector::Site(site), _) => format!("Total Success vs Failure for {site}"),
    }
}

pub fn pie_view(result: &ProportionResult, selector: &SiteSelector, options: &ViewOptions) -> PieView {
    let title = pie_title(selector, result, options);

    let (labels, values): (Vec<String>, Vec<usize>) = match result {
        ProportionResult::BySite(counts) => counts.iter().map(|c| (c.site.clone(), c.successes)).unzip(),
        ProportionResult::ByClass(counts) => counts
            .iter()
            .map(|c| (c.class.label().to_string(), c.count))
            .unzip(),
    };

    let message = if values.is_empty() {
        Some(format!("No launches recorded for {}", selector.site().unwrap_or(&options.all_sites_label)))
    } else {
        None
    };

    PieView {
        title,
        labels,
        values,
        hole: match options.pie_style {
            PieStyle::Labelled => None,
            PieStyle::Donut { hole } => Some(hole),
        },
        message,
    }
}
