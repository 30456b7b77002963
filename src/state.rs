use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::filter::{PayloadRange, SiteSelector};
use crate::data::model::Dataset;
use crate::query::Query;
use crate::view::{self, PieView, RangeSlider, ScatterView, SiteOption};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The current selections over a loaded dataset, independent of rendering.
///
/// Bad input never escapes as an error: it is logged, surfaced through
/// `status_message`, and the selection falls back to its default.
pub struct DashboardState {
    dataset: Dataset,
    config: DashboardConfig,

    /// Selected site (or all sites).
    pub selector: SiteSelector,

    /// Selected payload interval.
    pub range: PayloadRange,

    /// Last user-visible input error, cleared by the next valid input.
    pub status_message: Option<String>,
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub site_options: Vec<SiteOption>,
    pub placeholder: String,
    pub selected_site: SiteSelector,
    pub payload_slider: RangeSlider,
    pub selected_range: PayloadRange,
    pub pie: PieView,
    pub scatter: ScatterView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl DashboardState {
    /// Start on all sites over the full payload range.
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let range = PayloadRange::full(&dataset);
        Self {
            dataset,
            config,
            selector: SiteSelector::AllSites,
            range,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn query(&self) -> Query<'_> {
        Query::with_options(&self.dataset, self.config.query)
    }

    /// Apply a dropdown value; unknown sites fall back to all sites.
    pub fn select_site(&mut self, value: &str) {
        let selector = SiteSelector::from_value(value);
        match selector.validate(&self.dataset) {
            Ok(()) => {
                self.selector = selector;
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}; showing all sites");
                self.selector = SiteSelector::AllSites;
                self.status_message = Some(format!("{e}; showing all sites"));
            }
        }
    }

    /// Apply a slider value; an inverted range falls back to the full range.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let range = PayloadRange::new(low, high);
        match range.validate() {
            Ok(()) => {
                self.range = range;
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}; showing the full payload range");
                self.range = PayloadRange::full(&self.dataset);
                self.status_message = Some(format!("{e}; showing the full payload range"));
            }
        }
    }

    pub fn pie(&self) -> PieView {
        let view_options = &self.config.view;
        match self.query().success_proportions(&self.selector) {
            Ok(result) => view::pie_view(&result, &self.selector, view_options),
            Err(e) => {
                log::warn!("pie chart query failed: {e}");
                PieView::placeholder("Launch outcomes", e.to_string())
            }
        }
    }

    pub fn scatter(&self) -> ScatterView {
        let view_options = &self.config.view;
        match self.query().payload_correlation(&self.selector, self.range) {
            Ok(records) => view::scatter_view(&records, &self.selector, &self.dataset, view_options),
            Err(e) => {
                log::warn!("scatter chart query failed: {e}");
                ScatterView::placeholder("Payload vs. launch outcome", e.to_string())
            }
        }
    }

    pub fn snapshot(&self) -> DashboardView {
        let view_options = &self.config.view;
        DashboardView {
            site_options: view::site_options(&self.dataset, view_options),
            placeholder: view_options.dropdown_placeholder.clone(),
            selected_site: self.selector.clone(),
            payload_slider: view::payload_slider(&self.dataset, view_options),
            selected_range: self.range,
            pie: self.pie(),
            scatter: self.scatter(),
            status: self.status_message.clone(),
        }
    }
}
