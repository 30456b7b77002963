use serde::Serialize;

use super::ViewOptions;
use crate::data::filter::ALL_SITES;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// All-sites entry first, then every site in dataset order.
pub fn site_options(dataset: &Dataset, options: &ViewOptions) -> Vec<SiteOption> {
    std::iter::once(SiteOption {
        label: options.all_sites_label.clone(),
        value: ALL_SITES.to_string(),
    })
    .chain(dataset.sites().iter().map(|site| SiteOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    /// Initial selection: the dataset's payload bounds.
    pub value: [f64; 2],
}

/// Slider over the configured domain, widened when the data falls outside it.
pub fn payload_slider(dataset: &Dataset, options: &ViewOptions) -> RangeSlider {
    let cfg = options.slider;
    let min = cfg.min.min(dataset.min_payload());
    let max = cfg.max.max(dataset.max_payload());

    let mut marks = Vec::new();
    // marks never come more often than the step
    if cfg.mark_every.is_finite() && cfg.mark_every > 0.0 && cfg.mark_every >= cfg.step {
        let mut value = min;
        while value <= max {
            marks.push(SliderMark {
                value,
                label: mark_label(value),
            });
            value += cfg.mark_every;
        }
    }
    if marks.last().map(|m| m.value) != Some(max) {
        marks.push(SliderMark {
            value: max,
            label: mark_label(max),
        });
    }

    RangeSlider {
        min,
        max,
        step: cfg.step,
        marks,
        value: [dataset.min_payload(), dataset.max_payload()],
    }
}

/// `7500.0` → `"7 500"`.
fn mark_label(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn dataset(masses: &[f64]) -> Dataset {
        let records = masses
            .iter()
            .enumerate()
            .map(|(i, &m)| LaunchRecord::new(format!("Site{}", i % 2), m, OutcomeClass::Success))
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn dropdown_starts_with_all_sites() {
        let ds = dataset(&[100.0, 200.0, 300.0]);
        let opts = site_options(&ds, &ViewOptions::default());
        let values: Vec<&str> = opts.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["ALL", "Site0", "Site1"]);
        assert_eq!(opts[0].label, "All Sites");

        let custom = ViewOptions {
            all_sites_label: "All".to_string(),
            ..ViewOptions::default()
        };
        assert_eq!(site_options(&ds, &custom)[0].label, "All");
    }

    #[test]
    fn slider_marks_use_space_thousands_separator() {
        let ds = dataset(&[0.0, 9600.0]);
        let slider = payload_slider(&ds, &ViewOptions::default());
        let labels: Vec<&str> = slider.marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["0", "2 500", "5 000", "7 500", "10 000"]);
        assert_eq!(slider.step, 1000.0);
        assert_eq!(slider.value, [0.0, 9600.0]);
    }

    #[test]
    fn slider_widens_to_cover_heavy_payloads() {
        let ds = dataset(&[500.0, 15600.0]);
        let slider = payload_slider(&ds, &ViewOptions::default());
        assert_eq!(slider.max, 15600.0);
        assert_eq!(slider.marks.last().unwrap().label, "15 600");
    }

    #[test]
    fn marks_denser_than_step_are_skipped() {
        let ds = dataset(&[0.0, 9600.0]);
        let mut options = ViewOptions::default();
        options.slider.mark_every = 0.0001;
        let slider = payload_slider(&ds, &options);
        let labels: Vec<&str> = slider.marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["10 000"]);
    }

    #[test]
    fn mark_labels() {
        assert_eq!(mark_label(0.0), "0");
        assert_eq!(mark_label(999.0), "999");
        assert_eq!(mark_label(1000.0), "1 000");
        assert_eq!(mark_label(1234567.0), "1 234 567");
    }
}
