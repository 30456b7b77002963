//! Configuration file support.
//!
//! Search order:
//! 1. Explicit path (`--config` CLI flag)
//! 2. `launch-dash.json` in the working directory
//! 3. Built-in defaults
//!
//! All fields are optional; unknown fields are rejected.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::query::QueryOptions;
use crate::view::{PieStyle, PointSize, ViewOptions};

pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.json";

/// Query and view variants for one dashboard deployment.
///
/// ```json
/// {
///   "query": { "bounds": "exclusive", "all_sites": "by_class" },
///   "view": { "all_sites_label": "All", "pie_style": { "kind": "donut", "hole": 0.3 } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub query: QueryOptions,
    pub view: ViewOptions,
}

impl DashboardConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Explicit path wins; otherwise look for [`DEFAULT_CONFIG_FILE`] in `dir`.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("using config file {}", candidate.display());
            return Self::from_path(&candidate);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        // comparisons are written so NaN fails them
        let slider = &self.view.slider;
        for (name, value) in [
            ("min", slider.min),
            ("max", slider.max),
            ("step", slider.step),
            ("mark_every", slider.mark_every),
        ] {
            if !value.is_finite() {
                bail!("slider.{name} must be finite, got {value}");
            }
        }
        if !(slider.step > 0.0) {
            bail!("slider.step must be positive, got {}", slider.step);
        }
        if !(slider.min < slider.max) {
            bail!("slider.min ({}) must be below slider.max ({})", slider.min, slider.max);
        }
        if slider.mark_every > 0.0 && slider.mark_every < slider.step {
            bail!(
                "slider.mark_every ({}) must be 0 (no marks) or at least slider.step ({})",
                slider.mark_every,
                slider.step
            );
        }
        match self.view.point_size {
            PointSize::Fixed { size } if !(size > 0.0 && size.is_finite()) => {
                bail!("point_size.size must be positive, got {size}")
            }
            PointSize::Payload { min, max } if !(min > 0.0 && min <= max && max.is_finite()) => {
                bail!("point_size range [{min}, {max}] must be positive and ordered")
            }
            _ => {}
        }
        if let PieStyle::Donut { hole } = self.view.pie_style {
            if !(0.0..1.0).contains(&hole) {
                bail!("pie_style.hole must be in [0, 1), got {hole}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::RangeBounds;
    use crate::query::AllSitesAggregation;

    #[test]
    fn empty_object_is_default() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.query.bounds, RangeBounds::Inclusive);
        assert_eq!(config.query.all_sites, AllSitesAggregation::SuccessesOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn variant_options_parse() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "query": { "bounds": "exclusive", "all_sites": "by_class" },
                "view": {
                    "all_sites_label": "All",
                    "pie_style": { "kind": "donut", "hole": 0.3 },
                    "point_size": { "kind": "payload", "min": 4, "max": 18 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.query.bounds, RangeBounds::Exclusive);
        assert_eq!(config.query.all_sites, AllSitesAggregation::ByClass);
        assert_eq!(config.view.all_sites_label, "All");
        assert_eq!(config.view.pie_style, PieStyle::Donut { hole: 0.3 });
        assert_eq!(config.view.point_size, PointSize::Payload { min: 4.0, max: 18.0 });
        assert_eq!(config.view.slider.step, 1000.0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_json::from_str::<DashboardConfig>(r#"{ "theme": "dark" }"#).is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = DashboardConfig::default();
        config.view.pie_style = PieStyle::Donut { hole: 1.0 };
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.slider.step = 0.0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.point_size = PointSize::Payload { min: 10.0, max: 2.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_and_dense_marks() {
        let mut config = DashboardConfig::default();
        config.view.slider.step = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.slider.max = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.slider.min = f64::NEG_INFINITY;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.point_size = PointSize::Fixed { size: f64::NAN };
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.view.slider.mark_every = 0.0001;
        assert!(config.validate().is_err());

        // no marks at all is allowed
        let mut config = DashboardConfig::default();
        config.view.slider.mark_every = 0.0;
        assert!(config.validate().is_ok());
        config.view.slider.mark_every = config.view.slider.step;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn discover_prefers_explicit_then_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            DashboardConfig::discover(None, dir.path()).unwrap(),
            DashboardConfig::default()
        );

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "query": { "bounds": "exclusive" } }"#,
        )
        .unwrap();
        let found = DashboardConfig::discover(None, dir.path()).unwrap();
        assert_eq!(found.query.bounds, RangeBounds::Exclusive);

        let explicit = dir.path().join("other.json");
        std::fs::write(&explicit, r#"{ "view": { "all_sites_label": "All" } }"#).unwrap();
        let chosen = DashboardConfig::discover(Some(&explicit), dir.path()).unwrap();
        assert_eq!(chosen.query.bounds, RangeBounds::Inclusive);
        assert_eq!(chosen.view.all_sites_label, "All");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(DashboardConfig::discover(Some(&missing), dir.path()).is_err());
    }
}
