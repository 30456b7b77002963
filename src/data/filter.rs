use serde::{Deserialize, Serialize};

use super::model::{Dataset, LaunchRecord};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

/// Which launch site(s) a query covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelector {
    /// Interpret a raw dropdown value; [`ALL_SITES`] is the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::AllSites
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    /// The dropdown value this selector round-trips to.
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::AllSites => ALL_SITES,
            SiteSelector::Site(site) => site,
        }
    }

    pub fn site(&self) -> Option<&str> {
        match self {
            SiteSelector::AllSites => None,
            SiteSelector::Site(site) => Some(site),
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelector::AllSites => true,
            SiteSelector::Site(site) => record.launch_site == *site,
        }
    }

    /// A specific site must exist in the dataset.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), QueryError> {
        match self {
            SiteSelector::Site(site) if !dataset.contains_site(site) => {
                Err(QueryError::InvalidSelector(site.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl From<SiteSelector> for String {
    fn from(selector: SiteSelector) -> String {
        selector.value().to_string()
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Whether range endpoints themselves pass the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBounds {
    /// `low <= mass <= high`
    #[default]
    Inclusive,
    /// `low < mass < high`
    Exclusive,
}

/// Payload-mass interval in kilograms.
///
/// Not validated on construction; queries reject `low > high` and treat
/// bounds outside the dataset domain as an ordinary (possibly empty) match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The range covering every record of `dataset`.
    pub fn full(dataset: &Dataset) -> Self {
        Self::new(dataset.min_payload(), dataset.max_payload())
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        // written so NaN endpoints fail too
        if self.low <= self.high {
            Ok(())
        } else {
            Err(QueryError::InvalidRange {
                low: self.low,
                high: self.high,
            })
        }
    }

    pub fn contains(&self, mass: f64, bounds: RangeBounds) -> bool {
        match bounds {
            RangeBounds::Inclusive => self.low <= mass && mass <= self.high,
            RangeBounds::Exclusive => self.low < mass && mass < self.high,
        }
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Records of `dataset` matching `selector`, in dataset order.
pub fn site_records<'a: 's, 's>(
    dataset: &'a Dataset,
    selector: &'s SiteSelector,
) -> impl Iterator<Item = &'a LaunchRecord> + 's {
    dataset.records().iter().filter(move |rec| selector.matches(rec))
}

/// Records inside `range` and matching `selector`, in dataset order.
pub fn matching_records<'a: 's, 's>(
    dataset: &'a Dataset,
    selector: &'s SiteSelector,
    range: PayloadRange,
    bounds: RangeBounds,
) -> impl Iterator<Item = &'a LaunchRecord> + 's {
    site_records(dataset, selector).filter(move |rec| range.contains(rec.payload_mass_kg, bounds))
}
