use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Column names – the file contract
// ---------------------------------------------------------------------------

pub mod columns {
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const CLASS: &str = "class";
    pub const BOOSTER_VERSION: &str = "Booster Version";
    pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
    pub const MISSION_OUTCOME: &str = "Mission Outcome";
    pub const FLIGHT_NUMBER: &str = "Flight Number";

    /// Columns the loader refuses to work without.
    pub const REQUIRED: [&str; 3] = [LAUNCH_SITE, PAYLOAD_MASS, CLASS];
}

/// Category used when a row carries neither booster column.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Both classes in `class` value order.
    pub const ALL: [OutcomeClass; 2] = [OutcomeClass::Failure, OutcomeClass::Success];

    /// Accepts exactly `0` or `1` (so `1.0` from a float column is fine).
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(OutcomeClass::Failure)
        } else if value == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }

    /// Human-readable legend label.
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Failure => "Failure (0)",
            OutcomeClass::Success => "Success (1)",
        }
    }

    pub fn is_success(self) -> bool {
        self == OutcomeClass::Success
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// Serialized as the raw 0/1 value so chart y-axes can use it directly.
impl Serialize for OutcomeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: OutcomeClass,
    /// Booster version category, used to colour the scatter plot.
    pub booster_category: String,
    /// Display-only metadata, never filtered on.
    pub booster_version: Option<String>,
    pub mission_outcome: Option<String>,
    pub flight_number: Option<u32>,
}

impl LaunchRecord {
    /// Minimal record; auxiliary fields empty, category unknown.
    pub fn new(launch_site: impl Into<String>, payload_mass_kg: f64, outcome: OutcomeClass) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_category: UNKNOWN_CATEGORY.to_string(),
            booster_version: None,
            mission_outcome: None,
            flight_number: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.booster_category = category.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded, immutable launch table
// ---------------------------------------------------------------------------

/// All launch records plus indices computed once at load time.
///
/// Invariants (checked by [`Dataset::from_records`]):
/// * at least one record
/// * every `launch_site` is non-empty
/// * every `payload_mass_kg` is finite and non-negative
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-seen order.
    sites: Vec<String>,
    booster_categories: BTreeSet<String>,
    min_payload: f64,
    max_payload: f64,
}

impl Dataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::EmptyDataset);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if rec.launch_site.trim().is_empty() {
                return Err(LoadError::InvalidValue {
                    row,
                    column: columns::LAUNCH_SITE,
                    reason: "launch site is empty".to_string(),
                });
            }
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                return Err(LoadError::InvalidValue {
                    row,
                    column: columns::PAYLOAD_MASS,
                    reason: format!("{} is not a non-negative mass", rec.payload_mass_kg),
                });
            }

            if seen.insert(rec.launch_site.as_str()) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        Ok(Dataset {
            records,
            sites,
            booster_categories,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites in the order they first appear.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Sorted distinct booster categories.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Record count per site, keyed by site name.
    pub fn site_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for rec in &self.records {
            *counts.entry(rec.launch_site.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
