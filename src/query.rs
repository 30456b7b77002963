//! Query layer: what each chart should display for a given selection.
//!
//! Both operations are pure reads over a shared [`Dataset`]; calling them
//! twice with the same inputs yields the same output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::filter::{matching_records, site_records, PayloadRange, RangeBounds, SiteSelector};
use crate::data::model::{Dataset, LaunchRecord, OutcomeClass};
use crate::error::QueryError;

/// How the "all sites" pie aggregates outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllSitesAggregation {
    /// Success count per site.
    #[default]
    SuccessesOnly,
    /// Failure/success counts across every site.
    ByClass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryOptions {
    pub bounds: RangeBounds,
    pub all_sites: AllSitesAggregation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCount {
    pub site: String,
    pub successes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    pub class: OutcomeClass,
    pub count: usize,
}

/// Aggregated outcome counts for the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "counts", rename_all = "snake_case")]
pub enum ProportionResult {
    /// One entry per site, first-seen order.
    BySite(Vec<SiteCount>),
    /// Failure then success; a class with no records is omitted.
    ByClass(Vec<ClassCount>),
}

impl ProportionResult {
    pub fn is_empty(&self) -> bool {
        match self {
            ProportionResult::BySite(counts) => counts.is_empty(),
            ProportionResult::ByClass(counts) => counts.is_empty(),
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        match self {
            ProportionResult::BySite(counts) => counts.iter().map(|c| c.successes).sum(),
            ProportionResult::ByClass(counts) => counts.iter().map(|c| c.count).sum(),
        }
    }
}

/// Read-only query handle over a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    dataset: &'a Dataset,
    options: QueryOptions,
}

impl<'a> Query<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_options(dataset, QueryOptions::default())
    }

    pub fn with_options(dataset: &'a Dataset, options: QueryOptions) -> Self {
        Self { dataset, options }
    }

    /// Outcome proportions for the pie chart.
    ///
    /// Only the site filter applies here; the payload range never does.
    pub fn success_proportions(&self, selector: &SiteSelector) -> Result<ProportionResult, QueryError> {
        selector.validate(self.dataset)?;

        let result = match (selector, self.options.all_sites) {
            (SiteSelector::AllSites, AllSitesAggregation::SuccessesOnly) => {
                ProportionResult::BySite(self.successes_by_site())
            }
            _ => ProportionResult::ByClass(class_counts(site_records(self.dataset, selector))),
        };
        log::debug!(
            "success_proportions({}) -> {} entries, total {}",
            selector.value(),
            match &result {
                ProportionResult::BySite(c) => c.len(),
                ProportionResult::ByClass(c) => c.len(),
            },
            result.total()
        );
        Ok(result)
    }

    /// Records for the payload/outcome scatter plot, in dataset order.
    pub fn payload_correlation(
        &self,
        selector: &SiteSelector,
        range: PayloadRange,
    ) -> Result<Vec<&'a LaunchRecord>, QueryError> {
        selector.validate(self.dataset)?;
        range.validate()?;

        let records: Vec<&'a LaunchRecord> =
            matching_records(self.dataset, selector, range, self.options.bounds).collect();
        log::debug!(
            "payload_correlation({}, [{}, {}]) -> {} records",
            selector.value(),
            range.low,
            range.high,
            records.len()
        );
        Ok(records)
    }

    fn successes_by_site(&self) -> Vec<SiteCount> {
        let mut successes: HashMap<&str, usize> = HashMap::new();
        for rec in self.dataset.records().iter().filter(|r| r.outcome.is_success()) {
            *successes.entry(rec.launch_site.as_str()).or_insert(0) += 1;
        }
        self.dataset
            .sites()
            .iter()
            .map(|site| SiteCount {
                site: site.clone(),
                successes: successes.get(site.as_str()).copied().unwrap_or(0),
            })
            .collect()
    }
}

fn class_counts<'r>(records: impl Iterator<Item = &'r LaunchRecord>) -> Vec<ClassCount> {
    let mut counts = [0usize; 2];
    for rec in records {
        counts[rec.outcome.value() as usize] += 1;
    }
    OutcomeClass::ALL
        .into_iter()
        .map(|class| ClassCount {
            class,
            count: counts[class.value() as usize],
        })
        .filter(|c| c.count > 0)
        .collect()
}
