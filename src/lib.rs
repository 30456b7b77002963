//! Launch records dashboard core.
//!
//! Loads a launch table once, then answers the two chart queries of the
//! dashboard (outcome proportions and payload/outcome correlation) as
//! serializable view-models for whatever renders them.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod state;
pub mod view;

pub use config::DashboardConfig;
pub use data::filter::{PayloadRange, RangeBounds, SiteSelector, ALL_SITES};
pub use data::loader::load_file;
pub use data::model::{Dataset, LaunchRecord, OutcomeClass};
pub use error::{LoadError, QueryError};
pub use query::{AllSitesAggregation, ProportionResult, Query, QueryOptions};
pub use state::{DashboardState, DashboardView};
