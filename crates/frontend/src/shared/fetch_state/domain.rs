use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use super::filters::{FilterCriteria, FilterKey};
use crate::shared::api_client::{AnalyticsTransport, ApiFailure, QueryParam};

/// What distinguishes one analytics page from another.
///
/// The container drives the lifecycle; an implementation only knows its
/// filters and how to turn them into a payload.
#[async_trait(?Send)]
pub trait AnalyticsDomain: 'static {
    type Payload: Clone + Default + PartialEq + Debug + Send + Sync + 'static;

    /// Used in log lines
    const NAME: &'static str;
    /// Filters the page accepts
    const FILTER_KEYS: &'static [FilterKey];
    /// Filters mirrored into the page query string
    const URL_KEYS: &'static [FilterKey];

    fn default_filters(&self, today: NaiveDate) -> FilterCriteria;

    /// API parameters for `filters`, unconstrained keys omitted.
    fn query(&self, filters: &FilterCriteria) -> Vec<QueryParam> {
        Self::FILTER_KEYS
            .iter()
            .filter_map(|key| {
                filters
                    .get(*key)
                    .map(|value| (key.query_name(), value.to_string()))
            })
            .collect()
    }

    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<Self::Payload, ApiFailure>;
}
