//! Fitness analytics service

use crate::api::endpoints::{ANALYTICS_DASHBOARD, WEEKLY_CHARTS};
use crate::api::ApiClient;
use crate::error::ClientResult;
use tracker_shared::types::{FitnessAnalytics, WeeklyCharts};

/// Analytics service
pub struct AnalyticsService;

impl AnalyticsService {
    /// Dashboard aggregates; a null body yields empty sections
    pub async fn dashboard(client: &ApiClient) -> ClientResult<FitnessAnalytics> {
        client
            .get::<Option<FitnessAnalytics>>(ANALYTICS_DASHBOARD)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Weekly chart series keyed by name; a null body yields no series
    pub async fn weekly_charts(client: &ApiClient) -> ClientResult<WeeklyCharts> {
        client
            .get::<Option<WeeklyCharts>>(WEEKLY_CHARTS)
            .await
            .map(Option::unwrap_or_default)
    }
}
