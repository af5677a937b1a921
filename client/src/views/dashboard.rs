//! Learning dashboard

use super::{settle, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::{ActivityService, DashboardService};
use chrono::{Local, NaiveDate};
use tracker_shared::health_metrics::format_completion_rate;
use tracker_shared::models::Activity;
use tracker_shared::types::{ActivityQuery, DashboardStats};

/// Loaded dashboard data
#[derive(Debug, Clone)]
pub struct SkillupDashboard {
    pub stats: DashboardStats,
    pub today_activities: Vec<Activity>,
    /// Completion rate as displayed ("N/A" with no history)
    pub completion: String,
}

pub struct SkillupDashboardView {
    client: ApiClient,
    scope: ViewScope,
    today: NaiveDate,
    state: PageState<SkillupDashboard>,
}

impl SkillupDashboardView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            today: Local::now().date_naive(),
            state: PageState::Loading,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn state(&self) -> &PageState<SkillupDashboard> {
        &self.state
    }

    /// Fetch stats and today's activities together
    pub async fn load(&mut self) -> &PageState<SkillupDashboard> {
        if let Some(result) = self.scope.run(fetch(&self.client, self.today)).await {
            self.state = settle(result, "dashboard");
        }
        &self.state
    }
}

async fn fetch(client: &ApiClient, today: NaiveDate) -> ClientResult<SkillupDashboard> {
    let query = ActivityQuery::for_date(today);
    let (stats, today_activities) = tokio::try_join!(
        DashboardService::stats(client),
        ActivityService::list(client, &query),
    )?;
    let completion = format_completion_rate(stats.completed_activities, stats.total_activities);
    Ok(SkillupDashboard {
        stats,
        today_activities,
        completion,
    })
}
