//! Fitness dashboard
//!
//! Combines the backend analytics with locally derived figures: the workout
//! streak, earned achievements and the hydration and calorie bands.

use super::{settle, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::config::GoalsConfig;
use crate::error::ClientResult;
use crate::services::{AnalyticsService, WorkoutService};
use chrono::{Local, NaiveDate};
use tracker_shared::health_metrics::{
    achievements, calorie_percentage, current_streak, hydration_percentage, Achievement,
    CalorieStatus, HydrationStatus, WeeklyFigures,
};
use tracker_shared::models::WorkoutSession;
use tracker_shared::types::{ChartPoint, FitnessAnalytics, WeeklyCharts};

/// Tallest bar as a share of the chart height
const BAR_SCALE: f64 = 80.0;

/// One rendered chart bar
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Height in percent of the chart area
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub bars: Vec<ChartBar>,
}

/// Scale values so the largest reaches 80% of the chart
///
/// The divisor never drops below 1, so an all-zero series stays flat.
pub fn bar_heights(points: &[ChartPoint]) -> Vec<ChartBar> {
    let max = points.iter().map(|p| p.value).fold(1.0_f64, f64::max);
    points
        .iter()
        .map(|point| ChartBar {
            label: point.label.clone(),
            value: point.value,
            height: point.value / max * BAR_SCALE,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct FitnessDashboard {
    pub analytics: FitnessAnalytics,
    pub charts: Vec<ChartSeries>,
    /// Consecutive days with a logged workout, ending today
    pub streak: u32,
    pub achievements: Vec<Achievement>,
    pub water_goal_ml: u32,
    /// Raw percentage of the water goal
    pub water_percent: f64,
    pub hydration: HydrationStatus,
    pub calorie_goal: u32,
    /// Raw percentage of the calorie goal
    pub calorie_percent: f64,
    pub calorie_status: CalorieStatus,
}

impl FitnessDashboard {
    fn assemble(
        analytics: FitnessAnalytics,
        charts: WeeklyCharts,
        sessions: &[WorkoutSession],
        goals: &GoalsConfig,
        today: NaiveDate,
    ) -> Self {
        let water = &analytics.water_analytics;
        let diet = &analytics.diet_analytics;
        let workouts = &analytics.workout_analytics;

        let water_goal_ml = water.daily_goal.unwrap_or(goals.water_ml);
        let calorie_goal = diet.calorie_goal.unwrap_or(goals.calories);
        let water_percent = water
            .goal_percentage
            .unwrap_or_else(|| hydration_percentage(water.today_intake, water_goal_ml));
        let calorie_percent = calorie_percentage(diet.today_calories, calorie_goal);

        let figures = WeeklyFigures {
            workouts: workouts.total_workouts_week,
            calories_burned: workouts.total_calories_burned_week,
            water_percent,
            calorie_percent,
        };

        let charts = charts
            .into_iter()
            .map(|(name, points)| ChartSeries {
                bars: bar_heights(&points),
                name,
            })
            .collect();

        Self {
            streak: current_streak(sessions.iter().map(|s| s.date), today),
            achievements: achievements(&figures),
            water_goal_ml,
            water_percent,
            hydration: HydrationStatus::from_percentage(water_percent),
            calorie_goal,
            calorie_percent,
            calorie_status: CalorieStatus::from_percentage(calorie_percent),
            charts,
            analytics,
        }
    }
}

pub struct FitnessDashboardView {
    client: ApiClient,
    goals: GoalsConfig,
    scope: ViewScope,
    today: NaiveDate,
    state: PageState<FitnessDashboard>,
}

impl FitnessDashboardView {
    pub fn new(client: ApiClient, goals: GoalsConfig) -> Self {
        Self {
            client,
            goals,
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

    pub fn state(&self) -> &PageState<FitnessDashboard> {
        &self.state
    }

    pub async fn load(&mut self) -> &PageState<FitnessDashboard> {
        let fetch = fetch(&self.client, &self.goals, self.today);
        if let Some(result) = self.scope.run(fetch).await {
            self.state = settle(result, "fitness_dashboard");
        }
        &self.state
    }
}

async fn fetch(
    client: &ApiClient,
    goals: &GoalsConfig,
    today: NaiveDate,
) -> ClientResult<FitnessDashboard> {
    let (analytics, charts, sessions) = tokio::try_join!(
        AnalyticsService::dashboard(client),
        AnalyticsService::weekly_charts(client),
        WorkoutService::sessions(client),
    )?;
    Ok(FitnessDashboard::assemble(
        analytics, charts, &sessions, goals, today,
    ))
}
