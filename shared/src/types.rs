//! API request and response types

use crate::models::{
    Activity, ActivityStatus, Difficulty, Gender, MealType, RecordId, WaterIntake,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Daily water goal used when neither the backend nor the profile sets one
pub const DEFAULT_WATER_GOAL_ML: u32 = 2000;

/// Daily calorie goal used when the profile does not set one
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

// ============================================================================
// Collections
// ============================================================================

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Any list response: a bare array, a paginated envelope, or nothing at all
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged(Page<T>),
    Missing,
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paged(page) => page.results,
            Listing::Missing => Vec::new(),
        }
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token pair returned by the login endpoint
///
/// Some backends embed the user, others only return the tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

/// Logout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::validation::username_rule"))]
    pub username: String,
    #[validate(custom(function = "crate::validation::email_rule"))]
    pub email: String,
    #[validate(custom(function = "crate::validation::password_rule"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Profile update request; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::email_rule"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::age_rule"))]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::weight_rule"))]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::height_rule"))]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 500, max = 10000, message = "Calorie goal must be between 500 and 10000"))]
    pub daily_calorie_goal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 250, max = 10000, message = "Water goal must be between 250 and 10000 ml"))]
    pub daily_water_goal: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.gender.is_none()
            && self.daily_calorie_goal.is_none()
            && self.daily_water_goal.is_none()
    }
}

// ============================================================================
// Learning activities
// ============================================================================

/// Activity list filters, sent as query parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub ordering: String,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            category: None,
            date: None,
            ordering: "-date".to_string(),
        }
    }
}

impl ActivityQuery {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Whether any filter beyond the default ordering is active
    pub fn is_filtered(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
            || self.status.is_some()
            || self.category.is_some()
            || self.date.is_some()
            || self.ordering != "-date"
    }
}

/// Create or replace an activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivityInput {
    #[validate(length(min = 1, max = 200, message = "Topic is required"))]
    pub topic: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<RecordId>,
    pub date: NaiveDate,
    pub status: ActivityStatus,
}

impl From<&Activity> for ActivityInput {
    fn from(activity: &Activity) -> Self {
        Self {
            topic: activity.topic.clone(),
            description: activity.description.clone(),
            category: activity.category.as_ref().map(|c| c.id()),
            date: activity.date,
            status: activity.status,
        }
    }
}

/// Status-only update used by quick actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStatusUpdate {
    pub status: ActivityStatus,
}

/// Learning dashboard statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub completed_activities: u32,
    #[serde(default)]
    pub pending_activities: u32,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub today_activities: Vec<Activity>,
}

// ============================================================================
// Workouts
// ============================================================================

/// Create or replace a workout plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkoutPlanInput {
    #[validate(length(min = 1, max = 200, message = "Plan name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
}

/// Add an exercise to a plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExerciseInput {
    #[validate(length(min = 1, max = 200, message = "Exercise name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 100, message = "Sets must be between 1 and 100"))]
    pub sets: u32,
    #[validate(range(min = 1, max = 1000, message = "Reps must be between 1 and 1000"))]
    pub reps: u32,
    #[validate(range(max = 5000, message = "Calories per set cannot exceed 5000"))]
    pub calories_burned: u32,
    #[validate(range(max = 3600, message = "Rest time cannot exceed one hour"))]
    pub rest_time: u32,
}

impl Default for ExerciseInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: 3,
            reps: 10,
            calories_burned: 50,
            rest_time: 60,
        }
    }
}

/// Log a workout session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkoutSessionInput {
    pub workout_plan: Option<RecordId>,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration: u32,
    pub total_calories_burned: u32,
    #[serde(default)]
    pub notes: String,
}

// ============================================================================
// Diet and hydration
// ============================================================================

/// Create or replace a meal
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealInput {
    #[validate(length(min = 1, max = 200, message = "Meal name is required"))]
    pub name: String,
    pub meal_type: MealType,
    #[validate(range(min = 0.0, max = 50000.0, message = "Calories must be between 0 and 50000"))]
    pub calories: f64,
    #[validate(range(min = 0.0, max = 5000.0, message = "Protein must be between 0 and 5000 g"))]
    pub protein: f64,
    #[validate(range(min = 0.0, max = 5000.0, message = "Carbs must be between 0 and 5000 g"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, max = 5000.0, message = "Fats must be between 0 and 5000 g"))]
    pub fats: f64,
    pub date: NaiveDate,
}

/// Backend nutrition aggregate for a day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionDay {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub total_protein: f64,
    #[serde(default)]
    pub total_carbs: f64,
    #[serde(default)]
    pub total_fats: f64,
}

/// Log a water intake
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaterIntakeInput {
    pub date: NaiveDate,
    #[validate(custom(function = "crate::validation::water_amount_rule"))]
    pub amount: u32,
}

/// Today's water intake summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayWater {
    #[serde(default)]
    pub intakes: Vec<WaterIntake>,
    #[serde(default)]
    pub total_today: u32,
    #[serde(default = "default_water_goal")]
    pub goal: u32,
    #[serde(default)]
    pub progress_percentage: f64,
}

fn default_water_goal() -> u32 {
    DEFAULT_WATER_GOAL_ML
}

/// Daily water goal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterGoal {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub daily_goal: u32,
}

// ============================================================================
// Fitness analytics
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetrics {
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub bmr: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutAnalytics {
    #[serde(default, deserialize_with = "null_default")]
    pub total_workouts_week: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub total_calories_burned_week: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietAnalytics {
    #[serde(default, deserialize_with = "null_default")]
    pub today_calories: f64,
    #[serde(default)]
    pub calorie_goal: Option<u32>,
    #[serde(default)]
    pub weekly_avg_calories: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterAnalytics {
    #[serde(default, deserialize_with = "null_default")]
    pub today_intake: u32,
    #[serde(default)]
    pub daily_goal: Option<u32>,
    #[serde(default)]
    pub goal_percentage: Option<f64>,
}

/// Fitness dashboard analytics; every section may be absent or null
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitnessAnalytics {
    #[serde(default, deserialize_with = "null_default")]
    pub user_metrics: UserMetrics,
    #[serde(default, deserialize_with = "null_default")]
    pub workout_analytics: WorkoutAnalytics,
    #[serde(default, deserialize_with = "null_default")]
    pub diet_analytics: DietAnalytics,
    #[serde(default, deserialize_with = "null_default")]
    pub water_analytics: WaterAnalytics,
}

/// Treat an explicit `null` like a missing field
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One bar of a weekly chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Named weekly series, e.g. `calories` or `water`
pub type WeeklyCharts = BTreeMap<String, Vec<ChartPoint>>;
