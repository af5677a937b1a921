//! Derived metrics shown on the dashboards
//!
//! Provides BMI, BMR, completion rate, hydration and calorie progress,
//! achievements, streaks and daily nutrition totals.
//!
//! All functions are pure. Missing or degenerate inputs yield `None`
//! rather than NaN or infinity, so callers can render "N/A".

use crate::models::{Exercise, Gender, Meal, RecordId, User};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Helpers
// ============================================================================

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Unrounded BMI value
    pub value: f64,
    /// BMI rounded to one decimal, as displayed
    pub display: f64,
    pub category: BmiCategory,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let weight_kg = positive(Some(weight_kg))?;
    let height_m = positive(Some(height_cm))? / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Calculate complete BMI result, `None` when either input is missing
pub fn calculate_bmi_result(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<BmiResult> {
    let value = calculate_bmi(weight_kg?, height_cm?)?;
    Some(BmiResult {
        value,
        display: round_to(value, 1),
        category: classify_bmi(value),
    })
}

// ============================================================================
// BMR
// ============================================================================

/// Calculate Basal Metabolic Rate using the revised Harris-Benedict equation
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
///
/// Undefined for any other gender or a missing input.
pub fn calculate_bmr(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age_years: Option<u32>,
    gender: Option<Gender>,
) -> Option<f64> {
    let weight = positive(weight_kg)?;
    let height = positive(height_cm)?;
    let age = age_years.filter(|a| *a > 0)? as f64;
    match gender? {
        Gender::Male => Some(88.362 + 13.397 * weight + 4.799 * height - 5.677 * age),
        Gender::Female => Some(447.593 + 9.247 * weight + 3.098 * height - 4.330 * age),
        Gender::Other => None,
    }
}

/// Profile-derived body metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub bmi: Option<BmiResult>,
    /// BMR rounded to whole kcal
    pub bmr: Option<f64>,
}

pub fn body_metrics(user: &User) -> BodyMetrics {
    BodyMetrics {
        bmi: calculate_bmi_result(user.weight, user.height),
        bmr: calculate_bmr(user.weight, user.height, user.age, user.gender).map(f64::round),
    }
}

// ============================================================================
// Completion rate
// ============================================================================

/// Share of completed items, clamped to [0, 100]; `None` when there are none
pub fn completion_rate(completed: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((completed as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
}

/// Completion rate as displayed, "N/A" for an empty history
pub fn format_completion_rate(completed: u32, total: u32) -> String {
    match completion_rate(completed, total) {
        Some(rate) => format!("{}%", round_to(rate, 1)),
        None => "N/A".to_string(),
    }
}

// ============================================================================
// Hydration
// ============================================================================

/// Hydration status band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationStatus {
    GetStarted,
    KeepGoing,
    Halfway,
    GoodJob,
    Excellent,
}

impl HydrationStatus {
    /// Classify a raw (unclamped) percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            HydrationStatus::Excellent
        } else if percentage >= 75.0 {
            HydrationStatus::GoodJob
        } else if percentage >= 50.0 {
            HydrationStatus::Halfway
        } else if percentage >= 25.0 {
            HydrationStatus::KeepGoing
        } else {
            HydrationStatus::GetStarted
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HydrationStatus::Excellent => "Excellent!",
            HydrationStatus::GoodJob => "Good Job!",
            HydrationStatus::Halfway => "Halfway There",
            HydrationStatus::KeepGoing => "Keep Going",
            HydrationStatus::GetStarted => "Get Started",
        }
    }
}

/// Raw hydration percentage; may exceed 100, zero for a non-positive goal
pub fn hydration_percentage(intake_ml: u32, goal_ml: u32) -> f64 {
    if goal_ml == 0 {
        return 0.0;
    }
    intake_ml as f64 / goal_ml as f64 * 100.0
}

/// Hydration progress as rendered by the water tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrationProgress {
    pub total_ml: u32,
    pub goal_ml: u32,
    /// Unclamped percentage, used for the status text
    pub raw_percent: f64,
    /// Percentage clamped at 100, used for the progress bar
    pub display_percent: f64,
    pub remaining_ml: u32,
    pub status: HydrationStatus,
}

pub fn hydration_progress(total_ml: u32, goal_ml: u32) -> HydrationProgress {
    let raw_percent = hydration_percentage(total_ml, goal_ml);
    HydrationProgress {
        total_ml,
        goal_ml,
        raw_percent,
        display_percent: raw_percent.min(100.0),
        remaining_ml: goal_ml.saturating_sub(total_ml),
        status: HydrationStatus::from_percentage(raw_percent),
    }
}

// ============================================================================
// Calories
// ============================================================================

/// Calorie intake status relative to the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieStatus {
    UnderTarget,
    OnTarget,
    OverTarget,
}

impl CalorieStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= 80.0 {
            CalorieStatus::UnderTarget
        } else if percentage <= 100.0 {
            CalorieStatus::OnTarget
        } else {
            CalorieStatus::OverTarget
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalorieStatus::UnderTarget => "Under Target",
            CalorieStatus::OnTarget => "On Target",
            CalorieStatus::OverTarget => "Over Target",
        }
    }
}

/// Raw calorie percentage of the goal; zero for a zero goal
pub fn calorie_percentage(calories: f64, goal: u32) -> f64 {
    if goal == 0 || !calories.is_finite() {
        return 0.0;
    }
    calories / goal as f64 * 100.0
}

// ============================================================================
// Achievements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    WeeklyWarrior,
    CalorieCrusher,
    HydrationHero,
    BalancedDiet,
}

impl Achievement {
    pub fn name(&self) -> &'static str {
        match self {
            Achievement::WeeklyWarrior => "Weekly Warrior",
            Achievement::CalorieCrusher => "Calorie Crusher",
            Achievement::HydrationHero => "Hydration Hero",
            Achievement::BalancedDiet => "Balanced Diet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::WeeklyWarrior => "Completed 5+ workouts this week",
            Achievement::CalorieCrusher => "Burned 2000+ calories this week",
            Achievement::HydrationHero => "Met water goal today",
            Achievement::BalancedDiet => "Stayed within calorie target",
        }
    }
}

/// Weekly figures the achievements are judged on
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyFigures {
    pub workouts: u32,
    pub calories_burned: u32,
    pub water_percent: f64,
    pub calorie_percent: f64,
}

pub fn achievements(figures: &WeeklyFigures) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if figures.workouts >= 5 {
        earned.push(Achievement::WeeklyWarrior);
    }
    if figures.calories_burned >= 2000 {
        earned.push(Achievement::CalorieCrusher);
    }
    if figures.water_percent >= 100.0 {
        earned.push(Achievement::HydrationHero);
    }
    let calorie_percent = figures.calorie_percent.min(100.0);
    if (80.0..=100.0).contains(&calorie_percent) {
        earned.push(Achievement::BalancedDiet);
    }
    earned
}

// ============================================================================
// Streaks
// ============================================================================

/// Consecutive days with at least one qualifying entry, counted back from `today`
///
/// A day without an entry ends the streak, so nothing logged today means 0.
/// Entries dated after `today` are ignored.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = dates.into_iter().filter(|d| *d <= today).collect();
    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

// ============================================================================
// Nutrition
// ============================================================================

/// Summed macros for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Sum the macros of the given meals
pub fn meal_totals<'a, I>(meals: I) -> DailyTotals
where
    I: IntoIterator<Item = &'a Meal>,
{
    meals
        .into_iter()
        .fold(DailyTotals::default(), |totals, meal| DailyTotals {
            calories: totals.calories + meal.calories,
            protein: totals.protein + meal.protein,
            carbs: totals.carbs + meal.carbs,
            fats: totals.fats + meal.fats,
        })
}

/// Sum the macros of every meal dated `date`
pub fn daily_totals<'a, I>(meals: I, date: NaiveDate) -> DailyTotals
where
    I: IntoIterator<Item = &'a Meal>,
{
    meal_totals(meals.into_iter().filter(|meal| meal.date == date))
}

// ============================================================================
// Workout plans
// ============================================================================

/// Estimated load of a workout plan from its exercises
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEstimate {
    pub exercise_count: usize,
    /// Σ sets × calories per set
    pub calories: u32,
    /// Σ sets × rest seconds, in minutes
    pub rest_minutes: f64,
}

pub fn plan_estimate(exercises: &[Exercise], plan_id: RecordId) -> PlanEstimate {
    let mut estimate = PlanEstimate::default();
    let mut rest_seconds: u64 = 0;
    for exercise in exercises.iter().filter(|e| e.workout_plan == plan_id) {
        estimate.exercise_count += 1;
        estimate.calories = estimate
            .calories
            .saturating_add(exercise.sets.saturating_mul(exercise.calories_burned));
        rest_seconds += exercise.sets as u64 * exercise.rest_time as u64;
    }
    estimate.rest_minutes = rest_seconds as f64 / 60.0;
    estimate
}
