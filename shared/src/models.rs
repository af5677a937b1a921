//! Data models for the tracker applications
//!
//! These mirror the records the backend returns. Decoding is strict: a field
//! of the wrong shape fails the whole record rather than being defaulted.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend primary key
pub type RecordId = i64;

/// Default category color (hex)
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

// ============================================================================
// Users
// ============================================================================

/// Gender as stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "male")]
    Male,
    #[serde(rename = "F", alias = "female")]
    Female,
    #[serde(rename = "O", alias = "other")]
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Authenticated user with profile fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(
        default,
        deserialize_with = "de::opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(
        default,
        deserialize_with = "de::opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_water_goal: Option<u32>,
}

impl User {
    /// Name shown in greetings, falling back to the username
    pub fn display_name(&self) -> &str {
        match &self.first_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

// ============================================================================
// Learning activities
// ============================================================================

/// Activity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default = "default_category_color")]
    pub color: String,
}

fn default_category_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl Category {
    pub fn new(id: RecordId, name: &str, color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Category reference on an activity: either expanded or a bare key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Nested(Category),
    Id(RecordId),
}

impl CategoryRef {
    pub fn id(&self) -> RecordId {
        match self {
            CategoryRef::Nested(category) => category.id,
            CategoryRef::Id(id) => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Nested(category) => Some(&category.name),
            CategoryRef::Id(_) => None,
        }
    }
}

/// Activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Completed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Completed => "completed",
        }
    }

    /// The status a quick action flips to
    pub fn toggled(&self) -> Self {
        match self {
            ActivityStatus::Pending => ActivityStatus::Completed,
            ActivityStatus::Completed => ActivityStatus::Pending,
        }
    }
}

/// Learning activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: RecordId,
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }
}

// ============================================================================
// Workouts
// ============================================================================

/// Workout plan difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "B")]
    Beginner,
    #[serde(rename = "I")]
    Intermediate,
    #[serde(rename = "A")]
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// Workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Exercise belonging to exactly one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: RecordId,
    pub workout_plan: RecordId,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Calories burned per set
    pub calories_burned: u32,
    /// Rest between sets, in seconds
    pub rest_time: u32,
}

/// Logged workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: RecordId,
    #[serde(default)]
    pub workout_plan: Option<RecordId>,
    pub date: NaiveDate,
    /// Duration in minutes
    pub duration: u32,
    #[serde(default)]
    pub total_calories_burned: u32,
    #[serde(default)]
    pub notes: String,
}

// ============================================================================
// Diet and hydration
// ============================================================================

/// Meal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

/// Logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: RecordId,
    pub name: String,
    pub meal_type: MealType,
    #[serde(deserialize_with = "de::decimal")]
    pub calories: f64,
    #[serde(deserialize_with = "de::decimal")]
    pub protein: f64,
    #[serde(deserialize_with = "de::decimal")]
    pub carbs: f64,
    #[serde(deserialize_with = "de::decimal")]
    pub fats: f64,
    pub date: NaiveDate,
}

/// Logged water intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterIntake {
    pub id: RecordId,
    /// Amount in milliliters
    pub amount: u32,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "de::opt_time_of_day")]
    pub consumed_at: Option<NaiveTime>,
}

/// Serde helpers for the loosely typed numeric and time fields the backend emits
pub(crate) mod de {
    use chrono::NaiveTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    fn to_f64<E: Error>(value: Decimal) -> Result<f64, E> {
        match value {
            Decimal::Number(n) => Ok(n),
            Decimal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid decimal string {:?}", s))),
        }
    }

    /// Number or decimal string (`"30.00"`)
    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        to_f64(Decimal::deserialize(deserializer)?)
    }

    pub fn opt_decimal<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<Decimal>::deserialize(deserializer)? {
            Some(value) => to_f64(value).map(Some),
            None => Ok(None),
        }
    }

    pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
            .ok()
    }

    /// `HH:MM[:SS[.fff]]`
    pub fn opt_time_of_day<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse_time_of_day(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid time of day {:?}", text))),
            None => Ok(None),
        }
    }
}
