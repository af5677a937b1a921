//! Typed backend services
//!
//! Each service is a unit struct whose associated functions map one
//! backend resource onto strict request and response types.

pub mod activities;
pub mod analytics;
pub mod auth;
pub mod diet;
pub mod water;
pub mod workouts;

pub use activities::{ActivityService, CategoryService, DashboardService};
pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use diet::DietService;
pub use water::WaterService;
pub use workouts::WorkoutService;
