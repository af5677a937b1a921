//! Endpoint paths per application flavor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracker_shared::models::RecordId;

/// Which backend the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppFlavor {
    /// Learning-activity tracker
    #[default]
    Skillup,
    /// Fitness and diet tracker
    Fitness,
}

impl AppFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppFlavor::Skillup => "skillup",
            AppFlavor::Fitness => "fitness",
        }
    }
}

impl fmt::Display for AppFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skillup" => Ok(AppFlavor::Skillup),
            "fitness" => Ok(AppFlavor::Fitness),
            other => Err(format!("Unknown app flavor '{}' (expected skillup or fitness)", other)),
        }
    }
}

/// Authentication endpoints, which differ between flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub login: &'static str,
    pub refresh: &'static str,
    pub profile: &'static str,
    pub register: &'static str,
    /// `None` when the backend has no profile update route
    pub profile_update: Option<&'static str>,
    /// `None` when logout is local only
    pub logout: Option<&'static str>,
}

impl Endpoints {
    pub fn for_flavor(flavor: AppFlavor) -> Self {
        match flavor {
            AppFlavor::Skillup => Self {
                login: "/auth/token/",
                refresh: "/auth/token/refresh/",
                profile: "/auth/profile/",
                register: "/auth/register/",
                profile_update: None,
                logout: None,
            },
            AppFlavor::Fitness => Self {
                login: "/auth/login/",
                refresh: "/token/refresh/",
                profile: "/auth/profile/",
                register: "/auth/register/",
                profile_update: Some("/auth/profile/update/"),
                logout: Some("/auth/logout/"),
            },
        }
    }
}

// ============================================================================
// Resource paths
// ============================================================================

pub const ACTIVITIES: &str = "/activities/";
pub const CATEGORIES: &str = "/categories/";
pub const DASHBOARD_STATS: &str = "/dashboard/stats/";

pub const WORKOUT_PLANS: &str = "/workouts/plans/";
pub const EXERCISES: &str = "/workouts/exercises/";
pub const WORKOUT_SESSIONS: &str = "/workouts/sessions/";
pub const WEEKLY_PROGRESS: &str = "/workouts/sessions/weekly-progress/";

pub const MEALS: &str = "/diet/meals/";
pub const TODAY_MEALS: &str = "/diet/meals/today_meals/";
pub const MEALS_WEEKLY_SUMMARY: &str = "/diet/meals/weekly_summary/";
pub const NUTRITION: &str = "/diet/nutrition/";

pub const WATER_INTAKE: &str = "/water/intake/";
pub const TODAY_WATER: &str = "/water/intake/today_intake/";
pub const WATER_WEEKLY_SUMMARY: &str = "/water/intake/weekly_summary/";
pub const WATER_GOALS: &str = "/water/goals/";

pub const ANALYTICS_DASHBOARD: &str = "/analytics/dashboard/";
pub const WEEKLY_CHARTS: &str = "/analytics/weekly-charts/";

/// `{collection}{id}/`
pub fn detail(collection: &str, id: RecordId) -> String {
    format!("{}{}/", collection, id)
}

/// `/workouts/plans/{id}/add-exercise/`
pub fn add_exercise(plan_id: RecordId) -> String {
    format!("{}{}/add-exercise/", WORKOUT_PLANS, plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_endpoints() {
        let skillup = Endpoints::for_flavor(AppFlavor::Skillup);
        assert_eq!(skillup.login, "/auth/token/");
        assert_eq!(skillup.refresh, "/auth/token/refresh/");
        assert!(skillup.logout.is_none());

        let fitness = Endpoints::for_flavor(AppFlavor::Fitness);
        assert_eq!(fitness.login, "/auth/login/");
        assert_eq!(fitness.refresh, "/token/refresh/");
        assert_eq!(fitness.profile_update, Some("/auth/profile/update/"));
    }

    #[test]
    fn test_detail_paths() {
        assert_eq!(detail(ACTIVITIES, 42), "/activities/42/");
        assert_eq!(add_exercise(3), "/workouts/plans/3/add-exercise/");
    }

    #[test]
    fn test_flavor_parsing() {
        assert_eq!("Fitness".parse::<AppFlavor>(), Ok(AppFlavor::Fitness));
        assert!("garden".parse::<AppFlavor>().is_err());
    }
}
