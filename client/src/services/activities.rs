//! Learning activity services
//!
//! Covers activities, their categories and the learning dashboard.

use crate::api::endpoints::{self, ACTIVITIES, CATEGORIES, DASHBOARD_STATS};
use crate::api::ApiClient;
use crate::error::ClientResult;
use tracker_shared::models::{Activity, ActivityStatus, Category, RecordId, DEFAULT_CATEGORY_COLOR};
use tracker_shared::types::{ActivityInput, ActivityQuery, ActivityStatusUpdate, DashboardStats};
use tracker_shared::validation::form_error;
use validator::Validate;

/// Built-in categories offered when the backend has none
pub const DEFAULT_CATEGORIES: &[(RecordId, &str, &str)] = &[
    (1, "Frontend", DEFAULT_CATEGORY_COLOR),
    (2, "Backend", "#10B981"),
    (3, "Python", "#6366F1"),
    (4, "JavaScript", "#F59E0B"),
    (5, "React", "#06B6D4"),
    (6, "Django", "#059669"),
    (7, "Database", "#8B5CF6"),
    (8, "DevOps", "#EF4444"),
    (9, "Mobile", "#EC4899"),
    (10, "Other", "#6B7280"),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, color)| Category::new(*id, name, color))
        .collect()
}

/// Query parameters for an activity listing; empty filters are omitted
pub fn query_pairs(query: &ActivityQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        pairs.push(("search".to_string(), search.trim().to_string()));
    }
    if let Some(status) = query.status {
        pairs.push(("status".to_string(), status.as_str().to_string()));
    }
    if let Some(category) = query.category {
        pairs.push(("category".to_string(), category.to_string()));
    }
    if let Some(date) = query.date {
        pairs.push(("date".to_string(), date.format("%Y-%m-%d").to_string()));
    }
    if !query.ordering.is_empty() {
        pairs.push(("ordering".to_string(), query.ordering.clone()));
    }
    pairs
}

/// Activity service
pub struct ActivityService;

impl ActivityService {
    pub async fn list(client: &ApiClient, query: &ActivityQuery) -> ClientResult<Vec<Activity>> {
        client
            .get_list_with_query(ACTIVITIES, query_pairs(query))
            .await
    }

    pub async fn get(client: &ApiClient, id: RecordId) -> ClientResult<Activity> {
        client.get(&endpoints::detail(ACTIVITIES, id)).await
    }

    pub async fn create(client: &ApiClient, input: &ActivityInput) -> ClientResult<Activity> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(ACTIVITIES, input).await
    }

    pub async fn update(
        client: &ApiClient,
        id: RecordId,
        input: &ActivityInput,
    ) -> ClientResult<Activity> {
        input.validate().map_err(|e| form_error(&e))?;
        client.put(&endpoints::detail(ACTIVITIES, id), input).await
    }

    /// Change only the status of an activity
    pub async fn set_status(
        client: &ApiClient,
        id: RecordId,
        status: ActivityStatus,
    ) -> ClientResult<Activity> {
        client
            .patch(&endpoints::detail(ACTIVITIES, id), &ActivityStatusUpdate { status })
            .await
    }

    pub async fn delete(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(ACTIVITIES, id)).await
    }
}

/// Category service
pub struct CategoryService;

impl CategoryService {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<Category>> {
        client.get_list(CATEGORIES).await
    }
}

/// Learning dashboard service
pub struct DashboardService;

impl DashboardService {
    pub async fn stats(client: &ApiClient) -> ClientResult<DashboardStats> {
        client.get(DASHBOARD_STATS).await
    }
}
