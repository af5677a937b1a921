//! Activity list and activity form

use super::{settle, ActionOutcome, Confirm, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::activities::default_categories;
use crate::services::{ActivityService, CategoryService};
use std::sync::Arc;
use tracing::{info, warn};
use tracker_shared::models::{Activity, ActivityStatus, Category, RecordId};
use tracker_shared::types::{ActivityInput, ActivityQuery};

/// Shown when there are no categories to pick from
pub const NO_CATEGORIES_MESSAGE: &str = "No categories available";

// ============================================================================
// List
// ============================================================================

/// Filterable activity list
pub struct ActivityListView {
    client: ApiClient,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    query: ActivityQuery,
    state: PageState<Vec<Activity>>,
}

impl ActivityListView {
    pub fn new(client: ApiClient, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            client,
            confirm,
            scope: ViewScope::new(),
            query: ActivityQuery::default(),
            state: PageState::Loading,
        }
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn state(&self) -> &PageState<Vec<Activity>> {
        &self.state
    }

    pub fn query(&self) -> &ActivityQuery {
        &self.query
    }

    pub async fn load(&mut self) -> &PageState<Vec<Activity>> {
        let fetch = ActivityService::list(&self.client, &self.query);
        if let Some(result) = self.scope.run(fetch).await {
            self.state = settle(result, "activities");
        }
        &self.state
    }

    /// Replace the filters and refetch
    pub async fn set_query(&mut self, query: ActivityQuery) -> &PageState<Vec<Activity>> {
        self.query = query;
        self.load().await
    }

    /// Change an activity's status after confirmation
    pub async fn set_status(&mut self, id: RecordId, status: ActivityStatus) -> ActionOutcome {
        let prompt = format!("Mark activity {} as {}?", id, status.as_str());
        if !self.confirm.confirm(&prompt) {
            return ActionOutcome::Cancelled;
        }
        let result = ActivityService::set_status(&self.client, id, status).await;
        let outcome = ActionOutcome::from_result(result, "set_status");
        self.load().await;
        outcome
    }

    /// Flip pending/completed
    pub async fn toggle_status(&mut self, activity: &Activity) -> ActionOutcome {
        self.set_status(activity.id, activity.status.toggled()).await
    }

    /// Delete after confirmation; the list is refetched either way
    pub async fn delete(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this activity?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = ActivityService::delete(&self.client, id).await;
        if result.is_ok() {
            info!(activity_id = id, "Activity deleted");
        }
        let outcome = ActionOutcome::from_result(result, "delete_activity");
        self.load().await;
        outcome
    }
}

// ============================================================================
// Form
// ============================================================================

/// Categories offered by the activity form
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOptions {
    pub categories: Vec<Category>,
    /// True when the built-in list stands in for an empty backend list
    pub using_defaults: bool,
    /// Message shown in place of the picker
    pub notice: Option<String>,
}

impl CategoryOptions {
    fn resolve(categories: Vec<Category>, fallback_defaults: bool) -> Self {
        match (categories.is_empty(), fallback_defaults) {
            (false, _) => Self {
                categories,
                using_defaults: false,
                notice: None,
            },
            (true, true) => Self {
                categories: default_categories(),
                using_defaults: true,
                notice: None,
            },
            (true, false) => Self {
                categories,
                using_defaults: false,
                notice: Some(NO_CATEGORIES_MESSAGE.to_string()),
            },
        }
    }
}

/// Create or edit an activity
pub struct AddActivityView {
    client: ApiClient,
    fallback_defaults: bool,
    categories: PageState<CategoryOptions>,
}

impl AddActivityView {
    pub fn new(client: ApiClient, fallback_defaults: bool) -> Self {
        Self {
            client,
            fallback_defaults,
            categories: PageState::Loading,
        }
    }

    pub fn categories(&self) -> &PageState<CategoryOptions> {
        &self.categories
    }

    pub async fn load_categories(&mut self) -> &PageState<CategoryOptions> {
        let fallback = self.fallback_defaults;
        self.categories = match CategoryService::list(&self.client).await {
            Ok(categories) => PageState::Ready(CategoryOptions::resolve(categories, fallback)),
            Err(e) if fallback => {
                warn!("Failed to load categories, using defaults: {}", e);
                PageState::Ready(CategoryOptions::resolve(Vec::new(), true))
            }
            Err(e) => settle(Err(e), "categories"),
        };
        &self.categories
    }

    /// Prefill the form from an existing activity
    pub async fn load_for_edit(&self, id: RecordId) -> ClientResult<ActivityInput> {
        let activity = ActivityService::get(&self.client, id).await?;
        Ok(ActivityInput::from(&activity))
    }

    /// Save the form: create when `id` is `None`, replace otherwise
    pub async fn submit(&self, id: Option<RecordId>, input: &ActivityInput) -> ClientResult<Activity> {
        let saved = match id {
            Some(id) => ActivityService::update(&self.client, id, input).await?,
            None => ActivityService::create(&self.client, input).await?,
        };
        info!(activity_id = saved.id, "Activity saved");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_categories_win() {
        let options = CategoryOptions::resolve(vec![Category::new(4, "Rust", "#000000")], true);
        assert_eq!(options.categories.len(), 1);
        assert!(!options.using_defaults);
        assert!(options.notice.is_none());
    }

    #[test]
    fn test_empty_categories_with_fallback() {
        let options = CategoryOptions::resolve(Vec::new(), true);
        assert_eq!(options.categories.len(), 10);
        assert!(options.using_defaults);
    }

    #[test]
    fn test_empty_categories_without_fallback() {
        let options = CategoryOptions::resolve(Vec::new(), false);
        assert!(options.categories.is_empty());
        assert_eq!(options.notice.as_deref(), Some(NO_CATEGORIES_MESSAGE));
    }
}
