//! Meals and nutrition

use super::{settle, ActionOutcome, Confirm, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::DietService;
use std::sync::Arc;
use tracing::info;
use tracker_shared::health_metrics::{meal_totals, DailyTotals};
use tracker_shared::models::{Meal, RecordId};
use tracker_shared::types::{MealInput, NutritionDay};

#[derive(Debug, Clone, Default)]
pub struct DietPage {
    pub meals: Vec<Meal>,
    pub today_meals: Vec<Meal>,
    pub nutrition: Vec<NutritionDay>,
    /// Summed macros over today's meals
    pub today_totals: DailyTotals,
}

pub struct DietView {
    client: ApiClient,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    state: PageState<DietPage>,
}

impl DietView {
    pub fn new(client: ApiClient, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            client,
            confirm,
            scope: ViewScope::new(),
            state: PageState::Loading,
        }
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn state(&self) -> &PageState<DietPage> {
        &self.state
    }

    pub async fn load(&mut self) -> &PageState<DietPage> {
        if let Some(result) = self.scope.run(fetch(&self.client)).await {
            self.state = settle(result, "diet");
        }
        &self.state
    }

    pub async fn add_meal(&mut self, input: &MealInput) -> ClientResult<Meal> {
        let meal = DietService::create_meal(&self.client, input).await?;
        info!(meal_id = meal.id, "Meal logged");
        self.load().await;
        Ok(meal)
    }

    pub async fn delete_meal(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this meal?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = DietService::delete_meal(&self.client, id).await;
        let outcome = ActionOutcome::from_result(result, "delete_meal");
        self.load().await;
        outcome
    }
}

async fn fetch(client: &ApiClient) -> ClientResult<DietPage> {
    let (meals, today_meals, nutrition) = tokio::try_join!(
        DietService::meals(client),
        DietService::today_meals(client),
        DietService::nutrition(client),
    )?;
    let today_totals = meal_totals(&today_meals);
    Ok(DietPage {
        meals,
        today_meals,
        nutrition,
        today_totals,
    })
}
