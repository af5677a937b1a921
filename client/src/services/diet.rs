//! Meal and nutrition service

use crate::api::endpoints::{self, MEALS, MEALS_WEEKLY_SUMMARY, NUTRITION, TODAY_MEALS};
use crate::api::ApiClient;
use crate::error::ClientResult;
use serde_json::Value;
use tracker_shared::models::{Meal, RecordId};
use tracker_shared::types::{MealInput, NutritionDay};
use tracker_shared::validation::form_error;
use validator::Validate;

/// Diet service
pub struct DietService;

impl DietService {
    pub async fn meals(client: &ApiClient) -> ClientResult<Vec<Meal>> {
        client.get_list(MEALS).await
    }

    pub async fn today_meals(client: &ApiClient) -> ClientResult<Vec<Meal>> {
        client.get_list(TODAY_MEALS).await
    }

    pub async fn create_meal(client: &ApiClient, input: &MealInput) -> ClientResult<Meal> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(MEALS, input).await
    }

    pub async fn update_meal(
        client: &ApiClient,
        id: RecordId,
        input: &MealInput,
    ) -> ClientResult<Meal> {
        input.validate().map_err(|e| form_error(&e))?;
        client.put(&endpoints::detail(MEALS, id), input).await
    }

    pub async fn delete_meal(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(MEALS, id)).await
    }

    /// Backend daily nutrition aggregates
    pub async fn nutrition(client: &ApiClient) -> ClientResult<Vec<NutritionDay>> {
        client.get_list(NUTRITION).await
    }

    /// Backend-defined weekly aggregate, passed through untouched
    pub async fn weekly_summary(client: &ApiClient) -> ClientResult<Value> {
        client.get(MEALS_WEEKLY_SUMMARY).await
    }
}
