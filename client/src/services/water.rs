//! Water intake service

use crate::api::endpoints::{self, TODAY_WATER, WATER_GOALS, WATER_INTAKE, WATER_WEEKLY_SUMMARY};
use crate::api::ApiClient;
use crate::error::ClientResult;
use serde_json::Value;
use tracker_shared::models::{RecordId, WaterIntake};
use tracker_shared::types::{TodayWater, WaterGoal, WaterIntakeInput};
use tracker_shared::validation::form_error;
use validator::Validate;

/// Water service
pub struct WaterService;

impl WaterService {
    pub async fn intakes(client: &ApiClient) -> ClientResult<Vec<WaterIntake>> {
        client.get_list(WATER_INTAKE).await
    }

    /// Today's intakes, total and goal
    pub async fn today(client: &ApiClient) -> ClientResult<TodayWater> {
        client.get(TODAY_WATER).await
    }

    pub async fn log_intake(
        client: &ApiClient,
        input: &WaterIntakeInput,
    ) -> ClientResult<WaterIntake> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(WATER_INTAKE, input).await
    }

    pub async fn delete_intake(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(WATER_INTAKE, id)).await
    }

    pub async fn goals(client: &ApiClient) -> ClientResult<Vec<WaterGoal>> {
        client.get_list(WATER_GOALS).await
    }

    /// Backend-defined weekly aggregate, passed through untouched
    pub async fn weekly_summary(client: &ApiClient) -> ClientResult<Value> {
        client.get(WATER_WEEKLY_SUMMARY).await
    }
}
