//! Workout plan, exercise and session service

use crate::api::endpoints::{self, EXERCISES, WEEKLY_PROGRESS, WORKOUT_PLANS, WORKOUT_SESSIONS};
use crate::api::ApiClient;
use crate::error::ClientResult;
use serde_json::Value;
use tracker_shared::models::{Exercise, RecordId, WorkoutPlan, WorkoutSession};
use tracker_shared::types::{ExerciseInput, WorkoutPlanInput, WorkoutSessionInput};
use tracker_shared::validation::form_error;
use validator::Validate;

/// Workout service
pub struct WorkoutService;

impl WorkoutService {
    // ========================================================================
    // Plans
    // ========================================================================

    pub async fn plans(client: &ApiClient) -> ClientResult<Vec<WorkoutPlan>> {
        client.get_list(WORKOUT_PLANS).await
    }

    pub async fn create_plan(
        client: &ApiClient,
        input: &WorkoutPlanInput,
    ) -> ClientResult<WorkoutPlan> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(WORKOUT_PLANS, input).await
    }

    pub async fn update_plan(
        client: &ApiClient,
        id: RecordId,
        input: &WorkoutPlanInput,
    ) -> ClientResult<WorkoutPlan> {
        input.validate().map_err(|e| form_error(&e))?;
        client.put(&endpoints::detail(WORKOUT_PLANS, id), input).await
    }

    pub async fn delete_plan(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(WORKOUT_PLANS, id)).await
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    /// Add an exercise to a plan
    pub async fn add_exercise(
        client: &ApiClient,
        plan_id: RecordId,
        input: &ExerciseInput,
    ) -> ClientResult<Exercise> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(&endpoints::add_exercise(plan_id), input).await
    }

    pub async fn exercises(client: &ApiClient) -> ClientResult<Vec<Exercise>> {
        client.get_list(EXERCISES).await
    }

    pub async fn update_exercise(
        client: &ApiClient,
        id: RecordId,
        input: &ExerciseInput,
    ) -> ClientResult<Exercise> {
        input.validate().map_err(|e| form_error(&e))?;
        client.put(&endpoints::detail(EXERCISES, id), input).await
    }

    pub async fn delete_exercise(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(EXERCISES, id)).await
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    pub async fn sessions(client: &ApiClient) -> ClientResult<Vec<WorkoutSession>> {
        client.get_list(WORKOUT_SESSIONS).await
    }

    pub async fn log_session(
        client: &ApiClient,
        input: &WorkoutSessionInput,
    ) -> ClientResult<WorkoutSession> {
        input.validate().map_err(|e| form_error(&e))?;
        client.post(WORKOUT_SESSIONS, input).await
    }

    pub async fn delete_session(client: &ApiClient, id: RecordId) -> ClientResult<()> {
        client.delete(&endpoints::detail(WORKOUT_SESSIONS, id)).await
    }

    /// Backend-defined weekly aggregate, passed through untouched
    pub async fn weekly_progress(client: &ApiClient) -> ClientResult<Value> {
        client.get(WEEKLY_PROGRESS).await
    }
}
