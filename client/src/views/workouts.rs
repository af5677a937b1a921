//! Workout plans, exercises and sessions

use super::{settle, ActionOutcome, Confirm, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::WorkoutService;
use std::sync::Arc;
use tracing::info;
use tracker_shared::health_metrics::{plan_estimate, PlanEstimate};
use tracker_shared::models::{Exercise, RecordId, WorkoutPlan, WorkoutSession};
use tracker_shared::types::{ExerciseInput, WorkoutPlanInput, WorkoutSessionInput};

/// A plan with its estimated load
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub plan: WorkoutPlan,
    pub estimate: PlanEstimate,
}

#[derive(Debug, Clone, Default)]
pub struct WorkoutsPage {
    pub plans: Vec<PlanSummary>,
    pub exercises: Vec<Exercise>,
    pub sessions: Vec<WorkoutSession>,
}

impl WorkoutsPage {
    fn assemble(
        plans: Vec<WorkoutPlan>,
        exercises: Vec<Exercise>,
        sessions: Vec<WorkoutSession>,
    ) -> Self {
        let plans = plans
            .into_iter()
            .map(|plan| PlanSummary {
                estimate: plan_estimate(&exercises, plan.id),
                plan,
            })
            .collect();
        Self {
            plans,
            exercises,
            sessions,
        }
    }

    /// Exercises belonging to one plan
    pub fn exercises_for(&self, plan_id: RecordId) -> impl Iterator<Item = &Exercise> {
        self.exercises
            .iter()
            .filter(move |exercise| exercise.workout_plan == plan_id)
    }
}

pub struct WorkoutsView {
    client: ApiClient,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    state: PageState<WorkoutsPage>,
}

impl WorkoutsView {
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

    pub fn state(&self) -> &PageState<WorkoutsPage> {
        &self.state
    }

    pub async fn load(&mut self) -> &PageState<WorkoutsPage> {
        if let Some(result) = self.scope.run(fetch(&self.client)).await {
            self.state = settle(result, "workouts");
        }
        &self.state
    }

    pub async fn create_plan(&mut self, input: &WorkoutPlanInput) -> ClientResult<WorkoutPlan> {
        let plan = WorkoutService::create_plan(&self.client, input).await?;
        info!(plan_id = plan.id, "Workout plan created");
        self.load().await;
        Ok(plan)
    }

    pub async fn add_exercise(
        &mut self,
        plan_id: RecordId,
        input: &ExerciseInput,
    ) -> ClientResult<Exercise> {
        let exercise = WorkoutService::add_exercise(&self.client, plan_id, input).await?;
        info!(plan_id, exercise_id = exercise.id, "Exercise added");
        self.load().await;
        Ok(exercise)
    }

    pub async fn log_session(&mut self, input: &WorkoutSessionInput) -> ClientResult<WorkoutSession> {
        let session = WorkoutService::log_session(&self.client, input).await?;
        info!(session_id = session.id, "Workout session logged");
        self.load().await;
        Ok(session)
    }

    pub async fn delete_plan(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this workout plan?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = WorkoutService::delete_plan(&self.client, id).await;
        let outcome = ActionOutcome::from_result(result, "delete_plan");
        self.load().await;
        outcome
    }

    pub async fn delete_exercise(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this exercise?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = WorkoutService::delete_exercise(&self.client, id).await;
        let outcome = ActionOutcome::from_result(result, "delete_exercise");
        self.load().await;
        outcome
    }

    pub async fn delete_session(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this session?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = WorkoutService::delete_session(&self.client, id).await;
        let outcome = ActionOutcome::from_result(result, "delete_session");
        self.load().await;
        outcome
    }
}

async fn fetch(client: &ApiClient) -> ClientResult<WorkoutsPage> {
    let (plans, exercises, sessions) = tokio::try_join!(
        WorkoutService::plans(client),
        WorkoutService::exercises(client),
        WorkoutService::sessions(client),
    )?;
    Ok(WorkoutsPage::assemble(plans, exercises, sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppFlavor;
    use crate::config::AppConfig;
    use crate::navigation::RecordingNavigator;
    use crate::session::MemoryStore;
    use crate::views::AssumeNo;
    use serde_json::json;

    fn exercise(id: RecordId, plan: RecordId, sets: u32, calories: u32, rest: u32) -> Exercise {
        serde_json::from_value(json!({
            "id": id, "workout_plan": plan, "name": "Squat",
            "sets": sets, "reps": 10, "calories_burned": calories, "rest_time": rest
        }))
        .unwrap()
    }

    #[test]
    fn test_assemble_estimates_each_plan() {
        let plans: Vec<WorkoutPlan> = serde_json::from_value(json!([
            {"id": 1, "name": "Legs"},
            {"id": 2, "name": "Empty"}
        ]))
        .unwrap();
        let exercises = vec![exercise(10, 1, 3, 50, 60), exercise(11, 1, 4, 25, 90)];

        let page = WorkoutsPage::assemble(plans, exercises, Vec::new());

        assert_eq!(page.plans[0].estimate.exercise_count, 2);
        assert_eq!(page.plans[0].estimate.calories, 250);
        assert_eq!(page.plans[0].estimate.rest_minutes, 9.0);
        assert_eq!(page.plans[1].estimate, PlanEstimate::default());
        assert_eq!(page.exercises_for(1).count(), 2);
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_call() {
        let mut config = AppConfig::default();
        // Nothing listens here; a request would surface as a network failure
        config.api.base_url = "http://127.0.0.1:9".to_string();
        let client = ApiClient::new(
            &config.api,
            Arc::new(MemoryStore::new(AppFlavor::Fitness)),
            Arc::new(RecordingNavigator::new()),
        )
        .unwrap();
        let mut view = WorkoutsView::new(client, Arc::new(AssumeNo));

        assert_eq!(view.delete_plan(1).await, ActionOutcome::Cancelled);
        assert!(view.state().is_loading());
    }
}
