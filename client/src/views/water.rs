//! Water tracker

use super::{settle, ActionOutcome, Confirm, PageState, ScopeHandle, ViewScope};
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::WaterService;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::info;
use tracker_shared::health_metrics::{hydration_progress, HydrationProgress};
use tracker_shared::models::{RecordId, WaterIntake};
use tracker_shared::types::WaterIntakeInput;

#[derive(Debug, Clone)]
pub struct WaterPage {
    pub intakes: Vec<WaterIntake>,
    pub today_intakes: Vec<WaterIntake>,
    pub progress: HydrationProgress,
}

pub struct WaterView {
    client: ApiClient,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    today: NaiveDate,
    state: PageState<WaterPage>,
}

impl WaterView {
    pub fn new(client: ApiClient, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            client,
            confirm,
            scope: ViewScope::new(),
            today: Local::now().date_naive(),
            state: PageState::Loading,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn state(&self) -> &PageState<WaterPage> {
        &self.state
    }

    pub async fn load(&mut self) -> &PageState<WaterPage> {
        if let Some(result) = self.scope.run(fetch(&self.client)).await {
            self.state = settle(result, "water");
        }
        &self.state
    }

    /// Log an amount for today
    pub async fn log(&mut self, amount_ml: u32) -> ClientResult<WaterIntake> {
        let input = WaterIntakeInput {
            date: self.today,
            amount: amount_ml,
        };
        let intake = WaterService::log_intake(&self.client, &input).await?;
        info!(intake_id = intake.id, amount_ml, "Water intake logged");
        self.load().await;
        Ok(intake)
    }

    pub async fn delete(&mut self, id: RecordId) -> ActionOutcome {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this entry?")
        {
            return ActionOutcome::Cancelled;
        }
        let result = WaterService::delete_intake(&self.client, id).await;
        let outcome = ActionOutcome::from_result(result, "delete_water_intake");
        self.load().await;
        outcome
    }
}

async fn fetch(client: &ApiClient) -> ClientResult<WaterPage> {
    let (intakes, today) = tokio::try_join!(
        WaterService::intakes(client),
        WaterService::today(client),
    )?;
    Ok(WaterPage {
        intakes,
        progress: hydration_progress(today.total_today, today.goal),
        today_intakes: today.intakes,
    })
}
