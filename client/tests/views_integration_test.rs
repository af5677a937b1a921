//! Integration tests for page views against a mock backend

mod common;

use common::{date, TestApp};
use serde_json::json;
use std::sync::Arc;
use tokio_test::assert_ok;
use tracker_client::api::AppFlavor;
use tracker_client::config::GoalsConfig;
use tracker_client::views::{
    ActionOutcome, ActivityListView, AddActivityView, AssumeNo, AssumeYes, DietView,
    FitnessDashboardView, PageState, SkillupDashboardView, WaterView, WorkoutsView,
};
use tracker_shared::health_metrics::HydrationStatus;
use tracker_shared::models::ActivityStatus;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn activity(id: i64, topic: &str, status: &str) -> serde_json::Value {
    json!({"id": id, "topic": topic, "date": "2024-03-10", "status": status})
}

// ============================================================================
// Learning tracker
// ============================================================================

#[tokio::test]
async fn test_dashboard_loads_stats_and_todays_activities() {
    let app = TestApp::new(AppFlavor::Skillup).await;
    app.seed_session("token", Some("refresh"), None);

    Mock::given(method("GET"))
        .and(path("/dashboard/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_activities": 0, "completed_activities": 0, "pending_activities": 0
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/"))
        .and(query_param("date", "2024-03-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1, "next": null, "previous": null,
            "results": [activity(1, "Lifetimes", "pending")]
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut view = SkillupDashboardView::new(app.client.clone()).with_today(date(2024, 3, 10));
    let dashboard = view.load().await.data().cloned().unwrap();

    assert_eq!(dashboard.completion, "N/A");
    assert_eq!(dashboard.today_activities.len(), 1);
}

#[tokio::test]
async fn test_one_failed_fetch_fails_whole_page() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("GET"))
        .and(path("/dashboard/stats/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    let mut view = SkillupDashboardView::new(app.client.clone());

    assert_eq!(
        view.load().await.banner(),
        Some("Server error. Please try again later.")
    );
}

#[tokio::test]
async fn test_filters_are_sent_as_query() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("GET"))
        .and(path("/activities/"))
        .and(query_param("search", "rust"))
        .and(query_param("status", "completed"))
        .and(query_param("ordering", "-date"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([activity(2, "Rust", "completed")])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let mut view = ActivityListView::new(app.client.clone(), Arc::new(AssumeYes));
    let query = tracker_shared::types::ActivityQuery {
        search: Some("rust".to_string()),
        status: Some(ActivityStatus::Completed),
        ..Default::default()
    };
    let state = view.set_query(query).await;

    assert_eq!(state.data().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_deleting_removed_activity_still_refetches() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("DELETE"))
        .and(path("/activities/5/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([activity(6, "Traits", "pending")])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let mut view = ActivityListView::new(app.client.clone(), Arc::new(AssumeYes));
    let outcome = view.delete(5).await;

    assert_eq!(outcome, ActionOutcome::Failed("Not found.".to_string()));
    let ids: Vec<i64> = view.state().data().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![6]);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    let mut view = ActivityListView::new(app.client.clone(), Arc::new(AssumeNo));

    assert_eq!(view.delete(5).await, ActionOutcome::Cancelled);
    assert!(app.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_status_change_patches_and_refetches() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("PATCH"))
        .and(path("/activities/3/"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity(3, "Macros", "completed")))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activities/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([activity(3, "Macros", "completed")])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let mut view = ActivityListView::new(app.client.clone(), Arc::new(AssumeYes));
    assert_eq!(
        view.set_status(3, ActivityStatus::Completed).await,
        ActionOutcome::Done
    );
    assert!(view.state().data().unwrap()[0].is_completed());
}

#[tokio::test]
async fn test_empty_categories_notice() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("GET"))
        .and(path("/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    let mut view = AddActivityView::new(app.client.clone(), false);
    let options = view.load_categories().await.data().cloned().unwrap();
    assert_eq!(options.notice.as_deref(), Some("No categories available"));

    let mut view = AddActivityView::new(app.client.clone(), true);
    let options = view.load_categories().await.data().cloned().unwrap();
    assert!(options.using_defaults);
    assert_eq!(options.categories.len(), 10);
}

#[tokio::test]
async fn test_unmounted_view_drops_late_response() {
    let app = TestApp::new(AppFlavor::Skillup).await;

    Mock::given(method("GET"))
        .and(path("/activities/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&app.server)
        .await;

    let mut view = ActivityListView::new(app.client.clone(), Arc::new(AssumeYes));
    let scope = view.scope();
    let unmount = async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        scope.unmount();
    };

    let (state, _) = tokio::join!(view.load(), unmount);

    assert!(state.is_loading());
}

// ============================================================================
// Fitness tracker
// ============================================================================

#[tokio::test]
async fn test_meal_totals_from_todays_meals() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    Mock::given(method("GET"))
        .and(path("/diet/meals/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diet/meals/today_meals/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1, "name": "Bowl", "meal_type": "LUNCH",
            "calories": 500, "protein": "30.00", "carbs": 50, "fats": "10.00",
            "date": "2024-03-10"
        }])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diet/nutrition/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&app.server)
        .await;

    let mut view = DietView::new(app.client.clone(), Arc::new(AssumeYes));
    let page = view.load().await.data().cloned().unwrap();

    assert_eq!(page.today_totals.calories, 500.0);
    assert_eq!(page.today_totals.protein, 30.0);
    assert_eq!(page.today_totals.carbs, 50.0);
    assert_eq!(page.today_totals.fats, 10.0);
    assert!(page.nutrition.is_empty());
}

#[tokio::test]
async fn test_malformed_meal_fails_page() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    Mock::given(method("GET"))
        .and(path("/diet/meals/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diet/meals/today_meals/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diet/nutrition/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    let mut view = DietView::new(app.client.clone(), Arc::new(AssumeYes));

    assert_eq!(
        view.load().await.banner(),
        Some("Unexpected response from server")
    );
}

#[tokio::test]
async fn test_water_progress_reaches_goal() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    Mock::given(method("GET"))
        .and(path("/water/intake/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;
    // Each load sees the running total grow: 0, then 1250, then 2000
    for total in [0, 1250] {
        Mock::given(method("GET"))
            .and(path("/water/intake/today_intake/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"intakes": [], "total_today": total, "goal": 2000})),
            )
            .up_to_n_times(1)
            .mount(&app.server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/water/intake/today_intake/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"intakes": [], "total_today": 2000, "goal": 2000})),
        )
        .mount(&app.server)
        .await;
    for (id, amount) in [(1, 1250), (2, 750)] {
        Mock::given(method("POST"))
            .and(path("/water/intake/"))
            .and(body_json(json!({"date": "2024-03-10", "amount": amount})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": id, "amount": amount, "date": "2024-03-10", "consumed_at": "09:30:00"
            })))
            .expect(1)
            .mount(&app.server)
            .await;
    }

    let mut view = WaterView::new(app.client.clone(), Arc::new(AssumeYes))
        .with_today(date(2024, 3, 10));
    let initial = view.load().await.data().unwrap().progress;
    assert_eq!(initial.status, HydrationStatus::GetStarted);
    assert_eq!(initial.remaining_ml, 2000);

    assert_ok!(view.log(1250).await);
    assert_eq!(view.state().data().unwrap().progress.total_ml, 1250);

    assert_ok!(view.log(750).await);
    let progress = view.state().data().unwrap().progress;
    assert_eq!(progress.total_ml, 2000);
    assert_eq!(progress.display_percent, 100.0);
    assert_eq!(progress.remaining_ml, 0);
    assert_eq!(progress.status.label(), "Excellent!");
}

#[tokio::test]
async fn test_invalid_water_amount_is_rejected_locally() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    let mut view = WaterView::new(app.client.clone(), Arc::new(AssumeYes));

    let err = view.log(0).await.unwrap_err();
    assert!(err.to_string().ends_with("Amount must be greater than zero"));
    assert!(view.log(10_001).await.is_err());
    assert!(app.server.received_requests().await.unwrap().is_empty());
    assert!(matches!(view.state(), PageState::Loading));
}

#[tokio::test]
async fn test_workouts_page_estimates_plans() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    Mock::given(method("GET"))
        .and(path("/workouts/plans/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Push", "difficulty": "I"}
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workouts/exercises/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "workout_plan": 1, "name": "Press", "sets": 4, "reps": 8,
             "calories_burned": 30, "rest_time": 90}
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workouts/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    let mut view = WorkoutsView::new(app.client.clone(), Arc::new(AssumeYes));
    let page = view.load().await.data().cloned().unwrap();

    assert_eq!(page.plans[0].estimate.calories, 120);
    assert_eq!(page.plans[0].estimate.rest_minutes, 6.0);
}

#[tokio::test]
async fn test_fitness_dashboard_tolerates_null_payloads() {
    let app = TestApp::new(AppFlavor::Fitness).await;

    Mock::given(method("GET"))
        .and(path("/analytics/dashboard/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/weekly-charts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calories": [{"label": "Mon", "value": 300}, {"label": "Tue", "value": 600}]
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workouts/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "date": "2024-03-10", "duration": 30}
        ])))
        .mount(&app.server)
        .await;

    let mut view = FitnessDashboardView::new(app.client.clone(), GoalsConfig::default())
        .with_today(date(2024, 3, 10));
    let dashboard = view.load().await.data().cloned().unwrap();

    assert_eq!(dashboard.streak, 1);
    assert_eq!(dashboard.water_goal_ml, 2000);
    assert_eq!(dashboard.charts[0].bars[1].height, 80.0);
    assert_eq!(dashboard.charts[0].bars[0].height, 40.0);
}
