//! Tracker CLI
//!
//! One command per invocation against the learning or fitness backend.
//!
//! Usage:
//! ```bash
//! # Log in and look at today's dashboard
//! tracker login --username sam
//! tracker dashboard
//!
//! # Fitness flavor
//! tracker --flavor fitness water log 250
//! tracker --flavor fitness diet list
//!
//! # Offline calculators
//! tracker metrics bmi --weight 70 --height 175
//! ```

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker_client::api::{ApiClient, AppFlavor};
use tracker_client::auth::{enforce, AuthSession};
use tracker_client::config::AppConfig;
use tracker_client::navigation::{RecordingNavigator, Route};
use tracker_client::services::activities::query_pairs;
use tracker_client::services::{ActivityService, CategoryService};
use tracker_client::session::FileStore;
use tracker_client::views::{
    ActionOutcome, ActivityListView, AddActivityView, Confirm, DietView, FitnessDashboardView,
    PageState, ProfileSummary, ProfileView, SkillupDashboardView, WaterView, WorkoutsView,
};
use tracker_shared::health_metrics::{calculate_bmi_result, calculate_bmr};
use tracker_shared::models::{ActivityStatus, Difficulty, Gender, MealType, RecordId};
use tracker_shared::types::{
    ActivityInput, ActivityQuery, ExerciseInput, MealInput, ProfileUpdate, RegisterRequest,
    WorkoutPlanInput, WorkoutSessionInput,
};

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Learning and fitness tracker client",
    long_about = "Command-line front-end for the learning-activity and fitness/diet tracker backends."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Which backend to talk to (skillup or fitness)
    #[arg(long, global = true)]
    flavor: Option<AppFlavor>,

    /// Session file override
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session
    Login {
        #[arg(long, short = 'u')]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "TRACKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// End the session
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TRACKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Show the logged-in user
    Whoami,
    /// Show the dashboard for the configured flavor
    Dashboard,
    /// Learning activities
    Activities {
        #[command(subcommand)]
        action: ActivityCommand,
    },
    /// List activity categories
    Categories,
    /// Workout plans, exercises and sessions
    Workouts {
        #[command(subcommand)]
        action: WorkoutCommand,
    },
    /// Meals and nutrition
    Diet {
        #[command(subcommand)]
        action: DietCommand,
    },
    /// Water intake
    Water {
        #[command(subcommand)]
        action: WaterCommand,
    },
    /// Profile and body metrics
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Offline calculators
    Metrics {
        #[command(subcommand)]
        action: MetricsCommand,
    },
}

#[derive(Subcommand)]
enum ActivityCommand {
    /// List activities, newest first
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        category: Option<RecordId>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "-date")]
        ordering: String,
    },
    /// Add an activity, or replace one with --edit
    Add {
        topic: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        category: Option<RecordId>,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_enum, default_value = "pending")]
        status: StatusArg,
        #[arg(long)]
        edit: Option<RecordId>,
    },
    Show {
        id: RecordId,
    },
    /// Mark as completed
    Complete {
        id: RecordId,
    },
    /// Mark as pending again
    Reopen {
        id: RecordId,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// Plans with estimates, plus logged sessions
    List,
    AddPlan {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value = "beginner")]
        difficulty: DifficultyArg,
    },
    AddExercise {
        plan: RecordId,
        name: String,
        #[arg(long, default_value_t = 3)]
        sets: u32,
        #[arg(long, default_value_t = 10)]
        reps: u32,
        /// Calories burned per set
        #[arg(long, default_value_t = 50)]
        calories: u32,
        /// Rest between sets in seconds
        #[arg(long, default_value_t = 60)]
        rest: u32,
    },
    LogSession {
        /// Minutes
        duration: u32,
        #[arg(long)]
        plan: Option<RecordId>,
        #[arg(long, default_value_t = 0)]
        calories: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    DeletePlan {
        id: RecordId,
    },
    DeleteExercise {
        id: RecordId,
    },
}

#[derive(Subcommand)]
enum DietCommand {
    /// Today's meals and totals
    List,
    Add {
        name: String,
        #[arg(long, value_enum, default_value = "breakfast")]
        meal_type: MealTypeArg,
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        #[arg(long, default_value_t = 0.0)]
        fats: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Subcommand)]
enum WaterCommand {
    /// Today's hydration progress
    Show,
    /// Log an amount in ml
    Log {
        amount: u32,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// Kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Centimeters
        #[arg(long)]
        height: Option<f64>,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(long)]
        calorie_goal: Option<u32>,
        #[arg(long)]
        water_goal: Option<u32>,
    },
}

#[derive(Subcommand)]
enum MetricsCommand {
    Bmi {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
    },
    Bmr {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum)]
        gender: GenderArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for ActivityStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => ActivityStatus::Pending,
            StatusArg::Completed => ActivityStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MealTypeArg {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl From<MealTypeArg> for MealType {
    fn from(arg: MealTypeArg) -> Self {
        match arg {
            MealTypeArg::Breakfast => MealType::Breakfast,
            MealTypeArg::Lunch => MealType::Lunch,
            MealTypeArg::Dinner => MealType::Dinner,
            MealTypeArg::Snack => MealType::Snack,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

impl Command {
    /// Screen the command stands for; `None` skips the guard
    fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } => Some(Route::Login),
            Command::Register { .. } => Some(Route::Register),
            Command::Logout | Command::Metrics { .. } => None,
            Command::Whoami | Command::Dashboard => Some(Route::Dashboard),
            Command::Activities {
                action: ActivityCommand::Add { .. },
            } => Some(Route::AddActivity),
            Command::Activities { .. } | Command::Categories => Some(Route::Activities),
            Command::Workouts { .. } => Some(Route::Workouts),
            Command::Diet { .. } => Some(Route::Diet),
            Command::Water { .. } => Some(Route::Water),
            Command::Profile { .. } => Some(Route::Profile),
        }
    }
}

/// Confirmation prompts on the terminal
struct TerminalConfirm {
    assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Metrics { action } = &cli.command {
        return run_metrics(action);
    }

    let config = AppConfig::load()?.with_overrides(
        cli.base_url.clone(),
        cli.flavor,
        cli.session.clone(),
    );
    debug!(base_url = %config.api.base_url, flavor = %config.api.flavor, "Configuration loaded");

    let flavor = config.api.flavor;
    let navigator = Arc::new(RecordingNavigator::new());
    let store = Arc::new(FileStore::new(&config.session.path, flavor));
    let client = ApiClient::new(&config.api, store, navigator.clone())?;
    let confirm: Arc<dyn Confirm> = Arc::new(TerminalConfirm {
        assume_yes: cli.yes,
    });

    let mut session = AuthSession::new(client);
    session.bootstrap().await;

    if let Some(route) = cli.command.route() {
        if !route.available_in(flavor) {
            bail!("'{}' is not available for the {} app", route, flavor);
        }
        if !enforce(route, session.state(), navigator.as_ref()) {
            match navigator.last() {
                Some(Route::Login) => bail!("Not logged in. Run `tracker login` first."),
                Some(Route::Dashboard) => {
                    bail!("Already logged in. Run `tracker logout` first.")
                }
                _ => bail!("Cannot open {} right now", route),
            }
        }
    }

    // Redirects from bootstrap or the guard are already handled
    let mark = navigator.mark();
    let result = run(cli.command, &mut session, &config, confirm).await;

    // A failed refresh mid-command sends the user back to login
    if navigator.since(mark).contains(&Route::Login) {
        bail!("Session expired. Run `tracker login` again.");
    }
    result
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "tracker_client=debug".into()
        } else {
            "tracker_client=info".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}

async fn run(
    command: Command,
    session: &mut AuthSession,
    config: &AppConfig,
    confirm: Arc<dyn Confirm>,
) -> Result<()> {
    let client = session.client().clone();
    let today = Local::now().date_naive();

    match command {
        Command::Login { username, password } => {
            let password = password_or_prompt(password)?;
            let user = session.login(&username, &password).await?;
            println!("Logged in as {}", user.display_name());
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out");
        }
        Command::Register {
            username,
            email,
            password,
            first_name,
            last_name,
        } => {
            let password = password_or_prompt(password)?;
            let request = RegisterRequest {
                username,
                email,
                password2: password.clone(),
                password,
                first_name,
                last_name,
            };
            session.register(&request).await?;
            println!("Account created. Run `tracker login` to sign in.");
        }
        Command::Whoami => {
            if let Some(user) = session.user() {
                println!("{} ({})", user.display_name(), user.username);
                if !user.email.is_empty() {
                    println!("  {}", user.email);
                }
            }
        }
        Command::Dashboard => match config.api.flavor {
            AppFlavor::Skillup => {
                let mut view = SkillupDashboardView::new(client);
                let dashboard = ready(view.load().await)?;
                println!("Total activities:  {}", dashboard.stats.total_activities);
                println!("Completed:         {}", dashboard.stats.completed_activities);
                println!("Pending:           {}", dashboard.stats.pending_activities);
                println!("Completion rate:   {}", dashboard.completion);
                println!("Current streak:    {} day(s)", dashboard.stats.current_streak);
                println!();
                println!("Today:");
                print_activities(&dashboard.today_activities);
            }
            AppFlavor::Fitness => {
                let mut view = FitnessDashboardView::new(client, config.goals.clone());
                let dashboard = ready(view.load().await)?;
                let analytics = &dashboard.analytics;
                println!(
                    "Workouts this week: {} ({} kcal burned)",
                    analytics.workout_analytics.total_workouts_week,
                    analytics.workout_analytics.total_calories_burned_week
                );
                println!(
                    "Calories today:     {} / {} ({})",
                    analytics.diet_analytics.today_calories,
                    dashboard.calorie_goal,
                    dashboard.calorie_status.label()
                );
                println!(
                    "Water today:        {} / {} ml ({:.0}%, {})",
                    analytics.water_analytics.today_intake,
                    dashboard.water_goal_ml,
                    dashboard.water_percent,
                    dashboard.hydration.label()
                );
                println!("Workout streak:     {} day(s)", dashboard.streak);
                for series in &dashboard.charts {
                    println!();
                    println!("{}:", series.name);
                    for bar in &series.bars {
                        let width = (bar.height / 4.0).round() as usize;
                        println!("  {:>5} {:<20} {}", bar.label, "#".repeat(width), bar.value);
                    }
                }
                if !dashboard.achievements.is_empty() {
                    println!();
                    println!("Achievements:");
                    for achievement in &dashboard.achievements {
                        println!("  {}: {}", achievement.name(), achievement.description());
                    }
                }
            }
        },
        Command::Activities { action } => run_activities(action, client, config, confirm, today).await?,
        Command::Categories => {
            let categories = CategoryService::list(&client).await?;
            if categories.is_empty() {
                println!("No categories available");
            }
            for category in categories {
                println!("{:>4}  {}", category.id, category.name);
            }
        }
        Command::Workouts { action } => run_workouts(action, client, confirm, today).await?,
        Command::Diet { action } => {
            let mut view = DietView::new(client, confirm);
            match action {
                DietCommand::List => {
                    let page = ready(view.load().await)?;
                    if page.today_meals.is_empty() {
                        println!("No meals logged today");
                    }
                    for meal in &page.today_meals {
                        println!(
                            "{:>4}  {:<10} {:<24} {} kcal",
                            meal.id,
                            meal.meal_type.label(),
                            meal.name,
                            meal.calories
                        );
                    }
                    let totals = page.today_totals;
                    println!(
                        "Totals: {} kcal, {} g protein, {} g carbs, {} g fats",
                        totals.calories, totals.protein, totals.carbs, totals.fats
                    );
                }
                DietCommand::Add {
                    name,
                    meal_type,
                    calories,
                    protein,
                    carbs,
                    fats,
                    date,
                } => {
                    let input = MealInput {
                        name,
                        meal_type: meal_type.into(),
                        calories,
                        protein,
                        carbs,
                        fats,
                        date: date.unwrap_or(today),
                    };
                    let meal = view.add_meal(&input).await?;
                    println!("Logged meal {}", meal.id);
                }
                DietCommand::Delete { id } => report(view.delete_meal(id).await)?,
            }
        }
        Command::Water { action } => {
            let mut view = WaterView::new(client, confirm).with_today(today);
            match action {
                WaterCommand::Show => {
                    let page = ready(view.load().await)?;
                    let progress = page.progress;
                    println!(
                        "{} / {} ml ({:.0}%) {}",
                        progress.total_ml,
                        progress.goal_ml,
                        progress.display_percent,
                        progress.status.label()
                    );
                    println!("Remaining: {} ml", progress.remaining_ml);
                    for intake in &page.today_intakes {
                        let at = intake
                            .consumed_at
                            .map(|t| t.format("%H:%M").to_string())
                            .unwrap_or_default();
                        println!("{:>4}  {:>5}  {} ml", intake.id, at, intake.amount);
                    }
                }
                WaterCommand::Log { amount } => {
                    view.log(amount).await?;
                    if let Some(page) = view.state().data() {
                        println!(
                            "Logged {} ml, {} / {} ml today",
                            amount, page.progress.total_ml, page.progress.goal_ml
                        );
                    }
                }
                WaterCommand::Delete { id } => report(view.delete(id).await)?,
            }
        }
        Command::Profile { action } => {
            let mut view = ProfileView::new();
            match action {
                ProfileCommand::Show => {
                    let summary = ready(view.load(session).await)?;
                    print_profile(summary);
                }
                ProfileCommand::Update {
                    first_name,
                    last_name,
                    email,
                    age,
                    weight,
                    height,
                    gender,
                    calorie_goal,
                    water_goal,
                } => {
                    let update = ProfileUpdate {
                        first_name,
                        last_name,
                        email,
                        age,
                        weight,
                        height,
                        gender: gender.map(Into::into),
                        daily_calorie_goal: calorie_goal,
                        daily_water_goal: water_goal,
                    };
                    if update.is_empty() {
                        bail!("Nothing to update");
                    }
                    let summary = view.save(session, &update).await?;
                    print_profile(&summary);
                }
            }
        }
        Command::Metrics { action } => run_metrics(&action)?,
    }
    Ok(())
}

async fn run_activities(
    action: ActivityCommand,
    client: ApiClient,
    config: &AppConfig,
    confirm: Arc<dyn Confirm>,
    today: NaiveDate,
) -> Result<()> {
    match action {
        ActivityCommand::List {
            search,
            status,
            category,
            date,
            ordering,
        } => {
            let query = ActivityQuery {
                search,
                status: status.map(Into::into),
                category,
                date,
                ordering,
            };
            debug!(query = ?query_pairs(&query), "Listing activities");
            let mut view = ActivityListView::new(client, confirm);
            print_activities(ready(view.set_query(query).await)?);
        }
        ActivityCommand::Add {
            topic,
            description,
            category,
            date,
            status,
            edit,
        } => {
            let mut view = AddActivityView::new(client, config.categories.fallback_defaults);
            if let Some(notice) = ready(view.load_categories().await)?.notice.as_deref() {
                println!("{}", notice);
            }
            let mut input = match edit {
                Some(id) => view.load_for_edit(id).await?,
                None => ActivityInput {
                    topic: String::new(),
                    description: String::new(),
                    category: None,
                    date: today,
                    status: ActivityStatus::Pending,
                },
            };
            input.topic = topic;
            if !description.is_empty() {
                input.description = description;
            }
            input.category = category.or(input.category);
            input.date = date.unwrap_or(input.date);
            input.status = status.into();
            let saved = view.submit(edit, &input).await?;
            println!("Saved activity {}", saved.id);
        }
        ActivityCommand::Show { id } => {
            let activity = ActivityService::get(&client, id).await?;
            println!("{} [{}]", activity.topic, activity.status.as_str());
            println!("  Date:     {}", activity.date);
            if let Some(name) = activity.category.as_ref().and_then(|c| c.name()) {
                println!("  Category: {}", name);
            }
            if !activity.description.is_empty() {
                println!("  {}", activity.description);
            }
        }
        ActivityCommand::Complete { id } => {
            let mut view = ActivityListView::new(client, confirm);
            report(view.set_status(id, ActivityStatus::Completed).await)?;
        }
        ActivityCommand::Reopen { id } => {
            let mut view = ActivityListView::new(client, confirm);
            report(view.set_status(id, ActivityStatus::Pending).await)?;
        }
        ActivityCommand::Delete { id } => {
            let mut view = ActivityListView::new(client, confirm);
            report(view.delete(id).await)?;
        }
    }
    Ok(())
}

async fn run_workouts(
    action: WorkoutCommand,
    client: ApiClient,
    confirm: Arc<dyn Confirm>,
    today: NaiveDate,
) -> Result<()> {
    let mut view = WorkoutsView::new(client, confirm);
    match action {
        WorkoutCommand::List => {
            let page = ready(view.load().await)?;
            if page.plans.is_empty() {
                println!("No workout plans yet");
            }
            for summary in &page.plans {
                println!(
                    "{:>4}  {} ({}): {} exercises, ~{} kcal, {:.1} min rest",
                    summary.plan.id,
                    summary.plan.name,
                    summary.plan.difficulty.label(),
                    summary.estimate.exercise_count,
                    summary.estimate.calories,
                    summary.estimate.rest_minutes
                );
                for exercise in page.exercises_for(summary.plan.id) {
                    println!(
                        "        {:>4}  {} {}x{}",
                        exercise.id, exercise.name, exercise.sets, exercise.reps
                    );
                }
            }
            if !page.sessions.is_empty() {
                println!();
                println!("Sessions:");
                for s in &page.sessions {
                    println!(
                        "{:>4}  {}  {} min  {} kcal",
                        s.id, s.date, s.duration, s.total_calories_burned
                    );
                }
            }
        }
        WorkoutCommand::AddPlan {
            name,
            description,
            difficulty,
        } => {
            let input = WorkoutPlanInput {
                name,
                description,
                difficulty: difficulty.into(),
            };
            let plan = view.create_plan(&input).await?;
            println!("Created plan {}", plan.id);
        }
        WorkoutCommand::AddExercise {
            plan,
            name,
            sets,
            reps,
            calories,
            rest,
        } => {
            let input = ExerciseInput {
                name,
                sets,
                reps,
                calories_burned: calories,
                rest_time: rest,
            };
            let exercise = view.add_exercise(plan, &input).await?;
            println!("Added exercise {} to plan {}", exercise.id, plan);
        }
        WorkoutCommand::LogSession {
            duration,
            plan,
            calories,
            date,
            notes,
        } => {
            let input = WorkoutSessionInput {
                workout_plan: plan,
                date: date.unwrap_or(today),
                duration,
                total_calories_burned: calories,
                notes,
            };
            let logged = view.log_session(&input).await?;
            println!("Logged session {}", logged.id);
        }
        WorkoutCommand::DeletePlan { id } => report(view.delete_plan(id).await)?,
        WorkoutCommand::DeleteExercise { id } => report(view.delete_exercise(id).await)?,
    }
    Ok(())
}

fn run_metrics(action: &MetricsCommand) -> Result<()> {
    match action {
        MetricsCommand::Bmi { weight, height } => {
            let bmi = calculate_bmi_result(Some(*weight), Some(*height))
                .context("Weight and height must be positive")?;
            println!("BMI {} ({})", bmi.display, bmi.category.description());
        }
        MetricsCommand::Bmr {
            weight,
            height,
            age,
            gender,
        } => {
            let bmr = calculate_bmr(Some(*weight), Some(*height), Some(*age), Some((*gender).into()))
                .context("BMR is only defined for male or female with positive measurements")?;
            println!("BMR {} kcal/day", bmr.round());
        }
    }
    Ok(())
}

fn ready<T>(state: &PageState<T>) -> Result<&T> {
    match state {
        PageState::Ready(data) => Ok(data),
        PageState::Failed(banner) => bail!("{}", banner),
        PageState::Loading => bail!("Page did not finish loading"),
    }
}

fn report(outcome: ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Done => {
            info!("Action completed");
            println!("Done");
            Ok(())
        }
        ActionOutcome::Cancelled => {
            println!("Cancelled");
            Ok(())
        }
        ActionOutcome::Failed(banner) => bail!("{}", banner),
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_activities(activities: &[tracker_shared::models::Activity]) {
    if activities.is_empty() {
        println!("  No activities");
        return;
    }
    for activity in activities {
        let mark = if activity.is_completed() { "x" } else { " " };
        let category = activity
            .category
            .as_ref()
            .and_then(|c| c.name())
            .unwrap_or("-");
        println!(
            "  [{}] {:>4}  {}  {:<32} {}",
            mark, activity.id, activity.date, activity.topic, category
        );
    }
}

fn print_profile(summary: &ProfileSummary) {
    let user = &summary.user;
    println!("{} ({})", user.display_name(), user.username);
    if let Some(age) = user.age {
        println!("  Age:    {}", age);
    }
    if let Some(weight) = user.weight {
        println!("  Weight: {} kg", weight);
    }
    if let Some(height) = user.height {
        println!("  Height: {} cm", height);
    }
    match &summary.metrics.bmi {
        Some(bmi) => println!("  BMI:    {} ({})", bmi.display, bmi.category.description()),
        None => println!("  BMI:    add weight and height to calculate"),
    }
    if let Some(bmr) = summary.metrics.bmr {
        println!("  BMR:    {} kcal/day", bmr);
    }
}
