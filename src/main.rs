use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use domain::activity_level::ActivityLevel;
use domain::auth::{Credentials, RegisterForm};
use domain::exercise::ExerciseForm;
use domain::gender::Gender;
use domain::goal::Goal;
use domain::guard::{Route, SessionGuard};
use domain::intensity::Intensity;
use domain::navigation::Navigator;
use domain::physical::PhysicalDataForm;
use domain::users::ProfileUpdate;
use domain::views::{Dashboard, RecommendationHistory};
use domain::Api;
use events::EventPublisher;
use gateway::http::GatewayClient;
use gateway::session::{FileStorage, SessionStore};
use log::*;
use serde::Serialize;
use serde_json::json;
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fitness-client", version)]
#[command(about = "Command-line client for the fitness tracking service")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account. Does not log in.
    Register(RegisterArgs),
    /// Log in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FITNESS_PASSWORD")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
    /// Show the profile
    Profile,
    /// Change profile fields; only the given ones are sent
    UpdateProfile(ProfileArgs),
    /// Record a body measurement
    AddPhysical(PhysicalArgs),
    /// List body measurements, newest first
    ListPhysical,
    /// Record an exercise
    AddExercise(ExerciseArgs),
    /// List exercises, newest first
    ListExercises,
    /// Generate a diet plan
    Diet,
    /// Generate a workout plan
    Workout,
    /// List generated diet plans
    DietHistory,
    /// List generated workout plans
    WorkoutHistory,
    /// Profile with the latest measurements and exercises
    Dashboard,
    /// Latest diet and workout plans
    Recommendations,
    /// Resolve which view a navigation ends on (e.g. /dashboard)
    Navigate { route: Route },
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "FITNESS_PASSWORD")]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    gender: Option<Gender>,
    /// Centimetres
    #[arg(long)]
    height: Option<f64>,
    /// Kilograms
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    activity_level: Option<ActivityLevel>,
    #[arg(long)]
    goal: Option<Goal>,
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: Option<String>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    activity_level: Option<ActivityLevel>,
    #[arg(long)]
    goal: Option<Goal>,
}

#[derive(Args)]
struct PhysicalArgs {
    #[arg(long)]
    weight: Option<f64>,
    /// Percent
    #[arg(long)]
    body_fat: Option<f64>,
    #[arg(long)]
    muscle_mass: Option<f64>,
    #[arg(long)]
    bmi: Option<f64>,
    #[arg(long)]
    waist: Option<f64>,
}

#[derive(Args)]
struct ExerciseArgs {
    /// e.g. running, cycling, swimming
    #[arg(long = "type")]
    exercise_type: Option<String>,
    /// Minutes
    #[arg(long)]
    duration: Option<u32>,
    #[arg(long)]
    calories_burned: Option<u32>,
    /// Metres
    #[arg(long)]
    distance: Option<f64>,
    #[arg(long)]
    steps: Option<u32>,
    #[arg(long)]
    heart_rate: Option<u32>,
    #[arg(long)]
    intensity: Option<Intensity>,
    #[arg(long)]
    notes: Option<String>,
}

/// Everything a command needs, built once per process.
struct App {
    api: Api,
    navigator: Arc<Navigator>,
}

impl App {
    async fn init(config: &Config) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.session_file()));
        let store = SessionStore::load(storage).await?;

        let navigator = Arc::new(Navigator::new(SessionGuard::new(store.clone())));
        let events = EventPublisher::new().with_handler(navigator.clone());

        let client = GatewayClient::builder(config.base_url(), store)
            .with_events(events.clone())
            .with_timeout(config.request_timeout())
            .with_user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            api: Api::new(client, events),
            navigator,
        })
    }

    async fn run(&self, command: Command) -> Result<()> {
        let api = &self.api;
        match command {
            Command::Register(args) => {
                let form = RegisterForm {
                    username: args.username,
                    email: args.email,
                    password: args.password,
                    confirm_password: args.confirm_password,
                    gender: args.gender,
                    height: args.height,
                    weight: args.weight,
                    activity_level: args.activity_level,
                    goal: args.goal,
                };
                print_json(&api.auth().register(&form).await?)?;
                self.navigator.navigate(Route::Login).await;
            }
            Command::Login { email, password } => {
                let user = api.auth().login(&Credentials { email, password }).await?;
                print_json(&user)?;
            }
            Command::Logout => api.auth().logout().await?,
            Command::Whoami => match api.client().session().get().await.user {
                Some(user) => print_json(&user)?,
                None => println!("Not logged in"),
            },
            Command::Profile => print_json(&api.auth().profile().await?)?,
            Command::UpdateProfile(args) => {
                let update = ProfileUpdate {
                    username: args.username,
                    gender: args.gender,
                    birth_date: args.birth_date,
                    height: args.height,
                    weight: args.weight,
                    activity_level: args.activity_level,
                    goal: args.goal,
                };
                print_json(&api.auth().update_profile(&update).await?)?;
            }
            Command::AddPhysical(args) => {
                let form = PhysicalDataForm {
                    weight: args.weight,
                    body_fat: args.body_fat,
                    muscle_mass: args.muscle_mass,
                    bmi: args.bmi,
                    waist: args.waist,
                };
                print_json(&api.physical_data().add(&form).await?)?;
            }
            Command::ListPhysical => print_json(&api.physical_data().list().await?)?,
            Command::AddExercise(args) => {
                let form = ExerciseForm {
                    exercise_type: args.exercise_type,
                    duration: args.duration,
                    calories_burned: args.calories_burned,
                    distance: args.distance,
                    steps: args.steps,
                    heart_rate: args.heart_rate,
                    intensity: args.intensity,
                    notes: args.notes,
                };
                print_json(&api.exercises().add(&form).await?)?;
            }
            Command::ListExercises => print_json(&api.exercises().list().await?)?,
            Command::Diet => print_json(&api.recommendations().generate_diet().await?)?,
            Command::Workout => print_json(&api.recommendations().generate_workout().await?)?,
            Command::DietHistory => print_json(&api.recommendations().diet_history().await?)?,
            Command::WorkoutHistory => {
                print_json(&api.recommendations().workout_history().await?)?
            }
            Command::Dashboard => {
                self.navigator.navigate(Route::Dashboard).await;
                let dashboard = Dashboard::load(api).await?;
                print_json(&json!({
                    "profile": dashboard.profile,
                    "recent_physical_data": dashboard.recent_physical_data(),
                    "recent_exercises": dashboard.recent_exercises(),
                }))?;
            }
            Command::Recommendations => {
                self.navigator.navigate(Route::Recommendations).await;
                let history = RecommendationHistory::load(api).await?;
                print_json(&json!({
                    "diet": history.latest_diet(),
                    "workout": history.latest_workout(),
                }))?;
            }
            Command::Navigate { route } => {
                println!("{}", self.navigator.navigate(route).await);
            }
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    Config::load_dotenv();
    let cli = Cli::parse();
    Logger::init_logger(&cli.config);

    debug!("Using service at {}", cli.config.base_url());

    let app = match App::init(&cli.config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(cli.command).await {
        match e.downcast_ref::<domain::Error>() {
            Some(domain_err) => {
                eprintln!("{}", domain_err.user_message());
                debug!("{domain_err}");
                if domain_err.is_unauthorized() {
                    eprintln!("Now at {}", app.navigator.current().await);
                }
            }
            None => error!("{e:#}"),
        }
        std::process::exit(1);
    }
}
