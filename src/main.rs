use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use registrar::config::AppConfig;
use registrar::error::AppError;
use registrar::repository::{FixedClock, RepositoryError, SystemClock};
use registrar::telemetry;
use registrar::workflows::admission::{
    admission_router, AdmissionCriteria, AdmissionEvaluator, AdmissionPolicy, Application,
    BatchOutcome, Candidate, CapacityPolicy, CriteriaId, Disposition, MemoryAdmissionStore, Phase,
    SkipReason,
};
use registrar::workflows::enrollment::{
    enrollment_router, ClassSection, Curriculum, MemoryEnrollmentStore, TransferRecord,
    TransferService,
};
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Academic Registrar",
    about = "Run the admission and enrollment service or evaluate batches from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Admission batch operations against a JSON fixture
    Admission {
        #[command(subcommand)]
        command: AdmissionCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// JSON fixture used to seed the in-memory stores
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum AdmissionCommand {
    /// Evaluate one criteria's ranked batch and print the decisions
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON fixture holding phases, candidates, applications and criteria
    #[arg(long)]
    fixture: PathBuf,
    /// Identifier of the admission criteria to evaluate
    #[arg(long)]
    criteria: String,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Skip remaining candidates when seats run out instead of aborting
    #[arg(long)]
    skip_remaining: bool,
}

/// Seed data for the in-memory stores. Every section is optional so a fixture
/// can cover only the workflow it exercises.
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    phases: Vec<Phase>,
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    applications: Vec<Application>,
    #[serde(default)]
    criteria: Vec<AdmissionCriteria>,
    #[serde(default)]
    transfers: Vec<TransferRecord>,
    #[serde(default)]
    curricula: Vec<Curriculum>,
    #[serde(default)]
    sections: Vec<ClassSection>,
}

impl Fixture {
    fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|err| AppError::InvalidFixture(format!("{}: {err}", path.display())))
    }

    fn seed(
        &self,
        admissions: &MemoryAdmissionStore,
        enrollments: &MemoryEnrollmentStore,
    ) -> Result<(), AppError> {
        for criteria in &self.criteria {
            criteria
                .validate()
                .map_err(|err| AppError::InvalidFixture(err.to_string()))?;
        }

        for phase in &self.phases {
            admissions.insert_phase(phase.clone()).map_err(seed_error("phase"))?;
        }
        for candidate in &self.candidates {
            admissions
                .insert_candidate(candidate.clone())
                .map_err(seed_error("candidate"))?;
        }
        for application in &self.applications {
            admissions
                .insert_application(application.clone())
                .map_err(seed_error("application"))?;
        }
        for criteria in &self.criteria {
            admissions
                .insert_criteria(criteria.clone())
                .map_err(seed_error("criteria"))?;
        }
        for curriculum in &self.curricula {
            enrollments
                .insert_curriculum(curriculum.clone())
                .map_err(seed_error("curriculum"))?;
        }
        for section in &self.sections {
            enrollments
                .insert_section(section.clone())
                .map_err(seed_error("section"))?;
        }
        for transfer in &self.transfers {
            enrollments
                .insert_transfer(transfer.clone())
                .map_err(seed_error("transfer"))?;
        }

        Ok(())
    }
}

fn seed_error(record: &'static str) -> impl Fn(RepositoryError) -> AppError {
    move |err| AppError::InvalidFixture(format!("{record}: {err}"))
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Admission {
            command: AdmissionCommand::Evaluate(args),
        } => run_admission_evaluate(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let admissions = Arc::new(MemoryAdmissionStore::new());
    let enrollments = Arc::new(MemoryEnrollmentStore::new());
    if let Some(path) = args.fixture.take() {
        let fixture = Fixture::from_path(&path)?;
        fixture.seed(&admissions, &enrollments)?;
        info!(
            fixture = %path.display(),
            candidates = fixture.candidates.len(),
            applications = fixture.applications.len(),
            transfers = fixture.transfers.len(),
            "stores seeded from fixture"
        );
    }

    let clock = Arc::new(SystemClock);
    let evaluator = Arc::new(AdmissionEvaluator::new(
        admissions,
        clock.clone(),
        AdmissionPolicy::default(),
    ));
    let transfers = Arc::new(TransferService::new(enrollments, clock));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(admission_router(evaluator))
        .merge(enrollment_router(transfers))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "academic registrar ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_admission_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        fixture,
        criteria,
        today,
        skip_remaining,
    } = args;

    let admissions = Arc::new(MemoryAdmissionStore::new());
    let enrollments = MemoryEnrollmentStore::new();
    Fixture::from_path(&fixture)?.seed(&admissions, &enrollments)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let policy = AdmissionPolicy {
        on_capacity_exhausted: if skip_remaining {
            CapacityPolicy::SkipRemaining
        } else {
            CapacityPolicy::AbortBatch
        },
    };

    let evaluator = AdmissionEvaluator::new(admissions, Arc::new(FixedClock(today)), policy);
    let outcome = evaluator.evaluate_batch(&CriteriaId(criteria))?;
    render_batch_outcome(&outcome, today);

    Ok(())
}

fn render_batch_outcome(outcome: &BatchOutcome, today: NaiveDate) {
    println!(
        "Admission batch for criteria {} (phase {}, evaluated {})",
        outcome.criteria, outcome.phase, today
    );

    for decision in &outcome.decisions {
        let label = match &decision.disposition {
            Disposition::Admitted => "admitted".to_string(),
            Disposition::NotAdmitted => "not admitted".to_string(),
            Disposition::Skipped {
                reason: SkipReason::AlreadyEvaluated,
            } => "skipped (already evaluated)".to_string(),
            Disposition::Skipped {
                reason: SkipReason::NoSeat,
            } => "skipped (no seat)".to_string(),
        };
        println!("- {}: {}", decision.application, label);
    }

    println!(
        "\n{} admitted, {} not admitted, {} skipped",
        outcome.admitted(),
        outcome.rejected(),
        outcome.skipped()
    );
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
