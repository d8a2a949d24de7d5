use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use manifesto_impact::config::{AppConfig, KnowledgeBaseConfig};
use manifesto_impact::engine::{
    AssumptionBook, ImpactEngine, ImpactResult, ManifestStore, RawProfile, TopicIndex, TopicSource,
};
use manifesto_impact::error::AppError;
use manifesto_impact::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
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
    name = "Manifesto Impact",
    about = "Estimate the personal impact of party manifestos from the command line or over HTTP",
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
    /// Analyze a selection against a survey profile and print the result
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    /// Country to analyze
    #[arg(long)]
    country: String,
    /// Party or candidate within the country
    #[arg(long, alias = "candidate")]
    party: String,
    /// Age as entered on the survey
    #[arg(long)]
    age: Option<String>,
    /// Monthly income answer, e.g. "2,000 – 2,999" or a plain number
    #[arg(long)]
    income: Option<String>,
    /// Employment status, e.g. "Employed", "Self-employed", "Retired"
    #[arg(long)]
    employment: Option<String>,
    /// Home ownership answer, e.g. "Own" or "Rent"
    #[arg(long)]
    home: Option<String>,
    /// Commute type, e.g. "Car" or "Public Transport"
    #[arg(long)]
    commute: Option<String>,
    /// City vs rural answer
    #[arg(long = "city-rural")]
    city_rural: Option<String>,
    /// Major concern; repeat the flag for several
    #[arg(long = "concern")]
    concerns: Vec<String>,
}

impl AnalyzeArgs {
    fn profile(&self) -> RawProfile {
        RawProfile {
            age: self.age.clone(),
            city_rural: self.city_rural.clone(),
            income: self.income.clone(),
            employment: self.employment.clone(),
            home: self.home.clone(),
            commute: self.commute.clone(),
            concerns: self.concerns.clone(),
            ..RawProfile::default()
        }
    }
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
        Command::Analyze(args) => run_analyze(args),
    }
}

fn load_engine(knowledge_base: &KnowledgeBaseConfig) -> Result<ImpactEngine, AppError> {
    let manifests = match &knowledge_base.manifests_path {
        Some(path) => ManifestStore::from_path(path)?,
        None => ManifestStore::builtin()?,
    };

    let topics = if knowledge_base.policy_index_disabled {
        TopicSource::Unavailable
    } else {
        match &knowledge_base.policy_index_path {
            Some(path) => TopicSource::Available(TopicIndex::from_path(path)?),
            None => TopicSource::Available(TopicIndex::builtin()?),
        }
    };

    Ok(ImpactEngine::new(
        manifests,
        topics,
        AssumptionBook::default(),
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let engine = Arc::new(load_engine(&config.knowledge_base)?);

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
        .merge(manifesto_impact::engine::impact_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "manifesto impact service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.knowledge_base)?;

    let profile = args.profile();
    let result = engine.analyze(&args.country, &args.party, &profile);
    render_impact(&args.country, &args.party, &result);

    Ok(())
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

fn render_impact(country: &str, party: &str, result: &ImpactResult) {
    println!("Impact analysis: {country} / {party}");

    match result {
        ImpactResult::Monetary(impact) => {
            if impact.rows.is_empty() {
                println!("No applicable policies for this profile.");
            } else {
                println!("\nApplicable policies");
                for row in &impact.rows {
                    let note = match &row.note {
                        Some(note) => format!(" ({note})"),
                        None => String::new(),
                    };
                    println!(
                        "- {} | cost {:.2}/mo | benefit {:.2}/mo{}",
                        row.title, row.monthly_cost, row.monthly_benefit, note
                    );
                }
            }

            println!("\nMonthly cost:    {:.2}", impact.monthly_cost);
            println!("Monthly benefit: {:.2}", impact.monthly_benefit);
            println!("Net effect:      {:.2}", impact.net);

            if let Some(url) = &impact.source_manifesto_url {
                println!("Source manifesto: {url}");
            }
        }
        ImpactResult::Qualitative(impact) => {
            if impact.topics.is_empty() {
                println!("{}", impact.summary);
            } else {
                println!("\nTopics");
                for topic in &impact.topics {
                    println!(
                        "- {} [{}] {}",
                        topic.topic,
                        topic.verdict.label(),
                        topic.rationale
                    );
                }
                println!("\nSummary: {}", impact.summary);
            }
        }
    }
}
