use clap::Parser;
use market_research_orchestrator::crews::create_default_registry;
use market_research_orchestrator::llm::TextGenerator;
use market_research_orchestrator::market::MarketDataCache;
use market_research_orchestrator::{RequestInput, RunController};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Run an adaptive research pipeline for one ticker and write the
/// verdict report into a per-run directory.
#[derive(Parser, Debug)]
#[command(name = "research", version, about)]
struct Args {
    /// Ticker symbol to research
    #[arg(short, long)]
    ticker: String,

    /// Research horizon: 1w, 1m, 3m or 1y
    #[arg(long, default_value = "1m")]
    horizon: String,

    /// Risk profile: conservative, normal or aggressive
    #[arg(long, default_value = "normal")]
    risk: String,

    /// Root directory for run artifacts
    #[arg(long, env = "RUNS_DIR", default_value = "runs")]
    runs_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let generator = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Arc::new(TextGenerator::new(key)),
        _ => {
            warn!("GEMINI_API_KEY not set, using deterministic fallback claims");
            Arc::new(TextGenerator::disabled())
        }
    };
    let market = Arc::new(MarketDataCache::new());

    let request = match RequestInput::new(&args.ticker, &args.horizon, &args.risk) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Invalid request: {}", e);
            std::process::exit(1);
        }
    };

    info!(ticker = %request.ticker, horizon = %request.horizon, "Starting research run");

    let registry = create_default_registry(generator, market);
    let controller = RunController::new(registry, args.runs_dir);

    match controller.run(request).await {
        Ok(summary) => {
            println!("Run:        {}", summary.run_id);
            println!("Verdict:    {}", summary.verdict);
            println!("Confidence: {:.2}", summary.confidence);
            println!("Evidence:   {} items", summary.evidence_count);
            if !summary.triggered_tasks.is_empty() {
                println!("Follow-ups: {}", summary.triggered_tasks.join(", "));
            }
            println!("Report:     {}", summary.run_dir.join("final_report.md").display());
        }
        Err(e) => {
            eprintln!("Research run failed: {}", e);
            std::process::exit(1);
        }
    }
}
