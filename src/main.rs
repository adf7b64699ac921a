use clap::{Parser, Subcommand};
use miette::{miette, IntoDiagnostic, Result};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use txconsole::application::engine::{ConsoleEngine, SEARCH_DEBOUNCE};
use txconsole::domain::query::{SortOrder, StatusFilter};
use txconsole::infrastructure::fixtures::{DEFAULT_SEED, DEFAULT_TOTAL};
use txconsole::infrastructure::mock::{
    MockGateway, DEFAULT_DETAILS_FAIL_RATE, DEFAULT_LIST_FAIL_RATE, DEFAULT_MAX_LATENCY_MS,
    DEFAULT_MIN_LATENCY_MS,
};
use txconsole::interfaces::console;
use txconsole::interfaces::csv::summary_writer::SummaryWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the mock dataset and fault injection
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of transactions in the mock dataset
    #[arg(long, default_value_t = DEFAULT_TOTAL)]
    count: usize,

    /// Minimum simulated latency per request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MIN_LATENCY_MS)]
    min_latency_ms: u64,

    /// Maximum simulated latency per request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_LATENCY_MS)]
    max_latency_ms: u64,

    /// Probability in [0, 1] that a list request fails
    #[arg(long, default_value_t = DEFAULT_LIST_FAIL_RATE)]
    list_fail_rate: f64,

    /// Probability in [0, 1] that a details request fails
    #[arg(long, default_value_t = DEFAULT_DETAILS_FAIL_RATE)]
    details_fail_rate: f64,

    /// Quiet window applied to search input, in milliseconds
    #[arg(long, default_value_t = SEARCH_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single query and print the matching transactions as CSV
    Query {
        /// Status filter: all, pending, success or failed
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,

        /// Search text matched against id, reference, email and trace id
        #[arg(long, default_value = "")]
        search: String,

        /// Sort order: newest or oldest
        #[arg(long, default_value_t = SortOrder::Newest)]
        sort: SortOrder,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let gateway = Arc::new(
        MockGateway::builder()
            .seed(cli.seed)
            .total(cli.count)
            .latency_ms(cli.min_latency_ms, cli.max_latency_ms)
            .list_fail_rate(cli.list_fail_rate)
            .details_fail_rate(cli.details_fail_rate)
            .build(),
    );
    let engine = ConsoleEngine::with_debounce(gateway, Duration::from_millis(cli.debounce_ms));

    match cli.command {
        Some(Command::Query { status, search, sort }) => run_query(engine, status, search, sort).await,
        None => console::run(engine).await.into_diagnostic(),
    }
}

/// One-shot mode: apply the query, wait for the single fetch to settle and
/// dump the rows as CSV on stdout.
async fn run_query(
    engine: ConsoleEngine,
    status: StatusFilter,
    search: String,
    sort: SortOrder,
) -> Result<()> {
    engine.set_status_filter(status);
    engine.set_sort_order(sort);
    engine.set_search_text(&search);
    engine.retry_list();

    let state = engine.settled_list().await;
    if let Some(error) = state.error {
        return Err(miette!("{error}"));
    }

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_summaries(state.data).into_diagnostic()?;

    Ok(())
}
