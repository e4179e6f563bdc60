//! Wiring & DI. Entry point: parse args, bootstrap the transport, run the resolver, print.
//! No business logic here; resolution is delegated to ConversationResolver.
//!
//! Exit codes:
//!   0 - Success (or usage printed)
//!   1 - Unexpected error (config, HTTP client setup)
//!   2 - Conversation could not be resolved

use clap::{CommandFactory, Parser, ValueEnum};
use polis_deets::adapters::http::ReqwestTransport;
use polis_deets::adapters::ui::{format_failure, format_summary};
use polis_deets::ports::HttpTransport;
use polis_deets::shared::config::AppConfig;
use polis_deets::usecases::{ConversationResolver, ResolveOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Print a one-screen summary of a Polis conversation.
///
/// Accepts a conversation id, a conversation URL, a report id URL
/// (`.../report/<id>`) or any URL carrying `report_id=<id>`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Conversation id, conversation URL, report URL or `report_id=` URL
    input: Option<String>,

    /// Verbose logging and full error causes
    #[arg(long)]
    debug: bool,

    /// Only fetch analytics counts (skip metadata and comment languages)
    #[arg(long)]
    minimal: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let Some(input) = args.input.clone() else {
        let _ = Args::command().print_help();
        std::process::exit(0);
    };

    init_logging(args.debug);

    let code = match run(&args, &input).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            if args.debug {
                eprintln!("{:?}", e);
            }
            1
        }
    };
    std::process::exit(code);
}

/// Logs go to stderr so stdout carries only the summary.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(args: &Args, input: &str) -> anyhow::Result<i32> {
    let cfg = AppConfig::load()?;
    debug!(?cfg, "config loaded");

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(
        &cfg.user_agent_or_default(),
        &cfg.accept_or_default(),
        Duration::from_secs(cfg.timeout_secs_or_default()),
        cfg.strict_http_or_default(),
    )?);
    let resolver = ConversationResolver::new(transport);

    let options = ResolveOptions {
        minimal: args.minimal,
    };
    info!(input, minimal = options.minimal, "resolving");

    match resolver.resolve(input, &options).await {
        Ok(summary) => {
            let rendered = summary.render();
            match args.format {
                OutputFormat::Text => println!("{}", format_summary(&rendered)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rendered)?),
            }
            Ok(0)
        }
        Err(failure) => {
            eprintln!("{}", format_failure(&failure));
            if let (true, Some(cause)) = (args.debug, failure.cause()) {
                eprintln!("Debug cause: {}", cause);
            }
            Ok(2)
        }
    }
}
