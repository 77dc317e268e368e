//! Todo Assistant - Entry Point
//!
//! Sets up logging, configuration and the async runtime, then runs the
//! read loop: one line in, one interpreted command applied, one reply out.

use todo_assistant::core::config::AssistantConfig;
use todo_assistant::core::error::{AssistantError, Result};
use todo_assistant::llm::client::LlmClient;
use todo_assistant::session::{read_input_line, Session, Turn, FAREWELL, GREETING};

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Consecutive stdin failures tolerated before giving up on the console
const MAX_READ_FAILURES: u32 = 3;

/// Conversational to-do list manager
#[derive(Parser, Debug)]
#[command(name = "todo-assistant")]
#[command(about = "Manage a to-do list in plain language")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Model identifier (overrides config and LLM_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Chat completions endpoint (overrides config and LLM_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Pin "today" instead of reading the local date each turn
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // A missing .env file is fine; credentials may come from the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("todo_assistant={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    tracing::info!(model = %config.llm.model, url = %config.llm.api_url, "Todo Assistant starting...");

    // Create the async runtime for LLM calls
    let rt = Runtime::new()?;

    let client = LlmClient::from_env(&config.llm)?;
    let mut session = Session::new(client);

    println!("{}", GREETING);

    let stdin = io::stdin();
    let mut buf = Vec::new();
    let mut read_failures = 0;

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let input = match read_input_line(&mut stdin.lock(), &mut buf) {
            Ok(Some(line)) => {
                read_failures = 0;
                line
            }
            Ok(None) => {
                // End of input
                println!();
                println!("{}", FAREWELL);
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                println!("An unexpected error occurred: {}", e);
                read_failures += 1;
                if read_failures >= MAX_READ_FAILURES {
                    println!("{}", FAREWELL);
                    break;
                }
                continue;
            }
        };

        let today = args.today.unwrap_or_else(|| Local::now().date_naive());

        match rt.block_on(session.handle_line(&input, today)) {
            Turn::Reply(reply) => println!("{}", reply),
            Turn::Idle => {}
            Turn::Quit => {
                println!("{}", FAREWELL);
                break;
            }
        }
    }

    tracing::info!(tasks = session.store().len(), "Session ended");
    Ok(())
}

/// Defaults, then the config file, then environment, then flags
fn load_config(args: &Args) -> Result<AssistantConfig> {
    let mut config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    };

    config.apply_env();

    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(url) = &args.api_url {
        config.llm.api_url = url.clone();
    }

    config.validate().map_err(AssistantError::Config)?;
    Ok(config)
}
