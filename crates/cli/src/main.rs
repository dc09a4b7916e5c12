//! # filmqa-cli: A CLI for `filmqa`
//!
//! Asks questions about a film catalog from the terminal, prints catalog statistics,
//! or shows the exact prompt that would be sent to the model.

mod output;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use filmqa::{
    constants::{
        API_KEY_ENV_VAR, DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, DEFAULT_CATALOG_FILE,
        DEFAULT_TIMEOUT_SECS,
    },
    prompts::answer::compose_answer_prompt,
    AnswerClientBuilder, Catalog, QaError,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// The catalog CSV file
    #[arg(long, global = true, env = "FILMQA_CATALOG", default_value = DEFAULT_CATALOG_FILE)]
    catalog: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question about the catalog
    Ask(AskArgs),
    /// Print the number of works and the release year range
    Stats,
    /// Print the prompt that would be sent for a question, without sending it
    Prompt(PromptArgs),
}

#[derive(Parser, Debug)]
struct AskArgs {
    /// The question, in any language the model understands
    question: String,
    /// Print plain text instead of the HTML fragment
    #[arg(long)]
    plain: bool,
    /// The completion service API key
    #[arg(long, env = API_KEY_ENV_VAR, hide_env_values = true)]
    api_key: Option<String>,
    /// The OpenAI-compatible chat completions endpoint
    #[arg(long, env = "FILMQA_API_URL", default_value = DEFAULT_AI_API_URL)]
    api_url: String,
    /// The model name
    #[arg(long, env = "FILMQA_MODEL", default_value = DEFAULT_AI_MODEL)]
    model: String,
    /// Give up on the completion call after this many seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// The question to compose the prompt for
    question: String,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::from_csv_path(&cli.catalog)?;
    info!(catalog = %cli.catalog, works = catalog.len(), "Catalog loaded");

    match &cli.command {
        Commands::Ask(args) => handle_ask(&catalog, args).await?,
        Commands::Stats => handle_stats(&catalog),
        Commands::Prompt(args) => handle_prompt(&catalog, args)?,
    }

    Ok(())
}

// --- Command Handlers ---

async fn handle_ask(catalog: &Catalog, args: &AskArgs) -> Result<()> {
    let client = AnswerClientBuilder::new()
        .timeout(Duration::from_secs(args.timeout_secs))
        .openai_compatible(
            Some(args.api_url.clone()),
            args.api_key.clone(),
            Some(args.model.clone()),
        )?
        .build()?;

    let result = client.ask(catalog, &args.question).await?;
    if args.plain {
        println!("{}", output::plain_text(&result.parsed, client.renderer()));
    } else {
        println!("{}", result.rendered.html);
    }
    Ok(())
}

fn handle_stats(catalog: &Catalog) {
    let stats = catalog.stats();
    println!("Всего произведений: {}", stats.total_works);
    if let (Some(min), Some(max)) = (stats.min_release_year, stats.max_release_year) {
        println!("Годы: {min} - {max}");
    }
}

fn handle_prompt(catalog: &Catalog, args: &PromptArgs) -> Result<()> {
    let question = args.question.trim();
    if question.is_empty() {
        bail!("{}", QaError::EmptyQuestion);
    }
    println!("{}", compose_answer_prompt(&catalog.serialize(), question));
    Ok(())
}
