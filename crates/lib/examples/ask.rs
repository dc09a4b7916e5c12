use filmqa::constants::{API_KEY_ENV_VAR, DEFAULT_CATALOG_FILE};
use filmqa::{AnswerClientBuilder, Catalog};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging and load .env file
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} '<question>' [catalog.csv]", args[0]);
        eprintln!();
        eprintln!("Example: {} 'Фильмы 90-х годов'", args[0]);
        return Ok(());
    }

    let question = &args[1];
    let catalog_path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| DEFAULT_CATALOG_FILE.to_string());

    let catalog = Catalog::from_csv_path(&catalog_path)?;
    let client = AnswerClientBuilder::new()
        .openai_compatible(None, env::var(API_KEY_ENV_VAR).ok(), None)?
        .build()?;

    match client.ask(&catalog, question).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result.parsed)?);
        }
        Err(e) => {
            eprintln!("Error: {e}");
        }
    }

    Ok(())
}
