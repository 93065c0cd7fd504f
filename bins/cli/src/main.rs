//! Grosz purchase-entry CLI.
//!
//! The owning controller for the purchase form: it performs the one-off
//! initial rates fetch, translates line commands into field updates, runs
//! the rate fetches the form manager requests, and hands submitted
//! purchases to the persisted store.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grosz_core::form::FormManager;
use grosz_core::rates::{RatePhase, RateQuery};
use grosz_rates_client::RatesClient;
use grosz_shared::AppConfig;
use grosz_store::{JsonFileStore, PurchaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grosz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    let client = RatesClient::new(config.rates.base_url.clone());
    let mut store = JsonFileStore::new(&config.store.path);
    let mut manager = FormManager::new(
        config.form.fields.clone(),
        config.rates.reference_currency.clone(),
    );
    info!(store = %store.path().display(), "grosz ready");

    // The original form fetched rates on mount; here that is an explicit
    // initialization call.
    let initial = manager.initial_query();
    fetch_rates(&client, &mut manager, &initial).await;

    print_help(&config.form.currencies);
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, argument) = split_command(&line);

        match command {
            "" => {}
            "date" | "select" | "amount" | "rate" => {
                if command == "select" && !config.form.currencies.iter().any(|c| c == argument) {
                    warn!(currency = argument, "currency outside the configured set");
                }
                if let Some(query) = manager.update_field(command, argument) {
                    fetch_rates(&client, &mut manager, &query).await;
                }
                show_draft(&manager);
            }
            "check" => {
                manager.blur_field(argument);
                match manager.errors().get(argument) {
                    Some(messages) => println!("  {}", messages.join("; ")),
                    None => println!("  ok"),
                }
            }
            "submit" => match manager.submit() {
                Ok(purchase) => {
                    store.append(&purchase)?;
                    println!("recorded purchase {}", purchase.id);
                }
                Err(errors) => {
                    println!("cannot submit:");
                    for (field, messages) in &errors {
                        println!("  {field}: {}", messages.join("; "));
                    }
                }
            },
            "list" => {
                let purchases = store.all()?;
                if purchases.is_empty() {
                    println!("no purchases recorded yet");
                }
                for p in purchases {
                    println!("  {} {} {} @ {} ({})", p.date, p.amount, p.currency, p.rate, p.id);
                }
            }
            "show" => show_draft(&manager),
            "quit" | "exit" => break,
            _ => print_help(&config.form.currencies),
        }
        prompt()?;
    }

    Ok(())
}

/// Splits a line into the command word and the rest.
fn split_command(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    }
}

/// Runs a fire-and-forget rate fetch. A failure only means the rate field
/// never resolves; the form stays usable (manual override still works).
async fn fetch_rates(client: &RatesClient, manager: &mut FormManager, query: &RateQuery) {
    match client.fetch(query).await {
        Ok(table) => manager.apply_rate_table(table),
        Err(error) => warn!(%error, "rate fetch failed, rate field will not auto-resolve"),
    }
}

fn show_draft(manager: &FormManager) {
    let draft = manager.draft();
    let phase = match manager.phase() {
        RatePhase::Empty => "empty",
        RatePhase::Computing => "computing",
        RatePhase::Resolved => "resolved",
    };
    println!(
        "  date={:?} select={:?} amount={:?} rate={:?} [{phase}]",
        draft.date, draft.select, draft.amount, draft.rate
    );
}

fn print_help(currencies: &[String]) {
    println!("commands:");
    println!("  date <YYYY-MM-DD>   set the purchase date (fetches that day's rates)");
    println!("  select <code>       pick a currency ({})", currencies.join(", "));
    println!("  amount <number>     set the purchased amount");
    println!("  rate <number>       manually override the exchange rate");
    println!("  check <field>       validate a single field");
    println!("  submit              validate and record the purchase");
    println!("  list                print recorded purchases");
    println!("  show                print the current draft");
    println!("  quit                leave");
}

fn prompt() -> io::Result<()> {
    print!("grosz> ");
    io::stdout().flush()
}
