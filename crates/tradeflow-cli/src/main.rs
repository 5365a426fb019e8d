//! Command-line interface for the tradeflow data layer
//!
//! Issues a single capability call through the standard vendor routing and
//! prints the payload, which makes it easy to check vendor wiring and
//! platform connectivity without an agent in the loop.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tradeflow_data::{Capability, DataInterface, category_for_method};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tradeflow")]
#[command(about = "Vendor-routed market data queries", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one data-retrieval method, e.g.
    /// `tradeflow query get_stock_data AAPL 2024-01-01 2024-06-30`
    Query {
        /// Method name, e.g. get_stock_data
        method: String,
        /// Positional method arguments
        args: Vec<String>,
    },
    /// List the available methods with their categories and vendors
    Methods,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{name}>"))
}

fn optional(args: &[String], index: usize, default: &str) -> String {
    args.get(index).cloned().unwrap_or_else(|| default.to_string())
}

fn optional_u32(args: &[String], index: usize, default: u32, name: &str) -> anyhow::Result<u32> {
    match args.get(index) {
        Some(value) => value
            .parse()
            .with_context(|| format!("<{name}> must be an integer, got '{value}'")),
        None => Ok(default),
    }
}

async fn run_query(
    interface: &DataInterface,
    method: &str,
    args: &[String],
) -> anyhow::Result<String> {
    // Fail fast on unknown method names before touching any vendor
    category_for_method(method)?;

    let payload = match method {
        "get_stock_data" => {
            interface
                .get_stock_data(
                    required(args, 0, "symbol")?,
                    required(args, 1, "start_date")?,
                    required(args, 2, "end_date")?,
                )
                .await?
        }
        "get_indicators" => {
            interface
                .get_indicators(
                    required(args, 0, "symbol")?,
                    required(args, 1, "indicator")?,
                    required(args, 2, "curr_date")?,
                    optional_u32(args, 3, 30, "look_back_days")?,
                )
                .await?
        }
        "get_fundamentals" => {
            interface
                .get_fundamentals(required(args, 0, "ticker")?)
                .await?
        }
        "get_balance_sheet" => {
            interface
                .get_balance_sheet(
                    required(args, 0, "ticker")?,
                    &optional(args, 1, "quarterly"),
                )
                .await?
        }
        "get_cashflow" => {
            interface
                .get_cashflow(required(args, 0, "ticker")?, &optional(args, 1, "quarterly"))
                .await?
        }
        "get_income_statement" => {
            interface
                .get_income_statement(
                    required(args, 0, "ticker")?,
                    &optional(args, 1, "quarterly"),
                )
                .await?
        }
        "get_insider_transactions" => {
            interface
                .get_insider_transactions(required(args, 0, "ticker")?)
                .await?
        }
        "get_news" => {
            interface
                .get_news(
                    required(args, 0, "ticker")?,
                    required(args, 1, "start_date")?,
                    required(args, 2, "end_date")?,
                )
                .await?
        }
        "get_global_news" => {
            interface
                .get_global_news(
                    required(args, 0, "curr_date")?,
                    optional_u32(args, 1, 7, "look_back_days")?,
                    optional_u32(args, 2, 10, "limit")?,
                )
                .await?
        }
        "get_sec_filings" => {
            interface
                .get_sec_filings(
                    required(args, 0, "ticker")?,
                    &optional(args, 1, "10-K"),
                    optional_u32(args, 2, 5, "limit")?,
                )
                .await?
        }
        "get_economic_indicators" => {
            interface
                .get_economic_indicators(
                    required(args, 0, "indicator")?,
                    args.get(1).map(String::as_str),
                    args.get(2).map(String::as_str),
                )
                .await?
        }
        "get_market_overview" => interface.get_market_overview().await?,
        other => bail!("method '{other}' is declared but has no CLI mapping"),
    };
    Ok(payload)
}

fn print_methods(interface: &DataInterface) {
    let registry = interface.router().registry();
    for capability in Capability::ALL {
        let vendors = registry.vendors_for(*capability).join(", ");
        println!(
            "{:28} {:22} [{vendors}]",
            capability.name(),
            capability.category().name(),
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let interface = DataInterface::standard();

    match args.command {
        Command::Query { method, args } => {
            info!(method = %method, "routing query");
            let payload = run_query(&interface, &method, &args).await?;
            println!("{payload}");
        }
        Command::Methods => print_methods(&interface),
    }

    Ok(())
}
