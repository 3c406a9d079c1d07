mod chart;
mod cli;
mod config;
mod main_lib;
mod render;
mod scheduler;

use chrono::Utc;
use clap::Parser;
use tickerboard_core::history::Granularity;

use cli::{Cli, Commands};
use config::{parse_watch_list, Config};
use main_lib::{build_feed, init_tracing, new_snapshot_cache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();
    let cli = Cli::parse();
    let feed = build_feed(&config)?;

    match cli.command {
        Commands::Watch { codes } => {
            let targets = match codes {
                Some(raw) => parse_watch_list(&raw),
                None => config.watch_list.clone(),
            };
            if targets.is_empty() {
                anyhow::bail!("Watch-list is empty");
            }

            scheduler::run_quote_poller(
                &feed,
                new_snapshot_cache(),
                targets,
                config.trading_window,
                config.poll_interval,
            )
            .await;
        }
        Commands::Chart {
            code,
            yearly,
            as_of,
            json,
        } => {
            let granularity = if yearly {
                Granularity::Yearly
            } else {
                Granularity::Monthly
            };
            let as_of = as_of.unwrap_or_else(|| {
                Utc::now()
                    .with_timezone(&config.trading_window.timezone)
                    .date_naive()
            });

            let chart = chart::load_chart(&feed, &code, granularity, as_of).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                print!("{}", render::render_chart(&code, &chart));
            }
        }
    }

    Ok(())
}
