use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tickerboard")]
#[command(about = "TWSE quote board and price history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the watch-list and redraw the quote board until Ctrl-C
    Watch {
        /// Comma-separated codes, overrides TB_WATCH_LIST
        #[arg(short, long)]
        codes: Option<String>,
    },
    /// Print the closing-price chart of one code
    Chart {
        /// Stock code, e.g. 2330
        code: String,
        /// One point per month over the last twelve months
        #[arg(short, long)]
        yearly: bool,
        /// Reference date (YYYY-MM-DD), defaults to today in Taipei
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },
}
