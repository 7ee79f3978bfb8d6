use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netprofit_core::{Period, parse_lenient_number};
use netprofit_finance::{PAYMENT_GAP_NOTE, REVENUE_BASIS_NOTE, RunInputs, run};
use std::path::PathBuf;

mod config;
mod logging;
mod render;
mod state;

use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "netprofit",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("NETPROFIT_BUILD_SHA"), ")"),
    about = "Monthly net-profit calculator for platform sellers"
)]
struct Cli {
    /// Config file (default: ~/.netprofit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "netprofit_finance=debug" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile one month and print the sales summary, expense detail and net profit
    Run {
        /// Settlement year
        #[arg(long)]
        year: i32,

        /// Settlement month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Payment amount shown in the platform seller center, e.g. 900000 or "900,000"
        #[arg(long, value_parser = parse_won, default_value = "0")]
        payment: f64,

        /// Settlement detail CSVs: this month's 1st/2nd and next month's 1st/2nd round
        #[arg(long = "settlement", value_name = "CSV", num_args = 1..)]
        settlement: Vec<PathBuf>,

        /// Product sales statistics workbook for the month (needs a 거래액 column)
        #[arg(long, value_name = "XLSX")]
        sales: Option<PathBuf>,

        /// Expense workbook for the month (item names in column B, amounts in column C)
        #[arg(long, value_name = "XLSX")]
        expense: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Explain how revenue and the two payment figures are defined
    Explain,

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

/// Accepts `900000`, `900,000` and `900,000원`. Anything else (signs,
/// decimals, exponents) is rejected rather than reinterpreted.
fn parse_won(s: &str) -> std::result::Result<f64, String> {
    let digits = s.trim().trim_end_matches('원').trim_end();
    if digits.starts_with('-') {
        return Err("amount cannot be negative".to_string());
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return Err(format!("not a whole won amount: {s}"));
    }
    parse_lenient_number(digits).ok_or_else(|| format!("not a whole won amount: {s}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(cli.log_level.as_deref(), &cfg.logging.level);
    tracing::debug!(path = ?cli.config, "config loaded");

    match cli.command {
        Command::Run {
            year,
            month,
            payment,
            settlement,
            sales,
            expense,
            format,
        } => {
            let period = Period::new(year, month).context("month must be between 1 and 12")?;
            let inputs = RunInputs {
                period,
                manual_payment: payment,
                settlement_files: settlement,
                sales_file: sales,
                expense_file: expense,
            };
            let lists = cfg.cost_items.to_lists();

            let report = run(&inputs, &lists)
                .with_context(|| format!("{period} calculation aborted; no report was produced"))?;
            render::print_report(&report, format)?;
        }

        Command::Explain => {
            println!("{REVENUE_BASIS_NOTE}\n");
            println!("{PAYMENT_GAP_NOTE}");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
