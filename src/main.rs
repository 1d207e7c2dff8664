//! CLI entry point for the bike rental statistics tool.
//!
//! Provides subcommands for printing a summary report over a date range and
//! for exporting the same report as JSON and CSV.

use anyhow::{Result, bail};
use bike_rent_stats::loader::{load_joined, load_records};
use bike_rent_stats::output::{Report, write_json, write_report, write_summary_csv};
use bike_rent_stats::record::RentalRecord;
use bike_rent_stats::summaries::filter::full_span;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rent_stats")]
#[command(about = "Summarizes a historical bicycle-rental dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatasetArgs {
    /// Pre-merged CSV with one row per rental observation
    #[arg(short, long, conflicts_with_all = ["hourly", "daily"])]
    data: Option<String>,

    /// Hour-granularity CSV, joined on date with --daily
    #[arg(long, requires = "daily")]
    hourly: Option<String>,

    /// Day-granularity CSV, joined on date with --hourly
    #[arg(long, requires = "hourly")]
    daily: Option<String>,

    /// Range start (YYYY-MM-DD); defaults to the first date in the dataset
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD); defaults to the last date in the dataset
    #[arg(short, long)]
    end: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary report for a date range
    Report {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Also write the report as pretty JSON to this path
        #[arg(short, long)]
        json: Option<String>,
    },
    /// Export the report as JSON, and optionally each table as CSV
    Export {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output JSON path
        #[arg(short, long, default_value = "report.json")]
        output: String,

        /// Directory to also write per-table CSV files into
        #[arg(long)]
        csv_dir: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_rent_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rent_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { dataset, json } => {
            let report = build_report(&dataset)?;

            let stdout = std::io::stdout();
            write_report(&mut stdout.lock(), &report)?;

            if let Some(path) = json {
                write_json(&path, &report)?;
                info!(path = %path, "Report exported as JSON");
            }
        }
        Commands::Export {
            dataset,
            output,
            csv_dir,
        } => {
            let report = build_report(&dataset)?;

            write_json(&output, &report)?;
            info!(path = %output, "Report exported as JSON");

            if let Some(dir) = csv_dir {
                std::fs::create_dir_all(&dir)?;
                write_summary_csv(format!("{dir}/monthly_total.csv"), &report.monthly_total)?;
                write_summary_csv(format!("{dir}/monthly_casual.csv"), &report.monthly_casual)?;
                write_summary_csv(
                    format!("{dir}/monthly_registered.csv"),
                    &report.monthly_registered,
                )?;
                write_summary_csv(format!("{dir}/by_season.csv"), &report.by_season)?;
                write_summary_csv(format!("{dir}/by_month.csv"), &report.by_month)?;
                write_summary_csv(format!("{dir}/by_weekday.csv"), &report.by_weekday)?;
                write_summary_csv(format!("{dir}/by_year.csv"), &report.by_year)?;
                write_summary_csv(format!("{dir}/by_year_split.csv"), &report.by_year_split)?;
                write_summary_csv(
                    format!("{dir}/peak_hours_working.csv"),
                    &report.peak_hours_working,
                )?;
                write_summary_csv(
                    format!("{dir}/peak_hours_non_working.csv"),
                    &report.peak_hours_non_working,
                )?;
                info!(dir = %dir, "Summary tables exported as CSV");
            }
        }
    }

    Ok(())
}

/// Loads the dataset, resolves the range selection, and builds the report.
fn build_report(args: &DatasetArgs) -> Result<Report> {
    let records = load_dataset(args)?;

    let Some((first, last)) = full_span(&records) else {
        bail!("dataset contains no usable records");
    };
    let start = args.start.unwrap_or(first);
    let end = args.end.unwrap_or(last);
    info!(%start, %end, records = records.len(), "Building report");

    let report = Report::build(&records, start, end)?;
    if report.is_empty() {
        warn!(%start, %end, "No records in the selected range");
    }
    Ok(report)
}

/// Loads either the pre-merged CSV or the joined daily/hourly pair.
fn load_dataset(args: &DatasetArgs) -> Result<Vec<RentalRecord>> {
    match (&args.data, &args.hourly, &args.daily) {
        (Some(path), None, None) => load_records(path),
        (None, Some(hourly), Some(daily)) => load_joined(hourly, daily),
        _ => bail!("either --data or both --hourly and --daily must be given"),
    }
}
