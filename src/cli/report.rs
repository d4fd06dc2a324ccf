//! CLI commands for reports and forecasts

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::reports::{DistributionReport, ForecastReport, Horizon, TrendReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Share of expenses per category
    #[command(alias = "pie")]
    Distribution {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Daily income and expense totals
    Trend {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments of the forecast command
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Months to project (30 days each); defaults to the configured horizon
    #[arg(short, long, allow_hyphen_values = true)]
    pub months: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    match cmd {
        ReportCommands::Distribution { output } => {
            let report = DistributionReport::generate(storage)?;
            match output {
                Some(path) => {
                    export_to_file(&path, |writer| report.export_csv(writer))?;
                    println!("Distribution report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(&settings.currency_symbol)),
            }
        }

        ReportCommands::Trend { output } => {
            let report = TrendReport::generate(storage)?;
            match output {
                Some(path) => {
                    export_to_file(&path, |writer| report.export_csv(writer))?;
                    println!("Trend report exported to: {}", path.display());
                }
                None => print!(
                    "{}",
                    report.format_terminal(&settings.currency_symbol, &settings.date_format)
                ),
            }
        }
    }

    Ok(())
}

/// Handle the forecast command
pub fn handle_forecast_command(
    storage: &Storage,
    settings: &Settings,
    args: ForecastArgs,
) -> TrackerResult<()> {
    let horizon = match args.months.as_deref() {
        Some(raw) => Horizon::parse(raw)?,
        None => Horizon::new(i64::from(settings.default_forecast_months))?,
    };

    let report = ForecastReport::generate(storage, horizon)?;
    match args.output {
        Some(path) => {
            export_to_file(&path, |writer| report.export_csv(writer))?;
            println!("Forecast exported to: {}", path.display());
        }
        None => print!(
            "{}",
            report.format_terminal(&settings.currency_symbol, &settings.date_format)
        ),
    }

    Ok(())
}

fn export_to_file<F>(path: &Path, export: F) -> TrackerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TrackerResult<()>,
{
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| TrackerError::Export(format!("Failed to write {}: {}", path.display(), e)))
}
