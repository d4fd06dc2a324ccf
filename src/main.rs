use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_tracker::cli::{
    handle_category_command, handle_forecast_command, handle_report_command,
    handle_transaction_command, CategoryCommands, ForecastArgs, ReportCommands,
    TransactionCommands,
};
use budget_tracker::config::{paths::TrackerPaths, settings::Settings};
use budget_tracker::logging::init_tracing;
use budget_tracker::models::DefaultCategories;
use budget_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal income and expense tracker with trend forecasts",
    long_about = "Record income and expenses by category, see where the money \
                  goes, and project daily income and expense trends forward \
                  with a linear fit."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Distribution and trend reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Project income and expenses forward
    Forecast(ForecastArgs),

    /// Initialize the ledger with default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Forecast(args)) => handle_forecast_command(&storage, &settings, args)?,
        Some(Commands::Init) => {
            println!("Initializing budget tracker at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            settings.save(&paths)?;
            if created == 0 {
                println!("Already initialized; default categories are present.");
            } else {
                println!("Created {} default categories:", created);
                for (name, kind) in DefaultCategories::all() {
                    println!("  - {} ({})", name, kind);
                }
            }
            println!();
            println!("Run 'budget category list' to see all categories.");
        }
        Some(Commands::Config) => {
            println!("Budget Tracker Configuration");
            println!("============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Forecast horizon: {} month(s)", settings.default_forecast_months);
        }
        None => {
            println!("Budget Tracker - income and expense tracking with forecasts");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget init' to create the default categories.");
        }
    }

    Ok(())
}
