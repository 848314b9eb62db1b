use anyhow::Result;
use clap::{Parser, Subcommand};

use vyapaar_track::cli::{
    handle_dashboard_command, handle_expense_command, handle_report_command,
    handle_review_command, handle_session_command, handle_settings_command, prompt::confirm,
    ExpenseCommands, ReportCommands, ReviewCommands, SessionCommands, SettingsCommands,
};
use vyapaar_track::config::{paths::VyapaarPaths, settings::Settings};
use vyapaar_track::services::{SessionContext, View};
use vyapaar_track::storage::Storage;

#[derive(Parser)]
#[command(
    name = "vyapaar",
    version,
    about = "Expense tracking and review for small businesses",
    long_about = "VyapaarTrack records business expenses, lets staff submit receipts, \
                  and gives the accountant a review queue, reports and CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommands),

    /// Expense submission and management
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Review queue for pending expenses
    #[command(subcommand)]
    Review(ReviewCommands),

    /// Filtered reports and CSV export
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show the financial overview
    Dashboard,

    /// Business units, categories and integrations
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Delete all expenses and restore the sample data
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = VyapaarPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Session(cmd)) => {
            handle_session_command(&storage, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Review(cmd)) => {
            handle_review_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Dashboard) => {
            handle_dashboard_command(&storage, &settings)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing VyapaarTrack at: {}", paths.base_dir().display());
            let seeded = vyapaar_track::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            if seeded {
                println!("Initialization complete!");
                println!();
                println!("Sample expenses, business units and categories have been created.");
            } else {
                println!("Existing data found; nothing was overwritten.");
            }
            println!("Run 'vyapaar login u1' to start as the accountant.");
        }
        Some(Commands::Config) => {
            println!("VyapaarTrack Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Fallback category: {}", settings.fallback_category);
            println!("  Recent activity:   {}", settings.recent_activity_count);
            match &settings.classifier {
                Some(command) => println!("  Receipt classifier: {}", command.program),
                None => println!("  Receipt classifier: demo (not configured)"),
            }
        }
        Some(Commands::Reset { yes }) => {
            let session = SessionContext::restore(&storage)?;
            session.authorize(View::Settings)?;

            if confirm(
                "Delete ALL expenses and restore the sample data? This cannot be undone",
                yes,
            )? {
                storage.documents().clear()?;
                storage.documents().load()?;
                println!("Data reset to the sample document.");
            } else {
                println!("Cancelled.");
            }
        }
        None => {
            println!("VyapaarTrack - expense tracking for small businesses");
            println!();
            println!("Run 'vyapaar --help' for usage information.");
            println!("Run 'vyapaar login u1' to get started.");
        }
    }

    Ok(())
}
