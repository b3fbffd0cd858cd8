use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use returns_cli::cli::{
    handle_outbox_command, handle_sheet_command, handle_user_command, OutboxCommands,
    SheetCommands, UserCommands,
};
use returns_cli::config::{AuthSettings, DeliverySettings, ReturnsPaths, Settings};
use returns_cli::logging::{init_file_logger, init_logger};
use returns_cli::tui::run_tui;

#[derive(Parser)]
#[command(
    name = "returns",
    author = "Kaylee Beyene",
    version,
    about = "Church service returns and return requests from the terminal",
    long_about = "returns-cli records a month of service attendance and offerings \
                  for a district and congregation, submits the monthly sheet, and \
                  files return requests with supporting documents."
)]
struct Cli {
    /// Log level for this application (RUST_LOG overrides it)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Account management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Monthly sheet commands
    #[command(subcommand)]
    Sheet(SheetCommands),

    /// Inspect delivered messages
    #[command(subcommand)]
    Outbox(OutboxCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ReturnsPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = cli.command.unwrap_or(Commands::Tui);
    // The TUI owns the terminal; it logs to a file instead
    if !matches!(command, Commands::Tui) {
        init_logger(cli.log_level);
        debug!("Log level set to {}", cli.log_level);
    }

    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        Commands::Tui => {
            paths.ensure_directories()?;
            init_file_logger(cli.log_level, &paths.log_file())?;
            run_tui(&runtime, &settings, &paths)?;
        }
        Commands::Init => {
            println!("Initializing returns-cli at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to {}", paths.settings_file().display());
            println!("Run 'returns user add <email>' to create an account.");
        }
        Commands::Config => print_config(&paths, &settings),
        Commands::User(cmd) => {
            runtime.block_on(handle_user_command(&paths, &settings, cmd))?;
        }
        Commands::Sheet(cmd) => {
            runtime.block_on(handle_sheet_command(&paths, &settings, cmd))?;
        }
        Commands::Outbox(cmd) => {
            handle_outbox_command(&paths, cmd)?;
        }
    }

    Ok(())
}

fn print_config(paths: &ReturnsPaths, settings: &Settings) {
    println!("returns-cli Configuration");
    println!("=========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Users file:     {}", paths.users_file().display());
    println!("Outbox:         {}", paths.outbox_dir().display());
    println!("Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Recipient:         {}",
        if settings.recipient_email.is_empty() {
            "(not set)"
        } else {
            &settings.recipient_email
        }
    );
    println!("  Currency symbol:   {}", settings.currency_symbol);
    println!("  Submit timeout:    {}s", settings.submit_timeout().as_secs());
    match &settings.delivery {
        DeliverySettings::Outbox => println!("  Delivery:          outbox"),
        DeliverySettings::Webhook { url } => println!("  Delivery:          webhook ({})", url),
    }
    let formats: Vec<String> = settings
        .report_formats
        .iter()
        .map(|f| f.to_string())
        .collect();
    println!("  Report formats:    {}", formats.join(", "));
    match &settings.auth {
        AuthSettings::Local => println!("  Identity provider: local"),
        AuthSettings::IdentityToolkit { .. } => println!("  Identity provider: identity toolkit"),
    }
    if !settings.default_district.is_empty() || !settings.default_congregation.is_empty() {
        println!(
            "  Default location:  {} - {}",
            settings.default_district, settings.default_congregation
        );
    }
}
