use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use off_the_books::cli::{
    handle_import_command, handle_preview_command, handle_save_command, ImportArgs, PreviewArgs,
    SaveArgs,
};
use off_the_books::config::{OtbPaths, Settings};
use off_the_books::logging;

#[derive(Parser)]
#[command(
    name = "otb",
    version,
    about = "Import bank exports into typed, validated transactions",
    long_about = "Off The Books turns the CSV-like files banks export into dated, \
                  signed transactions tagged with an account. Every problem in a \
                  file is reported at once, one line per kind of error."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import transactions from an exported file
    Import(ImportArgs),

    /// Validate (and optionally persist) a reviewed import document
    Save(SaveArgs),

    /// Parse a file and show its rows without importing
    Preview(PreviewArgs),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = OtbPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let succeeded = match cli.command {
        Some(Commands::Import(args)) => handle_import_command(&paths, &settings, args)?,
        Some(Commands::Save(args)) => handle_save_command(&paths, args)?,
        Some(Commands::Preview(args)) => handle_preview_command(&settings, args)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized Off The Books at: {}", paths.base_dir().display());
                println!("Edit {} to change import defaults.", paths.settings_file().display());
            }
            true
        }
        Some(Commands::Config) => {
            println!("Off The Books Configuration");
            println!("===========================");
            println!("Config file:       {}", paths.settings_file().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!();
            println!("Settings:");
            println!("  Date format:       {}", display_or(&settings.default_date_format, "(auto)"));
            println!("  Skip rows:         {}", settings.default_skip_rows);
            println!(
                "  Default account:   {}",
                settings.default_account.as_deref().unwrap_or("(none)")
            );
            println!("  Decimal separator: {}", settings.decimal_separator);
            println!(
                "  Delimiter:         {}",
                settings
                    .delimiter
                    .map(|c| format!("{:?}", c))
                    .unwrap_or_else(|| "(auto)".into())
            );
            true
        }
        None => {
            println!("Off The Books - bank export importer");
            println!();
            println!("Run 'otb --help' for usage information.");
            println!("Run 'otb preview <FILE>' to look at a file before importing it.");
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
