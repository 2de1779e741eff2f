//! CLI command handlers for importing bank exports
//!
//! `import` runs the file path of the pipeline, `save` the reviewed-data
//! path, and `preview` stops after parsing. Each handler returns whether
//! the run succeeded so the binary can set its exit status.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use crate::config::{OtbPaths, Settings};
use crate::display::format_grid_preview;
use crate::error::{OtbError, OtbResult};
use crate::import::{
    parse_upload, ColumnSpec, ImportConfig, ImportController, ImportOutcome, ParseOptions,
    ReviewedImport, TracingSink,
};
use crate::storage;

use super::output::{render_outcome, OutputFormat};

/// Arguments of `otb import`
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Path to the exported file (CSV, TSV or similar)
    pub file: PathBuf,

    /// Account the transactions belong to
    #[arg(short, long, env = "OTB_ACCOUNT")]
    pub account: Option<String>,

    /// Column roles in file order, e.g. "date,description,amount,-"
    #[arg(short, long)]
    pub columns: ColumnSpec,

    /// Leading header rows to skip
    #[arg(short, long)]
    pub skip_rows: Option<usize>,

    /// Date format (chrono `%Y-%m-%d` or moment-style `DD/MM/YYYY`)
    #[arg(short, long)]
    pub date_format: Option<String>,

    /// Decimal separator of amounts ('.' or ',')
    #[arg(long)]
    pub decimal_separator: Option<char>,

    /// Field delimiter to use instead of detecting one
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Persist the batch when the import succeeds
    #[arg(long)]
    pub save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments of `otb save`
#[derive(Args, Debug, Clone)]
pub struct SaveArgs {
    /// Reviewed import document (JSON, or YAML by extension)
    pub review_file: PathBuf,

    /// Persist the batch when validation succeeds
    #[arg(long)]
    pub save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments of `otb preview`
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Path to the exported file
    pub file: PathBuf,

    /// Number of rows to show
    #[arg(short, long, default_value = "10")]
    pub rows: usize,

    /// Field delimiter to use instead of detecting one
    #[arg(long)]
    pub delimiter: Option<char>,
}

/// Handle the import command
pub fn handle_import_command(
    paths: &OtbPaths,
    settings: &Settings,
    args: ImportArgs,
) -> OtbResult<bool> {
    let config = build_config(settings, &args)?;
    let options = parse_options(args.delimiter.or(settings.delimiter))?;
    let content = read_input(&args.file)?;
    debug!(file = %args.file.display(), ?config, "running import");

    let mut controller = ImportController::new(TracingSink).with_parse_options(options);
    let outcome = controller.import_file(&content, &config);
    finish(paths, outcome, args.save, args.format)
}

/// Handle the save command
pub fn handle_save_command(paths: &OtbPaths, args: SaveArgs) -> OtbResult<bool> {
    let content = fs::read_to_string(&args.review_file).map_err(|e| {
        OtbError::Import(format!(
            "Failed to read {}: {}",
            args.review_file.display(),
            e
        ))
    })?;
    let file_name = args
        .review_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let review = ReviewedImport::from_str_with_name(&content, &file_name)?;

    let controller = ImportController::new(TracingSink);
    let outcome = controller.save_reviewed(&review.data, &review.config);
    finish(paths, outcome, args.save, args.format)
}

/// Handle the preview command
pub fn handle_preview_command(settings: &Settings, args: PreviewArgs) -> OtbResult<bool> {
    let options = parse_options(args.delimiter.or(settings.delimiter))?;
    let content = read_input(&args.file)?;

    match parse_upload(&content, options) {
        Ok(grid) => {
            println!("Preview of '{}'", args.file.display());
            println!("{}", "=".repeat(40));
            print!("{}", format_grid_preview(&grid, args.rows));
            Ok(true)
        }
        Err(error) => {
            eprintln!("{}", error);
            Ok(false)
        }
    }
}

/// Merge command-line options over the saved settings
fn build_config(settings: &Settings, args: &ImportArgs) -> OtbResult<ImportConfig> {
    let mut config = ImportConfig::from_settings(settings, args.columns.clone());

    if let Some(account) = &args.account {
        config.account = account.clone();
    }
    if let Some(skip_rows) = args.skip_rows {
        config.skip_rows = skip_rows;
    }
    if let Some(format) = &args.date_format {
        config.date_format = format.clone();
    }
    if let Some(separator) = args.decimal_separator {
        config.decimal_separator = separator;
    }

    config.validate()?;
    Ok(config)
}

fn parse_options(delimiter: Option<char>) -> OtbResult<ParseOptions> {
    let delimiter = match delimiter {
        None => None,
        Some(c) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Some(c as u8),
        Some(c) => {
            return Err(OtbError::Validation(format!(
                "Delimiter must be a single ASCII character other than a quote or newline, got {:?}",
                c
            )))
        }
    };
    Ok(ParseOptions { delimiter })
}

fn read_input(path: &Path) -> OtbResult<Vec<u8>> {
    if !path.exists() {
        return Err(OtbError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }
    fs::read(path).map_err(|e| OtbError::Import(format!("Failed to read file: {}", e)))
}

/// Render the outcome and persist it when asked to
fn finish(
    paths: &OtbPaths,
    outcome: ImportOutcome,
    save: bool,
    format: OutputFormat,
) -> OtbResult<bool> {
    render_outcome(&outcome, format, &mut io::stdout().lock(), &mut io::stderr())?;

    let ImportOutcome::Succeeded(transactions) = outcome else {
        return Ok(false);
    };

    if save {
        let batch_id = storage::open_transactions(paths).append_batch(&transactions)?;
        let message = format!(
            "Saved {} transactions as batch {}",
            transactions.len(),
            batch_id
        );
        if format.is_structured() {
            eprintln!("{}", message);
        } else {
            println!();
            println!("{}", message);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ColumnRole;

    fn args(columns: &str) -> ImportArgs {
        ImportArgs {
            file: PathBuf::from("bank.csv"),
            account: None,
            columns: columns.parse().unwrap(),
            skip_rows: None,
            date_format: None,
            decimal_separator: None,
            delimiter: None,
            save: false,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_build_config_uses_settings() {
        let settings = Settings {
            default_date_format: "DD/MM/YYYY".into(),
            default_skip_rows: 1,
            default_account: Some("checking".into()),
            decimal_separator: ',',
            ..Settings::default()
        };

        let config = build_config(&settings, &args("date,amount")).unwrap();
        assert_eq!(config.account, "checking");
        assert_eq!(config.skip_rows, 1);
        assert_eq!(config.date_format, "DD/MM/YYYY");
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(
            config.column_spec.roles().collect::<Vec<_>>(),
            vec![ColumnRole::Date, ColumnRole::Amount]
        );
    }

    #[test]
    fn test_build_config_flags_override() {
        let settings = Settings {
            default_account: Some("checking".into()),
            ..Settings::default()
        };
        let mut args = args("date,amount");
        args.account = Some("savings".into());
        args.skip_rows = Some(2);
        args.date_format = Some("%d.%m.%Y".into());

        let config = build_config(&settings, &args).unwrap();
        assert_eq!(config.account, "savings");
        assert_eq!(config.skip_rows, 2);
        assert_eq!(config.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_build_config_rejects_separator() {
        let mut args = args("date,amount");
        args.decimal_separator = Some(';');
        let err = build_config(&Settings::default(), &args).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(parse_options(None).unwrap().delimiter, None);
        assert_eq!(parse_options(Some(';')).unwrap().delimiter, Some(b';'));
        assert!(parse_options(Some('"')).is_err());
        assert!(parse_options(Some('€')).is_err());
    }

    #[test]
    fn test_read_missing_input() {
        let err = read_input(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, OtbError::Import(_)));
    }
}
