//! Arguments de la ligne de commande.
//!
//! | Option | Description |
//! |--------|-------------|
//! | `WORKBOOK` | Classeur à ouvrir au démarrage |
//! | `--sheet` | Feuille sélectionnée au démarrage |
//! | `--summary` | Affiche les métriques en JSON sans lancer le TUI |
//! | `--pretty` | JSON indenté (avec `--summary`) |
//! | `--log-dir` | Répertoire des logs |
//!
//! ```bash
//! lazysheet stocks.xlsx --sheet AAPL
//! lazysheet stocks.xlsx --sheet AAPL --summary --pretty
//! RUST_LOG=lazysheet=trace lazysheet
//! ```

use std::path::PathBuf;

use clap::Parser;

/// 📈 LazySheet - Stock price dashboard for Excel workbooks
///
/// Each sheet of the workbook is a stock with `date` and `price` columns.
#[derive(Debug, Parser)]
#[command(name = "lazysheet", version, about = "Terminal stock price dashboard for Excel workbooks")]
pub struct Cli {
    /// Excel workbook to open at start-up (.xlsx, .xlsb, .xls, .ods)
    #[arg(value_name = "WORKBOOK")]
    pub workbook: Option<PathBuf>,

    /// Sheet (stock) to select first
    #[arg(long, short = 's', value_name = "NAME", requires = "workbook")]
    pub sheet: Option<String>,

    /// Print the selected sheet's metrics as JSON and exit
    #[arg(long, requires = "workbook")]
    pub summary: bool,

    /// Pretty-print the JSON summary
    #[arg(long, requires = "summary")]
    pub pretty: bool,

    /// Directory for log files (default: platform data dir)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tui_args() {
        let cli = Cli::try_parse_from(["lazysheet", "stocks.xlsx", "--sheet", "AAPL"]).unwrap();
        assert_eq!(cli.workbook, Some(PathBuf::from("stocks.xlsx")));
        assert_eq!(cli.sheet.as_deref(), Some("AAPL"));
        assert!(!cli.summary);
    }

    #[test]
    fn test_no_args_is_valid() {
        let cli = Cli::try_parse_from(["lazysheet"]).unwrap();
        assert!(cli.workbook.is_none());
    }

    #[test]
    fn test_summary_requires_workbook() {
        assert!(Cli::try_parse_from(["lazysheet", "--summary"]).is_err());
        assert!(Cli::try_parse_from(["lazysheet", "--pretty"]).is_err());

        let cli = Cli::try_parse_from(["lazysheet", "a.xlsx", "--summary", "--pretty"]).unwrap();
        assert!(cli.summary && cli.pretty);
    }

    #[test]
    fn test_sheet_requires_workbook() {
        assert!(Cli::try_parse_from(["lazysheet", "--sheet", "AAPL"]).is_err());
        assert!(Cli::try_parse_from(["lazysheet", "a.xlsx", "-s", "AAPL"]).is_ok());
    }
}
