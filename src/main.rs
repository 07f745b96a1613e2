use clap::{Parser, Subcommand};
use royalbit_tabula::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Inspect and convert record workbooks (.xlsx/.xls)")]
#[command(long_about = "Tabula - schema-driven spreadsheet records

Reads modern (.xlsx) and legacy (.xls) workbooks, writes .xlsx.
Row 0 of every sheet is the header row; data starts at row 1.

COMMANDS:
  sheets   - List sheets and their row counts
  headers  - Show the header row of a sheet
  verify   - Check that required columns are present
  dump     - Print data rows as JSON keyed by header
  convert  - Re-serialize a workbook as .xlsx

EXAMPLES:
  tabula sheets orders.xls
  tabula verify orders.xlsx --columns id,qty --sheet Orders
  tabula dump orders.xlsx > orders.json
  tabula convert legacy.xls modern.xlsx

ENVIRONMENT:
  TABULA_SHEET  default sheet for --sheet
  RUST_LOG      log filter (e.g. royalbit_tabula=debug)")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of a workbook
    Sheets {
        /// Path to workbook (.xlsx or .xls)
        file: PathBuf,
    },

    /// Show the header row of a sheet
    Headers {
        /// Path to workbook (.xlsx or .xls)
        file: PathBuf,

        /// Sheet name (defaults to the first sheet)
        #[arg(short, long, env = "TABULA_SHEET")]
        sheet: Option<String>,
    },

    #[command(long_about = "Check that every listed column appears in the header row.

Header text is matched exactly. A sheet without a header row fails
every check, including an empty column list.

EXAMPLE:
  tabula verify orders.xlsx --columns id,Quantity,due")]
    /// Check required columns against a sheet's header row
    Verify {
        /// Path to workbook (.xlsx or .xls)
        file: PathBuf,

        /// Comma-separated column names
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Sheet name (defaults to the first sheet)
        #[arg(short, long, env = "TABULA_SHEET")]
        sheet: Option<String>,
    },

    /// Print the data rows of a sheet as JSON
    Dump {
        /// Path to workbook (.xlsx or .xls)
        file: PathBuf,

        /// Sheet name (defaults to the first sheet)
        #[arg(short, long, env = "TABULA_SHEET")]
        sheet: Option<String>,
    },

    #[command(long_about = "Re-serialize a workbook as .xlsx.

Cell values, formulas and their cached results are preserved.
Legacy .xls input is accepted; output is always .xlsx.

EXAMPLE:
  tabula convert legacy.xls modern.xlsx")]
    /// Re-serialize a workbook as .xlsx
    Convert {
        /// Path to input workbook (.xlsx or .xls)
        input: PathBuf,

        /// Output .xlsx path
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "royalbit_tabula=debug"
    } else {
        "royalbit_tabula=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sheets { file } => cli::sheets(file)?,

        Commands::Headers { file, sheet } => cli::headers(file, sheet)?,

        Commands::Verify {
            file,
            columns,
            sheet,
        } => cli::verify(file, columns, sheet)?,

        Commands::Dump { file, sheet } => cli::dump(file, sheet)?,

        Commands::Convert { input, output } => cli::convert(input, output, cli.verbose)?,
    }

    Ok(())
}
