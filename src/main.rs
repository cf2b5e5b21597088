use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_sheetfix::cli;
use royalbit_sheetfix::error::SheetResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetfix")]
#[command(about = "Bulk find/replace for spreadsheets, with Excel and PDF export")]
#[command(long_about = "Sheetfix - Spreadsheet find/replace

Matching is case-insensitive and ignores surrounding whitespace.
Empty cells never match.

COMMANDS:
  columns  - List the header of the first sheet
  replace  - Replace matching cells and write a new .xlsx
  report   - Render the first sheet as a paginated PDF

EXAMPLES:
  sheetfix columns people.xlsx
  sheetfix replace people.xlsx -o fixed.xlsx --find nyc --replace \"New York\" --column city
  sheetfix replace people.xlsx -o fixed.xlsx --find n/a --replace \"\"
  sheetfix report fixed.xlsx -o fixed.pdf")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of a spreadsheet
    Columns {
        /// Spreadsheet file (xlsx, xls, xlsb, ods)
        file: PathBuf,
    },

    /// Replace every cell matching a value
    Replace {
        /// Spreadsheet to read
        input: PathBuf,

        /// Where to write the updated .xlsx
        #[arg(short, long)]
        output: PathBuf,

        /// Value to find (trimmed, case-insensitive)
        #[arg(short, long)]
        find: String,

        /// Replacement text
        #[arg(short, long)]
        replace: String,

        /// Only look in this column
        #[arg(short, long)]
        column: Option<String>,

        /// all-cells or single-column (inferred from --column when omitted)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Render a spreadsheet as a PDF report
    Report {
        /// Spreadsheet to read
        input: PathBuf,

        /// Where to write the PDF
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn run(args: Cli) -> SheetResult<()> {
    match args.command {
        Commands::Columns { file } => cli::columns(file),
        Commands::Replace {
            input,
            output,
            find,
            replace,
            column,
            mode,
        } => cli::replace(input, output, find, replace, column, mode),
        Commands::Report { input, output } => cli::report(input, output),
    }
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {}", "Error:".bold().red(), e);
        std::process::exit(1);
    }
}
