//! 2DA table inspector
//!
//! Command-line tool for loading, querying, and exporting 2DA tables.

mod scan;

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use twoda_core::{load_file, Table};

#[derive(Parser)]
#[command(name = "twoda")]
#[command(about = "Inspect BioWare 2DA tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the version, shape, default value and headers of a table
    Info {
        /// Path to the 2DA file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the table as a tab-separated grid
    Show {
        /// Path to the 2DA file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Columns to display (comma-separated)
        #[arg(short, long)]
        columns: Option<String>,
    },

    /// Look up a single cell
    Cell {
        /// Path to the 2DA file
        #[arg(short, long)]
        file: PathBuf,

        /// Row index
        #[arg(long)]
        row: usize,

        /// Column name, or column index if no column has that name
        #[arg(long)]
        col: String,

        /// Type to read the cell as
        #[arg(long = "as", value_enum, default_value_t = CellKind::String)]
        kind: CellKind,
    },

    /// Export a table to CSV or JSON
    Export {
        /// Path to the 2DA file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Scan directories for 2DA files and check that each one loads
    Scan {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CellKind {
    String,
    Int,
    Float,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> twoda_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Show {
            file,
            limit,
            columns,
        } => cmd_show(&file, limit, columns),
        Commands::Cell {
            file,
            row,
            col,
            kind,
        } => cmd_cell(&file, row, &col, kind),
        Commands::Export {
            file,
            format,
            output,
        } => cmd_export(&file, format, &output),
        Commands::Scan { root } => cmd_scan(&root),
    }
}

fn cmd_info(file: &Path) -> twoda_core::Result<()> {
    let table = load_file(file)?;

    println!("File: {}", file.display());
    println!("Version: {}", table.version());
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.column_count());
    if table.default_string().is_empty() {
        println!("Default: (none)");
    } else {
        println!("Default: {}", table.default_string());
    }
    println!("Headers: {}", table.headers().join(", "));

    Ok(())
}

fn cmd_show(file: &Path, limit: Option<usize>, columns: Option<String>) -> twoda_core::Result<()> {
    let table = load_file(file)?;

    // Unknown names are kept; they print as the table default
    let display_cols: Vec<&str> = match &columns {
        Some(filter) => filter.split(',').map(str::trim).collect(),
        None => table.headers().iter().map(String::as_str).collect(),
    };

    println!("Row\t{}", display_cols.join("\t"));
    println!("{}", "-".repeat((display_cols.len() + 1) * 8));

    let row_limit = limit.unwrap_or(table.row_count());
    for row in 0..table.row_count().min(row_limit) {
        let values: Vec<&str> = display_cols
            .iter()
            .map(|col| table.cell_as_string_by_name(row, col))
            .collect();
        println!("{}\t{}", row, values.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }

    Ok(())
}

fn cmd_cell(file: &Path, row: usize, col: &str, kind: CellKind) -> twoda_core::Result<()> {
    let table = load_file(file)?;

    let column = resolve_column(&table, col);
    match (kind, column) {
        (CellKind::String, Some(c)) => println!("{}", table.cell_as_string(row, c)),
        (CellKind::Int, Some(c)) => println!("{}", table.cell_as_int(row, c)),
        (CellKind::Float, Some(c)) => println!("{}", table.cell_as_float(row, c)),
        (CellKind::String, None) => println!("{}", table.default_string()),
        (CellKind::Int, None) => println!("{}", table.default_int()),
        (CellKind::Float, None) => println!("{}", table.default_float()),
    }

    Ok(())
}

/// Column names win over numeric indices
fn resolve_column(table: &Table, col: &str) -> Option<usize> {
    table.column_index(col).or_else(|| col.parse().ok())
}

fn cmd_export(file: &Path, format: ExportFormat, output: &Path) -> twoda_core::Result<()> {
    let table = load_file(file)?;

    let mut writer = BufWriter::new(File::create(output)?);
    match format {
        ExportFormat::Csv => twoda_core::write_csv(&table, &mut writer)?,
        ExportFormat::Json => twoda_core::write_json(&table, &mut writer)?,
    }
    writer.flush()?;

    println!("Exported {} rows to {}", table.row_count(), output.display());

    Ok(())
}

fn cmd_scan(roots: &[PathBuf]) -> twoda_core::Result<()> {
    let entries = scan::scan_roots(roots);

    let mut failed = 0;
    for entry in &entries {
        match &entry.outcome {
            Ok(summary) => println!(
                "{}\t{}\t{} rows x {} columns",
                entry.path.display(),
                summary.version,
                summary.rows,
                summary.columns
            ),
            Err(e) => {
                failed += 1;
                println!("{}\terror: {}", entry.path.display(), e);
            }
        }
    }

    println!();
    println!(
        "Scanned {} files: {} loaded, {} failed",
        entries.len(),
        entries.len() - failed,
        failed
    );

    Ok(())
}
