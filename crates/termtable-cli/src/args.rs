use crate::types::{ConvertFormat, InputFormat, LogLevel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "termtable")]
#[command(about = "Render CSV and JSON data as width-aware terminal tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $TERMTABLE_CONFIG, then <config dir>/termtable/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Never emit color codes
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a CSV or JSON file as a table
    Render(RenderArgs),

    /// Convert between CSV and JSON
    Convert(ConvertArgs),

    /// Show per-column statistics
    Inspect(InspectArgs),

    /// Preview every border style
    Styles,

    /// List color themes
    Themes,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input file; `-` or nothing reads stdin
    pub file: Option<PathBuf>,

    /// Input format (default: from the file extension, or sniffed on stdin)
    #[arg(long)]
    pub input: Option<InputFormat>,

    /// Treat the first CSV record as data, not headers
    #[arg(long)]
    pub no_header_row: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Border style preset
    #[arg(long)]
    pub style: Option<String>,

    /// Color theme preset
    #[arg(long)]
    pub theme: Option<String>,

    /// Replace Unicode borders with ASCII
    #[arg(long)]
    pub ascii: bool,

    /// Maximum table width (default: terminal width, or 80)
    #[arg(long)]
    pub width: Option<usize>,

    #[arg(long)]
    pub title: Option<String>,

    /// Omit the header row
    #[arg(long)]
    pub no_headers: bool,

    /// Sort by this column
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Only show these columns, in this order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(long)]
    pub to: ConvertFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum table width (default: terminal width, or 80)
    #[arg(long)]
    pub width: Option<usize>,
}
