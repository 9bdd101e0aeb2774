//! Command-line front end: reads saved documentation pages and specification
//! files and prints what the library extracts from them.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use rs_cfn_spec::cloudformation::{regional_specifications, Specification};
use rs_cfn_spec::html::{read_table_rows, Selection};
use rs_cfn_spec::markdown::table_to_markdown;
use rs_cfn_spec::{parse_document, Options};

/// Extract span-aware tables from CloudFormation documentation pages.
#[derive(Debug, Parser)]
#[command(name = "cfn-spec", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the regional specification links of an index page as JSON
    Regions {
        /// Saved index page; stdin when omitted
        file: Option<PathBuf>,

        /// 0-based position of the regions table on the page
        #[arg(long, default_value_t = 0)]
        table: usize,

        /// URL relative links are resolved against
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print one table of a page with its spans resolved
    Table {
        /// HTML page; stdin when omitted
        file: Option<PathBuf>,

        /// 0-based position of the table on the page
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TableFormat::Markdown)]
        format: TableFormat,
    },

    /// Summarise a resource specification JSON file
    Spec {
        /// Specification file
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    Markdown,
    Json,
}

#[derive(Serialize)]
struct ColumnOutput {
    headings: Vec<String>,
    cell: String,
}

#[derive(Serialize)]
struct SpecSummary<'s> {
    version: &'s str,
    resource_types: usize,
    property_types: usize,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        Command::Regions {
            file,
            table,
            base_url,
        } => {
            let doc = parse_document(&read_input(file.as_ref())?).context("cannot decode index page")?;
            let options = Options {
                table_index: table,
                base_url,
                ..Options::default()
            };
            let data = regional_specifications(&doc, &options)?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::Table {
            file,
            index,
            format,
        } => {
            let doc = parse_document(&read_input(file.as_ref())?).context("cannot decode page")?;
            let table = doc
                .find(&["table"], Selection::Nth(index))
                .with_context(|| format!("no table at index {index}"))?;

            match format {
                TableFormat::Markdown => print!("{}", table_to_markdown(table)?),
                TableFormat::Json => {
                    let rows: Vec<Vec<ColumnOutput>> = read_table_rows(table)?
                        .iter()
                        .map(|row| {
                            row.columns()
                                .iter()
                                .map(|column| ColumnOutput {
                                    headings: column.headings().iter().map(|h| h.text()).collect(),
                                    cell: column.cell().text(),
                                })
                                .collect()
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
            }
        }
        Command::Spec { file } => {
            let json = fs::read_to_string(&file).with_context(|| format!("cannot read {}", file.display()))?;
            let spec = Specification::from_json(&json).with_context(|| format!("cannot decode {}", file.display()))?;
            let summary = SpecSummary {
                version: &spec.resource_specification_version,
                resource_types: spec.resource_types.len(),
                property_types: spec.property_types.len(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => fs::read(path).with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).context("cannot read stdin")?;
            Ok(bytes)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CFN_SPEC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
