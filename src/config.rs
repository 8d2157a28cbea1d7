/// Command-line configuration
///
/// [`Cli`] is the clap definition of the command surface. It is converted
/// once into a [`ReportConfig`], the immutable record the rest of the crate
/// reads. Nothing here is global.

use crate::sort_key::KeyMode;
use crate::table::{split_fields, DEFAULT_DELIMITER};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Name of the grouping column when `--code` is not given.
pub const DEFAULT_CODE_COLUMN: &str = "Code";

const USAGE_EXAMPLE: &str = "\
Example:
  exptable --detail=FinCode,Date,Amount,HST13%,HST5%/TVQ,Total --orderedby=Date,Entry# \\
           --summary=Amount,HST13%,HST5%/TVQ,Total --code=FinCode --sep='|' ~/expenses.csv

Prints every transaction ordered by date and entry number, then the
transactions summed per FinCode with a grand total.";

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text tables
    #[default]
    Text,
    /// One pretty-printed JSON document
    Json,
}

/// A comma-separated list of column names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnList(pub Vec<String>);

impl ColumnList {
    fn into_non_empty(self) -> Option<Vec<String>> {
        (!self.0.is_empty()).then_some(self.0)
    }
}

/// Expense ledger processor.
///
/// Reads a delimited file whose first line names the columns and prints a
/// detail listing, a per-code summary, or both.
#[derive(Debug, Parser)]
#[command(name = "exptable", version, arg_required_else_help = true, after_help = USAGE_EXAMPLE)]
pub struct Cli {
    /// Delimited expense file; the first line is the header
    pub file: PathBuf,

    /// Print every transaction showing only these columns, in this order
    #[arg(long, value_name = "COLUMNS", value_parser = parse_column_list)]
    pub detail: Option<ColumnList>,

    /// Order the detail listing by these columns (dates sort chronologically)
    #[arg(long = "orderedby", visible_alias = "orderedBy", value_name = "COLUMNS", value_parser = parse_column_list)]
    pub ordered_by: Option<ColumnList>,

    /// Print totals of these numeric columns grouped by code
    #[arg(long, value_name = "COLUMNS", value_parser = parse_column_list)]
    pub summary: Option<ColumnList>,

    /// Column separator of the input file; only the first character is used
    #[arg(long, env = "EXPTABLE_SEP", value_name = "CHAR", value_parser = parse_separator, default_value = ",")]
    pub sep: char,

    /// Column to group the summary by [default: Code]
    #[arg(long, env = "EXPTABLE_CODE", value_name = "COLUMN", value_parser = parse_column_list)]
    pub code: Option<ColumnList>,

    /// Print every stored row followed by the row count
    #[arg(long)]
    pub dump: bool,

    /// Print the distinct values of the code column
    #[arg(long)]
    pub codes: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Separate sort-key fields so adjacent columns cannot run together
    #[arg(long)]
    pub separated_keys: bool,
}

/// Everything one run needs, fixed before the input is read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub file: PathBuf,
    pub delimiter: char,
    /// Override for the grouping column; `None` means [`DEFAULT_CODE_COLUMN`].
    pub code_column: Option<String>,
    /// Detail columns; `None` skips the detail report.
    pub detail: Option<Vec<String>>,
    /// Detail ordering; empty keeps file order.
    pub order_by: Vec<String>,
    /// Summary columns; `None` skips the summary report.
    pub summary: Option<Vec<String>>,
    pub dump: bool,
    pub codes: bool,
    pub format: OutputFormat,
    pub key_mode: KeyMode,
}

impl ReportConfig {
    /// A configuration that loads `file` with the default delimiter and
    /// produces no report sections.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        ReportConfig {
            file: file.into(),
            delimiter: DEFAULT_DELIMITER,
            code_column: None,
            detail: None,
            order_by: Vec::new(),
            summary: None,
            dump: false,
            codes: false,
            format: OutputFormat::Text,
            key_mode: KeyMode::Concatenated,
        }
    }

    pub fn code_column(&self) -> &str {
        self.code_column.as_deref().unwrap_or(DEFAULT_CODE_COLUMN)
    }
}

impl From<Cli> for ReportConfig {
    fn from(cli: Cli) -> Self {
        ReportConfig {
            file: cli.file,
            delimiter: cli.sep,
            // only the first name of a list is used
            code_column: cli
                .code
                .and_then(ColumnList::into_non_empty)
                .and_then(|names| names.into_iter().next()),
            detail: cli.detail.and_then(ColumnList::into_non_empty),
            order_by: cli.ordered_by.and_then(ColumnList::into_non_empty).unwrap_or_default(),
            summary: cli.summary.and_then(ColumnList::into_non_empty),
            dump: cli.dump,
            codes: cli.codes,
            format: cli.format,
            key_mode: if cli.separated_keys {
                KeyMode::Separated
            } else {
                KeyMode::Concatenated
            },
        }
    }
}

/// Split an option value on commas, dropping a trailing empty name.
fn parse_column_list(value: &str) -> Result<ColumnList, String> {
    Ok(ColumnList(split_fields(value, ',')))
}

/// Take the first character of the value; an empty value means the default.
fn parse_separator(value: &str) -> Result<char, String> {
    Ok(value.chars().next().unwrap_or(DEFAULT_DELIMITER))
}
