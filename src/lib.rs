/// exptable - Expense Ledger Processor
///
/// Loads a delimited expense file into memory and produces either a
/// re-projected, optionally re-ordered detail listing or per-code totals of
/// numeric columns with a grand total.
///
/// Dates written as `YYYY-MM-DD` or `YYYY/MM/DD` sort chronologically, numeric
/// cells are read leniently, and unknown columns or ragged rows never abort
/// a report: only failing to read the input does.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod header;
pub mod ledger;
pub mod report;
pub mod sort;
pub mod sort_key;
pub mod table;

pub use aggregate::{column_total, distinct_code_values, parse_number_prefix};
pub use config::{Cli, ColumnList, OutputFormat, ReportConfig, DEFAULT_CODE_COLUMN};
pub use error::{Error, Result};
pub use format::{Align, Cell, CellFormat, TextLayout};
pub use header::{ColumnIndex, Header};
pub use ledger::{process, Ledger};
pub use report::{DetailReport, RunOutput, SummaryReport, SummaryRow, TOTAL_LABEL};
pub use sort_key::{detect_date, serialize_row, serialize_row_with, KeyMode};
pub use table::{Row, Table, DEFAULT_DELIMITER};
