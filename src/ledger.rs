/// Report Drivers
///
/// A [`Ledger`] is one processing session: the loaded table plus the name
/// of the column that groups transactions into codes. It produces the
/// detail and summary reports, and [`process`] runs a whole configured
/// session from loading to output.
///
/// # Examples
///
/// ```
/// use exptable::{Ledger, Table};
///
/// let mut ledger = Ledger::new(Table::parse("Code,Amount\nA,10\nB,20\nA,5", ','));
///
/// let detail = ledger.detail(&["Amount", "Code"], &[] as &[&str]);
/// assert_eq!(detail.rows[0], vec![Some("Amount".to_string()), Some("Code".to_string())]);
///
/// let summary = ledger.summary(&["Amount"]);
/// assert_eq!(summary.groups.len(), 2);
/// assert_eq!(summary.total.totals, vec![35.0]);
/// ```

use crate::aggregate::{column_total, distinct_code_values};
use crate::config::{OutputFormat, ReportConfig, DEFAULT_CODE_COLUMN};
use crate::error::Result;
use crate::format::TextLayout;
use crate::report::{DetailReport, RunOutput, SummaryReport, SummaryRow, TOTAL_LABEL};
use crate::sort_key::KeyMode;
use crate::table::Table;
use log::{debug, warn};
use std::io::Write;

#[derive(Debug)]
pub struct Ledger {
    table: Table,
    code_column: String,
    key_mode: KeyMode,
}

impl Ledger {
    /// Create a ledger grouping by the default `Code` column.
    pub fn new(table: Table) -> Self {
        Ledger {
            table,
            code_column: DEFAULT_CODE_COLUMN.to_string(),
            key_mode: KeyMode::Concatenated,
        }
    }

    /// Load the ledger file named by `config`, with its delimiter, code
    /// column and key mode applied.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let table = Table::load(&config.file, config.delimiter)?;
        let mut ledger = Ledger::new(table);
        ledger.set_code_column(config.code_column());
        ledger.set_key_mode(config.key_mode);
        Ok(ledger)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn code_column(&self) -> &str {
        &self.code_column
    }

    pub fn set_code_column(&mut self, column: impl Into<String>) {
        self.code_column = column.into();
    }

    pub fn set_key_mode(&mut self, mode: KeyMode) {
        self.key_mode = mode;
    }

    /// Total of `column`, limited to rows of `code` when one is given.
    pub fn column_total(&self, column: &str, code: Option<&str>) -> f64 {
        column_total(&self.table, column, &self.code_column, code)
    }

    /// Distinct values of the code column, ascending.
    pub fn codes(&self) -> Vec<String> {
        distinct_code_values(&self.table, &self.code_column)
    }

    /// Project every row, header included, onto `columns`.
    ///
    /// When `order_by` is non-empty the data rows are sorted first; the
    /// ordering stays in place for later calls. Unknown columns produce
    /// `None` cells rather than an error.
    pub fn detail<S: AsRef<str>, O: AsRef<str>>(&mut self, columns: &[S], order_by: &[O]) -> DetailReport {
        let indices = self.table.resolve_many(columns);
        for (name, idx) in columns.iter().zip(&indices) {
            if idx.is_none() {
                warn!("detail column '{}' not found", name.as_ref());
            }
        }

        if !order_by.is_empty() {
            self.table.sort_by_with(order_by, self.key_mode);
        }

        let rows: Vec<Vec<Option<String>>> = self
            .table
            .rows()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| idx.and_then(|i| row.get(i)).cloned())
                    .collect()
            })
            .collect();

        DetailReport {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            indices,
            rows,
        }
    }

    /// Sum `columns` per distinct code, then over all rows.
    ///
    /// Rows whose code cell is empty are left out of the groups (they are
    /// typically subtotal lines already in the file) but still count towards
    /// the grand total. When the code column is not in the header there are
    /// no groups and every total is zero.
    pub fn summary<S: AsRef<str>>(&self, columns: &[S]) -> SummaryReport {
        if self.table.resolve(&self.code_column).is_none() {
            warn!("code column '{}' not found; summary will be empty", self.code_column);
        }

        let totals_for = |code: Option<&str>| -> Vec<f64> {
            columns
                .iter()
                .map(|column| self.column_total(column.as_ref(), code))
                .collect()
        };

        let groups: Vec<SummaryRow> = self
            .codes()
            .into_iter()
            .filter(|code| !code.is_empty())
            .map(|code| SummaryRow {
                totals: totals_for(Some(code.as_str())),
                label: code,
            })
            .collect();

        debug!("summary over {} code(s) and {} column(s)", groups.len(), columns.len());

        SummaryReport {
            code_column: self.code_column.clone(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            groups,
            total: SummaryRow {
                label: TOTAL_LABEL.to_string(),
                totals: totals_for(None),
            },
        }
    }
}

/// Run one configured session, writing every enabled section to `out`.
///
/// Sections come in a fixed order: dump, codes, detail, summary. A load
/// failure returns before anything is written.
pub fn process<W: Write>(config: &ReportConfig, out: &mut W) -> Result<()> {
    let mut ledger = Ledger::from_config(config)?;

    match config.format {
        OutputFormat::Text => {
            let layout = TextLayout::default();
            if config.dump {
                layout.write_dump(out, ledger.table())?;
            }
            if config.codes {
                layout.write_codes(out, &ledger.codes())?;
            }
            if let Some(columns) = &config.detail {
                let report = ledger.detail(columns.as_slice(), config.order_by.as_slice());
                layout.write_detail(out, &report)?;
            }
            if let Some(columns) = &config.summary {
                let report = ledger.summary(columns.as_slice());
                layout.write_summary(out, &report)?;
            }
        }
        OutputFormat::Json => {
            let output = RunOutput {
                table: config.dump.then(|| ledger.table().to_json_value()),
                codes: config.codes.then(|| ledger.codes()),
                detail: config
                    .detail
                    .as_ref()
                    .map(|columns| ledger.detail(columns.as_slice(), config.order_by.as_slice())),
                summary: config.summary.as_ref().map(|columns| ledger.summary(columns.as_slice())),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    out.flush()?;
    Ok(())
}
