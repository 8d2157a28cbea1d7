/// Report types produced by the [`Ledger`](crate::Ledger) drivers.
///
/// Reports are plain data: the presentation layer in [`crate::format`]
/// turns them into text, and they serialize directly to JSON.

use crate::header::ColumnIndex;
use serde::Serialize;

/// Label of the grand-total line of a summary.
pub const TOTAL_LABEL: &str = "Sum";

/// A projected listing of the table.
///
/// `rows[0]` is the header projected like any other row, so it reads as a
/// legend in the requested column order. A cell is `None` when its column
/// did not resolve or the row is too short to have it; it is never an
/// error and must be rendered as an absent value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailReport {
    /// Requested column names, in request order.
    pub columns: Vec<String>,
    /// Resolved position of each requested column.
    #[serde(skip)]
    pub indices: Vec<ColumnIndex>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl DetailReport {
    /// Returns true if no requested column resolved.
    pub fn is_unresolved(&self) -> bool {
        self.indices.iter().all(Option::is_none)
    }
}

/// One line of a summary: a label and one total per summary column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub totals: Vec<f64>,
}

/// Per-code totals followed by the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Name of the column the rows were grouped by.
    pub code_column: String,
    /// Summed column names, in request order.
    pub columns: Vec<String>,
    /// One row per distinct non-empty code, in ascending code order.
    pub groups: Vec<SummaryRow>,
    /// Totals over every data row, whatever its code.
    pub total: SummaryRow,
}

/// Everything a single run produces, for JSON output.
#[derive(Debug, Default, Serialize)]
pub struct RunOutput {
    /// Every data row keyed by header name, when a dump was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_report_serializes_absent_cells_as_null() {
        let report = DetailReport {
            columns: vec!["Amount".to_string(), "Nope".to_string()],
            indices: vec![Some(1), None],
            rows: vec![
                vec![Some("Amount".to_string()), None],
                vec![Some("10".to_string()), None],
            ],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["columns"][1], "Nope");
        assert_eq!(json["rows"][1][0], "10");
        assert!(json["rows"][1][1].is_null());
        assert!(json.get("indices").is_none());
    }

    #[test]
    fn test_detail_report_is_unresolved() {
        let report = DetailReport {
            columns: vec!["X".to_string()],
            indices: vec![None],
            rows: vec![vec![None]],
        };
        assert!(report.is_unresolved());
    }

    #[test]
    fn test_run_output_skips_missing_sections() {
        let output = RunOutput {
            summary: Some(SummaryReport {
                code_column: "Code".to_string(),
                columns: vec!["Amount".to_string()],
                groups: vec![],
                total: SummaryRow { label: TOTAL_LABEL.to_string(), totals: vec![0.0] },
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("detail").is_none());
        assert!(json.get("codes").is_none());
        assert!(json.get("table").is_none());
        assert_eq!(json["summary"]["total"]["label"], "Sum");
    }
}
