/// Text presentation of tables and reports
///
/// Cells are rendered through a small closed set of [`CellFormat`]
/// variants whose width, fill, alignment and precision are plain data.
/// [`TextLayout`] picks a format per kind of cell and writes whole reports.
///
/// The default layout reproduces the classic expense-report look:
///
/// ```text
/// =========================
/// Code       | Amount     | 
/// =========================
/// A          |      15.00 | 
/// B          |      20.00 | 
/// =========================
/// Sum        |      35.00 | 
/// =========================
/// ```

use crate::report::{DetailReport, SummaryReport, SummaryRow};
use crate::table::Table;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A value handed to a [`CellFormat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// How one cell is laid out.
///
/// `width` is a minimum; longer values are never cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text {
        width: usize,
        fill: char,
        align: Align,
    },
    /// Fixed-point numbers with `precision` decimals.
    Numeric {
        width: usize,
        precision: usize,
        fill: char,
        align: Align,
    },
}

impl CellFormat {
    pub fn text(width: usize, align: Align) -> Self {
        CellFormat::Text { width, fill: ' ', align }
    }

    pub fn numeric(width: usize, precision: usize) -> Self {
        CellFormat::Numeric {
            width,
            precision,
            fill: ' ',
            align: Align::Right,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            CellFormat::Text { width, .. } | CellFormat::Numeric { width, .. } => *width,
        }
    }

    pub fn render(&self, cell: Cell<'_>) -> String {
        match (*self, cell) {
            (CellFormat::Text { width, fill, align }, Cell::Text(s)) => pad(s, width, fill, align),
            (CellFormat::Text { width, fill, align }, Cell::Number(n)) => {
                pad(&n.to_string(), width, fill, align)
            }
            (CellFormat::Numeric { width, precision, fill, align }, Cell::Number(n)) => {
                pad(&format!("{:.*}", precision, n), width, fill, align)
            }
            (CellFormat::Numeric { width, fill, align, .. }, Cell::Text(s)) => pad(s, width, fill, align),
        }
    }
}

fn pad(s: &str, width: usize, fill: char, align: Align) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let padding: String = std::iter::repeat(fill).take(width - len).collect();
    match align {
        Align::Left => format!("{}{}", s, padding),
        Align::Right => format!("{}{}", padding, s),
    }
}

/// Layout of the text reports.
#[derive(Debug, Clone)]
pub struct TextLayout {
    /// Between cells of a detail line and after every summary cell.
    pub separator: String,
    /// Every detail cell, header included.
    pub detail: CellFormat,
    /// Summary headings and group labels.
    pub label: CellFormat,
    /// Summary totals.
    pub value: CellFormat,
    /// Character of the horizontal rules around a summary.
    pub rule: char,
}

impl Default for TextLayout {
    fn default() -> Self {
        TextLayout {
            separator: " | ".to_string(),
            detail: CellFormat::text(10, Align::Right),
            label: CellFormat::text(10, Align::Left),
            value: CellFormat::numeric(10, 2),
            rule: '=',
        }
    }
}

impl TextLayout {
    /// Write the detail listing: a blank line, then one line per projected
    /// row. Absent cells are written as empty fields.
    pub fn write_detail<W: Write>(&self, out: &mut W, report: &DetailReport) -> io::Result<()> {
        writeln!(out)?;
        for row in &report.rows {
            let line: Vec<String> = row
                .iter()
                .map(|cell| self.detail.render(Cell::Text(cell.as_deref().unwrap_or(""))))
                .collect();
            writeln!(out, "{}", line.join(&self.separator))?;
        }
        Ok(())
    }

    /// Write the summary: headings, one line per code, then the grand total,
    /// framed by rules.
    pub fn write_summary<W: Write>(&self, out: &mut W, report: &SummaryReport) -> io::Result<()> {
        let rule = self.rule_line(report.columns.len());

        writeln!(out)?;
        writeln!(out, "{}", rule)?;
        write!(out, "{}{}", self.label.render(Cell::Text(&report.code_column)), self.separator)?;
        for heading in &report.columns {
            write!(out, "{}{}", self.label.render(Cell::Text(heading)), self.separator)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", rule)?;

        for group in &report.groups {
            self.write_summary_row(out, group)?;
        }

        writeln!(out, "{}", rule)?;
        self.write_summary_row(out, &report.total)?;
        writeln!(out, "{}", rule)?;
        Ok(())
    }

    fn write_summary_row<W: Write>(&self, out: &mut W, row: &SummaryRow) -> io::Result<()> {
        write!(out, "{}{}", self.label.render(Cell::Text(&row.label)), self.separator)?;
        for total in &row.totals {
            write!(out, "{}{}", self.value.render(Cell::Number(*total)), self.separator)?;
        }
        writeln!(out)
    }

    fn rule_line(&self, columns: usize) -> String {
        let width = self.value.width();
        let len = columns * (width + self.separator.chars().count()) + width + 2;
        std::iter::repeat(self.rule).take(len).collect()
    }

    /// Write every stored row, header first, each cell followed by `": "`,
    /// then the number of stored rows.
    pub fn write_dump<W: Write>(&self, out: &mut W, table: &Table) -> io::Result<()> {
        for row in table.rows() {
            for cell in row {
                write!(out, "{}: ", cell)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "No of rows processed: {}", table.len())
    }

    /// Write one code per line.
    pub fn write_codes<W: Write>(&self, out: &mut W, codes: &[String]) -> io::Result<()> {
        for code in codes {
            writeln!(out, "{}", code)?;
        }
        Ok(())
    }
}
