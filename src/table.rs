/// exptable Table Store
///
/// A Table is the whole input file held in memory: a header naming the
/// columns and the data rows underneath it, every cell kept as the raw text
/// found in the file.
///
/// The header is stored apart from the data rows so that operations which
/// must skip it (sorting, totals) and operations which must include it
/// (detail projection, dumps) say so explicitly. `rows()` gives the
/// file-shaped view where row 0 is the header.
///
/// # Examples
///
/// ```
/// use exptable::Table;
///
/// let table = Table::parse("Code,Amount\nA,10\n\nB,20\n", ',');
///
/// assert_eq!(table.len(), 3); // header + 2 data rows, blank line dropped
/// assert_eq!(table.data_len(), 2);
/// assert_eq!(table.header().resolve("Amount"), Some(1));
/// assert_eq!(table.rows().next().unwrap(), ["Code", "Amount"]);
/// ```

use crate::error::{Error, Result};
use crate::header::{ColumnIndex, Header};
use log::debug;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// One data row: cells in file order. Rows may be shorter or longer than
/// the header.
pub type Row = Vec<String>;

/// The default cell delimiter.
pub const DEFAULT_DELIMITER: char = ',';

pub struct Table {
    header: Header,
    rows: Vec<Row>,
}

impl Table {
    /// Load a table from a file.
    ///
    /// Fails with [`Error::Open`] when the file cannot be opened and
    /// [`Error::Read`] when reading it fails part way. Nothing else about
    /// the content is validated.
    pub fn load(path: impl AsRef<Path>, delimiter: char) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file, delimiter).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "loaded {} rows ({} data rows) from {}",
            table.len(),
            table.data_len(),
            path.display()
        );
        Ok(table)
    }

    /// Read everything from `reader` and build a table from it.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn from_reader<R: Read>(mut reader: R, delimiter: char) -> io::Result<Table> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self::parse(&String::from_utf8_lossy(&buf), delimiter))
    }

    /// Build a table from text already in memory.
    ///
    /// Each line is split on `delimiter`. A line whose cells are all empty
    /// is dropped; the first line kept becomes the header.
    pub fn parse(text: &str, delimiter: char) -> Table {
        let mut lines = text
            .split('\n')
            .map(|line| split_fields(line, delimiter))
            .filter(|cells| !cells.iter().all(|c| c.is_empty()));

        let header = lines.next().map(Header::new).unwrap_or_default();
        let rows: Vec<Row> = lines.collect();

        Table { header, rows }
    }

    /// Build a table from a header and data rows.
    pub fn from_parts(header: Header, rows: Vec<Row>) -> Table {
        Table { header, rows }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Data rows in their current order, header excluded.
    pub fn data_rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn data_rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Every stored row in file shape: the header first (when there is one),
    /// then the data rows.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        let header = (!self.header.is_empty()).then(|| self.header.names());
        header.into_iter().chain(self.rows.iter().map(Vec::as_slice))
    }

    /// Number of stored rows, header included.
    pub fn len(&self) -> usize {
        if self.header.is_empty() {
            0
        } else {
            self.rows.len() + 1
        }
    }

    /// Number of data rows.
    pub fn data_len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve(&self, column: &str) -> ColumnIndex {
        self.header.resolve(column)
    }

    pub fn resolve_many<S: AsRef<str>>(&self, columns: &[S]) -> Vec<ColumnIndex> {
        self.header.resolve_many(columns)
    }

    /// Export the data rows as a JSON array of objects keyed by header name.
    ///
    /// Cells missing from a short row become `null`; cells past the end of
    /// the header are left out. With duplicate header names the first column
    /// wins, as it does for resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use exptable::Table;
    ///
    /// let table = Table::parse("Code,Amount\nA,10\nB", ',');
    /// let json = table.to_json().unwrap();
    /// assert!(json.contains("\"Amount\": \"10\""));
    /// assert!(json.contains("\"Amount\": null"));
    /// ```
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }

    /// The value [`to_json`](Self::to_json) prints, for embedding in a
    /// larger document.
    pub fn to_json_value(&self) -> serde_json::Value {
        let names = self.header.names();
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (i, name) in names.iter().enumerate() {
                    if obj.contains_key(name) {
                        continue;
                    }
                    let value = match row.get(i) {
                        Some(cell) => serde_json::Value::String(cell.clone()),
                        None => serde_json::Value::Null,
                    };
                    obj.insert(name.clone(), value);
                }
                serde_json::Value::Object(obj)
            })
            .collect();

        serde_json::Value::Array(rows)
    }
}

/// Split one line into cells.
///
/// A trailing empty cell is not produced (`"a,b,"` gives two cells and an
/// empty line gives none). Cells are not trimmed and quotes have no meaning.
pub(crate) fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields: Vec<String> = line.split(delimiter).map(str::to_string).collect();
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Table {{ columns: {}, rows: {} }}",
            self.header.len(),
            self.rows.len()
        )
    }
}
