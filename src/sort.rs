/// Table Sorter
///
/// Reorders the data rows of a [`Table`] in place by the sort key of a list
/// of columns. The header is never part of the sort.
///
/// The sort is stable: rows with equal keys keep the order they were loaded
/// in, so sorting twice by the same columns gives the same result.

use crate::sort_key::{serialize_row_with, KeyMode};
use crate::table::Table;
use log::{debug, warn};

impl Table {
    /// Sort the data rows by `columns` using concatenated sort keys.
    ///
    /// Columns are resolved by exact name. Unknown columns contribute
    /// nothing to the key. An empty column list leaves the table untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use exptable::Table;
    ///
    /// let mut table = Table::parse("Date,Amount\n2023-10-1,5\n2023-2-1,7", ',');
    /// table.sort_by(&["Date"]);
    /// assert_eq!(table.data_rows()[0][0], "2023-2-1");
    /// ```
    pub fn sort_by<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.sort_by_with(columns, KeyMode::Concatenated);
    }

    /// Sort the data rows by `columns` with an explicit key mode.
    pub fn sort_by_with<S: AsRef<str>>(&mut self, columns: &[S], mode: KeyMode) {
        if columns.is_empty() {
            return;
        }

        let indices = self.resolve_many(columns);
        for (name, idx) in columns.iter().zip(&indices) {
            if idx.is_none() {
                warn!("order-by column '{}' not found; ignoring it", name.as_ref());
            }
        }

        let rows = self.data_rows_mut();
        debug!("sorting {} rows by {} column(s), {:?} keys", rows.len(), indices.len(), mode);
        rows.sort_by_cached_key(|row| serialize_row_with(row, &indices, mode));
    }
}
