/// Sort-Key Serializer
///
/// Rows are ordered by a single string built from the cells of the
/// ordering columns. Cells that look like dates are replaced by an integer
/// encoding first so that `2023-2-1` orders before `2023-10-1`.
///
/// # Date detection
///
/// A cell is date-shaped when the first two `-` or `/` characters in it are
/// the same character and the three pieces they split off (year, month,
/// day) each parse completely as an integer. The encoding is
/// `year * 372 + month * 31 + day` (372 = 12 * 31): monotonic in
/// (year, month, day) but not a calendar day count.
///
/// ```
/// use exptable::detect_date;
///
/// assert_eq!(detect_date("2023-01-15"), Some(2023 * 372 + 31 + 15));
/// assert_eq!(detect_date("2023-1-15"), detect_date("2023-01-15"));
/// assert_eq!(detect_date("2023-01/15"), None);
/// ```

use crate::header::ColumnIndex;

const DATE_DELIMITERS: [char; 2] = ['-', '/'];
const MONTHS_PER_YEAR: i64 = 12;
const DAYS_PER_MONTH: i64 = 31;

/// How the fields of a sort key are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Fields are concatenated with nothing between them.
    ///
    /// Different cell splits can produce the same key (`"A","BC"` and
    /// `"AB","C"` both give `"ABC"`).
    #[default]
    Concatenated,
    /// Every field is followed by U+001F, which sorts below any printable
    /// character, so keys compare field by field.
    Separated,
}

const FIELD_SEPARATOR: char = '\u{1f}';

/// Returns the date encoding of `cell`, or `None` if it is not date-shaped.
pub fn detect_date(cell: &str) -> Option<i64> {
    let mut delimiters = cell.match_indices(DATE_DELIMITERS);
    let (first, first_delim) = delimiters.next()?;
    let (second, second_delim) = delimiters.next()?;
    if first_delim != second_delim {
        return None;
    }

    let year = parse_whole_int(&cell[..first])?;
    let month = parse_whole_int(&cell[first + 1..second])?;
    let day = parse_whole_int(&cell[second + 1..])?;

    Some(year * MONTHS_PER_YEAR * DAYS_PER_MONTH + month * DAYS_PER_MONTH + day)
}

/// Parse `s` as a base-10 `i32`, requiring every character to be consumed.
///
/// Leading whitespace and one sign character are accepted; anything after
/// the digits is not.
fn parse_whole_int(s: &str) -> Option<i64> {
    s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b')
        .parse::<i32>()
        .ok()
        .map(i64::from)
}

/// Build the sort key of `row` over `indices`.
///
/// Unresolved indices and indices past the end of the row contribute
/// nothing. Date-shaped cells contribute their encoding in decimal, other
/// cells their raw text.
pub fn serialize_row(row: &[String], indices: &[ColumnIndex]) -> String {
    serialize_row_with(row, indices, KeyMode::Concatenated)
}

pub fn serialize_row_with(row: &[String], indices: &[ColumnIndex], mode: KeyMode) -> String {
    let mut key = String::new();
    for cell in indices.iter().filter_map(|idx| idx.and_then(|i| row.get(i))) {
        match detect_date(cell) {
            Some(encoded) => key.push_str(&encoded.to_string()),
            None => key.push_str(cell),
        }
        if mode == KeyMode::Separated {
            key.push(FIELD_SEPARATOR);
        }
    }
    key
}
