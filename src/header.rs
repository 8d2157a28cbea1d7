/// Column Resolver
///
/// The header row names each column positionally. Requested column names
/// are resolved against it once, up front, and the resulting positions are
/// used for every row afterwards.
///
/// # Examples
///
/// ```
/// use exptable::Header;
///
/// let header = Header::new(vec!["Date".to_string(), "Code".to_string(), "Amount".to_string()]);
///
/// assert_eq!(header.resolve("Amount"), Some(2));
/// assert_eq!(header.resolve("amount"), None);
/// assert_eq!(header.resolve_ignore_case("amount"), Some(2));
/// assert_eq!(header.resolve_many(&["Code", "Missing"]), vec![Some(1), None]);
/// ```

use serde::Serialize;

/// Position of a column within a row, or `None` when the name did not resolve.
///
/// Callers must skip `None` entries rather than index with them.
pub type ColumnIndex = Option<usize>;

/// The header row: column names in file order.
///
/// Names need not be unique; resolution always returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        Header { names }
    }

    /// Returns the number of columns named by the header.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there is no header (the table was empty).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns the position of the first header cell equal to `name`.
    pub fn resolve(&self, name: &str) -> ColumnIndex {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the position of the first header cell equal to `name` under
    /// ASCII case folding.
    ///
    /// Lengths are compared first, so names of different byte length never
    /// match even when one is a case-folded prefix of the other.
    pub fn resolve_ignore_case(&self, name: &str) -> ColumnIndex {
        self.names
            .iter()
            .position(|n| n.len() == name.len() && n.as_bytes().eq_ignore_ascii_case(name.as_bytes()))
    }

    pub fn resolve_with(&self, name: &str, ignore_case: bool) -> ColumnIndex {
        if ignore_case {
            self.resolve_ignore_case(name)
        } else {
            self.resolve(name)
        }
    }

    /// Resolves a list of names positionally.
    ///
    /// Entry `i` of the result belongs to `names[i]`. Unknown names become
    /// `None`; they are never an error.
    pub fn resolve_many<S: AsRef<str>>(&self, names: &[S]) -> Vec<ColumnIndex> {
        names.iter().map(|name| self.resolve(name.as_ref())).collect()
    }
}
