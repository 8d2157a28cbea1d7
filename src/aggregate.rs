/// Aggregator
///
/// Column totals and code grouping over the data rows of a [`Table`].
///
/// Everything here fails soft: an unknown column yields a zero total or an
/// empty list, and cells that are missing, empty or not numeric are left
/// out of the sum without being reported.
///
/// # Examples
///
/// ```
/// use exptable::{column_total, distinct_code_values, Table};
///
/// let table = Table::parse("Code,Amount\nA,10\nB,20\nA,5", ',');
///
/// assert_eq!(distinct_code_values(&table, "Code"), vec!["A", "B"]);
/// assert_eq!(column_total(&table, "Amount", "Code", Some("A")), 15.0);
/// assert_eq!(column_total(&table, "Amount", "Code", None), 35.0);
/// ```

use crate::table::Table;
use std::collections::BTreeSet;

/// Sum the numeric cells of `column`.
///
/// When `code` is a non-empty value only rows whose `code_column` cell
/// equals it exactly are counted; `None` or an empty code counts every row.
/// Returns 0 when either `column` or `code_column` is not in the header,
/// even if no code filter is requested.
///
/// Cells are read with [`parse_number_prefix`], so `"12.50$"` counts as
/// 12.5 and `"n/a"` is skipped.
pub fn column_total(table: &Table, column: &str, code_column: &str, code: Option<&str>) -> f64 {
    let Some(col_idx) = table.resolve(column) else {
        return 0.0;
    };
    let Some(code_idx) = table.resolve(code_column) else {
        return 0.0;
    };
    let code = code.filter(|c| !c.is_empty());

    let mut total = 0.0;
    for row in table.data_rows() {
        let Some(value) = row.get(col_idx) else {
            continue;
        };

        if let Some(code) = code {
            if row.get(code_idx).map(String::as_str) != Some(code) {
                continue;
            }
        }

        if value.is_empty() {
            continue;
        }

        if let Some(num) = parse_number_prefix(value) {
            total += num;
        }
    }
    total
}

/// Collect the distinct values of `code_column` in ascending order.
///
/// Rows too short to have the column are skipped. An empty string is a
/// value like any other and appears first when present. Returns an empty
/// list when the column is not in the header.
pub fn distinct_code_values(table: &Table, code_column: &str) -> Vec<String> {
    let Some(idx) = table.resolve(code_column) else {
        return Vec::new();
    };

    let codes: BTreeSet<&str> = table
        .data_rows()
        .iter()
        .filter_map(|row| row.get(idx).map(String::as_str))
        .collect();

    codes.into_iter().map(str::to_string).collect()
}

/// Read the longest numeric prefix of `s`, ignoring whatever follows it.
///
/// Accepts leading whitespace, an optional sign, then one of: decimal
/// digits with an optional fraction and exponent; `0x` followed by hex
/// digits with an optional fraction and binary exponent (`p`); or `inf`,
/// `infinity` or `nan` (any case). Returns `None` when no number starts the
/// string, or when a finite-looking number is too large for an `f64`.
///
/// ```
/// use exptable::parse_number_prefix;
///
/// assert_eq!(parse_number_prefix("12.50"), Some(12.5));
/// assert_eq!(parse_number_prefix("0x10"), Some(16.0));
/// assert_eq!(parse_number_prefix("  -3e2kg"), Some(-300.0));
/// assert_eq!(parse_number_prefix(".5."), Some(0.5));
/// assert_eq!(parse_number_prefix("$12"), None);
/// ```
pub fn parse_number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if let Some(special) = special_float(&s[end..]) {
        return Some(if bytes.first() == Some(&b'-') { -special } else { special });
    }

    if let Some(hex) = hex_float(&bytes[end..]) {
        let value = if bytes.first() == Some(&b'-') { -hex } else { hex };
        return value.is_finite().then_some(value);
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value: f64 = s[..end].parse().ok()?;
    if value.is_infinite() {
        return None;
    }
    Some(value)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn hex_digit(byte: Option<&u8>) -> Option<u32> {
    byte.and_then(|b| char::from(*b).to_digit(16))
}

/// Value of a `0x` prefixed hex number, or `None` if `bytes` does not start
/// with `0x` and at least one hex digit. A bare `0x` reads as the decimal 0.
fn hex_float(bytes: &[u8]) -> Option<f64> {
    if bytes.len() < 2 || bytes[0] != b'0' || !matches!(bytes[1], b'x' | b'X') {
        return None;
    }

    let mut i = 2;
    let mut mantissa = 0.0_f64;
    let mut digits = 0;
    let mut exponent: i32 = 0;

    while let Some(d) = hex_digit(bytes.get(i)) {
        mantissa = mantissa * 16.0 + f64::from(d);
        digits += 1;
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while let Some(d) = hex_digit(bytes.get(i)) {
            mantissa = mantissa * 16.0 + f64::from(d);
            exponent = exponent.saturating_sub(4);
            digits += 1;
            i += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'p') | Some(b'P')) {
        let mut j = i + 1;
        let negative = bytes.get(j) == Some(&b'-');
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            let power = std::str::from_utf8(&bytes[j..j + exp_digits])
                .ok()
                .and_then(|p| p.parse::<i32>().ok())
                .unwrap_or(i32::MAX);
            exponent = if negative {
                exponent.saturating_sub(power)
            } else {
                exponent.saturating_add(power)
            };
        }
    }

    if mantissa == 0.0 {
        return Some(0.0);
    }
    Some(mantissa * 2.0_f64.powi(exponent))
}

fn special_float(s: &str) -> Option<f64> {
    let starts_with = |prefix: &str| {
        s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    };

    if starts_with("inf") {
        Some(f64::INFINITY)
    } else if starts_with("nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Table {
        Table::parse("Code,Amount\nA,10\nB,20\nA,5", ',')
    }

    #[test]
    fn test_column_total_all_rows() {
        assert_eq!(column_total(&ledger(), "Amount", "Code", None), 35.0);
        assert_eq!(column_total(&ledger(), "Amount", "Code", Some("")), 35.0);
    }

    #[test]
    fn test_column_total_by_code() {
        assert_eq!(column_total(&ledger(), "Amount", "Code", Some("A")), 15.0);
        assert_eq!(column_total(&ledger(), "Amount", "Code", Some("B")), 20.0);
        assert_eq!(column_total(&ledger(), "Amount", "Code", Some("Z")), 0.0);
        assert_eq!(column_total(&ledger(), "Amount", "Code", Some("a")), 0.0);
    }

    #[test]
    fn test_column_total_unknown_columns() {
        assert_eq!(column_total(&ledger(), "Missing", "Code", None), 0.0);
        assert_eq!(column_total(&ledger(), "Amount", "FinCode", None), 0.0);
        assert_eq!(column_total(&Table::parse("", ','), "Amount", "Code", None), 0.0);
    }

    #[test]
    fn test_column_total_skips_bad_cells() {
        let table = Table::parse(
            "Code,Amount\nA,10\nA,\nA,n/a\nA,2.5kg\nA\nA,  1e1\nA,1e999",
            ',',
        );
        assert_eq!(column_total(&table, "Amount", "Code", Some("A")), 22.5);
    }

    #[test]
    fn test_column_total_short_row_without_code_cell() {
        let table = Table::parse("Amount,Code\n10,A\n7", ',');
        assert_eq!(column_total(&table, "Amount", "Code", Some("A")), 10.0);
        assert_eq!(column_total(&table, "Amount", "Code", None), 17.0);
    }

    #[test]
    fn test_grand_total_can_exceed_group_totals() {
        let table = Table::parse("Code,Amount\nA,10\n,100\nB,20", ',');
        let codes = distinct_code_values(&table, "Code");
        let grouped: f64 = codes
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| column_total(&table, "Amount", "Code", Some(c.as_str())))
            .sum();
        let grand = column_total(&table, "Amount", "Code", None);
        assert_eq!(grouped, 30.0);
        assert_eq!(grand, 130.0);
    }

    #[test]
    fn test_distinct_code_values_sorted_and_unique() {
        let table = Table::parse("Code,Amount\nb,1\nA,2\nb,3\na,4\n,5\nB", ',');
        assert_eq!(distinct_code_values(&table, "Code"), vec!["", "A", "B", "a", "b"]);
    }

    #[test]
    fn test_distinct_code_values_skips_short_rows() {
        let table = Table::parse("Amount,Code\n1,X\n2\n3,Y", ',');
        assert_eq!(distinct_code_values(&table, "Code"), vec!["X", "Y"]);
    }

    #[test]
    fn test_distinct_code_values_unknown_column() {
        assert!(distinct_code_values(&ledger(), "FinCode").is_empty());
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number_prefix("10"), Some(10.0));
        assert_eq!(parse_number_prefix("-4.25"), Some(-4.25));
        assert_eq!(parse_number_prefix("+7"), Some(7.0));
        assert_eq!(parse_number_prefix("\t 3"), Some(3.0));
        assert_eq!(parse_number_prefix("5."), Some(5.0));
        assert_eq!(parse_number_prefix(".25"), Some(0.25));
        assert_eq!(parse_number_prefix("1,234.00"), Some(1.0));
        assert_eq!(parse_number_prefix("2e"), Some(2.0));
        assert_eq!(parse_number_prefix("2e+"), Some(2.0));
        assert_eq!(parse_number_prefix("2E-1x"), Some(0.2));
    }

    #[test]
    fn test_parse_number_prefix_rejects() {
        assert_eq!(parse_number_prefix(""), None);
        assert_eq!(parse_number_prefix("   "), None);
        assert_eq!(parse_number_prefix("-"), None);
        assert_eq!(parse_number_prefix("."), None);
        assert_eq!(parse_number_prefix("-.e5"), None);
        assert_eq!(parse_number_prefix("abc"), None);
        assert_eq!(parse_number_prefix("1e400"), None);
    }

    #[test]
    fn test_parse_number_prefix_special_values() {
        assert_eq!(parse_number_prefix("inf"), Some(f64::INFINITY));
        assert_eq!(parse_number_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert!(parse_number_prefix("NaN").unwrap().is_nan());
        assert_eq!(parse_number_prefix("info"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_number_prefix_hex() {
        assert_eq!(parse_number_prefix("0x10"), Some(16.0));
        assert_eq!(parse_number_prefix(" -0X1Fzz"), Some(-31.0));
        assert_eq!(parse_number_prefix("0x1.8p1"), Some(3.0));
        assert_eq!(parse_number_prefix("0x.8"), Some(0.5));
        assert_eq!(parse_number_prefix("0x4p-2"), Some(1.0));
        assert_eq!(parse_number_prefix("0x1p"), Some(1.0));
        // no hex digits: only the leading 0 is read
        assert_eq!(parse_number_prefix("0x"), Some(0.0));
        assert_eq!(parse_number_prefix("0xg"), Some(0.0));
        assert_eq!(parse_number_prefix("0x1p99999"), None);
    }

    #[test]
    fn test_column_total_reads_hex_cells() {
        let table = Table::parse("Code,Amount\nA,0x10\nA,4", ',');
        assert_eq!(column_total(&table, "Amount", "Code", Some("A")), 20.0);
    }
}
