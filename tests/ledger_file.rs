use std::io::Write;

use exptable::{process, Error, Ledger, OutputFormat, ReportConfig, Table};
use tempfile::NamedTempFile;

const EXPENSES: &str = "\
Entry#|Date|FinCode|Vendor|Amount|Total
2|2023-10-02|OFF|Staples|100.00|113.00
1|2023-2-14|TRV|Via Rail|50.00|56.50

3|2023-2-1|OFF|Grand & Toy|20.00|22.60
";

fn write_ledger(text: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", text).unwrap();
    tmp
}

fn run(config: &ReportConfig) -> String {
    let mut out = Vec::new();
    process(config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_load_from_file() {
    let tmp = write_ledger(EXPENSES);
    let table = Table::load(tmp.path(), '|').unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.resolve("Vendor"), Some(3));
    assert_eq!(table.data_rows()[2][3], "Grand & Toy");
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nothing.csv");

    let mut config = ReportConfig::new(&path);
    config.summary = Some(vec!["Amount".to_string()]);

    let mut out = Vec::new();
    let err = process(&config, &mut out).unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert!(err.to_string().ends_with("nothing.csv does not exist"));
    assert!(out.is_empty());
}

#[test]
fn test_process_text_detail_and_summary() {
    let tmp = write_ledger(EXPENSES);
    let mut config = ReportConfig::new(tmp.path());
    config.delimiter = '|';
    config.code_column = Some("FinCode".to_string());
    config.detail = Some(vec!["Date".to_string(), "Amount".to_string()]);
    config.order_by = vec!["Date".to_string()];
    config.summary = Some(vec!["Amount".to_string(), "Total".to_string()]);

    let text = run(&config);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "      Date |     Amount");
    assert_eq!(lines[2], "  2023-2-1 |      20.00");
    assert_eq!(lines[3], " 2023-2-14 |      50.00");
    assert_eq!(lines[4], "2023-10-02 |     100.00");

    let rule = "=".repeat(2 * 13 + 12);
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], rule);
    assert_eq!(lines[7], "FinCode    | Amount     | Total      | ");
    assert_eq!(lines[9], "OFF        |     120.00 |     135.60 | ");
    assert_eq!(lines[10], "TRV        |      50.00 |      56.50 | ");
    assert_eq!(lines[12], "Sum        |     170.00 |     192.10 | ");
    assert_eq!(lines.len(), 14);
}

#[test]
fn test_process_dump_and_codes() {
    let tmp = write_ledger("Code,Amount\nB,1\nA,2\nB,3\n");
    let mut config = ReportConfig::new(tmp.path());
    config.dump = true;
    config.codes = true;

    let text = run(&config);
    assert_eq!(
        text,
        "Code: Amount: \nB: 1: \nA: 2: \nB: 3: \nNo of rows processed: 4\nA\nB\n"
    );
}

#[test]
fn test_process_json() {
    let tmp = write_ledger(EXPENSES);
    let mut config = ReportConfig::new(tmp.path());
    config.delimiter = '|';
    config.code_column = Some("FinCode".to_string());
    config.summary = Some(vec!["Amount".to_string()]);
    config.detail = Some(vec!["Vendor".to_string(), "Missing".to_string()]);
    config.format = OutputFormat::Json;

    let json: serde_json::Value = serde_json::from_str(&run(&config)).unwrap();

    assert!(json.get("table").is_none());
    assert_eq!(json["detail"]["rows"][0][0], "Vendor");
    assert_eq!(json["detail"]["rows"][1][0], "Staples");
    assert!(json["detail"]["rows"][1][1].is_null());
    assert_eq!(json["summary"]["code_column"], "FinCode");
    assert_eq!(json["summary"]["groups"][0]["label"], "OFF");
    assert_eq!(json["summary"]["total"]["totals"][0], 170.0);
}

#[test]
fn test_ledger_from_config_applies_code_column() {
    let tmp = write_ledger(EXPENSES);
    let mut config = ReportConfig::new(tmp.path());
    config.delimiter = '|';
    config.code_column = Some("FinCode".to_string());

    let ledger = Ledger::from_config(&config).unwrap();
    assert_eq!(ledger.code_column(), "FinCode");
    assert_eq!(ledger.codes(), vec!["OFF", "TRV"]);
    assert_eq!(ledger.column_total("Total", Some("OFF")), 135.6);
}
