use crate::error::Result;
use crate::models::QueryResult;
use csv::WriterBuilder;
use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// What an export call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written with this many data rows (header excluded).
    Written { rows: usize },
    /// The result had no `response.data` array; nothing was written.
    NoData,
}

/// Header = union of the rows' keys in first-seen order.
///
/// The first row's keys come first, in the order the service sent them;
/// keys that only show up in later rows are appended as they appear.
fn header(rows: &[Value]) -> Vec<String> {
    let mut cols: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(m) = row {
            for k in m.keys() {
                if !cols.contains(k) {
                    cols.push(k.clone());
                }
            }
        }
    }
    if cols.is_empty() && !rows.is_empty() {
        cols.push("value".to_string());
    }
    cols
}

// Spreadsheet tools evaluate cells starting with these as formulas.
// Numeric strings ("-3.5") are left alone; EIA sends many values as strings.
fn neutralize(s: &str) -> String {
    if s.trim().parse::<f64>().is_ok() {
        return s.to_string();
    }
    match s.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{}", s),
        _ => s.to_string(),
    }
}

fn cell(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => neutralize(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn record(row: &Value, header: &[String]) -> Vec<String> {
    match row {
        Value::Object(m) => header.iter().map(|k| cell(m.get(k))).collect(),
        other => vec![cell(Some(other))],
    }
}

/// Save `response.data` as CSV with a header row.
///
/// A result without a `response.data` array is reported as
/// [`ExportOutcome::NoData`] and no file is created. An empty array gives an
/// empty file.
pub fn export_csv<P: AsRef<Path>>(result: &QueryResult, path: P) -> Result<ExportOutcome> {
    let path = path.as_ref();
    let Some(rows) = result.data_rows() else {
        info!("No data available to export.");
        return Ok(ExportOutcome::NoData);
    };

    let cols = header(rows);
    let mut wtr = WriterBuilder::new().flexible(true).from_path(path)?;
    if !cols.is_empty() {
        wtr.write_record(&cols)?;
    }
    for row in rows {
        wtr.write_record(record(row, &cols))?;
    }
    wtr.flush()?;

    info!("Data successfully exported to {}", path.display());
    Ok(ExportOutcome::Written { rows: rows.len() })
}

/// Save `response.data` as a pretty JSON array. Same no-data rule as [`export_csv`].
pub fn export_json<P: AsRef<Path>>(result: &QueryResult, path: P) -> Result<ExportOutcome> {
    let path = path.as_ref();
    let Some(rows) = result.data_rows() else {
        info!("No data available to export.");
        return Ok(ExportOutcome::NoData);
    };

    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;

    info!("Data successfully exported to {}", path.display());
    Ok(ExportOutcome::Written { rows: rows.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let r = QueryResult::new(json!({"response": {"data": [
            {"period": "2024-01", "value": 71.3},
            {"period": "2024-02", "value": 74.1}
        ]}}));
        assert_eq!(export_csv(&r, &csvp).unwrap(), ExportOutcome::Written { rows: 2 });
        assert_eq!(export_json(&r, &jsonp).unwrap(), ExportOutcome::Written { rows: 2 });
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn cells_render_by_json_type() {
        assert_eq!(cell(None), "");
        assert_eq!(cell(Some(&Value::Null)), "");
        assert_eq!(cell(Some(&json!(true))), "true");
        assert_eq!(cell(Some(&json!(-3.5))), "-3.5");
        assert_eq!(cell(Some(&json!("-3.5"))), "-3.5");
        assert_eq!(cell(Some(&json!("=SUM(A1:A9)"))), "'=SUM(A1:A9)");
        assert_eq!(cell(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn empty_data_writes_empty_file() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("empty.csv");
        let jsonp = dir.path().join("empty.json");
        let r = QueryResult::new(json!({"response": {"data": []}}));
        assert_eq!(export_csv(&r, &csvp).unwrap(), ExportOutcome::Written { rows: 0 });
        assert_eq!(export_json(&r, &jsonp).unwrap(), ExportOutcome::Written { rows: 0 });
        assert_eq!(std::fs::read_to_string(&csvp).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&jsonp).unwrap(), "[]");
    }

    #[test]
    fn header_is_union_in_first_seen_order() {
        let rows = vec![
            json!({"period": "2024", "value": 1}),
            json!({"value": 2, "units": "MWh", "period": "2023"}),
            json!({"stateid": "CO"}),
        ];
        assert_eq!(header(&rows), vec!["period", "value", "units", "stateid"]);
        assert_eq!(header(&[json!(1), json!(2)]), vec!["value"]);
        assert!(header(&[]).is_empty());
    }
}
