use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{KhataError, Result};
use crate::extract::{extract_date_time, extract_mode, extract_ref};
use crate::models::StatementEntry;
use crate::statement::map_row;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn parse_amount(raw: &str) -> f64 {
    let s = raw
        .replace(',', "")
        .replace('"', "")
        .replace('₹', "")
        .replace("Rs.", "")
        .replace("INR", "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

pub fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn norm_header(h: &str) -> String {
    h.trim().to_lowercase().replace(' ', "_")
}

fn col(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|n| headers.iter().position(|h| h == n))
}

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn opt(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// Ledger CSV import rows: one typed record per import kind, validated at
// the parse boundary. Header matching is case-insensitive with
// underscore/space tolerance.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EmployeeImportRow {
    pub name: String,
    pub cut_type: Option<String>,
    pub cut_value: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OutgoingImportRow {
    pub date: String,
    pub time: String,
    pub employee: String,
    pub amount: f64,
    pub mode: Option<String>,
    pub reference: Option<String>,
    pub note: String,
    pub cut: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct IncomingImportRow {
    pub date: String,
    pub time: String,
    pub amount: f64,
    pub mode: Option<String>,
    pub reference: Option<String>,
    pub source: String,
    pub note: String,
}

/// Parse an employees CSV. A malformed file errors out before anything is
/// committed; rows with no name are counted as skipped.
pub fn parse_employee_rows(path: &Path) -> Result<(Vec<EmployeeImportRow>, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(norm_header).collect();
    let name_col = col(&headers, &["employee", "name"]);
    let type_col = col(&headers, &["cut_type"]);
    let value_col = col(&headers, &["cut_value"]);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let name = cell(&record, name_col);
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        rows.push(EmployeeImportRow {
            name,
            cut_type: opt(cell(&record, type_col).to_lowercase()),
            cut_value: cell(&record, value_col).parse().ok(),
        });
    }
    Ok((rows, skipped))
}

pub fn parse_outgoing_rows(path: &Path) -> Result<(Vec<OutgoingImportRow>, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(norm_header).collect();
    let date_col = col(&headers, &["date"]);
    let time_col = col(&headers, &["time"]);
    let emp_col = col(&headers, &["employee", "name"]);
    let amount_col = col(&headers, &["amount"]);
    let mode_col = col(&headers, &["mode"]);
    let ref_col = col(&headers, &["ref", "reference"]);
    let note_col = col(&headers, &["note"]);
    let cut_col = col(&headers, &["cut"]);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let employee = cell(&record, emp_col);
        let amount = parse_amount(&cell(&record, amount_col));
        if employee.is_empty() || amount <= 0.0 {
            skipped += 1;
            continue;
        }
        rows.push(OutgoingImportRow {
            date: cell(&record, date_col),
            time: cell(&record, time_col),
            employee,
            amount,
            mode: opt(cell(&record, mode_col)),
            reference: opt(cell(&record, ref_col)),
            note: cell(&record, note_col),
            cut: cell(&record, cut_col).parse().ok(),
        });
    }
    Ok((rows, skipped))
}

pub fn parse_incoming_rows(path: &Path) -> Result<(Vec<IncomingImportRow>, usize)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(norm_header).collect();
    let date_col = col(&headers, &["date"]);
    let time_col = col(&headers, &["time"]);
    let amount_col = col(&headers, &["amount"]);
    let mode_col = col(&headers, &["mode"]);
    let ref_col = col(&headers, &["ref", "reference"]);
    let source_col = col(&headers, &["source"]);
    let note_col = col(&headers, &["note"]);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let amount = parse_amount(&cell(&record, amount_col));
        if amount <= 0.0 {
            skipped += 1;
            continue;
        }
        rows.push(IncomingImportRow {
            date: cell(&record, date_col),
            time: cell(&record, time_col),
            amount,
            mode: opt(cell(&record, mode_col)),
            reference: opt(cell(&record, ref_col)),
            source: cell(&record, source_col),
            note: cell(&record, note_col),
        });
    }
    Ok((rows, skipped))
}

// ---------------------------------------------------------------------------
// Statement files: CSV, XLSX sheets and plain-text dumps all funnel into
// Vec<StatementEntry>. Unusable rows are skipped, never fatal.
// ---------------------------------------------------------------------------

pub fn read_statement_file(path: &Path) -> Result<Vec<StatementEntry>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "csv" => read_statement_csv(path),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xls" => read_statement_xlsx(path),
        #[cfg(not(feature = "xlsx"))]
        "xlsx" | "xls" => Err(KhataError::UnsupportedFormat(
            "spreadsheet support not compiled in".to_string(),
        )),
        _ => read_statement_text(path),
    }
}

fn read_statement_csv(path: &Path) -> Result<Vec<StatementEntry>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut headers: Option<Vec<String>> = None;
    let mut entries = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else { continue };
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        match &headers {
            // Bank exports often carry preamble lines before the real
            // header row; take the first record with at least two fields.
            None => {
                if fields.iter().filter(|f| !f.trim().is_empty()).count() >= 2 {
                    headers = Some(fields);
                }
            }
            Some(h) => {
                if let Some(entry) = map_row(h, &fields) {
                    entries.push(entry);
                }
            }
        }
    }
    Ok(entries)
}

#[cfg(feature = "xlsx")]
fn read_statement_xlsx(path: &Path) -> Result<Vec<StatementEntry>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| KhataError::UnsupportedFormat(format!("failed to open sheet: {e}")))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| KhataError::UnsupportedFormat(format!("failed to read sheet: {e}")))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(|d| d.to_string()).collect();

    let mut entries = Vec::new();
    for row in rows {
        let fields: Vec<String> = row.iter().map(|d| d.to_string()).collect();
        if let Some(entry) = map_row(&headers, &fields) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn read_statement_text(path: &Path) -> Result<Vec<StatementEntry>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().filter_map(entry_from_line).collect())
}

static MONEY_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d[\d,]*\.\d{1,2}\b|\b\d{1,3}(?:,\d{2,3})+\b").unwrap());

/// Best-effort parse of one plain-text statement line. The amount must be
/// money-formatted (decimals or thousands separators) so that dates and
/// reference numbers on the same line are not mistaken for it. The first
/// such token is the transaction amount; statement lines usually trail with
/// the running balance.
pub fn entry_from_line(line: &str) -> Option<StatementEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let amount = MONEY_TOKEN_RE
        .find(trimmed)
        .map(|m| parse_amount(m.as_str()))
        .filter(|v| *v > 0.0)?;

    let (date, _) = extract_date_time(trimmed);
    Some(StatementEntry {
        date: date.unwrap_or_default(),
        amount,
        desc: trimmed.to_string(),
        reference: extract_ref(trimmed).unwrap_or_default(),
        mode: extract_mode(trimmed).unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Statement import log: checksum guard against re-running the matcher on a
// byte-identical file.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLogEntry {
    pub filename: String,
    pub checksum: String,
    pub imported_at: String,
    pub updated: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportLog {
    #[serde(default)]
    pub records: Vec<ImportLogEntry>,
}

impl ImportLog {
    pub fn contains(&self, checksum: &str) -> bool {
        self.records.iter().any(|r| r.checksum == checksum)
    }

    pub fn record(&mut self, filename: &str, checksum: &str, updated: usize) {
        self.records.push(ImportLogEntry {
            filename: filename.to_string(),
            checksum: checksum.to_string(),
            imported_at: chrono::Utc::now().to_rfc3339(),
            updated,
        });
    }
}

pub fn load_import_log(workspace_dir: &Path) -> ImportLog {
    let path = workspace_dir.join("imports.json");
    if !path.exists() {
        return ImportLog::default();
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn save_import_log(workspace_dir: &Path, log: &ImportLog) -> Result<()> {
    let json = serde_json::to_string_pretty(log)?;
    std::fs::write(workspace_dir.join("imports.json"), format!("{json}\n"))?;
    Ok(())
}
