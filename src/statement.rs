//! Bank/CA statement normalization and reconciliation against pending
//! returns.

use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::extract_mode;
use crate::importer::parse_amount;
use crate::models::{StatementEntry, Transaction, TxnType};

// ---------------------------------------------------------------------------
// Date normalization
// ---------------------------------------------------------------------------

static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static DMY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})\b").unwrap());

static DAY_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\s+([a-z]{3,})\.?,?\s+(\d{2,4})\b").unwrap());

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| prefix.starts_with(m))
        .map(|i| i as u32 + 1)
}

fn valid_ymd(y: i32, m: u32, d: u32) -> Option<String> {
    let year = if y < 100 { 2000 + y } else { y };
    NaiveDate::from_ymd_opt(year, m, d).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Normalize a free-form date string to a `YYYY-MM-DD` key. Day-first
/// ordering for slashed dates (Indian statements). Unrecognized formats
/// normalize to the empty string, which never matches anything.
pub fn normalize_date(raw: &str) -> String {
    if let Some(c) = ISO_RE.captures(raw) {
        if let Some(key) = valid_ymd(
            c[1].parse().unwrap_or(0),
            c[2].parse().unwrap_or(0),
            c[3].parse().unwrap_or(0),
        ) {
            return key;
        }
    }
    if let Some(c) = DMY_RE.captures(raw) {
        if let Some(key) = valid_ymd(
            c[3].parse().unwrap_or(0),
            c[2].parse().unwrap_or(0),
            c[1].parse().unwrap_or(0),
        ) {
            return key;
        }
    }
    if let Some(c) = DAY_MONTH_RE.captures(raw) {
        if let Some(m) = month_number(&c[2]) {
            if let Some(key) = valid_ymd(c[3].parse().unwrap_or(0), m, c[1].parse().unwrap_or(0)) {
                return key;
            }
        }
    }
    String::new()
}

// ---------------------------------------------------------------------------
// StatementRowMapper
// ---------------------------------------------------------------------------

const DATE_HEADERS: &[&str] = &["date", "txn date", "value date", "posting"];
const AMOUNT_HEADERS: &[&str] = &["amount", "credit", "cr amount", "deposit"];
const DESC_HEADERS: &[&str] = &["description", "narration", "remark", "details"];
const REF_HEADERS: &[&str] = &["utr", "ref", "reference", "txn id", "upi ref"];
const MODE_HEADERS: &[&str] = &["mode", "channel", "type"];

static REF_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9]{8,}").unwrap());

/// First header containing the fragment wins, in listed fragment order.
fn find_col(headers: &[String], fragments: &[&str]) -> Option<usize> {
    fragments
        .iter()
        .find_map(|frag| headers.iter().position(|h| h.contains(frag)))
}

fn field(fields: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| fields.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Map one tabular statement row with arbitrary human-authored headers onto
/// the canonical entry shape. Returns `None` when no amount is resolvable.
///
/// This mapper exists for the incoming/return reconciliation flow: when the
/// row has no usable amount column it falls back to credit-then-debit,
/// because returns land as credits on the business's bank account.
pub fn map_row(headers: &[String], fields: &[String]) -> Option<StatementEntry> {
    let norm: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let mut amount = parse_amount(&field(fields, find_col(&norm, AMOUNT_HEADERS)));
    if amount <= 0.0 {
        let credit = parse_amount(&field(fields, norm.iter().position(|h| h.contains("credit"))));
        let debit = parse_amount(&field(fields, norm.iter().position(|h| h.contains("debit"))));
        amount = if credit > 0.0 {
            credit
        } else if debit > 0.0 {
            debit
        } else {
            return None;
        };
    }

    let desc = field(fields, find_col(&norm, DESC_HEADERS));

    // Reference columns often carry human text around the actual UTR.
    let reference = REF_TOKEN_RE
        .find(&field(fields, find_col(&norm, REF_HEADERS)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut mode = field(fields, find_col(&norm, MODE_HEADERS));
    if mode.is_empty() {
        mode = extract_mode(&desc).unwrap_or_default();
    }

    Some(StatementEntry {
        date: field(fields, find_col(&norm, DATE_HEADERS)),
        amount,
        desc,
        reference,
        mode,
    })
}

// ---------------------------------------------------------------------------
// StatementMatcher
// ---------------------------------------------------------------------------

const SOURCE_MAX_LEN: usize = 140;

fn within_two_days(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (Ok(da), Ok(db)) = (
        NaiveDate::parse_from_str(a, "%Y-%m-%d"),
        NaiveDate::parse_from_str(b, "%Y-%m-%d"),
    ) else {
        return false;
    };
    (da - db).num_days().abs() <= 2
}

fn amount_key(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Reconcile statement entries against the ledger's return transactions.
///
/// Amount-first, date-filter-second: entries are bucketed by exact amount
/// (date precision varies too much across sources to key on), and a return
/// accepts the first entry whose date lies within 2 days of its own. Only
/// fields currently empty on the transaction are backfilled, so repeated
/// runs are idempotent. Returns the number of transactions actually changed.
pub fn match_statement(entries: &[StatementEntry], txns: &mut [Transaction]) -> usize {
    let mut by_amount: HashMap<String, Vec<(String, &StatementEntry)>> = HashMap::new();
    for entry in entries {
        by_amount
            .entry(amount_key(entry.amount))
            .or_default()
            .push((normalize_date(&entry.date), entry));
    }

    let mut updated = 0usize;
    for txn in txns.iter_mut() {
        if txn.txn_type != TxnType::Return {
            continue;
        }
        let Some(candidates) = by_amount.get(&amount_key(txn.amount)) else {
            continue;
        };
        let txn_date = normalize_date(&txn.date);
        let Some((_, entry)) = candidates
            .iter()
            .find(|(entry_date, _)| within_two_days(&txn_date, entry_date))
        else {
            continue;
        };

        let mut changed = false;
        if txn.reference.as_deref().unwrap_or("").is_empty() && !entry.reference.is_empty() {
            txn.reference = Some(entry.reference.clone());
            changed = true;
        }
        if txn.mode.as_deref().unwrap_or("").is_empty() && !entry.mode.is_empty() {
            txn.mode = Some(entry.mode.clone());
            changed = true;
        }
        if txn.source.is_empty() && !entry.desc.is_empty() {
            txn.source = entry.desc.chars().take(SOURCE_MAX_LEN).collect();
            changed = true;
        }
        if changed {
            updated += 1;
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("09/01/2024"), "2024-01-09");
        assert_eq!(normalize_date("9-1-24"), "2024-01-09");
        assert_eq!(normalize_date("2024-01-10"), "2024-01-10");
        assert_eq!(normalize_date("5 Jan 2024"), "2024-01-05");
        assert_eq!(normalize_date("12 September 2023"), "2023-09-12");
        assert_eq!(normalize_date("pending"), "");
        assert_eq!(normalize_date(""), "");
        // calendar-invalid
        assert_eq!(normalize_date("32/01/2024"), "");
    }

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_map_row_common_headers() {
        let headers = strs(&["Txn Date", "Narration", "UTR Number", "Amount"]);
        let fields = strs(&["09/01/2024", "UPI/CR/settlement", "AXISP00123456", "5,000.00"]);
        let entry = map_row(&headers, &fields).unwrap();
        assert_eq!(entry.date, "09/01/2024");
        assert_eq!(entry.amount, 5000.0);
        assert_eq!(entry.desc, "UPI/CR/settlement");
        assert_eq!(entry.reference, "AXISP00123456");
        assert_eq!(entry.mode, "UPI");
    }

    #[test]
    fn test_map_row_credit_debit_fallback() {
        let headers = strs(&["Value Date", "Details", "Debit", "Credit"]);
        let credit = strs(&["10/01/2024", "NEFT return", "", "750.00"]);
        let entry = map_row(&headers, &credit).unwrap();
        assert_eq!(entry.amount, 750.0);
        assert_eq!(entry.mode, "NEFT");

        let debit = strs(&["10/01/2024", "charge", "120.00", ""]);
        let entry = map_row(&headers, &debit).unwrap();
        assert_eq!(entry.amount, 120.0);
    }

    #[test]
    fn test_map_row_without_amount_is_dropped() {
        let headers = strs(&["Date", "Description"]);
        let fields = strs(&["10/01/2024", "opening balance"]);
        assert!(map_row(&headers, &fields).is_none());
    }

    #[test]
    fn test_map_row_reference_needs_eight_alphanumerics() {
        let headers = strs(&["Date", "Ref", "Amount"]);
        let fields = strs(&["10/01/2024", "see note", "100"]);
        let entry = map_row(&headers, &fields).unwrap();
        assert_eq!(entry.reference, "");
    }

    #[test]
    fn test_map_row_mode_column_beats_desc_scan() {
        let headers = strs(&["Date", "Description", "Mode", "Amount"]);
        let fields = strs(&["10/01/2024", "UPI transfer", "IMPS", "100"]);
        let entry = map_row(&headers, &fields).unwrap();
        assert_eq!(entry.mode, "IMPS");
    }

    fn pending_return(id: &str, amount: f64, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            txn_type: TxnType::Return,
            employee_id: String::new(),
            amount,
            date: date.to_string(),
            time: String::new(),
            mode: None,
            reference: None,
            source: String::new(),
            note: String::new(),
            cut_override: None,
            created_at: String::new(),
            image_url: None,
        }
    }

    fn entry(date: &str, amount: f64, desc: &str, reference: &str) -> StatementEntry {
        StatementEntry {
            date: date.to_string(),
            amount,
            desc: desc.to_string(),
            reference: reference.to_string(),
            mode: "UPI".to_string(),
        }
    }

    #[test]
    fn test_match_within_two_days() {
        let entries = vec![entry("09/01/2024", 500.0, "UPI CR from CA", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        assert_eq!(match_statement(&entries, &mut txns), 1);
        assert_eq!(txns[0].reference.as_deref(), Some("UTR12345678"));
        assert_eq!(txns[0].mode.as_deref(), Some("UPI"));
        assert_eq!(txns[0].source, "UPI CR from CA");
    }

    #[test]
    fn test_no_match_beyond_two_days() {
        let entries = vec![entry("14/01/2024", 500.0, "late credit", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        assert_eq!(match_statement(&entries, &mut txns), 0);
        assert!(txns[0].reference.is_none());
    }

    #[test]
    fn test_no_match_on_different_amount() {
        let entries = vec![entry("10/01/2024", 501.0, "credit", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        assert_eq!(match_statement(&entries, &mut txns), 0);
    }

    #[test]
    fn test_dateless_transaction_never_matches() {
        let entries = vec![entry("10/01/2024", 500.0, "credit", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "")];
        assert_eq!(match_statement(&entries, &mut txns), 0);
    }

    #[test]
    fn test_unparsable_entry_date_cannot_anchor() {
        let entries = vec![entry("pending", 500.0, "credit", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        assert_eq!(match_statement(&entries, &mut txns), 0);
    }

    #[test]
    fn test_idempotent_second_run() {
        let entries = vec![entry("09/01/2024", 500.0, "UPI CR from CA", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        assert_eq!(match_statement(&entries, &mut txns), 1);
        let snapshot = txns[0].clone();
        assert_eq!(match_statement(&entries, &mut txns), 0);
        assert_eq!(txns[0].reference, snapshot.reference);
        assert_eq!(txns[0].source, snapshot.source);
    }

    #[test]
    fn test_existing_fields_never_overwritten() {
        let entries = vec![entry("09/01/2024", 500.0, "statement desc", "UTRNEW9999")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        txns[0].reference = Some("MANUAL123".to_string());
        assert_eq!(match_statement(&entries, &mut txns), 1);
        assert_eq!(txns[0].reference.as_deref(), Some("MANUAL123"));
        assert_eq!(txns[0].source, "statement desc");
    }

    #[test]
    fn test_source_truncated_to_140_chars() {
        let long_desc = "x".repeat(200);
        let entries = vec![entry("09/01/2024", 500.0, &long_desc, "")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        match_statement(&entries, &mut txns);
        assert_eq!(txns[0].source.len(), 140);
    }

    #[test]
    fn test_outgoing_transactions_ignored() {
        let entries = vec![entry("09/01/2024", 500.0, "credit", "UTR12345678")];
        let mut txns = vec![pending_return("t1", 500.0, "2024-01-10")];
        txns[0].txn_type = TxnType::Outgoing;
        assert_eq!(match_statement(&entries, &mut txns), 0);
    }
}
