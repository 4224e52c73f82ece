//! Structured-field extraction from noisy payment-confirmation OCR text.
//!
//! Amounts are chosen by weighted candidate voting rather than first-match:
//! every heuristic contributes `(value, weight)` pairs and the globally best
//! one wins. Reference numbers, phone numbers and clock times all look like
//! amounts in layout-lossy OCR text, so no single regex is trustworthy.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Direction, Employee, ParsedCandidate};
use crate::numwords::words_to_number;

// ---------------------------------------------------------------------------
// Amount extraction
// ---------------------------------------------------------------------------

/// Weight tiers, descending confidence:
///   5.0  currency marker (₹/rs/inr) directly before the number
///   4.0  amount keyword ("debited", "paid", ...) followed by a number
///   3.0  spelled-out phrase ending in rupees/rs/only
///   2.0  fallback token written with thousands separators
///   1.2  bare fallback token
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    pub value: f64,
    pub weight: f64,
}

static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₹|\brs\.?|\binr)\s*([0-9OoIl][0-9OoIl,]*(?:\.[0-9]+)?)").unwrap()
});

static NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9][0-9OoIli,]*(?:\.[0-9]+)?\b").unwrap());

static SPELLED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([a-z][a-z \-]*?(?:rupees|rs|only))\b").unwrap());

// Meridiem required: a bare H:MM could be a ratio or duration, and those
// lines may still carry a legitimate amount for the fallback tier.
static TIME_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)\b").unwrap());

const AMOUNT_KEYWORDS: &[&str] = &[
    "total amount",
    "amount",
    "debited",
    "credited",
    "paid",
    "transfer",
];

/// Parse a numeric token after undoing the usual OCR glyph confusions
/// (O→0, I/l→1) and stripping separators.
fn clean_number(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter_map(|c| match c {
            'O' | 'o' => Some('0'),
            'I' | 'l' | 'i' => Some('1'),
            ',' | ' ' => None,
            _ => Some(c),
        })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// All amount candidates found in `text`, sorted best-first (weight
/// descending, value descending as the tie-break). Kept public so scoring
/// regressions are testable tier by tier.
pub fn amount_candidates(text: &str) -> Vec<AmountCandidate> {
    let mut candidates = Vec::new();

    for line in text.lines() {
        let lower = line.to_lowercase();

        // Tier 1: explicit currency marker
        for cap in CURRENCY_RE.captures_iter(line) {
            if let Some(v) = clean_number(&cap[1]) {
                candidates.push(AmountCandidate { value: v, weight: 5.0 });
            }
        }

        // Tier 2: amount keyword followed by a number. Keyword offsets come
        // from the lowercased line, so the number search stays on it too:
        // lowercasing can change byte lengths and offsets do not transfer.
        if let Some(pos) = AMOUNT_KEYWORDS.iter().find_map(|k| lower.find(k)) {
            if let Some(m) = NUM_RE.find(&lower[pos..]) {
                if let Some(v) = clean_number(m.as_str()) {
                    candidates.push(AmountCandidate { value: v, weight: 4.0 });
                }
            }
        }

        // Tier 3: spelled-out phrase
        for cap in SPELLED_RE.captures_iter(line) {
            if let Some(v) = words_to_number(&cap[1]) {
                if v > 0.0 {
                    candidates.push(AmountCandidate { value: v, weight: 3.0 });
                }
            }
        }

        // Fallback tier: any sizeable numeric token, but never on a
        // clock-time (H:MM am/pm) line, and never a bare 9+ digit run
        // (phone/account/reference numbers; real amounts that large carry
        // separators).
        if TIME_LINE_RE.is_match(line) {
            continue;
        }
        for m in NUM_RE.find_iter(line) {
            let token = m.as_str();
            let has_separator = token.contains(',');
            let digits = token.chars().filter(|c| !matches!(c, ',' | '.')).count();
            if !has_separator && digits >= 9 {
                continue;
            }
            if let Some(v) = clean_number(token) {
                if v >= 50.0 {
                    let weight = if has_separator { 2.0 } else { 1.2 };
                    candidates.push(AmountCandidate { value: v, weight });
                }
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal))
    });
    candidates
}

pub fn extract_amount(text: &str) -> Option<f64> {
    amount_candidates(text).first().map(|c| c.value)
}

// ---------------------------------------------------------------------------
// Other field extractors
// ---------------------------------------------------------------------------

static DATE_SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap());

static DATE_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}(?:st|nd|rd|th)?\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*,?\s+\d{2,4})\b",
    )
    .unwrap()
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)?)\b").unwrap());

static REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:utr|upi\s*ref(?:erence)?(?:\s*no\.?)?|ref(?:erence)?\s*no\.?|txn\s*id|transaction\s*id)\s*[:#.\-]?\s*([A-Za-z0-9]{6,})",
    )
    .unwrap()
});

pub fn extract_date_time(text: &str) -> (Option<String>, Option<String>) {
    let date = DATE_SLASH_RE
        .captures(text)
        .or_else(|| DATE_MONTH_RE.captures(text))
        .map(|c| c[1].trim().to_string());
    let time = TIME_RE.captures(text).map(|c| c[1].trim().to_string());
    (date, time)
}

pub fn extract_ref(text: &str) -> Option<String> {
    REF_RE.captures(text).map(|c| c[1].to_string())
}

const MODES: &[(&str, &str)] = &[
    ("upi", "UPI"),
    ("imps", "IMPS"),
    ("neft", "NEFT"),
    ("rtgs", "RTGS"),
    ("gpay", "GPay"),
    ("google pay", "GPay"),
    ("phonepe", "PhonePe"),
    ("paytm", "Paytm"),
];

pub fn extract_mode(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    MODES
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|(_, label)| label.to_string())
}

static COUNTERPARTY_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)paid\s+to[:\s]+(.+)$",
        r"(?i)payment\s+to[:\s]+(.+)$",
        r"(?i)payee\s+name[:\s]+(.+)$",
        r"(?i)beneficiary(?:\s+name)?[:\s]+(.+)$",
        r"(?i)^to[:\s]+(.+)$",
        r"(?i)^from[:\s]+(.+)$",
        r"(?i)received\s+from[:\s]+(.+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn extract_counterparty(text: &str) -> Option<String> {
    for line in text.lines() {
        for re in COUNTERPARTY_RES.iter() {
            if let Some(cap) = re.captures(line) {
                let name = cap[1].trim().trim_matches(|c| matches!(c, '.' | ',')).trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }
    None
}

const RETURN_WORDS: &[&str] = &["credited", "received", "payment received", "incoming"];
const OUTGOING_WORDS: &[&str] = &[
    "debited",
    "paid to",
    "payment to",
    "sent to",
    "transfer to",
    "outgoing",
];

/// Presence/absence voting. A payment confirmation states exactly one
/// direction; anything ambiguous is surfaced as `Unknown` for the user.
pub fn detect_direction(text: &str) -> Direction {
    let lower = text.to_lowercase();
    let is_return = RETURN_WORDS.iter().any(|w| lower.contains(w));
    let is_outgoing = OUTGOING_WORDS.iter().any(|w| lower.contains(w));
    match (is_return, is_outgoing) {
        (true, false) => Direction::Return,
        (false, true) => Direction::Outgoing,
        _ => Direction::Unknown,
    }
}

// ---------------------------------------------------------------------------
// TransactionTextParser
// ---------------------------------------------------------------------------

/// Run every extractor over one OCR text blob and resolve the counterparty
/// against known employee names (case-insensitive substring, first match
/// wins). Pure composition, no side effects.
pub fn parse_transaction_text(text: &str, employees: &[Employee]) -> ParsedCandidate {
    let (date, time) = extract_date_time(text);
    let counterparty = extract_counterparty(text);

    let employee_id = counterparty
        .as_deref()
        .and_then(|cp| {
            let cp = cp.to_lowercase();
            employees
                .iter()
                .find(|e| {
                    let name = e.name.to_lowercase();
                    cp.contains(&name) || name.contains(&cp)
                })
                .map(|e| e.id.clone())
        })
        .unwrap_or_default();

    ParsedCandidate {
        amount: extract_amount(text),
        date,
        time,
        reference: extract_ref(text),
        mode: extract_mode(text),
        counterparty,
        direction: detect_direction(text),
        employee_id,
    }
}
