use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutType {
    Percent,
    Flat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub cut_type: CutType,
    pub cut_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Outgoing,
    Return,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    /// Set on outgoing transactions only; empty string on returns.
    #[serde(default)]
    pub employee_id: String,
    pub amount: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    /// Origin of returned funds (CA/bank); return transactions only.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub cut_override: Option<f64>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Return,
    Unknown,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Return => "return",
            Self::Unknown => "unknown",
        }
    }
}

/// One structured candidate extracted from an OCR text blob. Advisory only:
/// nothing is persisted until the user confirms.
#[derive(Debug, Clone)]
pub struct ParsedCandidate {
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reference: Option<String>,
    pub mode: Option<String>,
    pub counterparty: Option<String>,
    pub direction: Direction,
    /// Resolved against known employee names; empty if no match.
    pub employee_id: String,
}

/// Canonical row from a bank/CA statement, whatever the source format.
#[derive(Debug, Clone)]
pub struct StatementEntry {
    pub date: String,
    pub amount: f64,
    pub desc: String,
    pub reference: String,
    pub mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
