//! The ledger value and the commands that mutate it.
//!
//! All mutation goes through methods here so the whole model stays testable
//! without any storage attached. Persistence is one atomic JSON blob per
//! workspace; there is no field-level protocol.

use std::path::{Path, PathBuf};

use crate::error::{KhataError, Result};
use crate::models::{CutType, Employee, Ledger, Transaction, TxnType};

/// New-employee default: no cut until the user sets one.
pub const DEFAULT_CUT_TYPE: CutType = CutType::Percent;
pub const DEFAULT_CUT_VALUE: f64 = 0.0;

fn new_id(prefix: &str, seq: usize) -> String {
    format!(
        "{prefix}-{}-{seq}",
        chrono::Utc::now().format("%Y%m%d%H%M%S")
    )
}

/// Everything needed to create a transaction except the identity fields the
/// ledger assigns itself.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub employee_id: String,
    pub amount: f64,
    pub date: String,
    pub time: String,
    pub mode: Option<String>,
    pub reference: Option<String>,
    pub source: String,
    pub note: String,
    pub cut_override: Option<f64>,
    pub image_url: Option<String>,
}

impl Ledger {
    pub fn find_employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn find_employee_by_name(&self, name: &str) -> Option<&Employee> {
        let lower = name.trim().to_lowercase();
        self.employees
            .iter()
            .find(|e| e.name.to_lowercase() == lower)
    }

    pub fn add_employee(&mut self, name: &str, cut_type: CutType, cut_value: f64) -> Result<&Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KhataError::Other("employee name is empty".to_string()));
        }
        if self.find_employee_by_name(name).is_some() {
            return Err(KhataError::Other(format!("employee already exists: {name}")));
        }
        if !cut_value.is_finite() || cut_value < 0.0 {
            return Err(KhataError::InvalidAmount(format!("cut value {cut_value}")));
        }
        let employee = Employee {
            id: new_id("emp", self.employees.len()),
            name: name.to_string(),
            cut_type,
            cut_value,
        };
        self.employees.push(employee);
        Ok(self.employees.last().unwrap())
    }

    /// Idempotent find-by-lowercased-name-or-create. Every path that saves a
    /// record against an employee name goes through here: OCR-card save, CSV
    /// import and manual entry alike.
    pub fn resolve_or_create_employee(&mut self, name: &str) -> String {
        if let Some(e) = self.find_employee_by_name(name) {
            return e.id.clone();
        }
        let employee = Employee {
            id: new_id("emp", self.employees.len()),
            name: name.trim().to_string(),
            cut_type: DEFAULT_CUT_TYPE,
            cut_value: DEFAULT_CUT_VALUE,
        };
        let id = employee.id.clone();
        self.employees.push(employee);
        id
    }

    pub fn delete_employee(&mut self, name: &str) -> Result<()> {
        let Some(pos) = self
            .employees
            .iter()
            .position(|e| e.name.to_lowercase() == name.trim().to_lowercase())
        else {
            return Err(KhataError::UnknownEmployee(name.to_string()));
        };
        // No cascade: the employee's transactions stay, orphaned, and drop
        // out of summaries.
        self.employees.remove(pos);
        Ok(())
    }

    fn add_txn(&mut self, txn_type: TxnType, new: NewTransaction) -> Result<&Transaction> {
        if !new.amount.is_finite() || new.amount < 0.0 {
            return Err(KhataError::InvalidAmount(format!("{}", new.amount)));
        }
        if txn_type == TxnType::Outgoing {
            if new.employee_id.is_empty() {
                return Err(KhataError::UnknownEmployee("(none)".to_string()));
            }
            if self.find_employee(&new.employee_id).is_none() {
                return Err(KhataError::UnknownEmployee(new.employee_id.clone()));
            }
        }
        let txn = Transaction {
            id: new_id("txn", self.transactions.len()),
            txn_type,
            employee_id: if txn_type == TxnType::Outgoing {
                new.employee_id
            } else {
                String::new()
            },
            amount: new.amount,
            date: new.date,
            time: new.time,
            mode: new.mode,
            reference: new.reference,
            source: new.source,
            note: new.note,
            cut_override: new.cut_override,
            created_at: chrono::Utc::now().to_rfc3339(),
            image_url: new.image_url,
        };
        self.transactions.push(txn);
        Ok(self.transactions.last().unwrap())
    }

    pub fn add_outgoing(&mut self, new: NewTransaction) -> Result<&Transaction> {
        self.add_txn(TxnType::Outgoing, new)
    }

    pub fn add_return(&mut self, new: NewTransaction) -> Result<&Transaction> {
        self.add_txn(TxnType::Return, new)
    }

    pub fn update_transaction<F>(&mut self, id: &str, apply: F) -> Result<&Transaction>
    where
        F: FnOnce(&mut Transaction),
    {
        let Some(txn) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Err(KhataError::UnknownTransaction(id.to_string()));
        };
        apply(txn);
        if !txn.amount.is_finite() || txn.amount < 0.0 {
            return Err(KhataError::InvalidAmount(format!("{}", txn.amount)));
        }
        Ok(txn)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Err(KhataError::UnknownTransaction(id.to_string()));
        };
        self.transactions.remove(pos);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn open(workspace_dir: &Path) -> Self {
        Self {
            path: workspace_dir.join("ledger.json"),
        }
    }

    /// A missing file is an empty ledger, not an error.
    pub fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write-temp-then-rename so a crash mid-save never leaves a torn blob.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, format!("{json}\n"))?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
