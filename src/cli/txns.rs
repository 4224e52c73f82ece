use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::ledger::LedgerStore;
use crate::models::TxnType;
use crate::settings::workspace_dir;

pub fn list(txn_type: Option<String>) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let filter = txn_type.map(|t| t.to_lowercase());
    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Date", "Employee", "Amount", "Mode", "Ref", "Source/Note"]);
    for txn in &ledger.transactions {
        let label = match txn.txn_type {
            TxnType::Outgoing => "outgoing",
            TxnType::Return => "return",
        };
        if let Some(f) = &filter {
            if f != label {
                continue;
            }
        }
        let employee = ledger
            .find_employee(&txn.employee_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        let extra = if txn.source.is_empty() {
            txn.note.clone()
        } else {
            txn.source.clone()
        };
        table.add_row(vec![
            Cell::new(&txn.id),
            Cell::new(label),
            Cell::new(&txn.date),
            Cell::new(employee),
            Cell::new(money(txn.amount)),
            Cell::new(txn.mode.as_deref().unwrap_or("")),
            Cell::new(txn.reference.as_deref().unwrap_or("")),
            Cell::new(extra),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}

pub fn edit(
    id: &str,
    note: Option<String>,
    mode: Option<String>,
    reference: Option<String>,
    source: Option<String>,
    cut: Option<f64>,
) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;
    ledger.update_transaction(id, |txn| {
        if let Some(n) = note {
            txn.note = n;
        }
        if let Some(m) = mode {
            txn.mode = Some(m);
        }
        if let Some(r) = reference {
            txn.reference = Some(r);
        }
        if let Some(s) = source {
            txn.source = s;
        }
        if cut.is_some() {
            txn.cut_override = cut;
        }
    })?;
    store.save(&ledger)?;
    println!("Updated {id}");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;
    ledger.delete_transaction(id)?;
    store.save(&ledger)?;
    println!("Deleted {id}");
    Ok(())
}
