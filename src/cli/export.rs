use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{CutType, TxnType};
use crate::settings::workspace_dir;

pub fn json(output: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;
    let json = serde_json::to_string_pretty(&ledger)?;
    std::fs::write(output, format!("{json}\n"))?;
    println!("Exported ledger to {output}");
    Ok(())
}

pub fn employees(output: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let mut wtr = csv::Writer::from_path(output)?;
    wtr.write_record(["name", "cut_type", "cut_value"])?;
    for e in &ledger.employees {
        let cut_type = match e.cut_type {
            CutType::Percent => "percent",
            CutType::Flat => "flat",
        };
        wtr.write_record([e.name.as_str(), cut_type, &e.cut_value.to_string()])?;
    }
    wtr.flush()?;
    println!("Exported {} employees to {output}", ledger.employees.len());
    Ok(())
}

pub fn outgoing(output: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let mut wtr = csv::Writer::from_path(output)?;
    wtr.write_record(["date", "time", "employee", "amount", "mode", "ref", "note", "cut"])?;
    let mut count = 0usize;
    for txn in ledger.transactions.iter().filter(|t| t.txn_type == TxnType::Outgoing) {
        let employee = ledger
            .find_employee(&txn.employee_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| txn.employee_id.clone());
        wtr.write_record([
            txn.date.as_str(),
            txn.time.as_str(),
            employee.as_str(),
            &txn.amount.to_string(),
            txn.mode.as_deref().unwrap_or(""),
            txn.reference.as_deref().unwrap_or(""),
            txn.note.as_str(),
            &txn.cut_override.map(|c| c.to_string()).unwrap_or_default(),
        ])?;
        count += 1;
    }
    wtr.flush()?;
    println!("Exported {count} outgoing to {output}");
    Ok(())
}

pub fn incoming(output: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let mut wtr = csv::Writer::from_path(output)?;
    wtr.write_record(["date", "time", "amount", "mode", "ref", "source", "note"])?;
    let mut count = 0usize;
    for txn in ledger.transactions.iter().filter(|t| t.txn_type == TxnType::Return) {
        wtr.write_record([
            txn.date.as_str(),
            txn.time.as_str(),
            &txn.amount.to_string(),
            txn.mode.as_deref().unwrap_or(""),
            txn.reference.as_deref().unwrap_or(""),
            txn.source.as_str(),
            txn.note.as_str(),
        ])?;
        count += 1;
    }
    wtr.flush()?;
    println!("Exported {count} incoming to {output}");
    Ok(())
}
