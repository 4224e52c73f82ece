use std::path::Path;

use crate::error::Result;
use crate::importer::{parse_employee_rows, parse_incoming_rows, parse_outgoing_rows};
use crate::ledger::{LedgerStore, NewTransaction};
use crate::models::{CutType, Ledger};
use crate::settings::workspace_dir;

pub fn employees(file: &str) -> Result<()> {
    let (rows, skipped) = parse_employee_rows(Path::new(file))?;
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let mut imported = 0usize;
    for row in rows {
        // Upsert by name: an existing employee just gets its cut rule updated.
        let id = ledger.resolve_or_create_employee(&row.name);
        if let Some(employee) = ledger.employees.iter_mut().find(|e| e.id == id) {
            if let Some(t) = &row.cut_type {
                employee.cut_type = if t == "flat" { CutType::Flat } else { CutType::Percent };
            }
            if let Some(v) = row.cut_value {
                if v.is_finite() && v >= 0.0 {
                    employee.cut_value = v;
                }
            }
        }
        imported += 1;
    }
    store.save(&ledger)?;
    println!("{imported} employees imported, {skipped} rows skipped");
    Ok(())
}

pub fn outgoing(file: &str) -> Result<()> {
    let (rows, skipped) = parse_outgoing_rows(Path::new(file))?;
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let mut imported = 0usize;
    for row in rows {
        let employee_id = ledger.resolve_or_create_employee(&row.employee);
        ledger.add_outgoing(NewTransaction {
            employee_id,
            amount: row.amount,
            date: row.date,
            time: row.time,
            mode: row.mode,
            reference: row.reference,
            note: row.note,
            cut_override: row.cut,
            ..Default::default()
        })?;
        imported += 1;
    }
    store.save(&ledger)?;
    println!("{imported} outgoing imported, {skipped} rows skipped");
    Ok(())
}

pub fn incoming(file: &str) -> Result<()> {
    let (rows, skipped) = parse_incoming_rows(Path::new(file))?;
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let mut imported = 0usize;
    for row in rows {
        ledger.add_return(NewTransaction {
            amount: row.amount,
            date: row.date,
            time: row.time,
            mode: row.mode,
            reference: row.reference,
            source: row.source,
            note: row.note,
            ..Default::default()
        })?;
        imported += 1;
    }
    store.save(&ledger)?;
    println!("{imported} incoming imported, {skipped} rows skipped");
    Ok(())
}

/// Full-ledger replace. Malformed JSON aborts before anything is touched.
pub fn json(file: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let ledger: Ledger = serde_json::from_str(&content)?;
    let store = LedgerStore::open(&workspace_dir());
    store.save(&ledger)?;
    println!(
        "Ledger replaced: {} employees, {} transactions",
        ledger.employees.len(),
        ledger.transactions.len()
    );
    Ok(())
}
