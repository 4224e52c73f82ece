use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::extract::parse_transaction_text;
use crate::fmt::money;
use crate::ledger::{LedgerStore, NewTransaction};
use crate::models::{Direction, ParsedCandidate};
use crate::settings::workspace_dir;

fn show(file: &str, candidate: &ParsedCandidate, employee_name: &str) {
    let mut table = Table::new();
    table.set_header(vec![Cell::new("Field"), Cell::new(file)]);
    table.add_row(vec![
        Cell::new("Amount"),
        Cell::new(candidate.amount.map(money).unwrap_or_else(|| "?".to_string())),
    ]);
    table.add_row(vec![Cell::new("Direction"), Cell::new(candidate.direction.label())]);
    table.add_row(vec![
        Cell::new("Counterparty"),
        Cell::new(candidate.counterparty.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![Cell::new("Employee"), Cell::new(employee_name)]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(candidate.date.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(candidate.time.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![
        Cell::new("Mode"),
        Cell::new(candidate.mode.as_deref().unwrap_or("")),
    ]);
    table.add_row(vec![
        Cell::new("Ref"),
        Cell::new(candidate.reference.as_deref().unwrap_or("")),
    ]);
    println!("{table}");
}

/// Process OCR text dumps strictly sequentially; a failure on one file is
/// reported and skipped, the batch continues. Extraction is advisory: nothing
/// is committed without --save.
pub fn run(files: &[String], save: bool) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let mut saved = 0usize;
    let mut skipped = 0usize;
    for file in files {
        let text = match std::fs::read_to_string(file) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{} {file}: {e}", "warning:".yellow());
                skipped += 1;
                continue;
            }
        };
        let candidate = parse_transaction_text(&text, &ledger.employees);
        let employee_name = ledger
            .find_employee(&candidate.employee_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        show(file, &candidate, &employee_name);

        if !save {
            continue;
        }
        let Some(amount) = candidate.amount else {
            println!("{file}: no amount extracted, not saved");
            skipped += 1;
            continue;
        };
        match candidate.direction {
            Direction::Outgoing => {
                let Some(counterparty) = candidate.counterparty.as_deref() else {
                    println!("{file}: outgoing slip without a counterparty, not saved");
                    skipped += 1;
                    continue;
                };
                let employee_id = if candidate.employee_id.is_empty() {
                    ledger.resolve_or_create_employee(counterparty)
                } else {
                    candidate.employee_id.clone()
                };
                ledger.add_outgoing(NewTransaction {
                    employee_id,
                    amount,
                    date: candidate.date.clone().unwrap_or_default(),
                    time: candidate.time.clone().unwrap_or_default(),
                    mode: candidate.mode.clone(),
                    reference: candidate.reference.clone(),
                    ..Default::default()
                })?;
                saved += 1;
            }
            Direction::Return => {
                ledger.add_return(NewTransaction {
                    amount,
                    date: candidate.date.clone().unwrap_or_default(),
                    time: candidate.time.clone().unwrap_or_default(),
                    mode: candidate.mode.clone(),
                    reference: candidate.reference.clone(),
                    source: candidate.counterparty.clone().unwrap_or_default(),
                    ..Default::default()
                })?;
                saved += 1;
            }
            Direction::Unknown => {
                println!("{file}: direction unclear, review and add manually");
                skipped += 1;
            }
        }
    }

    if save {
        store.save(&ledger)?;
        println!("{saved} saved, {skipped} skipped");
    }
    Ok(())
}
