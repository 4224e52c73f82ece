use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cut::{cut_for, expected_return, summarize};
use crate::error::{KhataError, Result};
use crate::fmt::money;
use crate::ledger::LedgerStore;
use crate::models::TxnType;
use crate::settings::workspace_dir;

pub fn summary() -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;
    let (summaries, totals) = summarize(&ledger);

    let mut table = Table::new();
    table.set_header(vec!["Employee", "Sent", "Cut", "Expected"]);
    for s in &summaries {
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(money(s.total_sent)),
            Cell::new(money(s.total_cut)),
            Cell::new(money(s.total_expected)),
        ]);
    }
    table.add_row(vec![Cell::new(""), Cell::new(""), Cell::new(""), Cell::new("")]);
    table.add_row(vec![
        Cell::new("TOTAL".bold()),
        Cell::new(money(totals.total_sent)),
        Cell::new(""),
        Cell::new(money(totals.total_expected)),
    ]);

    let balance_label = if totals.overall_balance > 0.0 {
        money(totals.overall_balance).red().to_string()
    } else {
        money(totals.overall_balance).green().to_string()
    };
    println!("Summary\n{table}");
    println!(
        "Returned: {}   Outstanding: {balance_label}",
        money(totals.total_returned)
    );
    Ok(())
}

pub fn employee(name: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;
    let Some(emp) = ledger.find_employee_by_name(name) else {
        return Err(KhataError::UnknownEmployee(name.to_string()));
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Amount", "Cut", "Expected", "Mode", "Ref"]);
    let mut total_expected = 0.0;
    for txn in ledger
        .transactions
        .iter()
        .filter(|t| t.txn_type == TxnType::Outgoing && t.employee_id == emp.id)
    {
        let cut = cut_for(txn, emp);
        let expected = expected_return(txn.amount, cut);
        total_expected += expected;
        table.add_row(vec![
            Cell::new(&txn.id),
            Cell::new(&txn.date),
            Cell::new(money(txn.amount)),
            Cell::new(money(cut)),
            Cell::new(money(expected)),
            Cell::new(txn.mode.as_deref().unwrap_or("")),
            Cell::new(txn.reference.as_deref().unwrap_or("")),
        ]);
    }
    println!("{}\n{table}", emp.name);
    println!("Expected back: {}", money(total_expected));
    Ok(())
}

/// Returns not yet reconciled: missing ref, mode or source.
pub fn pending() -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Amount", "Missing"]);
    let mut count = 0usize;
    for txn in ledger.transactions.iter().filter(|t| t.txn_type == TxnType::Return) {
        let mut missing = Vec::new();
        if txn.reference.as_deref().unwrap_or("").is_empty() {
            missing.push("ref");
        }
        if txn.mode.as_deref().unwrap_or("").is_empty() {
            missing.push("mode");
        }
        if txn.source.is_empty() {
            missing.push("source");
        }
        if missing.is_empty() {
            continue;
        }
        count += 1;
        table.add_row(vec![
            Cell::new(&txn.id),
            Cell::new(&txn.date),
            Cell::new(money(txn.amount)),
            Cell::new(missing.join(", ")),
        ]);
    }
    if count == 0 {
        println!("All returns reconciled.");
    } else {
        println!("Pending returns\n{table}");
    }
    Ok(())
}
