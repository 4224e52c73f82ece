use crate::cut::summarize;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger::LedgerStore;
use crate::models::TxnType;
use crate::settings::{load_settings, workspace_dir};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;
    let (_, totals) = summarize(&ledger);

    let outgoing = ledger
        .transactions
        .iter()
        .filter(|t| t.txn_type == TxnType::Outgoing)
        .count();
    let returns = ledger.transactions.len() - outgoing;

    println!("Workspace: {} ({})", settings.workspace, settings.data_dir);
    println!("Employees: {}", ledger.employees.len());
    println!("Transactions: {outgoing} outgoing, {returns} return");
    println!(
        "Sent {}  Expected {}  Returned {}  Outstanding {}",
        money(totals.total_sent),
        money(totals.total_expected),
        money(totals.total_returned),
        money(totals.overall_balance)
    );
    Ok(())
}
