use crate::error::Result;
use crate::fmt::money;
use crate::ledger::{LedgerStore, NewTransaction};
use crate::settings::workspace_dir;

#[allow(clippy::too_many_arguments)]
pub fn outgoing(
    employee: &str,
    amount: f64,
    date: Option<String>,
    time: Option<String>,
    mode: Option<String>,
    reference: Option<String>,
    note: Option<String>,
    cut: Option<f64>,
) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let employee_id = ledger.resolve_or_create_employee(employee);
    let txn = ledger.add_outgoing(NewTransaction {
        employee_id,
        amount,
        date: date.unwrap_or_default(),
        time: time.unwrap_or_default(),
        mode,
        reference,
        note: note.unwrap_or_default(),
        cut_override: cut,
        ..Default::default()
    })?;
    let id = txn.id.clone();
    store.save(&ledger)?;
    println!("Recorded outgoing {} to {employee} ({id})", money(amount));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn ret(
    amount: f64,
    date: Option<String>,
    time: Option<String>,
    mode: Option<String>,
    reference: Option<String>,
    source: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;

    let txn = ledger.add_return(NewTransaction {
        amount,
        date: date.unwrap_or_default(),
        time: time.unwrap_or_default(),
        mode,
        reference,
        source: source.unwrap_or_default(),
        note: note.unwrap_or_default(),
        ..Default::default()
    })?;
    let id = txn.id.clone();
    store.save(&ledger)?;
    println!("Recorded return {} ({id})", money(amount));
    Ok(())
}
