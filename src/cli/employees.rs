use comfy_table::{Cell, Table};

use crate::error::{KhataError, Result};
use crate::fmt::money;
use crate::ledger::LedgerStore;
use crate::models::CutType;
use crate::settings::workspace_dir;

fn parse_cut_type(raw: &str) -> Result<CutType> {
    match raw.to_lowercase().as_str() {
        "percent" => Ok(CutType::Percent),
        "flat" => Ok(CutType::Flat),
        other => Err(KhataError::Other(format!(
            "cut type must be 'percent' or 'flat', got '{other}'"
        ))),
    }
}

pub fn add(name: &str, cut_type: &str, cut_value: f64) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;
    ledger.add_employee(name, parse_cut_type(cut_type)?, cut_value)?;
    store.save(&ledger)?;
    println!("Added employee: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let ledger = store.load()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Cut"]);
    for e in &ledger.employees {
        let cut = match e.cut_type {
            CutType::Percent => format!("{}%", e.cut_value),
            CutType::Flat => money(e.cut_value),
        };
        table.add_row(vec![Cell::new(&e.id), Cell::new(&e.name), Cell::new(cut)]);
    }
    println!("Employees\n{table}");
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let store = LedgerStore::open(&workspace_dir());
    let mut ledger = store.load()?;
    ledger.delete_employee(name)?;
    store.save(&ledger)?;
    println!("Removed employee: {name} (their transactions remain)");
    Ok(())
}
