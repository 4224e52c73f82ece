//! Cut and expected-return computation.
//!
//! Everything here is a pure function over the transaction list. Summaries
//! are recomputed on every read; at tens to low thousands of rows there is
//! nothing to be gained from incremental maintenance.

use std::collections::HashMap;

use crate::models::{CutType, Employee, Ledger, Transaction, TxnType};

/// The cut for one outgoing transaction: an explicit per-transaction
/// override wins, otherwise the employee's rule applies.
pub fn cut_for(txn: &Transaction, employee: &Employee) -> f64 {
    if let Some(over) = txn.cut_override {
        return over;
    }
    match employee.cut_type {
        CutType::Percent => txn.amount * employee.cut_value / 100.0,
        CutType::Flat => employee.cut_value,
    }
}

/// Clamped at zero: a cut exceeding the sent amount never produces a
/// negative expectation.
pub fn expected_return(amount: f64, cut: f64) -> f64 {
    (amount - cut).max(0.0)
}

#[derive(Debug, Clone)]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub name: String,
    pub total_sent: f64,
    pub total_cut: f64,
    pub total_expected: f64,
    pub outgoing_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OverallTotals {
    pub total_sent: f64,
    pub total_expected: f64,
    pub total_returned: f64,
    pub overall_balance: f64,
}

/// Per-employee and overall totals for the whole ledger. Outgoing
/// transactions whose employee no longer exists are silently excluded from
/// the per-employee rows and from totals; returns are a flat sum, not
/// attributed to any employee.
pub fn summarize(ledger: &Ledger) -> (Vec<EmployeeSummary>, OverallTotals) {
    let by_id: HashMap<&str, &Employee> = ledger
        .employees
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();

    let mut summaries: Vec<EmployeeSummary> = ledger
        .employees
        .iter()
        .map(|e| EmployeeSummary {
            employee_id: e.id.clone(),
            name: e.name.clone(),
            total_sent: 0.0,
            total_cut: 0.0,
            total_expected: 0.0,
            outgoing_count: 0,
        })
        .collect();

    let mut totals = OverallTotals::default();

    for txn in &ledger.transactions {
        match txn.txn_type {
            TxnType::Outgoing => {
                let Some(employee) = by_id.get(txn.employee_id.as_str()).copied() else {
                    continue; // orphaned
                };
                let cut = cut_for(txn, employee);
                let expected = expected_return(txn.amount, cut);
                if let Some(s) = summaries
                    .iter_mut()
                    .find(|s| s.employee_id == txn.employee_id)
                {
                    s.total_sent += txn.amount;
                    s.total_cut += cut;
                    s.total_expected += expected;
                    s.outgoing_count += 1;
                }
                totals.total_sent += txn.amount;
                totals.total_expected += expected;
            }
            TxnType::Return => {
                totals.total_returned += txn.amount;
            }
        }
    }

    totals.overall_balance = totals.total_expected - totals.total_returned;
    (summaries, totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp(id: &str, name: &str, cut_type: CutType, cut_value: f64) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            cut_type,
            cut_value,
        }
    }

    fn outgoing(employee_id: &str, amount: f64, cut_override: Option<f64>) -> Transaction {
        Transaction {
            id: format!("t-{employee_id}-{amount}"),
            txn_type: TxnType::Outgoing,
            employee_id: employee_id.to_string(),
            amount,
            date: String::new(),
            time: String::new(),
            mode: None,
            reference: None,
            source: String::new(),
            note: String::new(),
            cut_override,
            created_at: String::new(),
            image_url: None,
        }
    }

    fn ret(amount: f64) -> Transaction {
        Transaction {
            id: format!("r-{amount}"),
            txn_type: TxnType::Return,
            employee_id: String::new(),
            amount,
            date: String::new(),
            time: String::new(),
            mode: None,
            reference: None,
            source: String::new(),
            note: String::new(),
            cut_override: None,
            created_at: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn test_percent_cut() {
        let e = emp("e1", "Ravi", CutType::Percent, 10.0);
        let t = outgoing("e1", 1000.0, None);
        let cut = cut_for(&t, &e);
        assert_eq!(cut, 100.0);
        assert_eq!(expected_return(t.amount, cut), 900.0);
    }

    #[test]
    fn test_flat_cut() {
        let e = emp("e1", "Ravi", CutType::Flat, 150.0);
        let t = outgoing("e1", 1000.0, None);
        assert_eq!(cut_for(&t, &e), 150.0);
    }

    #[test]
    fn test_override_beats_rule() {
        let e = emp("e1", "Ravi", CutType::Percent, 10.0);
        let t = outgoing("e1", 1000.0, Some(50.0));
        assert_eq!(cut_for(&t, &e), 50.0);
    }

    #[test]
    fn test_expected_return_clamps_at_zero() {
        let e = emp("e1", "Ravi", CutType::Percent, 10.0);
        let t = outgoing("e1", 500.0, Some(1000.0));
        let cut = cut_for(&t, &e);
        assert_eq!(expected_return(t.amount, cut), 0.0);
    }

    #[test]
    fn test_overall_balance() {
        let ledger = Ledger {
            employees: vec![
                emp("e1", "Ravi", CutType::Percent, 10.0),
                emp("e2", "Suresh", CutType::Flat, 300.0),
            ],
            transactions: vec![
                outgoing("e1", 1000.0, None), // expected 900
                outgoing("e2", 1000.0, None), // expected 700
                ret(500.0),
            ],
        };
        let (summaries, totals) = summarize(&ledger);
        assert_eq!(summaries[0].total_expected, 900.0);
        assert_eq!(summaries[1].total_expected, 700.0);
        assert_eq!(totals.total_sent, 2000.0);
        assert_eq!(totals.total_expected, 1600.0);
        assert_eq!(totals.total_returned, 500.0);
        assert_eq!(totals.overall_balance, 1100.0);
    }

    #[test]
    fn test_orphaned_outgoing_excluded() {
        let ledger = Ledger {
            employees: vec![emp("e1", "Ravi", CutType::Percent, 10.0)],
            transactions: vec![
                outgoing("e1", 1000.0, None),
                outgoing("gone", 9999.0, None),
            ],
        };
        let (summaries, totals) = summarize(&ledger);
        assert_eq!(totals.total_sent, 1000.0);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].outgoing_count, 1);
    }

    #[test]
    fn test_order_independent() {
        let employees = vec![emp("e1", "Ravi", CutType::Percent, 10.0)];
        let txns = vec![outgoing("e1", 1000.0, None), ret(500.0), outgoing("e1", 200.0, None)];
        let mut reversed = txns.clone();
        reversed.reverse();
        let a = summarize(&Ledger { employees: employees.clone(), transactions: txns });
        let b = summarize(&Ledger { employees, transactions: reversed });
        assert_eq!(a.1.overall_balance, b.1.overall_balance);
        assert_eq!(a.0[0].total_expected, b.0[0].total_expected);
    }
}
