//! Pure settlement computation over a ledger snapshot.
//!
//! Both functions are free of storage access and side effects: the same
//! ledger snapshot always yields the same transfer list, in the same order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::{SETTLE_THRESHOLD, SHARE_TOLERANCE};
use crate::core::errors::TripLedgerError;
use crate::core::models::{Expense, Transfer};

/// Net balance per participant: paid minus owed.
///
/// The payer is credited the full expense amount and every debtor listed on
/// the expense is debited their share, the payer's own share included. Under
/// the share-sum invariant this makes the balances sum to zero.
pub fn net_balances(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut balances: HashMap<String, f64> = HashMap::new();

    for expense in expenses {
        *balances.entry(expense.payer_id.clone()).or_insert(0.0) += expense.amount;
        for debtor in &expense.debtors {
            *balances.entry(debtor.user_id.clone()).or_insert(0.0) -= debtor.value;
        }
    }

    balances
}

/// Reduce a net-balance vector to a minimal set of pairwise transfers.
///
/// Greedy largest-vs-largest matching: the biggest debtor pays the biggest
/// creditor the smaller of the two magnitudes, and whichever side drops
/// below `SETTLE_THRESHOLD` is retired. Ties in magnitude are broken by
/// user id so the output is deterministic regardless of map iteration order.
pub fn minimize_transfers(
    balances: &HashMap<String, f64>,
    currency: &str,
) -> Result<Vec<Transfer>, TripLedgerError> {
    let residual: f64 = balances.values().sum();
    if residual.abs() > SHARE_TOLERANCE {
        return Err(TripLedgerError::InconsistentLedger { residual });
    }

    let mut creditors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|(_, &bal)| bal > SETTLE_THRESHOLD)
        .map(|(user, &bal)| (user.as_str(), bal))
        .collect();
    let mut debtors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|(_, &bal)| bal < -SETTLE_THRESHOLD)
        .map(|(user, &bal)| (user.as_str(), -bal))
        .collect();

    let by_magnitude_then_id = |a: &(&str, f64), b: &(&str, f64)| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    };
    creditors.sort_by(by_magnitude_then_id);
    debtors.sort_by(by_magnitude_then_id);

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let (debtor_id, debt_amt) = debtors[i];
        let (creditor_id, credit_amt) = creditors[j];

        let settled_amt = debt_amt.min(credit_amt);
        transfers.push(Transfer {
            from_user: debtor_id.to_string(),
            to_user: creditor_id.to_string(),
            amount: round_to_cents(settled_amt),
            currency: currency.to_string(),
        });

        debtors[i].1 = debt_amt - settled_amt;
        creditors[j].1 = credit_amt - settled_amt;

        if debtors[i].1 < SETTLE_THRESHOLD {
            i += 1;
        }
        if creditors[j].1 < SETTLE_THRESHOLD {
            j += 1;
        }
    }

    Ok(transfers)
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Debtor, ShareType};
    use chrono::Utc;

    fn expense(payer: &str, amount: f64, shares: &[(&str, f64)]) -> Expense {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: "t1".to_string(),
            payer_id: payer.to_string(),
            amount,
            currency: "USD".to_string(),
            description: "test".to_string(),
            debtors: shares
                .iter()
                .map(|(user, value)| Debtor {
                    user_id: user.to_string(),
                    share_type: ShareType::Equal,
                    value: *value,
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn balances_include_payers_own_share() {
        // A pays 120 split 60/60, B pays 45 split 22.50/22.50.
        let ledger = vec![
            expense("a", 120.0, &[("a", 60.0), ("b", 60.0)]),
            expense("b", 45.0, &[("a", 22.5), ("b", 22.5)]),
        ];

        let balances = net_balances(&ledger);
        assert!((balances["a"] - 37.5).abs() < 1e-9);
        assert!((balances["b"] + 37.5).abs() < 1e-9);
        assert!(balances.values().sum::<f64>().abs() < SHARE_TOLERANCE);
    }

    #[test]
    fn two_party_ledger_settles_with_one_transfer() {
        let ledger = vec![
            expense("a", 120.0, &[("a", 60.0), ("b", 60.0)]),
            expense("b", 45.0, &[("a", 22.5), ("b", 22.5)]),
        ];

        let transfers = minimize_transfers(&net_balances(&ledger), "USD").unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from_user, "b");
        assert_eq!(transfers[0].to_user, "a");
        assert_eq!(transfers[0].amount, 37.5);
        assert_eq!(transfers[0].currency, "USD");
    }

    #[test]
    fn transfers_zero_out_all_balances() {
        let ledger = vec![
            expense("a", 90.0, &[("a", 30.0), ("b", 30.0), ("c", 30.0)]),
            expense("b", 60.0, &[("b", 20.0), ("c", 20.0), ("a", 20.0)]),
            expense("c", 12.0, &[("c", 4.0), ("a", 4.0), ("b", 4.0)]),
        ];

        let mut balances = net_balances(&ledger);
        let transfers = minimize_transfers(&balances, "USD").unwrap();

        for t in &transfers {
            assert_ne!(t.from_user, t.to_user);
            assert!(t.amount > 0.0);
            *balances.get_mut(&t.from_user).unwrap() += t.amount;
            *balances.get_mut(&t.to_user).unwrap() -= t.amount;
        }
        for (_, bal) in balances {
            assert!(bal.abs() <= SETTLE_THRESHOLD);
        }
    }

    #[test]
    fn output_is_deterministic_across_runs() {
        let ledger = vec![
            expense("d", 40.0, &[("a", 10.0), ("b", 10.0), ("c", 10.0), ("d", 10.0)]),
            expense("a", 40.0, &[("a", 10.0), ("b", 10.0), ("c", 10.0), ("d", 10.0)]),
        ];

        let first = minimize_transfers(&net_balances(&ledger), "EUR").unwrap();
        for _ in 0..10 {
            let again = minimize_transfers(&net_balances(&ledger), "EUR").unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn equal_magnitudes_match_in_id_order() {
        // b and c each owe 10; a and d are each owed 10.
        let balances = HashMap::from([
            ("a".to_string(), 10.0),
            ("b".to_string(), -10.0),
            ("c".to_string(), -10.0),
            ("d".to_string(), 10.0),
        ]);

        let transfers = minimize_transfers(&balances, "USD").unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(
            (transfers[0].from_user.as_str(), transfers[0].to_user.as_str()),
            ("b", "a")
        );
        assert_eq!(
            (transfers[1].from_user.as_str(), transfers[1].to_user.as_str()),
            ("c", "d")
        );
    }

    #[test]
    fn settled_participants_are_excluded() {
        let balances = HashMap::from([
            ("a".to_string(), 0.004),
            ("b".to_string(), -0.004),
            ("c".to_string(), 0.0),
        ]);

        let transfers = minimize_transfers(&balances, "USD").unwrap();
        assert!(transfers.is_empty());
    }

    #[test]
    fn empty_ledger_yields_no_transfers() {
        let balances = net_balances(&[]);
        assert!(balances.is_empty());
        assert!(minimize_transfers(&balances, "USD").unwrap().is_empty());
    }

    #[test]
    fn nonzero_balance_sum_is_rejected() {
        let balances = HashMap::from([("a".to_string(), 5.0), ("b".to_string(), -4.0)]);

        let err = minimize_transfers(&balances, "USD").unwrap_err();
        assert!(matches!(
            err,
            TripLedgerError::InconsistentLedger { residual } if (residual - 1.0).abs() < 1e-9
        ));
    }
}
