//! Settlement core: net balance aggregation and the minimal-transfer solver.
//!
//! Everything in this module is a pure function over in-memory data. All
//! arithmetic is in two-decimal currency units; every intermediate amount is
//! re-rounded after each subtraction so floating-point drift cannot
//! accumulate across iterations.

mod balances;

pub use balances::{balance_map, balances_for, BalanceRow};

use std::collections::BTreeMap;

use serde::Serialize;

/// One cent. Used both as the rounding grain and as the "close enough to
/// zero" threshold; the two are deliberately the same value.
pub const EPSILON: f64 = 0.01;

/// Rounds a currency amount to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A suggested payment from one member to another.
///
/// `amount` is strictly positive (at least one cent) and `from != to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer<K> {
    pub from: K,
    pub to: K,
    pub amount: f64,
}

/// Computes a minimal set of transfers that settles the given net balances
/// (positive = owed money, negative = owes money).
///
/// Greedy largest-vs-largest matching: the biggest debtor pays the biggest
/// creditor, remainders are re-rounded to cents, and a side advances once
/// its remainder drops within [`EPSILON`]. The exact minimum transfer count
/// is NP-hard; this heuristic is the standard practical approximation and
/// yields at most `|debtors| + |creditors| - 1` entries.
///
/// The function is total: residual imbalance in the input simply leaves an
/// unmatched debtor or creditor behind, and an input with only one side
/// (or nothing) settles to an empty plan. Ties between equal amounts keep
/// the map's key order.
pub fn solve<K: Ord + Clone>(balances: &BTreeMap<K, f64>) -> Vec<Transfer<K>> {
    let mut creditors: Vec<(K, f64)> = Vec::new();
    let mut debtors: Vec<(K, f64)> = Vec::new();

    for (id, &raw) in balances {
        // Below one cent is floating-point noise from upstream summation.
        if raw.abs() < EPSILON {
            continue;
        }
        let amount = round_cents(raw);
        if amount > 0.0 {
            creditors.push((id.clone(), amount));
        } else {
            debtors.push((id.clone(), -amount));
        }
    }

    if creditors.is_empty() || debtors.is_empty() {
        return Vec::new();
    }

    // Stable sorts, so equal amounts stay in key order.
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));
    debtors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut transfers = Vec::new();
    let mut di = 0;
    let mut ci = 0;

    while di < debtors.len() && ci < creditors.len() {
        let pay = round_cents(debtors[di].1.min(creditors[ci].1));
        if pay >= EPSILON {
            transfers.push(Transfer {
                from: debtors[di].0.clone(),
                to: creditors[ci].0.clone(),
                amount: pay,
            });
        }
        debtors[di].1 = round_cents(debtors[di].1 - pay);
        creditors[ci].1 = round_cents(creditors[ci].1 - pay);
        // Both cursors may advance in the same step when amounts matched
        // exactly.
        if debtors[di].1 <= EPSILON {
            di += 1;
        }
        if creditors[ci].1 <= EPSILON {
            ci += 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(name, amount)| (name.to_string(), *amount))
            .collect()
    }

    fn as_triples(transfers: &[Transfer<String>]) -> Vec<(String, String, f64)> {
        transfers
            .iter()
            .map(|t| (t.from.clone(), t.to.clone(), t.amount))
            .collect()
    }

    #[test]
    fn empty_and_one_sided_inputs_settle_to_nothing() {
        assert!(solve(&balances(&[])).is_empty());
        assert!(solve(&balances(&[("A", 10.0), ("B", 0.0)])).is_empty());
        assert!(solve(&balances(&[("A", -10.0)])).is_empty());
        assert!(solve(&balances(&[("A", 0.0), ("B", 0.0)])).is_empty());
    }

    #[test]
    fn simple_pair() {
        let result = solve(&balances(&[("A", -10.0), ("B", 10.0)]));
        assert_eq!(
            as_triples(&result),
            vec![("A".to_string(), "B".to_string(), 10.0)]
        );
    }

    #[test]
    fn multi_party_greedy_match() {
        let input = balances(&[("A", -10.0), ("B", -20.0), ("C", 15.0), ("D", 15.0)]);
        let result = solve(&input);

        let mut got = as_triples(&result);
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = vec![
            ("B".to_string(), "C".to_string(), 15.0),
            ("A".to_string(), "D".to_string(), 10.0),
            ("B".to_string(), "D".to_string(), 5.0),
        ];
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(got, expected);

        // Conservation: total paid == total positive == total negative.
        let total_paid = round_cents(result.iter().map(|t| t.amount).sum());
        let total_pos = round_cents(input.values().filter(|v| **v > 0.0).sum());
        let total_neg = round_cents(input.values().filter(|v| **v < 0.0).map(|v| -v).sum());
        assert_eq!(total_paid, total_pos);
        assert_eq!(total_paid, total_neg);

        assert!(result.iter().all(|t| t.from != t.to));
        assert!(result.iter().all(|t| t.amount >= EPSILON));
    }

    #[test]
    fn tiny_residuals_are_zeroed() {
        assert!(solve(&balances(&[("A", -0.004), ("B", 0.004)])).is_empty());
    }

    #[test]
    fn near_cent_values_round_cleanly() {
        let result = solve(&balances(&[("A", -10.004), ("B", 10.004)]));
        assert_eq!(
            as_triples(&result),
            vec![("A".to_string(), "B".to_string(), 10.0)]
        );
    }

    #[test]
    fn single_debtor_drains_creditors_in_descending_order() {
        let result = solve(&balances(&[
            ("A", -25.0),
            ("B", 10.0),
            ("C", 10.0),
            ("D", 5.0),
        ]));
        assert_eq!(
            as_triples(&result),
            vec![
                ("A".to_string(), "B".to_string(), 10.0),
                ("A".to_string(), "C".to_string(), 10.0),
                ("A".to_string(), "D".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn residual_imbalance_leaves_unmatched_side() {
        // Not a closed group: debtor owes more than anyone is owed.
        let result = solve(&balances(&[("A", -30.0), ("B", 10.0)]));
        assert_eq!(
            as_triples(&result),
            vec![("A".to_string(), "B".to_string(), 10.0)]
        );
    }

    #[test]
    fn transfer_count_stays_within_bound() {
        let input = balances(&[
            ("A", -12.5),
            ("B", -7.25),
            ("C", -0.25),
            ("D", 5.0),
            ("E", 10.0),
            ("F", 5.0),
        ]);
        let result = solve(&input);
        let debtors = input.values().filter(|v| **v < -EPSILON).count();
        let creditors = input.values().filter(|v| **v > EPSILON).count();
        assert!(result.len() <= debtors + creditors - 1);
    }

    #[test]
    fn drift_does_not_accumulate_across_iterations() {
        // Amounts chosen so naive f64 subtraction would drift off the cent
        // grid without the per-step re-rounding.
        let input = balances(&[
            ("A", -0.1),
            ("B", -0.2),
            ("C", -0.3),
            ("D", 0.3),
            ("E", 0.3),
        ]);
        let result = solve(&input);
        for transfer in &result {
            assert_eq!(transfer.amount, round_cents(transfer.amount));
        }
        let total: f64 = result.iter().map(|t| t.amount).sum();
        assert_eq!(round_cents(total), 0.6);
    }
}
