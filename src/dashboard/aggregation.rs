//! Summary statistics for the dashboard.

use crate::{category::CategoryWithCount, transaction::TransactionWithCategory};

/// Totals shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// The number of categorized transactions.
    pub total_transactions: i64,
    /// The magnitude of the spending in the sampled transactions.
    pub total_spending: f64,
    /// The income in the sampled transactions.
    pub total_income: f64,
    /// Income minus spending for the sampled transactions.
    pub net: f64,
}

/// Compute the dashboard totals.
///
/// `total_transactions` counts every transaction in `categories`, so uncategorized
/// transactions are not included. The money totals only cover `recent_transactions`.
pub fn compute_dashboard_stats(
    recent_transactions: &[TransactionWithCategory],
    categories: &[CategoryWithCount],
) -> DashboardStats {
    let total_transactions = categories
        .iter()
        .map(|category| category.transaction_count)
        .sum();

    let (spending, income) = recent_transactions.iter().fold(
        (0.0, 0.0),
        |(spending, income), with_category| {
            let amount = with_category.transaction.amount;

            if amount < 0.0 {
                (spending + amount, income)
            } else {
                (spending, income + amount)
            }
        },
    );

    DashboardStats {
        total_transactions,
        total_spending: f64::abs(spending),
        total_income: income,
        net: income + spending,
    }
}
