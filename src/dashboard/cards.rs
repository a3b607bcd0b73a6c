//! Stat cards for the dashboard summary.

use maud::{Markup, html};

use crate::{dashboard::aggregation::DashboardStats, html::format_currency};

fn stat_card(label: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            dt class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            dd class={ "mt-1 text-2xl font-semibold " (value_style) } { (value) }
        }
    }
}

/// Renders the summary cards.
///
/// The money totals are labelled as covering the recent transactions only.
pub(super) fn stats_cards_view(stats: &DashboardStats, recent_count: usize) -> Markup {
    let net_style = if stats.net < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full" aria-labelledby="summary-heading"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 id="summary-heading" class="text-xl font-semibold" { "Summary" }

                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Totals from the " (recent_count) " most recent transactions"
                }
            }

            dl class="grid grid-cols-2 md:grid-cols-4 gap-4"
            {
                (stat_card(
                    "Categorized transactions",
                    &stats.total_transactions.to_string(),
                    "text-gray-900 dark:text-white",
                ))
                (stat_card(
                    "Spending",
                    &format_currency(stats.total_spending),
                    "text-red-600 dark:text-red-400",
                ))
                (stat_card(
                    "Income",
                    &format_currency(stats.total_income),
                    "text-green-600 dark:text-green-400",
                ))
                (stat_card("Net", &format_currency(stats.net), net_style))
            }
        }
    }
}
