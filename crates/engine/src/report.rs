//! Report formatting.
//!
//! Turns an [`AggregationResult`] into a grouped view model for on-screen
//! rendering, an exportable HTML document, and a flat CSV export. All three
//! are fully determined by the result; no clock reads, no hidden state.

use std::fmt::Write as _;

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::{AggregationResult, Currency, ResultEngine, TransactionRecord};

/// Marker text for the explicit empty-report state.
pub const NO_TRANSACTIONS: &str = "No transactions found";

/// One day section of the on-screen report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DaySection {
    /// Long locale label, e.g. "January 5, 2025".
    pub label: String,
    pub day: NaiveDate,
    pub transactions: Vec<TransactionRecord>,
}

/// Long date label used for day section headers.
#[must_use]
pub fn day_label(day: NaiveDate) -> String {
    day.format("%B %-d, %Y").to_string()
}

/// Builds the day-sectioned view model in bucket order.
#[must_use]
pub fn view_model(result: &AggregationResult) -> Vec<DaySection> {
    result
        .groups
        .iter()
        .map(|group| DaySection {
            label: day_label(group.day),
            day: group.day,
            transactions: group.transactions.clone(),
        })
        .collect()
}

/// Signed display amount for a record, `+`/`-` prefixed by kind.
#[must_use]
pub fn signed_amount(record: &TransactionRecord, currency: Currency) -> String {
    format!("{}{}", record.kind.sign(), record.amount.format(currency))
}

/// Renders the aggregation as a self-contained HTML document: a header with
/// the branch name and the three totals, then one `Date | Category | Amount |
/// Remarks` row per record, grouped by day exactly like the view model.
#[must_use]
pub fn to_html(result: &AggregationResult, branch_label: &str, currency: Currency) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>PigEx Report - {}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 24px; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 6px 10px; text-align: left; }}\n\
         tr.day td {{ background: #f0f0f0; font-weight: bold; }}\n\
         </style>\n</head>\n<body>\n",
        escape(branch_label)
    );

    let _ = write!(html, "<h1>{}</h1>\n", escape(branch_label));
    let _ = write!(
        html,
        "<p>Total Balance: {}</p>\n<p>Total Income: {}</p>\n<p>Total Expense: {}</p>\n",
        result.total_balance.format(currency),
        result.total_income.format(currency),
        result.total_expense.format(currency),
    );

    if result.is_empty() {
        let _ = write!(html, "<p>{NO_TRANSACTIONS}</p>\n");
    } else {
        html.push_str(
            "<table>\n<tr><th>Date</th><th>Category</th><th>Amount</th><th>Remarks</th></tr>\n",
        );
        for group in &result.groups {
            let _ = write!(
                html,
                "<tr class=\"day\"><td colspan=\"4\">{}</td></tr>\n",
                day_label(group.day)
            );
            for tx in &group.transactions {
                let local = tx.occurred_at.with_timezone(&result.tz);
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    local.format("%Y-%m-%d %H:%M"),
                    escape(tx.category_label()),
                    signed_amount(tx, currency),
                    escape(tx.remarks_label()),
                );
            }
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Flat CSV export of the kept records, one row per record in report order.
pub fn to_csv(result: &AggregationResult) -> ResultEngine<Vec<u8>> {
    #[derive(Serialize)]
    struct ExportRow<'a> {
        date: String,
        kind: &'a str,
        amount: String,
        category: &'a str,
        remarks: &'a str,
        id: &'a str,
    }

    let mut writer = Writer::from_writer(vec![]);
    for tx in &result.transactions {
        writer.serialize(ExportRow {
            date: tx.occurred_at.with_timezone(&result.tz).to_rfc3339(),
            kind: tx.kind.as_str(),
            amount: tx.amount.to_string(),
            category: tx.category_label(),
            remarks: tx.remarks_label(),
            id: &tx.id,
        })?;
    }

    writer
        .into_inner()
        .map_err(|err| crate::EngineError::Export(format!("finalize csv buffer: {err}")))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
