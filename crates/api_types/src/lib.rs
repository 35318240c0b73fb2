use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Php,
    Usd,
}

pub mod report {
    use super::*;

    /// Request body for the report endpoints.
    ///
    /// The screen controller fetches the two collections from the document
    /// store (`branch/moneyInRecords`, `branch/moneyOutRecords`) and posts
    /// them here as-is; entries stay raw JSON objects because the stored
    /// shapes are heterogeneous.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ReportRequest {
        pub money_in: Option<Vec<serde_json::Value>>,
        pub money_out: Option<Vec<serde_json::Value>>,
        /// First calendar day of the inclusive filter range.
        pub start_date: Option<NaiveDate>,
        /// Last calendar day of the inclusive filter range.
        pub end_date: Option<NaiveDate>,
        /// IANA timezone name for day bucketing; server default when absent.
        pub timezone: Option<String>,
        /// Branch name shown in the document header.
        pub branch: Option<String>,
        pub currency: Option<Currency>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum RecordKind {
        In,
        Out,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub kind: RecordKind,
        /// UTC instant the record occurred at.
        pub occurred_at: DateTime<Utc>,
        /// Amount in minor units (cents), always non-negative; the kind
        /// carries the direction.
        pub amount_minor: i64,
        pub category: Option<String>,
        pub remarks: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayGroupView {
        /// Long day label, e.g. "January 5, 2025".
        pub label: String,
        pub day: NaiveDate,
        pub transactions: Vec<TransactionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportResponse {
        pub currency: Currency,
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub total_balance_minor: i64,
        pub groups: Vec<DayGroupView>,
        /// Explicit empty marker so clients render "No transactions found"
        /// instead of a bare empty list.
        pub empty: bool,
        /// Records excluded because their date could not be parsed.
        pub dropped_dates: usize,
        /// Records kept with a zero amount because it could not be parsed.
        pub zeroed_amounts: usize,
    }
}
