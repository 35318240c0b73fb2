//! Report API endpoints.
//!
//! The endpoints are stateless: the screen controller fetches the raw
//! money-in/money-out collections from the document store and posts them
//! here, so the server never touches the store itself.

use api_types::report::{DayGroupView, ReportRequest, ReportResponse, TransactionView};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use chrono_tz::Tz;
use engine::{AggregationResult, Currency, DateRange, EngineError, RawRecord, RecordKind, report};

use crate::{ServerError, server::ServerState};

/// Handle requests for the grouped report view model.
pub async fn get_report(
    State(state): State<ServerState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, ServerError> {
    let (result, currency) = run_aggregation(&state, &payload)?;

    let groups = result
        .groups
        .iter()
        .map(|group| DayGroupView {
            label: report::day_label(group.day),
            day: group.day,
            transactions: group.transactions.iter().map(view).collect(),
        })
        .collect();

    Ok(Json(ReportResponse {
        currency: currency_view(currency),
        total_income_minor: result.total_income.cents(),
        total_expenses_minor: result.total_expense.cents(),
        total_balance_minor: result.total_balance.cents(),
        empty: result.is_empty(),
        dropped_dates: result.warnings.dropped_dates,
        zeroed_amounts: result.warnings.zeroed_amounts,
        groups,
    }))
}

/// Handle requests for the exportable HTML document.
pub async fn get_document(
    State(state): State<ServerState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Html<String>, ServerError> {
    let branch = payload.branch.clone().unwrap_or_else(|| "Main Farm".to_string());
    let (result, currency) = run_aggregation(&state, &payload)?;

    Ok(Html(report::to_html(&result, &branch, currency)))
}

/// Handle requests for the CSV export.
pub async fn get_csv(
    State(state): State<ServerState>,
    Json(payload): Json<ReportRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let (result, _) = run_aggregation(&state, &payload)?;
    let data = report::to_csv(&result)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"report.csv\"",
            ),
        ],
        data,
    ))
}

fn run_aggregation(
    state: &ServerState,
    payload: &ReportRequest,
) -> Result<(AggregationResult, Currency), ServerError> {
    let tz = match payload.timezone.as_deref() {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| EngineError::UnknownTimezone(name.to_string()))?,
        None => state.timezone,
    };

    let range = match (payload.start_date, payload.end_date) {
        (Some(start), Some(end)) => Some(DateRange::days(start, end, tz)?),
        (None, None) => None,
        _ => {
            return Err(ServerError::Generic(
                "start_date and end_date must be provided together".to_string(),
            ));
        }
    };

    let money_in = payload.money_in.as_deref().map(to_raw);
    let money_out = payload.money_out.as_deref().map(to_raw);

    let result = engine::aggregate(money_in.as_deref(), money_out.as_deref(), range, tz)?;
    if result.warnings.dropped_dates > 0 || result.warnings.zeroed_amounts > 0 {
        tracing::warn!(
            dropped_dates = result.warnings.dropped_dates,
            zeroed_amounts = result.warnings.zeroed_amounts,
            "report degraded some records"
        );
    }

    let currency = match payload.currency {
        Some(api_types::Currency::Php) => Currency::Php,
        Some(api_types::Currency::Usd) => Currency::Usd,
        None => state.currency,
    };

    Ok((result, currency))
}

/// Decodes raw store entries. Entries that are not JSON objects become empty
/// records, which the aggregator then drops as date-less.
fn to_raw(values: &[serde_json::Value]) -> Vec<RawRecord> {
    values
        .iter()
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .collect()
}

fn view(tx: &engine::TransactionRecord) -> TransactionView {
    TransactionView {
        id: tx.id.clone(),
        kind: match tx.kind {
            RecordKind::In => api_types::report::RecordKind::In,
            RecordKind::Out => api_types::report::RecordKind::Out,
        },
        occurred_at: tx.occurred_at,
        amount_minor: tx.amount.cents(),
        category: tx.category.clone(),
        remarks: tx.remarks.clone(),
    }
}

fn currency_view(currency: Currency) -> api_types::Currency {
    match currency {
        Currency::Php => api_types::Currency::Php,
        Currency::Usd => api_types::Currency::Usd,
    }
}
