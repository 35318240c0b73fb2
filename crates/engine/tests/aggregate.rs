use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::{Value, json};

use engine::{DateRange, EngineError, Money, RawRecord, RecordKind, aggregate, report};

const TZ: Tz = chrono_tz::UTC;

fn record(amount: Value, date: &str) -> RawRecord {
    RawRecord {
        id: None,
        amount: Some(amount),
        date: Some(json!(date)),
        category: None,
        remarks: None,
    }
}

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

#[test]
fn basic_totals() {
    let money_in = [record(json!(500), "2025-01-01")];
    let money_out = [record(json!(200), "2025-01-02")];

    let result = aggregate(Some(&money_in), Some(&money_out), None, TZ).unwrap();

    assert_eq!(result.total_income, Money::new(50_000));
    assert_eq!(result.total_expense, Money::new(20_000));
    assert_eq!(result.total_balance, Money::new(30_000));

    let sections = report::view_model(&result);
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].label, "January 2, 2025");
    assert_eq!(sections[1].label, "January 1, 2025");
}

#[test]
fn balance_identity_holds_for_any_range() {
    let money_in = [
        record(json!(500), "2025-01-01"),
        record(json!(125.75), "2025-01-03"),
    ];
    let money_out = [
        record(json!(200), "2025-01-02"),
        record(json!("49.99"), "2025-01-04"),
    ];

    let ranges = [
        None,
        Some(DateRange::days(day(2025, 1, 1), day(2025, 1, 2), TZ).unwrap()),
        Some(DateRange::days(day(2025, 1, 3), day(2025, 1, 4), TZ).unwrap()),
        Some(DateRange::days(day(2024, 1, 1), day(2024, 12, 31), TZ).unwrap()),
    ];

    for range in ranges {
        let result = aggregate(Some(&money_in), Some(&money_out), range, TZ).unwrap();
        assert_eq!(result.total_balance, result.total_income - result.total_expense);
    }
}

#[test]
fn groups_partition_the_filtered_sequence() {
    let money_in = [
        record(json!(1), "2025-01-05T08:00:00Z"),
        record(json!(2), "2025-01-05T09:00:00Z"),
        record(json!(3), "2025-01-07"),
    ];
    let money_out = [record(json!(4), "2025-01-06")];

    let result = aggregate(Some(&money_in), Some(&money_out), None, TZ).unwrap();

    let flattened: Vec<_> = result
        .groups
        .iter()
        .flat_map(|group| group.transactions.iter().cloned())
        .collect();
    assert_eq!(flattened, result.transactions);

    let group_sizes: usize = result.groups.iter().map(|g| g.transactions.len()).sum();
    assert_eq!(group_sizes, result.transactions.len());
}

#[test]
fn aggregation_is_idempotent() {
    let money_in = [record(json!(500), "2025-01-01"), record(json!(3), "bad-date")];
    let money_out = [record(json!("x"), "2025-01-02")];
    let range = DateRange::days(day(2025, 1, 1), day(2025, 1, 31), TZ).unwrap();

    let first = aggregate(Some(&money_in), Some(&money_out), Some(range), TZ).unwrap();
    let second = aggregate(Some(&money_in), Some(&money_out), Some(range), TZ).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sort_is_most_recent_first() {
    let money_in = [
        record(json!(1), "2025-01-05"),
        record(json!(2), "2025-01-07"),
        record(json!(3), "2025-01-06"),
    ];

    let result = aggregate(Some(&money_in), None, None, TZ).unwrap();

    let days: Vec<NaiveDate> = result
        .transactions
        .iter()
        .map(|tx| tx.occurred_at.date_naive())
        .collect();
    assert_eq!(
        days,
        vec![day(2025, 1, 7), day(2025, 1, 6), day(2025, 1, 5)]
    );
}

#[test]
fn range_filter_excludes_out_of_range_records() {
    let money_in = [record(json!(500), "2025-01-01")];
    let money_out = [record(json!(200), "2025-01-02")];
    let range = DateRange::days(day(2025, 1, 2), day(2025, 1, 2), TZ).unwrap();

    let result = aggregate(Some(&money_in), Some(&money_out), Some(range), TZ).unwrap();

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].kind, RecordKind::Out);
    assert_eq!(result.total_income, Money::ZERO);
    assert_eq!(result.total_expense, Money::new(20_000));
    assert_eq!(result.total_balance, Money::new(-20_000));
}

#[test]
fn malformed_date_drops_the_record_and_reports_it() {
    let money_in = [
        record(json!(500), "2025-01-01"),
        record(json!(100), "not-a-date"),
    ];

    let result = aggregate(Some(&money_in), None, None, TZ).unwrap();

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.total_income, Money::new(50_000));
    assert_eq!(result.warnings.dropped_dates, 1);
}

#[test]
fn malformed_amount_is_kept_as_zero() {
    let money_out = [
        record(json!("garbage"), "2025-01-01"),
        record(json!(200), "2025-01-02"),
    ];

    let result = aggregate(None, Some(&money_out), None, TZ).unwrap();

    assert_eq!(result.transactions.len(), 2);
    assert_eq!(result.total_expense, Money::new(20_000));
    assert_eq!(result.warnings.zeroed_amounts, 1);

    let zeroed = &result.transactions[1];
    assert_eq!(zeroed.amount, Money::ZERO);
}

#[test]
fn missing_amount_field_counts_as_zeroed_too() {
    let money_out = [RawRecord {
        id: Some("no-amount".to_string()),
        amount: None,
        date: Some(json!("2025-01-01")),
        category: None,
        remarks: None,
    }];

    let result = aggregate(None, Some(&money_out), None, TZ).unwrap();
    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.warnings.zeroed_amounts, 1);
}

#[test]
fn empty_filtered_set_is_an_explicit_state() {
    let money_in = [record(json!(500), "2025-01-01")];
    let range = DateRange::days(day(2026, 1, 1), day(2026, 1, 2), TZ).unwrap();

    let result = aggregate(Some(&money_in), None, Some(range), TZ).unwrap();

    assert!(result.is_empty());
    assert!(result.groups.is_empty());
    let html = report::to_html(&result, "Main Farm", engine::Currency::Php);
    assert!(html.contains(report::NO_TRANSACTIONS));
}

#[test]
fn missing_both_collections_fails() {
    let err = aggregate(None, None, None, TZ).unwrap_err();
    assert_eq!(
        err,
        EngineError::MissingInput("both record collections are absent".to_string())
    );
}

#[test]
fn timestamp_map_and_iso_string_normalize_to_the_same_instant() {
    let iso = [record(json!(10), "2025-01-05T00:00:00Z")];
    let seconds = chrono::NaiveDate::from_ymd_opt(2025, 1, 5)
        .unwrap()
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp();
    let stamped = [RawRecord {
        id: None,
        amount: Some(json!(10)),
        date: Some(json!({"seconds": seconds, "nanoseconds": 0})),
        category: None,
        remarks: None,
    }];

    let from_iso = aggregate(Some(&iso), None, None, TZ).unwrap();
    let from_map = aggregate(Some(&stamped), None, None, TZ).unwrap();
    assert_eq!(
        from_iso.transactions[0].occurred_at,
        from_map.transactions[0].occurred_at
    );
}
