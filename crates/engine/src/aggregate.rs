//! Transaction aggregation.
//!
//! Produces a consistent, totaled, time-ordered view of a branch's cash
//! movements from the two independently-stored collections (`moneyInRecords`
//! and `moneyOutRecords`). Pure: no I/O, no clock reads; calling it twice
//! with the same inputs gives identical results.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    EngineError, Money, RawRecord, RecordKind, ResultEngine, TransactionRecord, raw,
};

/// Inclusive instant range used to filter records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ResultEngine<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Expands two calendar days to `[start-of-day, end-of-day]` in the
    /// reporting timezone. This is the shape the callers (screen controller,
    /// HTTP surface, CLI) hand in.
    pub fn days(start: NaiveDate, end: NaiveDate, tz: Tz) -> ResultEngine<Self> {
        let start = local_instant(start, NaiveTime::MIN, tz);
        let end = local_instant(
            end,
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN),
            tz,
        );
        Self::new(start, end)
    }

    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Maps a local wall-clock time to UTC, taking the earliest mapping on DST
/// ambiguity and falling back to a UTC reading when the local time does not
/// exist at all.
fn local_instant(day: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    use chrono::TimeZone;

    let naive = day.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Per-record conditions that degraded but did not fail the aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregationWarnings {
    /// Records excluded because their date could not be normalized.
    pub dropped_dates: usize,
    /// Records kept whose amount could not be parsed and counts as zero.
    pub zeroed_amounts: usize,
}

/// One calendar-day bucket, keyed by the local date in the reporting timezone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    /// Kept records, sorted by instant descending (stable for ties).
    pub transactions: Vec<TransactionRecord>,
    pub total_income: Money,
    pub total_expense: Money,
    pub total_balance: Money,
    /// Day buckets in first-appearance order; concatenating them reproduces
    /// `transactions`.
    pub groups: Vec<DayGroup>,
    /// Reporting timezone the day buckets were derived with. Carried so the
    /// formatters stay fully determined by the result alone.
    pub tz: Tz,
    pub warnings: AggregationWarnings,
}

impl AggregationResult {
    /// `true` when the filtered set holds no records. Formatters must render
    /// an explicit "No transactions found" state for this, not an empty table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Merges the two raw collections into a totaled, day-bucketed report input.
///
/// A `None` collection means the store path was absent; passing `None` for
/// both is the only hard failure. Individual records degrade per the
/// leniency policy: unparseable dates drop the record (counted in
/// `warnings.dropped_dates`), unparseable amounts keep it with a zero amount
/// (counted in `warnings.zeroed_amounts`).
pub fn aggregate(
    money_in: Option<&[RawRecord]>,
    money_out: Option<&[RawRecord]>,
    range: Option<DateRange>,
    tz: Tz,
) -> ResultEngine<AggregationResult> {
    if money_in.is_none() && money_out.is_none() {
        return Err(EngineError::MissingInput(
            "both record collections are absent".to_string(),
        ));
    }

    let mut warnings = AggregationWarnings::default();
    let mut transactions: Vec<TransactionRecord> = Vec::new();

    // Money-in first, then money-out: ties on equal instants keep this order
    // through the stable sort below.
    for (kind, collection) in [
        (RecordKind::In, money_in),
        (RecordKind::Out, money_out),
    ] {
        for (index, record) in collection.unwrap_or_default().iter().enumerate() {
            match normalize(record, kind, index, &mut warnings) {
                Some(record) => transactions.push(record),
                None => warnings.dropped_dates += 1,
            }
        }
    }

    if let Some(range) = range {
        transactions.retain(|tx| range.contains(tx.occurred_at));
    }

    transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let (total_income, total_expense) =
        transactions
            .iter()
            .fold((Money::ZERO, Money::ZERO), |(income, expense), tx| {
                match tx.kind {
                    RecordKind::In => (income + tx.amount, expense),
                    RecordKind::Out => (income, expense + tx.amount),
                }
            });

    let groups = group_by_day(&transactions, tz);

    Ok(AggregationResult {
        total_income,
        total_expense,
        total_balance: total_income - total_expense,
        transactions,
        groups,
        tz,
        warnings,
    })
}

fn normalize(
    record: &RawRecord,
    kind: RecordKind,
    index: usize,
    warnings: &mut AggregationWarnings,
) -> Option<TransactionRecord> {
    let occurred_at = raw::parse_instant(record.date.as_ref()?).ok()?;

    let amount = match record.amount.as_ref().map(Money::from_raw) {
        Some(Ok(amount)) => amount,
        // The entry forms were historically lenient about amounts, so a bad
        // amount degrades to zero instead of dropping the record.
        Some(Err(_)) | None => {
            warnings.zeroed_amounts += 1;
            Money::ZERO
        }
    };

    Some(TransactionRecord {
        id: record
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-{index}", kind.as_str())),
        kind,
        occurred_at,
        amount,
        category: record.category.clone(),
        remarks: record.remarks.clone(),
    })
}

/// Buckets an already-sorted sequence by local calendar day, preserving order
/// within and across buckets.
fn group_by_day(transactions: &[TransactionRecord], tz: Tz) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for tx in transactions {
        let day = tx.occurred_at.with_timezone(&tz).date_naive();
        match groups.last_mut() {
            Some(current) if current.day == day => current.transactions.push(tx.clone()),
            _ => groups.push(DayGroup {
                day,
                transactions: vec![tx.clone()],
            }),
        }
    }

    groups
}
