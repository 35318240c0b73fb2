//! Record primitives.
//!
//! A `TransactionRecord` is one strict, normalized cash movement. It only
//! exists as the output of the ingestion boundary in [`raw`](crate::raw);
//! heterogeneous store shapes never leak past it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money};

/// Which source collection a record came from.
///
/// Assigned by the aggregator from the collection identity; the store records
/// themselves do not carry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    In,
    Out,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Sign prefix used when rendering the amount in reports.
    pub fn sign(self) -> &'static str {
        match self {
            Self::In => "+",
            Self::Out => "-",
        }
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid record kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Store-assigned document id, opaque to the engine.
    pub id: String,
    pub kind: RecordKind,
    pub occurred_at: DateTime<Utc>,
    pub amount: Money,
    pub category: Option<String>,
    pub remarks: Option<String>,
}

impl TransactionRecord {
    /// Category for display, with the product's placeholder for absent values.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("N/A")
    }

    /// Remarks for display, with the product's placeholder for absent values.
    #[must_use]
    pub fn remarks_label(&self) -> &str {
        self.remarks.as_deref().unwrap_or("No remarks provided.")
    }
}
