//! PigEx report engine.
//!
//! Pure aggregation and report formatting over a branch's money-in/money-out
//! record collections. The document store that holds the raw records is an
//! external collaborator; callers fetch the collections and hand them in, so
//! everything here is a synchronous transform with no I/O.

pub use aggregate::{AggregationResult, AggregationWarnings, DateRange, DayGroup, aggregate};
pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use raw::RawRecord;
pub use records::{RecordKind, TransactionRecord};

mod aggregate;
mod currency;
mod error;
mod money;
pub mod raw;
pub mod report;
mod records;

type ResultEngine<T> = Result<T, EngineError>;
