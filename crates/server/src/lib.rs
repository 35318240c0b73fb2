use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, run, run_with_listener};

mod reports;
mod server;

pub mod types {
    pub mod report {
        pub use api_types::report::{
            DayGroupView, RecordKind, ReportRequest, ReportResponse, TransactionView,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::MissingInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Export(_) | EngineError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::MalformedDate(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidRange(_)
        | EngineError::UnknownTimezone(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Export(detail) => {
            tracing::error!("export failed: {detail}");
            "internal server error".to_string()
        }
        EngineError::Csv(csv_err) => {
            tracing::error!("csv export failed: {csv_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
