//! Error responses for the API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use complaint_map_data::DataError;

use crate::locale::LocaleError;

/// A request that cannot be answered.
///
/// Empty filter results are not errors; they produce empty views.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A query or path parameter has an unsupported value.
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter {
        /// Parameter name as it appears in the request.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The query string does not deserialize, e.g. `topN=abc`.
    #[error("Malformed query string: {reason}")]
    MalformedQuery {
        /// Deserializer message.
        reason: String,
    },

    /// The requested cluster exists in neither table.
    #[error("Cluster {id} not found")]
    NotFound {
        /// Requested identifier.
        id: String,
    },
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } | Self::MalformedQuery { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The input tables could not be loaded.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The embedded locale is malformed.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
