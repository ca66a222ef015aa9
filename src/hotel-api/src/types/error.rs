use serde::{Deserialize, Serialize};

/// Error body returned by the hotel API.
///
/// The backend is not consistent about its error shape: some endpoints return
/// `{ "message": ... }`, validation failures come back as problem details with
/// `title` and `detail`. Every field is therefore optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Short problem title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable error description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Longer explanation of the problem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A form failed its presence checks and was not submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name and email are required")]
    ClientIncomplete,
    #[error("Name is required, price and duration must be greater than 0")]
    ServiceIncomplete,
    #[error("Client, service, room, check-in and check-out are required")]
    ReservationIncomplete,
    #[error("Invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}
