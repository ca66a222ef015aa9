//! Wire types for the Hotel SGS REST API.
//!
//! These are passive records mirrored from the backend. Nothing here enforces
//! business rules beyond the presence checks the console performs before
//! submitting a form.

mod extensions;
mod types;

pub use types::auth::{LoginRequest, LoginResponse};
pub use types::clients::{Client, ClientDraft};
pub use types::error::{ApiError, ValidationError};
pub use types::reservations::{
    Reservation, ReservationBody, ReservationDraft, ReservationStatus, parse_wire_date,
};
pub use types::services::{Service, ServiceDraft};
