mod auth;
mod client;
mod clients;
mod dashboard;
mod error;
mod reservations;
mod services;

pub use client::HotelClient;
pub use dashboard::DashboardCounts;
pub use error::SdkError;

// Re-export API types for convenience
pub use hotel_api;
