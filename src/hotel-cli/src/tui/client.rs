//! Hotel API access for the console, with errors phrased for the status bar

use common::session::{Session, SessionStore};
use hotel_api::{
    Client, ClientDraft, Reservation, ReservationDraft, ReservationStatus, Service, ServiceDraft,
};
use hotel_sdk::{DashboardCounts, HotelClient, SdkError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleClientError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Unauthorized: press L to sign in again")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl ConsoleClientError {
    /// Whether the API could not be reached at all
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<SdkError> for ConsoleClientError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::InvalidCredentials => Self::InvalidCredentials,
            err if err.is_unauthorized() => Self::Unauthorized,
            SdkError::Api {
                status: 404,
                message,
            } => Self::NotFound(message),
            SdkError::Api { status, message } if message.trim().is_empty() => {
                Self::Api(format!("HTTP {status}"))
            }
            SdkError::Api { message, .. } => Self::Api(message),
            SdkError::Http(e) => Self::Connection(e.to_string()),
            SdkError::InvalidUrl(url) => Self::Connection(format!("invalid URL {url}")),
            SdkError::Deserialize(e) => Self::Api(format!("unexpected response: {e}")),
            SdkError::Validation(e) => Self::Invalid(e.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, ConsoleClientError>;

/// The SDK client plus the session file the console signs in and out of
pub struct ConsoleClient {
    api: HotelClient,
    store: SessionStore,
}

impl ConsoleClient {
    /// The stored token, if any, is attached straight away
    pub fn new(api: HotelClient, store: SessionStore) -> Self {
        let token = store.token();
        Self {
            api: api.with_token(token),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// Email of a session left behind by an earlier login
    pub fn stored_email(&self) -> Option<String> {
        match self.store.load() {
            Ok(session) => session.map(|s| s.email),
            Err(e) => {
                tracing::warn!("Ignoring stored session: {e}");
                None
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        if let Some(token) = self.api.login(email, password).await? {
            self.store
                .save(&Session::new(token, email))
                .map_err(|e| ConsoleClientError::Session(e.to_string()))?;
        }
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.api.logout();
        self.store
            .clear()
            .map(|_| ())
            .map_err(|e| ConsoleClientError::Session(e.to_string()))
    }

    pub async fn dashboard_counts(&self) -> Result<DashboardCounts> {
        Ok(self.api.dashboard_counts().await?)
    }

    pub async fn search_clients(&self, query: &str, active_only: bool) -> Result<Vec<Client>> {
        Ok(self.api.search_clients(query, active_only).await?)
    }

    pub async fn create_client(&self, draft: &ClientDraft) -> Result<()> {
        self.api.create_client(draft).await?;
        Ok(())
    }

    pub async fn update_client(&self, id: i64, draft: &ClientDraft) -> Result<()> {
        Ok(self.api.update_client(id, draft).await?)
    }

    pub async fn toggle_client(&self, id: i64) -> Result<()> {
        Ok(self.api.toggle_client(id).await?)
    }

    pub async fn delete_client(&self, id: i64) -> Result<()> {
        Ok(self.api.delete_client(id).await?)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.api.list_services().await?)
    }

    pub async fn create_service(&self, draft: &ServiceDraft) -> Result<()> {
        self.api.create_service(draft).await?;
        Ok(())
    }

    pub async fn update_service(&self, id: i64, draft: &ServiceDraft) -> Result<()> {
        Ok(self.api.update_service(id, draft).await?)
    }

    pub async fn toggle_service(&self, service: &Service) -> Result<()> {
        self.api.toggle_service(service).await?;
        Ok(())
    }

    pub async fn delete_service(&self, id: i64) -> Result<()> {
        Ok(self.api.delete_service(id).await?)
    }

    pub async fn search_reservations(&self, client_id: &str) -> Result<Vec<Reservation>> {
        Ok(self.api.search_reservations(client_id).await?)
    }

    pub async fn create_reservation(&self, draft: &ReservationDraft) -> Result<()> {
        self.api.create_reservation(draft).await?;
        Ok(())
    }

    pub async fn update_reservation(&self, id: i64, draft: &ReservationDraft) -> Result<()> {
        Ok(self.api.update_reservation(id, draft).await?)
    }

    pub async fn cycle_reservation_status(
        &self,
        reservation: &Reservation,
    ) -> Result<ReservationStatus> {
        Ok(self.api.cycle_reservation_status(reservation).await?)
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<()> {
        Ok(self.api.delete_reservation(id).await?)
    }
}
