use hotel_api::{Service, ServiceDraft};
use reqwest::Method;

use crate::{HotelClient, SdkError};

impl HotelClient {
    /// List all services
    pub async fn list_services(&self) -> Result<Vec<Service>, SdkError> {
        self.get(&["Servicios"]).await
    }

    /// Services whose name or description contains `query`.
    ///
    /// The API has no search endpoint for services, so this filters locally.
    pub async fn search_services(&self, query: &str) -> Result<Vec<Service>, SdkError> {
        let services = self.list_services().await?;
        Ok(services.into_iter().filter(|s| s.matches(query)).collect())
    }

    /// Create a new service. Returns the stored record if the API echoes it.
    pub async fn create_service(
        &self,
        draft: &ServiceDraft,
    ) -> Result<Option<Service>, SdkError> {
        draft.validate()?;
        let mut body = draft.clone();
        body.servicio_id = None;
        self.send_json(Method::POST, &["Servicios"], &body).await
    }

    /// Update an existing service
    pub async fn update_service(&self, id: i64, draft: &ServiceDraft) -> Result<(), SdkError> {
        draft.validate()?;
        let mut body = draft.clone();
        body.servicio_id = Some(id);
        let id = id.to_string();
        self.send(Method::PUT, &["Servicios", &id], &body).await
    }

    /// Flip a service between active and inactive.
    ///
    /// There is no dedicated endpoint, so the full record goes back with
    /// `activo` inverted. Returns the new flag.
    pub async fn toggle_service(&self, service: &Service) -> Result<bool, SdkError> {
        let mut draft = ServiceDraft::from(service);
        draft.activo = !service.activo;
        let id = service.servicio_id.to_string();
        self.send(Method::PUT, &["Servicios", &id], &draft).await?;
        Ok(draft.activo)
    }

    /// Delete a service
    pub async fn delete_service(&self, id: i64) -> Result<(), SdkError> {
        self.delete(&["Servicios", &id.to_string()]).await
    }
}
