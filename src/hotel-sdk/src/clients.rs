use hotel_api::{Client, ClientDraft};
use reqwest::Method;

use crate::{HotelClient, SdkError};

impl HotelClient {
    /// List clients, optionally only the active ones
    pub async fn list_clients(&self, active_only: bool) -> Result<Vec<Client>, SdkError> {
        if active_only {
            self.get(&["Clientes", "activos"]).await
        } else {
            self.get(&["Clientes"]).await
        }
    }

    /// Look a client up by email
    pub async fn find_client_by_email(&self, email: &str) -> Result<Client, SdkError> {
        self.get(&["Clientes", "email", email.trim()]).await
    }

    /// Search as the clients screen does.
    ///
    /// A blank query lists everything (honouring `active_only`). Otherwise the
    /// query is an email; a lookup the API rejects yields an empty list.
    pub async fn search_clients(
        &self,
        query: &str,
        active_only: bool,
    ) -> Result<Vec<Client>, SdkError> {
        if query.trim().is_empty() {
            return self.list_clients(active_only).await;
        }
        match self.find_client_by_email(query).await {
            Ok(client) => Ok(vec![client]),
            Err(SdkError::Api { status, message }) => {
                tracing::debug!(status, %message, "client lookup found nothing");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Create a new client. Returns the stored record if the API echoes it.
    pub async fn create_client(&self, draft: &ClientDraft) -> Result<Option<Client>, SdkError> {
        draft.validate()?;
        let mut body = draft.clone();
        body.cliente_id = None;
        self.send_json(Method::POST, &["Clientes"], &body).await
    }

    /// Update an existing client
    pub async fn update_client(&self, id: i64, draft: &ClientDraft) -> Result<(), SdkError> {
        draft.validate()?;
        let mut body = draft.clone();
        body.cliente_id = Some(id);
        let id = id.to_string();
        self.send(Method::PUT, &["Clientes", &id], &body).await
    }

    /// Flip a client between active and inactive
    pub async fn toggle_client(&self, id: i64) -> Result<(), SdkError> {
        let id = id.to_string();
        let url = self.url(&["Clientes", &id, "estado"])?;
        self.execute(Method::PUT, url).await
    }

    /// Delete a client
    pub async fn delete_client(&self, id: i64) -> Result<(), SdkError> {
        self.delete(&["Clientes", &id.to_string()]).await
    }
}
