use hotel_api::{Reservation, ReservationDraft, ReservationStatus};
use reqwest::Method;

use crate::{HotelClient, SdkError};

impl HotelClient {
    /// List all reservations
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, SdkError> {
        self.get(&["Reservas"]).await
    }

    /// Reservations belonging to one client
    pub async fn list_reservations_for_client(
        &self,
        client_id: i64,
    ) -> Result<Vec<Reservation>, SdkError> {
        self.get(&["Reservas", "cliente", &client_id.to_string()])
            .await
    }

    /// Search as the reservations screen does.
    ///
    /// A blank query lists everything, otherwise the query is a client id. A
    /// query that is not an id, or a lookup the API rejects, yields an empty
    /// list.
    pub async fn search_reservations(&self, query: &str) -> Result<Vec<Reservation>, SdkError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_reservations().await;
        }
        let Ok(client_id) = query.parse::<i64>() else {
            tracing::debug!(query, "reservation search is not a client id");
            return Ok(Vec::new());
        };
        match self.list_reservations_for_client(client_id).await {
            Ok(reservations) => Ok(reservations),
            Err(SdkError::Api { status, message }) => {
                tracing::debug!(status, %message, client_id, "reservation lookup found nothing");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Create a new reservation. Returns the stored record if the API echoes it.
    pub async fn create_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<Option<Reservation>, SdkError> {
        let mut body = draft.to_body()?;
        body.reserva_id = 0;
        self.send_json(Method::POST, &["Reservas"], &body).await
    }

    /// Update an existing reservation
    pub async fn update_reservation(
        &self,
        id: i64,
        draft: &ReservationDraft,
    ) -> Result<(), SdkError> {
        let mut body = draft.to_body()?;
        body.reserva_id = id;
        self.send(Method::PUT, &["Reservas", &id.to_string()], &body)
            .await
    }

    /// Ask the API to move a reservation to `status`
    pub async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<(), SdkError> {
        let mut url = self.url(&["Reservas", &id.to_string(), "estado"])?;
        url.query_pairs_mut().append_pair("estado", status.as_str());
        self.execute(Method::PATCH, url).await
    }

    /// Move a reservation to the next status in the cycle, returning it
    pub async fn cycle_reservation_status(
        &self,
        reservation: &Reservation,
    ) -> Result<ReservationStatus, SdkError> {
        let next = reservation.estado.next();
        self.set_reservation_status(reservation.reserva_id, next)
            .await?;
        Ok(next)
    }

    /// Delete a reservation
    pub async fn delete_reservation(&self, id: i64) -> Result<(), SdkError> {
        self.delete(&["Reservas", &id.to_string()]).await
    }
}
