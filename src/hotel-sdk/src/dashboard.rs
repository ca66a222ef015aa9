use serde::Serialize;

use crate::{HotelClient, SdkError};

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub clients: usize,
    pub services: usize,
    pub reservations: usize,
}

impl HotelClient {
    /// Fetch the three collections concurrently and count them
    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, SdkError> {
        let (clients, services, reservations) = tokio::try_join!(
            self.list_clients(false),
            self.list_services(),
            self.list_reservations(),
        )?;
        Ok(DashboardCounts {
            clients: clients.len(),
            services: services.len(),
            reservations: reservations.len(),
        })
    }
}
