use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Bookable hotel service as returned by `/Servicios`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub servicio_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Price in Colombian pesos
    pub precio: f64,
    pub duracion_minutos: u32,
    #[serde(default = "default_true")]
    pub activo: bool,
}

impl Service {
    /// Case-insensitive substring match on name and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.nombre.to_lowercase().contains(&query)
            || self
                .descripcion
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Body for creating or updating a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servicio_id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,
    pub duracion_minutos: u32,
    pub activo: bool,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            servicio_id: None,
            nombre: String::new(),
            descripcion: String::new(),
            precio: 0.0,
            duracion_minutos: 0,
            activo: true,
        }
    }
}

impl ServiceDraft {
    /// Presence checks: a name, a finite price above zero and a non-zero
    /// duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let price_ok = self.precio.is_finite() && self.precio > 0.0;
        if self.nombre.trim().is_empty() || !price_ok || self.duracion_minutos == 0 {
            return Err(ValidationError::ServiceIncomplete);
        }
        Ok(())
    }
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            servicio_id: Some(service.servicio_id),
            nombre: service.nombre.clone(),
            descripcion: service.descripcion.clone().unwrap_or_default(),
            precio: service.precio,
            duracion_minutos: service.duracion_minutos,
            activo: service.activo,
        }
    }
}

fn default_true() -> bool {
    true
}
