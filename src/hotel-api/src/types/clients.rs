use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Hotel guest as returned by `/Clientes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Server-assigned identifier
    pub cliente_id: i64,
    /// Full name
    pub nombre: String,
    /// Contact email, also the lookup key for searches
    pub email: String,
    /// Phone number
    #[serde(default)]
    pub telefono: Option<String>,
    /// Postal address
    #[serde(default)]
    pub direccion: Option<String>,
    /// Whether the client is active
    #[serde(default = "default_true")]
    pub activo: bool,
}

/// Body for creating or updating a client.
///
/// `cliente_id` is omitted when creating and echoed back when updating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub direccion: String,
    pub activo: bool,
}

impl Default for ClientDraft {
    fn default() -> Self {
        Self {
            cliente_id: None,
            nombre: String::new(),
            email: String::new(),
            telefono: String::new(),
            direccion: String::new(),
            activo: true,
        }
    }
}

impl ClientDraft {
    /// Presence checks: name and email must be filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nombre.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ValidationError::ClientIncomplete);
        }
        Ok(())
    }
}

impl From<&Client> for ClientDraft {
    fn from(client: &Client) -> Self {
        Self {
            cliente_id: Some(client.cliente_id),
            nombre: client.nombre.clone(),
            email: client.email.clone(),
            telefono: client.telefono.clone().unwrap_or_default(),
            direccion: client.direccion.clone().unwrap_or_default(),
            activo: client.activo,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_deserializes_backend_payload() {
        let json = r#"{
            "clienteId": 7,
            "nombre": "Ana Gómez",
            "email": "ana@example.com",
            "telefono": "3001234567",
            "direccion": null,
            "activo": false
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.cliente_id, 7);
        assert_eq!(client.nombre, "Ana Gómez");
        assert_eq!(client.telefono.as_deref(), Some("3001234567"));
        assert!(client.direccion.is_none());
        assert!(!client.activo);
    }

    #[test]
    fn test_create_draft_omits_id() {
        let draft = ClientDraft {
            nombre: "Ana".into(),
            email: "ana@example.com".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("clienteId").is_none());
        assert_eq!(json["activo"], true);
    }

    #[test]
    fn test_edit_draft_keeps_id() {
        let client = Client {
            cliente_id: 3,
            nombre: "Luis".into(),
            email: "luis@example.com".into(),
            telefono: None,
            direccion: Some("Calle 1".into()),
            activo: true,
        };
        let draft = ClientDraft::from(&client);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["clienteId"], 3);
        assert_eq!(json["direccion"], "Calle 1");
        assert_eq!(json["telefono"], "");
    }

    #[test]
    fn test_validate_requires_name_and_email() {
        let mut draft = ClientDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::ClientIncomplete));

        draft.nombre = "Ana".into();
        assert_eq!(draft.validate(), Err(ValidationError::ClientIncomplete));

        draft.email = "   ".into();
        assert_eq!(draft.validate(), Err(ValidationError::ClientIncomplete));

        draft.email = "ana@example.com".into();
        assert!(draft.validate().is_ok());
    }
}
