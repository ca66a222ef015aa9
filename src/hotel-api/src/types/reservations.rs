use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ValidationError;

/// Reservation lifecycle status.
///
/// The backend spells statuses in Spanish; those spellings are the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// Status the console moves to when the user cycles it.
    ///
    /// Pending -> Confirmed -> Cancelled -> Pending. The backend decides whether
    /// the transition is allowed.
    pub fn next(&self) -> Self {
        match self {
            Self::Pending => Self::Confirmed,
            Self::Confirmed => Self::Cancelled,
            Self::Cancelled => Self::Pending,
        }
    }

    /// Decode a status sent by the server. Anything unrecognised is treated as pending.
    pub fn from_wire(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    /// Accepts the wire spelling or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(Self::Pending),
            "confirmada" | "confirmed" => Ok(Self::Confirmed),
            "cancelada" | "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidField {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_wire).unwrap_or_default())
    }
}

/// Reservation as returned by `/Reservas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reserva_id: i64,
    pub cliente_id: i64,
    pub servicio_id: i64,
    pub habitacion: String,
    /// ISO date or datetime, e.g. `2025-03-14T00:00:00`
    pub fecha_entrada: String,
    pub fecha_salida: String,
    #[serde(default = "default_party_size")]
    pub cantidad_personas: u32,
    #[serde(default)]
    pub estado: ReservationStatus,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Reservation {
    pub fn check_in_date(&self) -> Option<NaiveDate> {
        parse_wire_date(&self.fecha_entrada)
    }

    pub fn check_out_date(&self) -> Option<NaiveDate> {
        parse_wire_date(&self.fecha_salida)
    }
}

/// Parse the date part (first ten characters) of a wire timestamp.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Reservation form state before submission.
///
/// Fields the user has not filled in yet are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub reserva_id: Option<i64>,
    pub cliente_id: Option<i64>,
    pub servicio_id: Option<i64>,
    pub habitacion: String,
    pub fecha_entrada: Option<NaiveDate>,
    pub fecha_salida: Option<NaiveDate>,
    pub cantidad_personas: u32,
    pub estado: ReservationStatus,
    pub descripcion: Option<String>,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            reserva_id: None,
            cliente_id: None,
            servicio_id: None,
            habitacion: String::new(),
            fecha_entrada: None,
            fecha_salida: None,
            cantidad_personas: 1,
            estado: ReservationStatus::Pending,
            descripcion: None,
        }
    }
}

/// Request body sent for reservation create and update.
///
/// Only plain fields: navigation objects the server attaches to a reservation
/// (client, service) are never echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBody {
    pub reserva_id: i64,
    pub cliente_id: i64,
    pub servicio_id: i64,
    pub habitacion: String,
    pub fecha_entrada: NaiveDate,
    pub fecha_salida: NaiveDate,
    pub cantidad_personas: u32,
    pub estado: ReservationStatus,
    pub descripcion: String,
}

impl ReservationDraft {
    /// Presence checks, producing the body to submit.
    pub fn to_body(&self) -> Result<ReservationBody, ValidationError> {
        match (
            self.cliente_id,
            self.servicio_id,
            self.fecha_entrada,
            self.fecha_salida,
        ) {
            (Some(cliente_id), Some(servicio_id), Some(entrada), Some(salida))
                if !self.habitacion.trim().is_empty() =>
            {
                Ok(ReservationBody {
                    reserva_id: self.reserva_id.unwrap_or(0),
                    cliente_id,
                    servicio_id,
                    habitacion: self.habitacion.clone(),
                    fecha_entrada: entrada,
                    fecha_salida: salida,
                    cantidad_personas: self.cantidad_personas,
                    estado: self.estado,
                    descripcion: self.descripcion.clone().unwrap_or_default(),
                })
            }
            _ => Err(ValidationError::ReservationIncomplete),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_body().map(|_| ())
    }
}

impl From<&Reservation> for ReservationDraft {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reserva_id: Some(reservation.reserva_id),
            cliente_id: Some(reservation.cliente_id),
            servicio_id: Some(reservation.servicio_id),
            habitacion: reservation.habitacion.clone(),
            fecha_entrada: reservation.check_in_date(),
            fecha_salida: reservation.check_out_date(),
            cantidad_personas: reservation.cantidad_personas,
            estado: reservation.estado,
            descripcion: reservation.descripcion.clone(),
        }
    }
}

fn default_party_size() -> u32 {
    1
}
