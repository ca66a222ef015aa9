use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Subcommand;
use hotel_api::{Reservation, ReservationDraft, ReservationStatus};

use super::{Context, confirm};
use crate::format;

#[derive(Subcommand)]
pub enum ReservationAction {
    /// List reservations
    List {
        /// Only reservations of this client
        #[arg(long)]
        client: Option<i64>,
    },
    /// Create a new reservation
    Create {
        /// Client ID
        #[arg(long)]
        client: i64,
        /// Service ID
        #[arg(long)]
        service: i64,
        /// Room number
        #[arg(long)]
        room: String,
        /// Check-in date (dd/mm/yyyy or yyyy-mm-dd)
        #[arg(long, value_parser = format::parse_date)]
        check_in: NaiveDate,
        /// Check-out date (dd/mm/yyyy or yyyy-mm-dd)
        #[arg(long, value_parser = format::parse_date)]
        check_out: NaiveDate,
        /// Number of guests
        #[arg(long, default_value_t = 1)]
        guests: u32,
        /// Initial status
        #[arg(long, default_value_t = ReservationStatus::Pending)]
        status: ReservationStatus,
        /// Free-text notes
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a reservation
    Update {
        /// Reservation ID
        id: i64,
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        room: Option<String>,
        #[arg(long, value_parser = format::parse_date)]
        check_in: Option<NaiveDate>,
        #[arg(long, value_parser = format::parse_date)]
        check_out: Option<NaiveDate>,
        #[arg(long)]
        guests: Option<u32>,
        #[arg(long)]
        status: Option<ReservationStatus>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Advance the status: Pending, Confirmed, Cancelled, then Pending again
    CycleStatus {
        /// Reservation ID
        id: i64,
    },
    /// Set the status explicitly
    SetStatus {
        /// Reservation ID
        id: i64,
        /// Pendiente/Confirmada/Cancelada (English names accepted)
        status: ReservationStatus,
    },
    /// Delete a reservation
    Delete {
        /// Reservation ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl ReservationAction {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let api = &ctx.client;
        match self {
            ReservationAction::List { client } => {
                let query = client.map(|id| id.to_string()).unwrap_or_default();
                let reservations = api.search_reservations(&query).await?;
                ctx.emit(&reservations, |r| table(r))?;
            }
            ReservationAction::Create {
                client,
                service,
                room,
                check_in,
                check_out,
                guests,
                status,
                description,
            } => {
                let draft = ReservationDraft {
                    reserva_id: None,
                    cliente_id: Some(client),
                    servicio_id: Some(service),
                    habitacion: room,
                    fecha_entrada: Some(check_in),
                    fecha_salida: Some(check_out),
                    cantidad_personas: guests,
                    estado: status,
                    descripcion: description,
                };
                match api.create_reservation(&draft).await? {
                    Some(created) => ctx.emit(&created, |r| table(std::slice::from_ref(r)))?,
                    None => println!("Reservation for room {} created.", draft.habitacion),
                }
            }
            ReservationAction::Update {
                id,
                client,
                service,
                room,
                check_in,
                check_out,
                guests,
                status,
                description,
            } => {
                let current = find(ctx, id).await?;
                let mut draft = ReservationDraft::from(&current);
                if client.is_some() {
                    draft.cliente_id = client;
                }
                if service.is_some() {
                    draft.servicio_id = service;
                }
                if let Some(room) = room {
                    draft.habitacion = room;
                }
                if check_in.is_some() {
                    draft.fecha_entrada = check_in;
                }
                if check_out.is_some() {
                    draft.fecha_salida = check_out;
                }
                if let Some(guests) = guests {
                    draft.cantidad_personas = guests;
                }
                if let Some(status) = status {
                    draft.estado = status;
                }
                if description.is_some() {
                    draft.descripcion = description;
                }
                api.update_reservation(id, &draft).await?;
                println!("Reservation {id} updated.");
            }
            ReservationAction::CycleStatus { id } => {
                let current = find(ctx, id).await?;
                let status = api.cycle_reservation_status(&current).await?;
                println!("Reservation {id} is now {status}.");
            }
            ReservationAction::SetStatus { id, status } => {
                api.set_reservation_status(id, status).await?;
                println!("Reservation {id} is now {status}.");
            }
            ReservationAction::Delete { id, yes } => {
                if !confirm(&format!("Delete reservation {id}?"), yes)? {
                    println!("Aborted.");
                    return Ok(());
                }
                api.delete_reservation(id).await?;
                println!("Reservation {id} deleted.");
            }
        }
        Ok(())
    }
}

async fn find(ctx: &Context, id: i64) -> anyhow::Result<Reservation> {
    ctx.client
        .list_reservations()
        .await?
        .into_iter()
        .find(|r| r.reserva_id == id)
        .with_context(|| format!("Reservation {id} not found"))
}

fn table(reservations: &[Reservation]) -> String {
    let rows: Vec<Vec<String>> = reservations
        .iter()
        .map(|r| {
            vec![
                r.reserva_id.to_string(),
                r.cliente_id.to_string(),
                r.servicio_id.to_string(),
                r.habitacion.clone(),
                format::date(&r.fecha_entrada),
                format::date(&r.fecha_salida),
                r.cantidad_personas.to_string(),
                format::status(r.estado).to_string(),
            ]
        })
        .collect();
    format::table(
        &[
            "ID",
            "Client",
            "Service",
            "Room",
            "Check-in",
            "Check-out",
            "Guests",
            "Status",
        ],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        action: ReservationAction,
    }

    #[test]
    fn test_create_parses_dates_and_status() {
        let harness = Harness::try_parse_from([
            "test",
            "create",
            "--client",
            "1",
            "--service",
            "2",
            "--room",
            "204",
            "--check-in",
            "01/06/2025",
            "--check-out",
            "2025-06-04",
            "--status",
            "confirmada",
        ])
        .unwrap();
        match harness.action {
            ReservationAction::Create {
                check_in,
                check_out,
                guests,
                status,
                ..
            } => {
                assert_eq!(check_in, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
                assert_eq!(check_out, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
                assert_eq!(guests, 1);
                assert_eq!(status, ReservationStatus::Confirmed);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_set_status_rejects_unknown_status() {
        assert!(Harness::try_parse_from(["test", "set-status", "10", "maybe"]).is_err());
    }

    #[test]
    fn test_table_formats_dates() {
        let out = table(&[Reservation {
            reserva_id: 10,
            cliente_id: 1,
            servicio_id: 2,
            habitacion: "204".into(),
            fecha_entrada: "2025-06-01T00:00:00".into(),
            fecha_salida: "2025-06-04T00:00:00".into(),
            cantidad_personas: 2,
            estado: ReservationStatus::Cancelled,
            descripcion: None,
        }]);
        assert!(out.contains("01/06/2025"));
        assert!(out.contains("04/06/2025"));
        assert!(out.contains("Cancelled"));
    }

    #[tokio::test]
    async fn test_list_for_unknown_client_is_empty() {
        use axum::Router;
        use axum::http::StatusCode;
        use axum::routing::get;
        use common::session::SessionStore;
        use hotel_sdk::HotelClient;

        use crate::commands::OutputFormat;

        let app = Router::new().route(
            "/api/Reservas/cliente/:id",
            get(|| async { (StatusCode::NOT_FOUND, "Reservas del cliente no encontrado") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            client: HotelClient::new(&format!("http://{addr}/api")).unwrap(),
            store: SessionStore::new(dir.path().join("session.json")),
            format: OutputFormat::Json,
        };
        let action = ReservationAction::List { client: Some(42) };
        action.run(&ctx).await.unwrap();
    }
}
