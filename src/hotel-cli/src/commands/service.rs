use anyhow::Context as _;
use clap::Subcommand;
use hotel_api::{Service, ServiceDraft};

use super::{Context, confirm};
use crate::format;

#[derive(Subcommand)]
pub enum ServiceAction {
    /// List services
    List {
        /// Only services whose name or description contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a new service
    Create {
        /// Service name
        #[arg(long)]
        name: String,
        /// Price in Colombian pesos
        #[arg(long)]
        price: f64,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Create the service as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Update a service
    Update {
        /// Service ID
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New price
        #[arg(long)]
        price: Option<f64>,
        /// New duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Flip a service between active and inactive
    Toggle {
        /// Service ID
        id: i64,
    },
    /// Delete a service
    Delete {
        /// Service ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl ServiceAction {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let client = &ctx.client;
        match self {
            ServiceAction::List { search } => {
                let services = match search {
                    Some(query) => client.search_services(&query).await?,
                    None => client.list_services().await?,
                };
                ctx.emit(&services, |s| table(s))?;
            }
            ServiceAction::Create {
                name,
                price,
                duration,
                description,
                inactive,
            } => {
                let draft = ServiceDraft {
                    servicio_id: None,
                    nombre: name,
                    descripcion: description.unwrap_or_default(),
                    precio: price,
                    duracion_minutos: duration,
                    activo: !inactive,
                };
                match client.create_service(&draft).await? {
                    Some(created) => ctx.emit(&created, |s| table(std::slice::from_ref(s)))?,
                    None => println!("Service '{}' created.", draft.nombre),
                }
            }
            ServiceAction::Update {
                id,
                name,
                price,
                duration,
                description,
            } => {
                let current = find(ctx, id).await?;
                let mut draft = ServiceDraft::from(&current);
                if let Some(name) = name {
                    draft.nombre = name;
                }
                if let Some(price) = price {
                    draft.precio = price;
                }
                if let Some(duration) = duration {
                    draft.duracion_minutos = duration;
                }
                if let Some(description) = description {
                    draft.descripcion = description;
                }
                client.update_service(id, &draft).await?;
                println!("Service {id} updated.");
            }
            ServiceAction::Toggle { id } => {
                let current = find(ctx, id).await?;
                let active = client.toggle_service(&current).await?;
                println!(
                    "Service '{}' is now {}.",
                    current.nombre,
                    format::active(active).to_lowercase()
                );
            }
            ServiceAction::Delete { id, yes } => {
                if !confirm(&format!("Delete service {id}?"), yes)? {
                    println!("Aborted.");
                    return Ok(());
                }
                client.delete_service(id).await?;
                println!("Service {id} deleted.");
            }
        }
        Ok(())
    }
}

async fn find(ctx: &Context, id: i64) -> anyhow::Result<Service> {
    ctx.client
        .list_services()
        .await?
        .into_iter()
        .find(|s| s.servicio_id == id)
        .with_context(|| format!("Service {id} not found"))
}

fn table(services: &[Service]) -> String {
    let rows: Vec<Vec<String>> = services
        .iter()
        .map(|s| {
            vec![
                s.servicio_id.to_string(),
                s.nombre.clone(),
                format::currency(s.precio),
                format::duration(s.duracion_minutos),
                format::active(s.activo).to_string(),
            ]
        })
        .collect();
    format::table(&["ID", "Name", "Price", "Duration", "Status"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_formats_price_and_duration() {
        let out = table(&[Service {
            servicio_id: 1,
            nombre: "Spa".into(),
            descripcion: None,
            precio: 120000.0,
            duracion_minutos: 90,
            activo: true,
        }]);
        assert!(out.contains("$ 120.000,00"));
        assert!(out.contains("1h 30m"));
        assert!(out.contains("Active"));
    }
}
