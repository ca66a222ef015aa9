use anyhow::Context as _;
use clap::Subcommand;
use hotel_api::{Client, ClientDraft};

use super::{Context, confirm};
use crate::format;

#[derive(Subcommand)]
pub enum ClientAction {
    /// List clients
    List {
        /// Only active clients
        #[arg(long)]
        active: bool,
        /// Only the client with this email
        #[arg(long)]
        email: Option<String>,
    },
    /// Look up a client by email
    GetByEmail {
        /// Client email
        email: String,
    },
    /// Create a new client
    Create {
        /// Full name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Postal address
        #[arg(long)]
        address: Option<String>,
        /// Create the client as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Update a client
    Update {
        /// Client ID
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New address
        #[arg(long)]
        address: Option<String>,
    },
    /// Flip a client between active and inactive
    Toggle {
        /// Client ID
        id: i64,
    },
    /// Delete a client
    Delete {
        /// Client ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl ClientAction {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let client = &ctx.client;
        match self {
            ClientAction::List { active, email } => {
                let clients = match email {
                    Some(email) => client.search_clients(&email, active).await?,
                    None => client.list_clients(active).await?,
                };
                ctx.emit(&clients, |c| table(c))?;
            }
            ClientAction::GetByEmail { email } => {
                let found = client.find_client_by_email(&email).await?;
                ctx.emit(&found, |c| table(std::slice::from_ref(c)))?;
            }
            ClientAction::Create {
                name,
                email,
                phone,
                address,
                inactive,
            } => {
                let draft = ClientDraft {
                    cliente_id: None,
                    nombre: name,
                    email,
                    telefono: phone.unwrap_or_default(),
                    direccion: address.unwrap_or_default(),
                    activo: !inactive,
                };
                match client.create_client(&draft).await? {
                    Some(created) => ctx.emit(&created, |c| table(std::slice::from_ref(c)))?,
                    None => println!("Client '{}' created.", draft.nombre),
                }
            }
            ClientAction::Update {
                id,
                name,
                email,
                phone,
                address,
            } => {
                let current = find(ctx, id).await?;
                let mut draft = ClientDraft::from(&current);
                if let Some(name) = name {
                    draft.nombre = name;
                }
                if let Some(email) = email {
                    draft.email = email;
                }
                if let Some(phone) = phone {
                    draft.telefono = phone;
                }
                if let Some(address) = address {
                    draft.direccion = address;
                }
                client.update_client(id, &draft).await?;
                println!("Client {id} updated.");
            }
            ClientAction::Toggle { id } => {
                client.toggle_client(id).await?;
                println!("Client {id} status toggled.");
            }
            ClientAction::Delete { id, yes } => {
                if !confirm(&format!("Delete client {id}?"), yes)? {
                    println!("Aborted.");
                    return Ok(());
                }
                client.delete_client(id).await?;
                println!("Client {id} deleted.");
            }
        }
        Ok(())
    }
}

async fn find(ctx: &Context, id: i64) -> anyhow::Result<Client> {
    ctx.client
        .list_clients(false)
        .await?
        .into_iter()
        .find(|c| c.cliente_id == id)
        .with_context(|| format!("Client {id} not found"))
}

fn table(clients: &[Client]) -> String {
    let rows: Vec<Vec<String>> = clients
        .iter()
        .map(|c| {
            vec![
                c.cliente_id.to_string(),
                c.nombre.clone(),
                c.email.clone(),
                c.telefono.clone().unwrap_or_else(|| "-".into()),
                format::active(c.activo).to_string(),
            ]
        })
        .collect();
    format::table(&["ID", "Name", "Email", "Phone", "Status"], &rows)
}
