pub mod client;
pub mod reservation;
pub mod service;
pub mod session;

use std::io::{BufRead, Write};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use common::cli::{CommonArgs, CommonCommands, utils};
use common::config::Configuration;
use common::session::SessionStore;
use hotel_sdk::HotelClient;
use serde::Serialize;

use crate::tui;

/// Hotel SGS admin console: manage clients, services and reservations
#[derive(Parser)]
#[command(name = "hotel-sgs", version, about)]
pub struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Hotel API base URL, overriding the configuration file
    #[arg(long, global = true, env = "HOTEL_URL")]
    url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the bearer token
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "HOTEL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show who is signed in
    Whoami,
    /// Manage clients
    Client {
        #[command(subcommand)]
        action: client::ClientAction,
    },
    /// Manage services
    Service {
        #[command(subcommand)]
        action: service::ServiceAction,
    },
    /// Manage reservations
    Reservation {
        #[command(subcommand)]
        action: reservation::ReservationAction,
    },
    /// Show record counts
    Dashboard,
    /// Start the interactive terminal console
    Console,
    #[command(flatten)]
    Common(CommonCommands),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Everything a subcommand needs to talk to the API
pub struct Context {
    pub client: HotelClient,
    pub store: SessionStore,
    pub format: OutputFormat,
}

impl Context {
    /// Print `value` as JSON or through `render` as a table
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        render: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => println!("{}", render(value)),
        }
        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = utils::load_config(self.common.config.as_ref())?;
        if let Some(url) = &self.url {
            config.api.base_url = url.clone();
        }

        if let Commands::Console = self.command {
            utils::validate_config(&config)?;
            utils::init_file_logging(&self.common, &config.console.log_file)?;
            return tui::run(config).await;
        }

        utils::init_logging(&self.common);

        if let Commands::Common(command) = &self.command {
            return utils::handle_common_command(command, &config);
        }

        let mut ctx = connect(&config, self.format)?;

        match self.command {
            Commands::Login { email, password } => session::login(&mut ctx, email, password).await,
            Commands::Logout => session::logout(&mut ctx),
            Commands::Whoami => session::whoami(&ctx),
            Commands::Client { action } => action.run(&ctx).await,
            Commands::Service { action } => action.run(&ctx).await,
            Commands::Reservation { action } => action.run(&ctx).await,
            Commands::Dashboard => dashboard(&ctx).await,
            Commands::Console | Commands::Common(_) => Ok(()),
        }
    }
}

/// Build the API client, carrying the stored token if there is one
pub fn connect(config: &Configuration, format: OutputFormat) -> anyhow::Result<Context> {
    let store = SessionStore::new(&config.session.session_file);
    let client = HotelClient::with_timeout(&config.api.base_url, config.api.timeout)
        .with_context(|| format!("Invalid API URL '{}'", config.api.base_url))?
        .with_token(store.token());
    tracing::debug!(url = client.base_url(), signed_in = client.token().is_some(), "client ready");
    Ok(Context {
        client,
        store,
        format,
    })
}

async fn dashboard(ctx: &Context) -> anyhow::Result<()> {
    let counts = ctx
        .client
        .dashboard_counts()
        .await
        .context("Failed to load dashboard")?;
    ctx.emit(&counts, |c| {
        crate::format::table(
            &["Clients", "Services", "Reservations"],
            &[vec![
                c.clients.to_string(),
                c.services.to_string(),
                c.reservations.to_string(),
            ]],
        )
    })
}

/// Ask for a yes/no answer on stdin unless `assume_yes` is set
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    confirm_from(prompt, &mut stdin.lock(), &mut std::io::stderr())
}

fn confirm_from(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    ))
}
