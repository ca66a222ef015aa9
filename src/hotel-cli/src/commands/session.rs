use anyhow::Context as _;
use common::session::Session;
use serde_json::json;

use super::{Context, OutputFormat};

pub async fn login(ctx: &mut Context, email: String, password: Option<String>) -> anyhow::Result<()> {
    let Some(password) = password else {
        anyhow::bail!("A password is required: pass --password or set HOTEL_PASSWORD");
    };

    match ctx.client.login(&email, &password).await? {
        Some(token) => {
            ctx.store
                .save(&Session::new(token, email.as_str()))
                .context("Failed to store session")?;
            println!("Signed in as {email}.");
        }
        None => {
            println!("Signed in as {email}, but the API returned no token; nothing was stored.");
        }
    }
    Ok(())
}

pub fn logout(ctx: &mut Context) -> anyhow::Result<()> {
    ctx.client.logout();
    if ctx.store.clear().context("Failed to remove session")? {
        println!("Signed out.");
    } else {
        println!("No stored session.");
    }
    Ok(())
}

pub fn whoami(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.store.load().context("Failed to read session")?;
    match (ctx.format, session) {
        (OutputFormat::Json, session) => {
            let value = json!({
                "api": ctx.client.base_url(),
                "email": session.as_ref().map(|s| s.email.as_str()),
                "signed_in_at": session.as_ref().map(|s| s.created_at),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        (OutputFormat::Table, Some(session)) => {
            println!(
                "{} (since {}) on {}",
                session.email,
                session
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%d/%m/%Y %H:%M"),
                ctx.client.base_url()
            );
        }
        (OutputFormat::Table, None) => println!("Not signed in."),
    }
    Ok(())
}
