//! Interactive terminal console for the hotel API

pub mod action;
pub mod app;
pub mod client;
pub mod components;
pub mod event;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub mod test_helpers;

use common::config::Configuration;
use common::session::SessionStore;
use hotel_sdk::HotelClient;

use self::app::App;
use self::client::ConsoleClient;

/// Open the console against the configured API until the user quits.
pub async fn run(config: Configuration) -> anyhow::Result<()> {
    let api = HotelClient::with_timeout(&config.api.base_url, config.api.timeout)?;
    let store = SessionStore::new(config.session.session_file.clone());
    tracing::info!(url = %config.api.base_url, "starting console");

    let mut app = App::new(ConsoleClient::new(api, store), config.console.refresh_rate);
    app.run().await
}
