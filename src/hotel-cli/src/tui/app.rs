//! Main console application: owns the event loop, terminal, and render cycle.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use super::action::{Action, is_force_quit, map_key_to_action};
use super::client::ConsoleClient;
use super::components::Component;
use super::components::clients::ClientsPanel;
use super::components::dashboard::Dashboard;
use super::components::login::LoginScreen;
use super::components::reservations::ReservationsPanel;
use super::components::services::ServicesPanel;
use super::components::status_bar::StatusBar;
use super::components::tabs::TabBar;
use super::event::{Event, EventHandler};
use super::state::{AppState, ConnectionStatus, Tab};
use super::terminal::Tui;

/// Top-level console application.
pub struct App {
    running: bool,
    pub state: AppState,
    client: ConsoleClient,
    tab_bar: TabBar,
    status_bar: StatusBar,
    login: LoginScreen,
    dashboard: Dashboard,
    clients: ClientsPanel,
    services: ServicesPanel,
    reservations: ReservationsPanel,
}

impl App {
    /// A session left in the store skips the login screen.
    pub fn new(client: ConsoleClient, refresh_rate: Duration) -> Self {
        let mut state = AppState::new(client.base_url().to_string(), refresh_rate);
        if let Some(email) = client.stored_email() {
            tracing::info!(%email, "resuming stored session");
            state.sign_in(email);
        }
        Self {
            running: true,
            state,
            client,
            tab_bar: TabBar::new(),
            status_bar: StatusBar::new(),
            login: LoginScreen::new(),
            dashboard: Dashboard::new(),
            clients: ClientsPanel::new(),
            services: ServicesPanel::new(),
            reservations: ReservationsPanel::new(),
        }
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut tui = Tui::new()?;
        tui.init()?;

        let mut events = EventHandler::new(self.state.refresh_rate);

        while self.running {
            if self.needs_sync() {
                // Draw first so "Signing in..." and the like show while waiting
                tui.terminal.draw(|frame| self.render(frame))?;
                self.sync().await;
                continue;
            }

            match events.next().await? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick => {
                    if self.state.is_signed_in() {
                        self.refresh_active();
                    }
                }
                Event::Render => {
                    tui.terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn active_panel(&self) -> &dyn Component {
        match self.state.active_tab {
            Tab::Dashboard => &self.dashboard,
            Tab::Clients => &self.clients,
            Tab::Services => &self.services,
            Tab::Reservations => &self.reservations,
        }
    }

    fn active_panel_mut(&mut self) -> &mut dyn Component {
        match self.state.active_tab {
            Tab::Dashboard => &mut self.dashboard,
            Tab::Clients => &mut self.clients,
            Tab::Services => &mut self.services,
            Tab::Reservations => &mut self.reservations,
        }
    }

    fn needs_sync(&self) -> bool {
        self.login.has_submission()
            || (self.state.is_signed_in() && self.active_panel().needs_sync())
    }

    /// Send whatever the login screen or the active screen is waiting on.
    async fn sync(&mut self) {
        if let Some(credentials) = self.login.take_submission() {
            let result = self
                .client
                .login(&credentials.email, &credentials.password)
                .await;
            self.login.finish(&result);
            match result {
                Ok(()) => {
                    tracing::info!(email = %credentials.email, "signed in");
                    self.state.sign_in(credentials.email);
                    self.state.connection_status = ConnectionStatus::Connected;
                    self.mark_all_stale();
                }
                Err(e) if e.is_connection() => {
                    self.state.connection_status = ConnectionStatus::Disconnected;
                }
                Err(_) => self.state.connection_status = ConnectionStatus::Connected,
            }
            return;
        }

        if !self.state.is_signed_in() {
            return;
        }

        if self.active_panel().has_pending_write() {
            self.state.clear_error();
        }
        if self.state.connection_status == ConnectionStatus::Disconnected {
            self.state.connection_status = ConnectionStatus::Connecting;
        }

        let result = match self.state.active_tab {
            Tab::Dashboard => self.dashboard.sync(&self.client).await,
            Tab::Clients => self.clients.sync(&self.client).await,
            Tab::Services => self.services.sync(&self.client).await,
            Tab::Reservations => self.reservations.sync(&self.client).await,
        };

        match result {
            Ok(()) => self.state.connection_status = ConnectionStatus::Connected,
            Err(e) => {
                tracing::warn!(tab = self.state.active_tab.label(), "request failed: {e}");
                self.state.connection_status = if e.is_connection() {
                    ConnectionStatus::Disconnected
                } else {
                    ConnectionStatus::Connected
                };
                self.state.set_error(e.to_string());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_force_quit(&key) {
            self.running = false;
            return;
        }
        if !self.state.is_signed_in() {
            self.login.handle_key_event(key);
            return;
        }
        let action = self
            .active_panel_mut()
            .handle_key_event(key)
            .unwrap_or_else(|| map_key_to_action(key));
        self.handle_action(action);
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchTab(idx) => {
                self.state.switch_tab(idx);
                self.refresh_active();
            }
            Action::NextTab => {
                self.state.next_tab();
                self.refresh_active();
            }
            Action::PrevTab => {
                self.state.prev_tab();
                self.refresh_active();
            }
            Action::Refresh => self.refresh_active(),
            Action::Logout => self.logout(),
            Action::None => {}
        }
    }

    /// Mark the visible screen for reload on the next loop iteration
    fn refresh_active(&mut self) {
        let state = &mut self.state;
        match state.active_tab {
            Tab::Dashboard => self.dashboard.update(&Action::Refresh, state),
            Tab::Clients => self.clients.update(&Action::Refresh, state),
            Tab::Services => self.services.update(&Action::Refresh, state),
            Tab::Reservations => self.reservations.update(&Action::Refresh, state),
        }
    }

    fn mark_all_stale(&mut self) {
        let state = &mut self.state;
        self.dashboard.update(&Action::Refresh, state);
        self.clients.update(&Action::Refresh, state);
        self.services.update(&Action::Refresh, state);
        self.reservations.update(&Action::Refresh, state);
    }

    /// Forget the token and every loaded screen, back to the login form.
    fn logout(&mut self) {
        let result = self.client.logout();
        self.state.sign_out();
        self.login.reset();
        self.dashboard = Dashboard::new();
        self.clients = ClientsPanel::new();
        self.services = ServicesPanel::new();
        self.reservations = ReservationsPanel::new();
        match result {
            Ok(()) => tracing::info!("signed out"),
            Err(e) => {
                tracing::warn!("could not clear stored session: {e}");
                self.state.set_error(e.to_string());
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        if !self.state.is_signed_in() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(frame.area());
            self.login.render(frame, chunks[0], &self.state);
            self.status_bar.render(frame, chunks[1], &self.state);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);
        self.active_panel().render(frame, chunks[1], &self.state);
        self.status_bar.render(frame, chunks[2], &self.state);
    }
}
