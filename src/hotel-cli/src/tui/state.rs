//! Application state shared by every console screen

use std::time::{Duration, SystemTime};

/// Screens reachable from the tab bar once signed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Clients,
    Services,
    Reservations,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Clients, Tab::Services, Tab::Reservations];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Clients => "Clients",
            Tab::Services => "Services",
            Tab::Reservations => "Reservations",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Dashboard => '1',
            Tab::Clients => '2',
            Tab::Services => '3',
            Tab::Reservations => '4',
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Outcome of the last request to the hotel API
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Connecting,
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// Email of the signed-in user; `None` shows the login screen
    pub signed_in_as: Option<String>,
    pub active_tab: Tab,
    pub connection_status: ConnectionStatus,
    pub last_error: Option<String>,
    pub last_error_at: Option<SystemTime>,
    pub refresh_rate: Duration,
    /// Hotel API base URL
    pub url: String,
}

impl AppState {
    pub fn new(url: String, refresh_rate: Duration) -> Self {
        Self {
            signed_in_as: None,
            active_tab: Tab::Dashboard,
            connection_status: ConnectionStatus::Disconnected,
            last_error: None,
            last_error_at: None,
            refresh_rate,
            url,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in_as.is_some()
    }

    /// Enter the main screens, starting from the dashboard.
    pub fn sign_in(&mut self, email: impl Into<String>) {
        self.signed_in_as = Some(email.into());
        self.active_tab = Tab::Dashboard;
        self.clear_error();
    }

    pub fn sign_out(&mut self) {
        self.signed_in_as = None;
        self.active_tab = Tab::Dashboard;
        self.connection_status = ConnectionStatus::Disconnected;
        self.clear_error();
    }

    /// Set the latest user-visible error with timestamp.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.last_error_at = Some(SystemTime::now());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.last_error_at = None;
    }

    /// Switch to the next tab (wraps around)
    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % Tab::ALL.len();
        self.active_tab = Tab::ALL[next];
    }

    /// Switch to the previous tab (wraps around)
    pub fn prev_tab(&mut self) {
        let len = Tab::ALL.len();
        let prev = (self.active_tab.index() + len - 1) % len;
        self.active_tab = Tab::ALL[prev];
    }

    /// Out-of-range indexes are ignored.
    pub fn switch_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::ALL.get(index) {
            self.active_tab = *tab;
        }
    }
}
