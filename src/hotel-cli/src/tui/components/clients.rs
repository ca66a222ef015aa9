//! Clients screen: guest list with create, edit, toggle and delete.

use crossterm::event::{KeyCode, KeyEvent};
use hotel_api::{Client, ClientDraft};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::confirm_dialog::{ConfirmDialog, ConfirmResult};
use super::form::{Form, FormOutcome};
use super::{Component, PaneView, active_color, header_style, move_selection, row_style};
use crate::format;
use crate::tui::action::Action;
use crate::tui::client::{ConsoleClient, ConsoleClientError};
use crate::tui::state::AppState;
use crate::tui::widgets::text_input::{TextInput, TextInputAction};

const NAME: usize = 0;
const EMAIL: usize = 1;
const PHONE: usize = 2;
const ADDRESS: usize = 3;

/// Write requested by the user, sent on the next sync
#[derive(Debug, Clone, PartialEq)]
pub enum ClientOp {
    Create(ClientDraft),
    Update(i64, ClientDraft),
    Toggle(i64),
    Delete(i64),
}

pub struct ClientsPanel {
    clients: Vec<Client>,
    selected: usize,
    view: PaneView,
    form: Form,
    search: TextInput,
    searching: bool,
    /// Email filter currently applied to the list
    query: String,
    active_only: bool,
    confirm: ConfirmDialog,
    delete_target: Option<i64>,
    pending: Option<ClientOp>,
    stale: bool,
}

impl Default for ClientsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientsPanel {
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
            selected: 0,
            view: PaneView::Empty,
            form: Form::new(&[
                ("Name", "Full name"),
                ("Email", "guest@example.com"),
                ("Phone", "Optional"),
                ("Address", "Optional"),
            ]),
            search: TextInput::with_placeholder("Search by email, Enter to apply"),
            searching: false,
            query: String::new(),
            active_only: false,
            confirm: ConfirmDialog::new(),
            delete_target: None,
            pending: None,
            stale: true,
        }
    }

    pub fn set_data(&mut self, clients: Vec<Client>) {
        self.clients = clients;
        if self.selected >= self.clients.len() {
            self.selected = self.clients.len().saturating_sub(1);
        }
        if let PaneView::Edit(id) = self.view {
            if !self.clients.iter().any(|c| c.cliente_id == id) {
                self.view = PaneView::Empty;
            }
        }
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.clients.get(self.selected)
    }

    /// Apply the pending write, if any, then reload the list.
    pub async fn sync(&mut self, client: &ConsoleClient) -> Result<(), ConsoleClientError> {
        if let Some(op) = self.pending.take() {
            self.stale = true;
            let result = match &op {
                ClientOp::Create(draft) => client.create_client(draft).await,
                ClientOp::Update(id, draft) => client.update_client(*id, draft).await,
                ClientOp::Toggle(id) => client.toggle_client(*id).await,
                ClientOp::Delete(id) => client.delete_client(*id).await,
            };
            let from_form = matches!(op, ClientOp::Create(_) | ClientOp::Update(..));
            match result {
                Ok(()) if from_form => self.view = PaneView::Empty,
                Ok(()) => {}
                Err(e) => {
                    if from_form {
                        self.form.set_error(e.to_string());
                    }
                    return Err(e);
                }
            }
        }

        self.stale = false;
        let clients = client.search_clients(&self.query, self.active_only).await?;
        self.set_data(clients);
        Ok(())
    }

    fn draft_from_form(&self) -> ClientDraft {
        let base = match self.view {
            PaneView::Edit(id) => self
                .clients
                .iter()
                .find(|c| c.cliente_id == id)
                .map(ClientDraft::from)
                .unwrap_or_default(),
            _ => ClientDraft::default(),
        };
        ClientDraft {
            nombre: self.form.value(NAME).to_string(),
            email: self.form.value(EMAIL).to_string(),
            telefono: self.form.value(PHONE).to_string(),
            direccion: self.form.value(ADDRESS).to_string(),
            ..base
        }
    }

    fn submit_form(&mut self) {
        let draft = self.draft_from_form();
        if let Err(e) = draft.validate() {
            self.form.set_error(e.to_string());
            return;
        }
        self.pending = Some(match self.view {
            PaneView::Edit(id) => ClientOp::Update(id, draft),
            _ => ClientOp::Create(draft),
        });
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search.handle_key(key) {
            TextInputAction::Submit => {
                self.query = self.search.text().trim().to_string();
                self.searching = false;
                self.stale = true;
            }
            TextInputAction::Cancel => {
                self.search.clear();
                self.searching = false;
                if !self.query.is_empty() {
                    self.query.clear();
                    self.stale = true;
                }
            }
            TextInputAction::Changed | TextInputAction::Unhandled => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        if move_selection(&mut self.selected, self.clients.len(), &key) {
            return true;
        }
        match key.code {
            KeyCode::Enter if !self.clients.is_empty() => self.view = PaneView::Detail,
            KeyCode::Esc => self.view = PaneView::Empty,
            KeyCode::Char('c') => {
                self.form.reset();
                self.view = PaneView::Create;
            }
            KeyCode::Char('e') => {
                let Some(client) = self.selected_client() else {
                    return true;
                };
                let id = client.cliente_id;
                let values = [
                    client.nombre.clone(),
                    client.email.clone(),
                    client.telefono.clone().unwrap_or_default(),
                    client.direccion.clone().unwrap_or_default(),
                ];
                self.form.load(&values);
                self.view = PaneView::Edit(id);
            }
            KeyCode::Char('t') => {
                if let Some(client) = self.selected_client() {
                    self.pending = Some(ClientOp::Toggle(client.cliente_id));
                }
            }
            KeyCode::Char('d') => {
                if let Some(client) = self.selected_client() {
                    let message = format!("Delete client '{}'?", client.nombre);
                    self.delete_target = Some(client.cliente_id);
                    self.confirm.show(message);
                }
            }
            KeyCode::Char('/') => {
                self.search.set_text(&self.query);
                self.searching = true;
            }
            KeyCode::Char('a') => {
                self.active_only = !self.active_only;
                self.stale = true;
            }
            _ => return false,
        }
        true
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["ID", "Name", "Email", "Phone", "Status"]
                .map(|h| Cell::from(h).style(header_style())),
        );

        let rows: Vec<Row> = self
            .clients
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let status = Cell::from(format::active(c.activo))
                    .style(Style::default().fg(active_color(c.activo)));
                Row::new(vec![
                    Cell::from(c.cliente_id.to_string()),
                    Cell::from(c.nombre.clone()),
                    Cell::from(c.email.clone()),
                    Cell::from(c.telefono.clone().unwrap_or_default()),
                    status,
                ])
                .style(row_style(i == self.selected))
            })
            .collect();

        let filter = if self.active_only { " [active only]" } else { "" };
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(30),
                Constraint::Percentage(35),
                Constraint::Percentage(20),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Clients{filter} (c: create, e: edit, t: toggle, d: delete, a: active) "
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Detail ").borders(Borders::ALL);
        let text = match (self.view, self.selected_client()) {
            (PaneView::Detail, Some(c)) => {
                let label = Style::default().fg(Color::DarkGray);
                vec![
                    Line::from(vec![Span::styled("ID:      ", label), Span::raw(c.cliente_id.to_string())]),
                    Line::from(vec![Span::styled("Name:    ", label), Span::raw(c.nombre.as_str())]),
                    Line::from(vec![Span::styled("Email:   ", label), Span::raw(c.email.as_str())]),
                    Line::from(vec![
                        Span::styled("Phone:   ", label),
                        Span::raw(c.telefono.as_deref().unwrap_or("-")),
                    ]),
                    Line::from(vec![
                        Span::styled("Address: ", label),
                        Span::raw(c.direccion.as_deref().unwrap_or("-")),
                    ]),
                    Line::from(vec![
                        Span::styled("Status:  ", label),
                        Span::styled(
                            format::active(c.activo),
                            Style::default().fg(active_color(c.activo)),
                        ),
                    ]),
                ]
            }
            _ => vec![Line::styled(
                "Select a client or press 'c' to create",
                Style::default().fg(Color::DarkGray),
            )],
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}

impl Component for ClientsPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(result) = self.confirm.handle_key(key) {
            if result == ConfirmResult::Confirmed {
                self.pending = self.delete_target.take().map(ClientOp::Delete);
            } else if result == ConfirmResult::Cancelled {
                self.delete_target = None;
            }
            return Some(Action::None);
        }

        if self.searching {
            self.handle_search_key(key);
            return Some(Action::None);
        }

        if self.view.is_form() {
            match self.form.handle_key(key) {
                FormOutcome::Submit => self.submit_form(),
                FormOutcome::Cancel => self.view = PaneView::Empty,
                FormOutcome::Editing => {}
            }
            return Some(Action::None);
        }

        self.handle_list_key(key).then_some(Action::None)
    }

    fn update(&mut self, action: &Action, _state: &mut AppState) {
        if *action == Action::Refresh {
            self.stale = true;
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let show_search = self.searching || !self.query.is_empty();
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if show_search { 3 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        if show_search {
            if self.searching {
                self.search.render(frame, left[0], "Search", true);
            } else {
                let applied = Paragraph::new(format!("Email: {}  (/ to change, Esc in search to clear)", self.query))
                    .block(Block::default().title(" Search ").borders(Borders::ALL));
                frame.render_widget(applied, left[0]);
            }
        }
        self.render_list(frame, left[1]);

        match self.view {
            PaneView::Create => self.form.render(frame, columns[1], "New client"),
            PaneView::Edit(id) => self.form.render(frame, columns[1], &format!("Edit client #{id}")),
            PaneView::Empty | PaneView::Detail => self.render_detail(frame, columns[1]),
        }

        self.confirm.render(frame, area);
    }

    fn needs_sync(&self) -> bool {
        self.stale || self.pending.is_some()
    }

    fn has_pending_write(&self) -> bool {
        self.pending.is_some()
    }
}
