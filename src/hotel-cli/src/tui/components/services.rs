//! Services screen. The API has no search endpoint for services, so the list
//! is filtered locally as the user types.

use crossterm::event::{KeyCode, KeyEvent};
use hotel_api::{Service, ServiceDraft, ValidationError};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use super::confirm_dialog::{ConfirmDialog, ConfirmResult};
use super::form::{Form, FormOutcome};
use super::{Component, PaneView, active_color, header_style, move_selection, row_style};
use crate::format;
use crate::tui::action::Action;
use crate::tui::client::{ConsoleClient, ConsoleClientError};
use crate::tui::state::AppState;
use crate::tui::widgets::text_input::{TextInput, TextInputAction};

const NAME: usize = 0;
const DESCRIPTION: usize = 1;
const PRICE: usize = 2;
const DURATION: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOp {
    Create(ServiceDraft),
    Update(i64, ServiceDraft),
    /// Carries the whole record since toggling re-sends it
    Toggle(Service),
    Delete(i64),
}

pub struct ServicesPanel {
    services: Vec<Service>,
    /// Index into [`visible`](Self::visible)
    selected: usize,
    view: PaneView,
    form: Form,
    search: TextInput,
    searching: bool,
    confirm: ConfirmDialog,
    delete_target: Option<i64>,
    pending: Option<ServiceOp>,
    stale: bool,
}

impl Default for ServicesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ServicesPanel {
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            selected: 0,
            view: PaneView::Empty,
            form: Form::new(&[
                ("Name", "Spa, Breakfast, ..."),
                ("Description", "Optional"),
                ("Price (COP)", "120000"),
                ("Duration (minutes)", "90"),
            ]),
            search: TextInput::with_placeholder("Filter by name or description"),
            searching: false,
            confirm: ConfirmDialog::new(),
            delete_target: None,
            pending: None,
            stale: true,
        }
    }

    pub fn set_data(&mut self, services: Vec<Service>) {
        self.services = services;
        self.clamp_selection();
        if let PaneView::Edit(id) = self.view {
            if !self.services.iter().any(|s| s.servicio_id == id) {
                self.view = PaneView::Empty;
            }
        }
    }

    /// Services matching the search text
    pub fn visible(&self) -> Vec<&Service> {
        let query = self.search.text();
        self.services.iter().filter(|s| s.matches(query)).collect()
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.visible().get(self.selected).copied()
    }

    pub async fn sync(&mut self, client: &ConsoleClient) -> Result<(), ConsoleClientError> {
        if let Some(op) = self.pending.take() {
            self.stale = true;
            let result = match &op {
                ServiceOp::Create(draft) => client.create_service(draft).await,
                ServiceOp::Update(id, draft) => client.update_service(*id, draft).await,
                ServiceOp::Toggle(service) => client.toggle_service(service).await,
                ServiceOp::Delete(id) => client.delete_service(*id).await,
            };
            let from_form = matches!(op, ServiceOp::Create(_) | ServiceOp::Update(..));
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
        let services = client.list_services().await?;
        self.set_data(services);
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn draft_from_form(&self) -> Result<ServiceDraft, ValidationError> {
        let price = self.form.value(PRICE);
        let precio = if price.is_empty() {
            0.0
        } else {
            price.parse::<f64>().map_err(|_| ValidationError::InvalidField {
                field: "price",
                value: price.to_string(),
            })?
        };
        let duration = self.form.value(DURATION);
        let duracion_minutos = if duration.is_empty() {
            0
        } else {
            duration.parse::<u32>().map_err(|_| ValidationError::InvalidField {
                field: "duration",
                value: duration.to_string(),
            })?
        };

        let base = match self.view {
            PaneView::Edit(id) => self
                .services
                .iter()
                .find(|s| s.servicio_id == id)
                .map(ServiceDraft::from)
                .unwrap_or_default(),
            _ => ServiceDraft::default(),
        };
        let draft = ServiceDraft {
            nombre: self.form.value(NAME).to_string(),
            descripcion: self.form.value(DESCRIPTION).to_string(),
            precio,
            duracion_minutos,
            ..base
        };
        draft.validate()?;
        Ok(draft)
    }

    fn submit_form(&mut self) {
        match self.draft_from_form() {
            Ok(draft) => {
                self.pending = Some(match self.view {
                    PaneView::Edit(id) => ServiceOp::Update(id, draft),
                    _ => ServiceOp::Create(draft),
                });
            }
            Err(e) => self.form.set_error(e.to_string()),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search.handle_key(key) {
            TextInputAction::Submit => self.searching = false,
            TextInputAction::Cancel => {
                self.search.clear();
                self.searching = false;
            }
            TextInputAction::Changed | TextInputAction::Unhandled => {}
        }
        self.clamp_selection();
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        let len = self.visible().len();
        if move_selection(&mut self.selected, len, &key) {
            return true;
        }
        match key.code {
            KeyCode::Enter if len > 0 => self.view = PaneView::Detail,
            KeyCode::Esc => self.view = PaneView::Empty,
            KeyCode::Char('c') => {
                self.form.reset();
                self.view = PaneView::Create;
            }
            KeyCode::Char('e') => {
                let Some(service) = self.selected_service() else {
                    return true;
                };
                let id = service.servicio_id;
                let values = [
                    service.nombre.clone(),
                    service.descripcion.clone().unwrap_or_default(),
                    service.precio.to_string(),
                    service.duracion_minutos.to_string(),
                ];
                self.form.load(&values);
                self.view = PaneView::Edit(id);
            }
            KeyCode::Char('t') => {
                if let Some(service) = self.selected_service().cloned() {
                    self.pending = Some(ServiceOp::Toggle(service));
                }
            }
            KeyCode::Char('d') => {
                if let Some(service) = self.selected_service() {
                    let message = format!("Delete service '{}'?", service.nombre);
                    self.delete_target = Some(service.servicio_id);
                    self.confirm.show(message);
                }
            }
            KeyCode::Char('/') => self.searching = true,
            _ => return false,
        }
        true
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["ID", "Name", "Price", "Duration", "Status"]
                .map(|h| Cell::from(h).style(header_style())),
        );

        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                Row::new(vec![
                    Cell::from(s.servicio_id.to_string()),
                    Cell::from(s.nombre.clone()),
                    Cell::from(format::currency(s.precio)),
                    Cell::from(format::duration(s.duracion_minutos)),
                    Cell::from(format::active(s.activo))
                        .style(Style::default().fg(active_color(s.activo))),
                ])
                .style(row_style(i == self.selected))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(35),
                Constraint::Length(16),
                Constraint::Length(9),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Services (c: create, e: edit, t: toggle, d: delete) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Detail ").borders(Borders::ALL);
        let text = match (self.view, self.selected_service()) {
            (PaneView::Detail, Some(s)) => {
                let label = Style::default().fg(Color::DarkGray);
                vec![
                    Line::from(vec![Span::styled("ID:          ", label), Span::raw(s.servicio_id.to_string())]),
                    Line::from(vec![Span::styled("Name:        ", label), Span::raw(s.nombre.as_str())]),
                    Line::from(vec![Span::styled("Price:       ", label), Span::raw(format::currency(s.precio))]),
                    Line::from(vec![
                        Span::styled("Duration:    ", label),
                        Span::raw(format::duration(s.duracion_minutos)),
                    ]),
                    Line::from(vec![
                        Span::styled("Status:      ", label),
                        Span::styled(format::active(s.activo), Style::default().fg(active_color(s.activo))),
                    ]),
                    Line::from(""),
                    Line::from(s.descripcion.as_deref().unwrap_or("No description")),
                ]
            }
            _ => vec![Line::styled(
                "Select a service or press 'c' to create",
                Style::default().fg(Color::DarkGray),
            )],
        };
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl Component for ServicesPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(result) = self.confirm.handle_key(key) {
            match result {
                ConfirmResult::Confirmed => {
                    self.pending = self.delete_target.take().map(ServiceOp::Delete);
                }
                ConfirmResult::Cancelled => self.delete_target = None,
                ConfirmResult::Pending => {}
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

        let show_search = self.searching || !self.search.is_blank();
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if show_search { 3 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        if show_search {
            self.search.render(frame, left[0], "Filter", self.searching);
        }
        self.render_list(frame, left[1]);

        match self.view {
            PaneView::Create => self.form.render(frame, columns[1], "New service"),
            PaneView::Edit(id) => {
                self.form
                    .render(frame, columns[1], &format!("Edit service #{id}"))
            }
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
