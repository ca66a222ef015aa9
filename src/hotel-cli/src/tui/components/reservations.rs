//! Reservations screen: bookings list, searchable by client id, with status
//! cycling.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent};
use hotel_api::{Reservation, ReservationDraft, ReservationStatus, ValidationError};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use super::confirm_dialog::{ConfirmDialog, ConfirmResult};
use super::form::{Form, FormOutcome};
use super::{Component, PaneView, header_style, move_selection, row_style};
use crate::format;
use crate::tui::action::Action;
use crate::tui::client::{ConsoleClient, ConsoleClientError};
use crate::tui::state::AppState;
use crate::tui::widgets::text_input::{TextInput, TextInputAction};

const CLIENT: usize = 0;
const SERVICE: usize = 1;
const ROOM: usize = 2;
const CHECK_IN: usize = 3;
const CHECK_OUT: usize = 4;
const GUESTS: usize = 5;
const STATUS: usize = 6;
const NOTES: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum ReservationOp {
    Create(ReservationDraft),
    Update(i64, ReservationDraft),
    /// Move to the next status in the Pending, Confirmed, Cancelled cycle
    Cycle(Reservation),
    Delete(i64),
}

pub struct ReservationsPanel {
    reservations: Vec<Reservation>,
    selected: usize,
    view: PaneView,
    form: Form,
    search: TextInput,
    searching: bool,
    /// Client id filter currently applied
    query: String,
    confirm: ConfirmDialog,
    delete_target: Option<i64>,
    pending: Option<ReservationOp>,
    stale: bool,
}

impl Default for ReservationsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn status_color(status: ReservationStatus) -> Color {
    match status {
        ReservationStatus::Pending => Color::Yellow,
        ReservationStatus::Confirmed => Color::Green,
        ReservationStatus::Cancelled => Color::Red,
    }
}

/// Blank input is `None`; anything else must parse.
fn parse_optional<T: FromStr>(
    value: &str,
    field: &'static str,
) -> Result<Option<T>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidField {
            field,
            value: value.to_string(),
        })
}

fn parse_optional_date(
    value: &str,
    field: &'static str,
) -> Result<Option<chrono::NaiveDate>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    format::parse_date(value)
        .map(Some)
        .map_err(|_| ValidationError::InvalidField {
            field,
            value: value.to_string(),
        })
}

impl ReservationsPanel {
    pub fn new() -> Self {
        Self {
            reservations: Vec::new(),
            selected: 0,
            view: PaneView::Empty,
            form: Form::new(&[
                ("Client ID", "e.g. 3"),
                ("Service ID", "e.g. 1"),
                ("Room", "e.g. 204"),
                ("Check-in", "dd/mm/yyyy"),
                ("Check-out", "dd/mm/yyyy"),
                ("Guests", "1"),
                ("Status", "Pendiente, Confirmada or Cancelada"),
                ("Notes", "Optional"),
            ]),
            search: TextInput::with_placeholder("Client id, Enter to apply"),
            searching: false,
            query: String::new(),
            confirm: ConfirmDialog::new(),
            delete_target: None,
            pending: None,
            stale: true,
        }
    }

    pub fn set_data(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
        if self.selected >= self.reservations.len() {
            self.selected = self.reservations.len().saturating_sub(1);
        }
        if let PaneView::Edit(id) = self.view {
            if !self.reservations.iter().any(|r| r.reserva_id == id) {
                self.view = PaneView::Empty;
            }
        }
    }

    pub fn selected_reservation(&self) -> Option<&Reservation> {
        self.reservations.get(self.selected)
    }

    pub async fn sync(&mut self, client: &ConsoleClient) -> Result<(), ConsoleClientError> {
        if let Some(op) = self.pending.take() {
            self.stale = true;
            let result = match &op {
                ReservationOp::Create(draft) => client.create_reservation(draft).await,
                ReservationOp::Update(id, draft) => client.update_reservation(*id, draft).await,
                ReservationOp::Cycle(reservation) => client
                    .cycle_reservation_status(reservation)
                    .await
                    .map(|status| {
                        tracing::info!(id = reservation.reserva_id, %status, "reservation status changed");
                    }),
                ReservationOp::Delete(id) => client.delete_reservation(*id).await,
            };
            let from_form = matches!(op, ReservationOp::Create(_) | ReservationOp::Update(..));
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
        let reservations = client.search_reservations(&self.query).await?;
        self.set_data(reservations);
        Ok(())
    }

    fn draft_from_form(&self) -> Result<ReservationDraft, ValidationError> {
        let form = &self.form;
        let status = form.value(STATUS);
        let notes = form.value(NOTES);
        let draft = ReservationDraft {
            reserva_id: match self.view {
                PaneView::Edit(id) => Some(id),
                _ => None,
            },
            cliente_id: parse_optional(form.value(CLIENT), "client id")?,
            servicio_id: parse_optional(form.value(SERVICE), "service id")?,
            habitacion: form.value(ROOM).to_string(),
            fecha_entrada: parse_optional_date(form.value(CHECK_IN), "check-in")?,
            fecha_salida: parse_optional_date(form.value(CHECK_OUT), "check-out")?,
            cantidad_personas: parse_optional(form.value(GUESTS), "guests")?.unwrap_or(1),
            estado: if status.is_empty() {
                ReservationStatus::Pending
            } else {
                status.parse()?
            },
            descripcion: (!notes.is_empty()).then(|| notes.to_string()),
        };
        draft.validate()?;
        Ok(draft)
    }

    fn submit_form(&mut self) {
        match self.draft_from_form() {
            Ok(draft) => {
                self.pending = Some(match self.view {
                    PaneView::Edit(id) => ReservationOp::Update(id, draft),
                    _ => ReservationOp::Create(draft),
                });
            }
            Err(e) => self.form.set_error(e.to_string()),
        }
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
        if move_selection(&mut self.selected, self.reservations.len(), &key) {
            return true;
        }
        match key.code {
            KeyCode::Enter if !self.reservations.is_empty() => self.view = PaneView::Detail,
            KeyCode::Esc => self.view = PaneView::Empty,
            KeyCode::Char('c') => {
                self.form.reset();
                self.view = PaneView::Create;
            }
            KeyCode::Char('e') => {
                let Some(r) = self.selected_reservation() else {
                    return true;
                };
                let id = r.reserva_id;
                let values = [
                    r.cliente_id.to_string(),
                    r.servicio_id.to_string(),
                    r.habitacion.clone(),
                    format::date(&r.fecha_entrada),
                    format::date(&r.fecha_salida),
                    r.cantidad_personas.to_string(),
                    r.estado.as_str().to_string(),
                    r.descripcion.clone().unwrap_or_default(),
                ];
                self.form.load(&values);
                self.view = PaneView::Edit(id);
            }
            KeyCode::Char('t') => {
                if let Some(r) = self.selected_reservation().cloned() {
                    self.pending = Some(ReservationOp::Cycle(r));
                }
            }
            KeyCode::Char('d') => {
                if let Some(r) = self.selected_reservation() {
                    let message = format!(
                        "Delete reservation {} (room {})?",
                        r.reserva_id, r.habitacion
                    );
                    self.delete_target = Some(r.reserva_id);
                    self.confirm.show(message);
                }
            }
            KeyCode::Char('/') => {
                self.search.set_text(&self.query);
                self.searching = true;
            }
            _ => return false,
        }
        true
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            [
                "ID", "Client", "Service", "Room", "Check-in", "Check-out", "Guests", "Status",
            ]
            .map(|h| Cell::from(h).style(header_style())),
        );

        let rows: Vec<Row> = self
            .reservations
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(vec![
                    Cell::from(r.reserva_id.to_string()),
                    Cell::from(r.cliente_id.to_string()),
                    Cell::from(r.servicio_id.to_string()),
                    Cell::from(r.habitacion.clone()),
                    Cell::from(format::date(&r.fecha_entrada)),
                    Cell::from(format::date(&r.fecha_salida)),
                    Cell::from(r.cantidad_personas.to_string()),
                    Cell::from(format::status(r.estado))
                        .style(Style::default().fg(status_color(r.estado))),
                ])
                .style(row_style(i == self.selected))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Reservations (c: create, e: edit, t: next status, d: delete) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Detail ").borders(Borders::ALL);
        let text = match (self.view, self.selected_reservation()) {
            (PaneView::Detail, Some(r)) => {
                let label = Style::default().fg(Color::DarkGray);
                let field = |name: &'static str, value: String| {
                    Line::from(vec![Span::styled(name, label), Span::raw(value)])
                };
                vec![
                    field("Reservation: ", r.reserva_id.to_string()),
                    field("Client:      ", r.cliente_id.to_string()),
                    field("Service:     ", r.servicio_id.to_string()),
                    field("Room:        ", r.habitacion.clone()),
                    field("Check-in:    ", format::date(&r.fecha_entrada)),
                    field("Check-out:   ", format::date(&r.fecha_salida)),
                    field("Guests:      ", r.cantidad_personas.to_string()),
                    Line::from(vec![
                        Span::styled("Status:      ", label),
                        Span::styled(
                            format::status(r.estado),
                            Style::default().fg(status_color(r.estado)),
                        ),
                    ]),
                    Line::from(""),
                    Line::from(r.descripcion.clone().unwrap_or_else(|| "No notes".to_string())),
                ]
            }
            _ => vec![Line::styled(
                "Select a reservation or press 'c' to create",
                Style::default().fg(Color::DarkGray),
            )],
        };
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl Component for ReservationsPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if let Some(result) = self.confirm.handle_key(key) {
            match result {
                ConfirmResult::Confirmed => {
                    self.pending = self.delete_target.take().map(ReservationOp::Delete);
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
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
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
                self.search.render(frame, left[0], "Client id", true);
            } else {
                let applied = Paragraph::new(format!("Client {}  (/ to change)", self.query))
                    .block(Block::default().title(" Search ").borders(Borders::ALL));
                frame.render_widget(applied, left[0]);
            }
        }
        self.render_list(frame, left[1]);

        match self.view {
            PaneView::Create => self.form.render(frame, columns[1], "New reservation"),
            PaneView::Edit(id) => {
                self.form
                    .render(frame, columns[1], &format!("Edit reservation #{id}"))
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
