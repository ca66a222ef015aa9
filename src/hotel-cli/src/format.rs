//! Display helpers shared by the command line tables and the console.

use chrono::NaiveDate;
use hotel_api::{ReservationStatus, parse_wire_date};

/// Colombian peso amount, e.g. `$ 120.000,00`.
pub fn currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}$ {grouped},{:02}", cents % 100)
}

/// `1h 30m`, `2h` or `45m`
pub fn duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Wire date rendered as `dd/mm/yyyy`; unparseable values are shown as received.
pub fn date(raw: &str) -> String {
    parse_wire_date(raw)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Date typed by a user, either `dd/mm/yyyy` or `yyyy-mm-dd`
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| format!("'{input}' is not a date (use dd/mm/yyyy or yyyy-mm-dd)"))
}

pub fn active(activo: bool) -> &'static str {
    if activo { "Active" } else { "Inactive" }
}

pub fn status(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "Pending",
        ReservationStatus::Confirmed => "Confirmed",
        ReservationStatus::Cancelled => "Cancelled",
    }
}

/// Plain-text table with left-aligned, width-fitted columns.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = row_line(headers.iter().copied(), &widths);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&row_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn row_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
