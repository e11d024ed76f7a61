//! Terminal rendering of admin table bodies.

use lending_business::view::{Row, RowView};
use lending_business::{BookRequestRecord, Render, TableBody, UserRecord};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Rol")]
    role: String,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Acciones")]
    actions: String,
}

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Libro")]
    book: String,
    #[tabled(rename = "Solicitante")]
    requester: String,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Acciones")]
    actions: String,
}

fn cell(view: &RowView, index: usize) -> String {
    view.cells
        .get(index)
        .map(|cell| cell.plain().to_owned())
        .unwrap_or_default()
}

/// Button labels; disabled ones are bracketed.
pub fn actions_summary(view: &RowView) -> String {
    view.actions
        .iter()
        .map(|button| {
            if button.disabled {
                format!("[{}]", button.label)
            } else {
                button.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn rounded<T: Tabled>(rows: &[T]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Placeholder text, or the rows as a table.
fn render_body<R: Render, T: Tabled>(body: &TableBody<R>, to_row: impl Fn(&Row<R>) -> T) -> String {
    match body.placeholder() {
        Some(placeholder) => placeholder.text.clone(),
        None => rounded(&body.rows().iter().map(to_row).collect::<Vec<_>>()),
    }
}

pub fn users(body: &TableBody<UserRecord>) -> String {
    render_body(body, |row| UserRow {
        id: cell(&row.view, 0),
        email: cell(&row.view, 1),
        role: cell(&row.view, 2),
        status: cell(&row.view, 3),
        actions: actions_summary(&row.view),
    })
}

pub fn requests(body: &TableBody<BookRequestRecord>) -> String {
    render_body(body, |row| RequestRow {
        id: cell(&row.view, 0),
        book: cell(&row.view, 1),
        requester: cell(&row.view, 2),
        status: cell(&row.view, 3),
        actions: actions_summary(&row.view),
    })
}
