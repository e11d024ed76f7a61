//! Table view models: rows, action buttons and the table body container.
//!
//! A [`TableBody`] is the in-memory counterpart of a `<tbody>`: it shows either
//! a single placeholder row or one rendered row per record. Front-ends read it
//! to draw; the list loader and the action controller are the only writers.

use std::sync::{Arc, Mutex};

use crate::badge::Badge;
use crate::html::escape_html;

/// Pure mapping from a record to its display row.
pub trait Render {
    /// Identifier carried by the row and its buttons.
    fn id(&self) -> i64;

    fn render(&self) -> RowView;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(Badge),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Plain text as shown in a terminal (badges show their label).
    pub fn plain(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Badge(badge) => &badge.label,
        }
    }

    fn to_html(&self) -> String {
        match self {
            Self::Text(text) => format!("<td>{}</td>", escape_html(text)),
            Self::Badge(badge) => format!("<td>{}</td>", badge.to_html()),
        }
    }
}

/// A row button. `action` is the dispatch key read by the action controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: &'static str,
    pub id: i64,
    pub label: String,
    pub disabled: bool,
    /// Extra `data-*` attributes (name without the `data-` prefix).
    pub data: Vec<(&'static str, String)>,
}

impl ActionButton {
    pub fn new(action: &'static str, id: i64, label: impl Into<String>) -> Self {
        Self {
            action,
            id,
            label: label.into(),
            disabled: false,
            data: Vec::new(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn data(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.data.push((name, value.into()));
        self
    }

    pub fn data_value(&self, name: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut attrs = format!(
            r#"data-action="{}" data-id="{}""#,
            escape_html(self.action),
            self.id
        );
        for (name, value) in &self.data {
            attrs.push_str(&format!(r#" data-{name}="{}""#, escape_html(value)));
        }
        if self.disabled {
            attrs.push_str(" disabled");
        }
        format!(
            r#"<button class="btn btn-xs" type="button" {attrs}>{}</button>"#,
            escape_html(&self.label)
        )
    }
}

/// One rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub cells: Vec<Cell>,
    pub actions: Vec<ActionButton>,
}

impl RowView {
    pub fn button(&self, action: &str) -> Option<&ActionButton> {
        self.actions.iter().find(|b| b.action == action)
    }

    pub fn button_mut(&mut self, action: &str) -> Option<&mut ActionButton> {
        self.actions.iter_mut().find(|b| b.action == action)
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(r#"<tr data-id="{}">"#, self.id);
        for cell in &self.cells {
            html.push_str(&cell.to_html());
        }
        if !self.actions.is_empty() {
            html.push_str("<td>");
            let buttons: Vec<String> = self.actions.iter().map(ActionButton::to_html).collect();
            html.push_str(&buttons.join(" "));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
        html
    }
}

/// A full-width single-cell row (loading, empty, failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub text: String,
    pub colspan: usize,
}

impl Placeholder {
    pub fn to_html(&self) -> String {
        format!(
            r#"<tr><td colspan="{}">{}</td></tr>"#,
            self.colspan,
            escape_html(&self.text)
        )
    }
}

/// A record together with the row rendered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<R> {
    pub record: R,
    pub view: RowView,
}

impl<R: Render> Row<R> {
    pub fn new(record: R) -> Self {
        let view = record.render();
        Self { record, view }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableContent<R> {
    Placeholder(Placeholder),
    Rows(Vec<Row<R>>),
}

/// In-memory table body.
#[derive(Debug, Clone)]
pub struct TableBody<R> {
    columns: usize,
    content: TableContent<R>,
}

/// Table body shared between a loader, an action controller and a front-end.
pub type SharedTable<R> = Arc<Mutex<TableBody<R>>>;

impl<R: Render> TableBody<R> {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            content: TableContent::Rows(Vec::new()),
        }
    }

    pub fn shared(columns: usize) -> SharedTable<R> {
        Arc::new(Mutex::new(Self::new(columns)))
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn content(&self) -> &TableContent<R> {
        &self.content
    }

    /// Replace everything with a single placeholder row spanning all columns.
    pub fn show_placeholder(&mut self, text: impl Into<String>) {
        self.content = TableContent::Placeholder(Placeholder {
            text: text.into(),
            colspan: self.columns,
        });
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match &self.content {
            TableContent::Placeholder(p) => Some(p),
            TableContent::Rows(_) => None,
        }
    }

    pub fn clear(&mut self) {
        self.content = TableContent::Rows(Vec::new());
    }

    pub fn append(&mut self, record: R) {
        let row = Row::new(record);
        match &mut self.content {
            TableContent::Rows(rows) => rows.push(row),
            TableContent::Placeholder(_) => self.content = TableContent::Rows(vec![row]),
        }
    }

    /// Clear, then append one row per record in the given order.
    pub fn set_rows(&mut self, records: impl IntoIterator<Item = R>) {
        self.clear();
        for record in records {
            self.append(record);
        }
    }

    pub fn rows(&self) -> &[Row<R>] {
        match &self.content {
            TableContent::Rows(rows) => rows,
            TableContent::Placeholder(_) => &[],
        }
    }

    pub fn row(&self, id: i64) -> Option<&Row<R>> {
        self.rows().iter().find(|row| row.view.id == id)
    }

    pub fn row_mut(&mut self, id: i64) -> Option<&mut Row<R>> {
        match &mut self.content {
            TableContent::Rows(rows) => rows.iter_mut().find(|row| row.view.id == id),
            TableContent::Placeholder(_) => None,
        }
    }

    /// Re-render the row with the same id in place. Returns false when the
    /// row is no longer displayed.
    pub fn replace_record(&mut self, record: R) -> bool {
        match self.row_mut(record.id()) {
            Some(row) => {
                *row = Row::new(record);
                true
            }
            None => false,
        }
    }

    pub fn to_html(&self) -> String {
        match &self.content {
            TableContent::Placeholder(p) => p.to_html(),
            TableContent::Rows(rows) => rows
                .iter()
                .map(|row| row.view.to_html())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: &'static str,
    }

    impl Render for Item {
        fn id(&self) -> i64 {
            self.id
        }

        fn render(&self) -> RowView {
            RowView {
                id: self.id,
                cells: vec![Cell::text(self.id.to_string()), Cell::text(self.name)],
                actions: vec![ActionButton::new("poke", self.id, "Poke").data("flag", "0")],
            }
        }
    }

    #[test]
    fn test_placeholder_spans_all_columns() {
        let mut body: TableBody<Item> = TableBody::new(5);
        body.show_placeholder("Cargando…");
        assert_eq!(
            body.placeholder(),
            Some(&Placeholder {
                text: "Cargando…".to_owned(),
                colspan: 5
            })
        );
        assert!(body.rows().is_empty());
        assert_eq!(body.to_html(), r#"<tr><td colspan="5">Cargando…</td></tr>"#);
    }

    #[test]
    fn test_set_rows_replaces_placeholder_and_keeps_order() {
        let mut body = TableBody::new(3);
        body.show_placeholder("Cargando…");
        body.set_rows(vec![
            Item { id: 9, name: "c" },
            Item { id: 2, name: "a" },
        ]);
        assert!(body.placeholder().is_none());
        let ids: Vec<i64> = body.rows().iter().map(|r| r.view.id).collect();
        assert_eq!(ids, vec![9, 2]);
    }

    #[test]
    fn test_replace_record_rerenders_single_row() {
        let mut body = TableBody::new(3);
        body.set_rows(vec![Item { id: 1, name: "a" }, Item { id: 2, name: "b" }]);

        assert!(body.replace_record(Item { id: 2, name: "z" }));
        assert_eq!(body.rows()[1].view.cells[1], Cell::text("z"));
        assert_eq!(body.rows()[0].record.name, "a");

        assert!(!body.replace_record(Item { id: 3, name: "x" }));
    }

    #[test]
    fn test_row_html_escapes_and_carries_data_attributes() {
        let row = Item {
            id: 4,
            name: "<i>x</i>",
        }
        .render();
        assert_eq!(
            row.to_html(),
            concat!(
                r#"<tr data-id="4"><td>4</td><td>&lt;i&gt;x&lt;/i&gt;</td>"#,
                r#"<td><button class="btn btn-xs" type="button" data-action="poke" data-id="4" data-flag="0">Poke</button></td></tr>"#
            )
        );
    }

    #[test]
    fn test_disabled_button_html() {
        let button = ActionButton::new("accept", 3, "Aceptar").disabled(true);
        assert!(button.to_html().contains(" disabled>"));
        assert_eq!(button.data_value("missing"), None);
    }
}
