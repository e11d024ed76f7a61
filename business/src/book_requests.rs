//! Book requests table: row rendering, filters and accept / reject.

use async_trait::async_trait;
use serde_json::Value;

use crate::action::{ActionHandler, Click};
use crate::http::{Client, HttpResult, RequestError, RequestOptions};
use crate::model::{BookRequestRecord, RequestDecision, RequestStatus, StatusChange, StatusResponse};
use crate::resource::Resource;
use crate::view::{ActionButton, Cell, Render, RowView};

pub const BOOK_REQUESTS_PATH: &str = "/api/admin/book-requests";

pub const ACCEPT: &str = "accept";
pub const REJECT: &str = "reject";

/// `PATCH /api/admin/book-requests/{id}/status`.
pub async fn set_status(
    client: &Client,
    id: i64,
    decision: RequestDecision,
) -> HttpResult<Option<Value>> {
    let options = RequestOptions::patch()
        .json(&StatusChange { status: decision })
        .map_err(|e| RequestError::transport(e.to_string()))?;
    client
        .request(&format!("{BOOK_REQUESTS_PATH}/{id}/status"), options)
        .await
}

impl Render for BookRequestRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn render(&self) -> RowView {
        let status = self.status;
        RowView {
            id: self.id,
            cells: vec![
                Cell::text(self.id.to_string()),
                Cell::text(self.book_id.to_string()),
                Cell::text(self.requester_id.to_string()),
                Cell::Badge(status.badge()),
            ],
            actions: vec![
                ActionButton::new(ACCEPT, self.id, "Aceptar").disabled(matches!(
                    status,
                    RequestStatus::Accepted | RequestStatus::Cancelled
                )),
                ActionButton::new(REJECT, self.id, "Rechazar").disabled(matches!(
                    status,
                    RequestStatus::Rejected | RequestStatus::Cancelled
                )),
            ],
        }
    }
}

impl Resource for BookRequestRecord {
    const LIST_PATH: &'static str = BOOK_REQUESTS_PATH;
    /// Id, book, requester, status and the actions column.
    const COLUMNS: usize = 5;
    const EMPTY_TEXT: &'static str = "No hay solicitudes";
    const FAILED_TEXT: &'static str = "Error cargando solicitudes";
    const FILTER_KEYS: &'static [&'static str] = &["status", "book_id", "requester_id"];

    fn handlers() -> Vec<Box<dyn ActionHandler<Self>>> {
        vec![
            Box::new(Decide(RequestDecision::Accepted)),
            Box::new(Decide(RequestDecision::Rejected)),
        ]
    }
}

/// Accept or reject a request.
pub struct Decide(pub RequestDecision);

#[async_trait]
impl ActionHandler<BookRequestRecord> for Decide {
    fn name(&self) -> &'static str {
        match self.0 {
            RequestDecision::Accepted => ACCEPT,
            RequestDecision::Rejected => REJECT,
        }
    }

    fn prompt(&self, _click: &Click) -> String {
        match self.0 {
            RequestDecision::Accepted => "¿Aceptar esta solicitud?".to_owned(),
            RequestDecision::Rejected => "¿Rechazar esta solicitud?".to_owned(),
        }
    }

    async fn send(&self, client: &Client, id: i64, _click: &Click) -> HttpResult<Option<Value>> {
        set_status(client, id, self.0).await
    }

    fn reconcile(
        &self,
        current: &BookRequestRecord,
        response: Option<&Value>,
    ) -> Option<BookRequestRecord> {
        let response: StatusResponse = serde_json::from_value(response?.clone()).ok()?;
        Some(BookRequestRecord {
            status: response.status(),
            ..current.clone()
        })
    }

    fn success_message(&self, _click: &Click, _updated: Option<&BookRequestRecord>) -> String {
        match self.0 {
            RequestDecision::Accepted => "Solicitud aceptada".to_owned(),
            RequestDecision::Rejected => "Solicitud rechazada".to_owned(),
        }
    }

    fn list_wide_filters(&self) -> &'static [&'static str] {
        &["status"]
    }
}
