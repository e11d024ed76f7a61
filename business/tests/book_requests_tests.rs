//! Book requests table: status badges and accept / reject actions.

mod common;

use common::{ScriptedConfirm, TestContext, json_body, sample_request};
use lending_business::book_requests::{ACCEPT, REJECT};
use lending_business::{ActionOutcome, Click, LoadOutcome, RequestStatus, ToastKind};
use serde_json::json;

#[tokio::test]
async fn test_upper_case_statuses_render_and_gate_buttons() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!({"items": [
        sample_request(1, "PENDING"),
        sample_request(2, "ACCEPTED"),
        sample_request(3, "CANCELLED"),
        {"id": 4, "book_id": 40, "requester_id": 104}
    ], "total": 4}))
    .await;
    let table = ctx.requests_table(ScriptedConfirm::answering(true));

    assert_eq!(table.loader.load().await, LoadOutcome::Rows(4));
    assert_eq!(table.loader.total(), Some(4));

    let body = table.loader.snapshot();
    let labels: Vec<&str> = body
        .rows()
        .iter()
        .map(|row| row.view.cells[3].plain())
        .collect();
    assert_eq!(labels, vec!["Pendiente", "Aceptada", "Cancelada", "Pendiente"]);

    let accepted = &body.rows()[1].view;
    assert!(accepted.button(ACCEPT).expect("accept").disabled);
    assert!(!accepted.button(REJECT).expect("reject").disabled);

    let cancelled = &body.rows()[2].view;
    assert!(cancelled.button(ACCEPT).expect("accept").disabled);
    assert!(cancelled.button(REJECT).expect("reject").disabled);
}

#[tokio::test]
async fn test_empty_list_placeholder() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([])).await;
    let table = ctx.requests_table(ScriptedConfirm::answering(true));

    assert_eq!(table.loader.load().await, LoadOutcome::Empty);
    assert_eq!(
        table.loader.snapshot().to_html(),
        r#"<tr><td colspan="5">No hay solicitudes</td></tr>"#
    );
}

#[tokio::test]
async fn test_accept_sends_accepted_and_patches_row() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([sample_request(1, "pending")])).await;
    ctx.mock_patch(
        "/api/admin/book-requests/1/status",
        200,
        json!({"message": "Request updated", "id": 1, "status": "ACCEPTED"}),
    )
    .await;
    let confirm = ScriptedConfirm::answering(true);
    let table = ctx.requests_table(confirm.clone());
    table.loader.load().await;

    let outcome = table.actions.click(Click::new(ACCEPT, "1")).await;
    assert_eq!(outcome, ActionOutcome::Patched { id: 1 });

    let patches = ctx.received("PATCH", "/api/admin/book-requests/1/status").await;
    assert_eq!(patches.len(), 1);
    assert_eq!(json_body(&patches[0]), json!({"status": "accepted"}));
    assert_eq!(confirm.prompts(), vec!["¿Aceptar esta solicitud?".to_owned()]);

    let body = table.loader.snapshot();
    let row = body.row(1).expect("row");
    assert_eq!(row.record.status, RequestStatus::Accepted);
    assert!(row.view.button(ACCEPT).expect("accept").disabled);
    assert_eq!(row.view.button(ACCEPT).expect("accept").label, "Aceptar");

    let toast = ctx.toaster.current().expect("toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Solicitud aceptada");
}

#[tokio::test]
async fn test_reject_sends_rejected() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([sample_request(2, "pending")])).await;
    ctx.mock_patch(
        "/api/admin/book-requests/2/status",
        200,
        json!({"message": "Request updated", "id": 2, "status": "REJECTED"}),
    )
    .await;
    let table = ctx.requests_table(ScriptedConfirm::answering(true));
    table.loader.load().await;

    table.actions.click(Click::new(REJECT, "2")).await;

    let patches = ctx.received("PATCH", "/api/admin/book-requests/2/status").await;
    assert_eq!(json_body(&patches[0]), json!({"status": "rejected"}));
    let body = table.loader.snapshot();
    assert_eq!(
        body.row(2).map(|row| row.record.status),
        Some(RequestStatus::Rejected)
    );
}

#[tokio::test]
async fn test_disabled_accept_is_not_sent() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([sample_request(3, "accepted")])).await;
    ctx.mock_patch(
        "/api/admin/book-requests/3/status",
        200,
        json!({"message": "Request updated", "id": 3, "status": "ACCEPTED"}),
    )
    .await;
    let confirm = ScriptedConfirm::answering(true);
    let table = ctx.requests_table(confirm.clone());
    table.loader.load().await;

    let button = table
        .loader
        .snapshot()
        .row(3)
        .and_then(|row| row.view.button(ACCEPT).cloned())
        .expect("accept button");
    assert!(button.disabled);

    assert_eq!(
        table.actions.click(Click::on(&button)).await,
        ActionOutcome::Ignored
    );
    assert!(confirm.prompts().is_empty());
    assert_eq!(ctx.mutation_count().await, 0);
    assert_eq!(ctx.toaster.current(), None);
}

#[tokio::test]
async fn test_status_filter_forces_reload() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([sample_request(1, "pending")])).await;
    ctx.mock_patch(
        "/api/admin/book-requests/1/status",
        200,
        json!({"message": "Request updated", "id": 1, "status": "ACCEPTED"}),
    )
    .await;
    let table = ctx.requests_table(ScriptedConfirm::answering(true));
    table.filters.set("status", "pending");
    table.loader.load().await;

    assert_eq!(
        table.actions.click(Click::new(ACCEPT, "1")).await,
        ActionOutcome::Reloaded { id: 1 }
    );

    let loads = ctx.received("GET", "/api/admin/book-requests").await;
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[1].url.query(), Some("status=pending"));
}

#[tokio::test]
async fn test_server_refusal_keeps_row() {
    let ctx = TestContext::new().await;
    ctx.mock_requests(json!([sample_request(1, "pending")])).await;
    ctx.mock_patch(
        "/api/admin/book-requests/1/status",
        400,
        json!({"error": "invalid_status"}),
    )
    .await;
    let table = ctx.requests_table(ScriptedConfirm::answering(true));
    table.loader.load().await;
    let before = table.loader.snapshot().row(1).cloned().expect("row");

    let outcome = table.actions.click(Click::new(REJECT, "1")).await;
    assert!(matches!(outcome, ActionOutcome::Failed(ref err) if err.message == "invalid_status"));
    assert_eq!(table.loader.snapshot().row(1).cloned(), Some(before));
    assert_eq!(
        ctx.toaster.current().map(|t| (t.kind, t.message)),
        Some((ToastKind::Error, "invalid_status".to_owned()))
    );
}
