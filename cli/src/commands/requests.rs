//! `requests` subcommands.

use anyhow::Result;
use lending_business::BookRequestRecord;
use lending_business::book_requests::{ACCEPT, REJECT};
use tracing::instrument;

use crate::cli::RequestsCommand;
use crate::commands::table::{self, Presenter};
use crate::context::Session;
use crate::output::Output;
use crate::prompt::confirmer;
use crate::tables;

const PRESENTER: Presenter<BookRequestRecord> = Presenter {
    label: "Solicitudes",
    render: tables::requests,
};

#[instrument(skip_all, name = "requests")]
pub async fn run_requests(session: &Session, command: RequestsCommand) -> Result<()> {
    let out = Output::new();
    session.ensure_signed_in().await?;

    let (action, id, yes) = match command {
        RequestsCommand::List {
            status,
            book_id,
            requester_id,
            view,
        } => {
            let page = session.page(confirmer(false));
            let filters = &page.requests.filters;
            if let Some(status) = status {
                filters.set("status", status);
            }
            if let Some(book_id) = book_id {
                filters.set("book_id", book_id.to_string());
            }
            if let Some(requester_id) = requester_id {
                filters.set("requester_id", requester_id.to_string());
            }
            return table::list(&out, &page.requests, &page.toaster(), &PRESENTER, view).await;
        }
        RequestsCommand::Accept { id, confirm } => (ACCEPT, id, confirm.yes),
        RequestsCommand::Reject { id, confirm } => (REJECT, id, confirm.yes),
    };

    let page = session.page(confirmer(yes));
    table::act(&out, &page.requests, &page.toaster(), &PRESENTER, action, id).await
}
