//! `dashboard`: identity header plus summary counts.

use anyhow::Result;
use lending_business::dashboard;
use tracing::instrument;

use crate::context::Session;
use crate::output::Output;

#[instrument(skip_all, name = "dashboard")]
pub async fn run_dashboard(session: &Session) -> Result<()> {
    let out = Output::new();
    let identity = session.ensure_signed_in().await?;

    let summary = dashboard::load(&session.client).await;

    out.header(identity.display());
    out.newline();
    for (label, count) in summary.entries() {
        match count {
            Some(count) => out.labeled_indent(label, count, 2),
            None => out.labeled_indent(label, "no disponible", 2),
        }
    }
    Ok(())
}
