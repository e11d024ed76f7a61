//! Listing and row actions shared by the `users` and `requests` commands.

use anyhow::{Context as _, Result, bail};
use inquire::Select;
use lending_business::page::AdminTable;
use lending_business::{ActionOutcome, Click, LoadOutcome, Resource, TableBody, Toaster};
use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::{Format, ViewArgs};
use crate::output::Output;
use crate::tables::actions_summary;

/// How one resource is printed.
pub struct Presenter<R> {
    /// Label of the total line, e.g. "Usuarios".
    pub label: &'static str,
    pub render: fn(&TableBody<R>) -> String,
}

fn records<R: Resource>(body: &TableBody<R>) -> Vec<R> {
    body.rows().iter().map(|row| row.record.clone()).collect()
}

pub fn print_body<R: Resource + Serialize>(
    out: &Output,
    presenter: &Presenter<R>,
    body: &TableBody<R>,
    format: Format,
    total: Option<u64>,
) -> Result<()> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&records(body))
                .context("Failed to serialize records")?;
            out.print(json);
        }
        Format::Html => out.print(body.to_html()),
        Format::Table => {
            if let Some(placeholder) = body.placeholder() {
                out.dim(&placeholder.text);
            } else {
                out.print((presenter.render)(body));
                out.total(presenter.label, body.rows().len(), total);
            }
        }
    }
    Ok(())
}

/// Load the table with its current filters and print it.
#[instrument(skip_all, name = "list", fields(resource = R::LIST_PATH))]
pub async fn list<R: Resource + Serialize>(
    out: &Output,
    table: &AdminTable<R>,
    toaster: &Toaster,
    presenter: &Presenter<R>,
    view: ViewArgs,
) -> Result<()> {
    let outcome = table.loader.load().await;
    let body = table.loader.snapshot();

    if let LoadOutcome::Failed(err) = outcome {
        out.error(R::FAILED_TEXT);
        bail!(err);
    }

    print_body(out, presenter, &body, view.format, table.loader.total())?;

    if view.interactive && view.format == Format::Table {
        interactive(out, table, toaster, presenter).await?;
    }
    Ok(())
}

/// Pick a row, then one of its enabled actions, until the operator escapes.
async fn interactive<R: Resource + Serialize>(
    out: &Output,
    table: &AdminTable<R>,
    toaster: &Toaster,
    presenter: &Presenter<R>,
) -> Result<()> {
    loop {
        let body = table.loader.snapshot();
        let options: Vec<String> = body
            .rows()
            .iter()
            .map(|row| {
                let cells: Vec<&str> = row.view.cells.iter().map(|cell| cell.plain()).collect();
                format!("{} [{}]", cells.join(" · "), actions_summary(&row.view))
            })
            .collect();
        if options.is_empty() {
            return Ok(());
        }

        let Some(choice) = Select::new("Select a row:", options.clone())
            .with_help_message("Use arrow keys to navigate, Enter to select, Esc to quit")
            .prompt_skippable()
            .context("Failed to select row")?
        else {
            return Ok(());
        };
        let Some(row) = options
            .iter()
            .position(|option| *option == choice)
            .and_then(|index| body.rows().get(index))
        else {
            continue;
        };

        let buttons: Vec<_> = row.view.actions.iter().filter(|b| !b.disabled).collect();
        if buttons.is_empty() {
            out.warning("No actions available for this row");
            continue;
        }
        let labels: Vec<String> = buttons.iter().map(|b| b.label.clone()).collect();
        let Some(label) = Select::new("Action:", labels.clone())
            .prompt_skippable()
            .context("Failed to select action")?
        else {
            continue;
        };
        let Some(button) = labels
            .iter()
            .position(|l| *l == label)
            .and_then(|index| buttons.get(index))
        else {
            continue;
        };

        let outcome = table.actions.click(Click::on(button)).await;
        report(out, toaster, &outcome);
        out.newline();
        print_body(out, presenter, &table.loader.snapshot(), Format::Table, table.loader.total())?;
    }
}

/// Print what an action did. Returns false when it failed.
pub fn report(out: &Output, toaster: &Toaster, outcome: &ActionOutcome) -> bool {
    match outcome {
        ActionOutcome::Ignored => {
            out.warning("Action not recognized");
            true
        }
        ActionOutcome::Declined => {
            out.dim("Cancelled");
            true
        }
        ActionOutcome::Patched { .. } | ActionOutcome::Reloaded { .. } => {
            if let Some(toast) = toaster.current() {
                out.toast(&toast);
            }
            true
        }
        ActionOutcome::Failed(err) => {
            match toaster.current() {
                Some(toast) => out.toast(&toast),
                None => out.error(&err.message),
            }
            false
        }
    }
}

/// Run `action` on row `id` as if its button had been clicked.
#[instrument(skip_all, name = "action", fields(resource = R::LIST_PATH, action = action, id = id))]
pub async fn act<R: Resource + Serialize>(
    out: &Output,
    table: &AdminTable<R>,
    toaster: &Toaster,
    presenter: &Presenter<R>,
    action: &'static str,
    id: i64,
) -> Result<()> {
    if let LoadOutcome::Failed(err) = table.loader.load().await {
        out.error(R::FAILED_TEXT);
        bail!(err);
    }

    let body = table.loader.snapshot();
    let Some(button) = body.row(id).and_then(|row| row.view.button(action)).cloned() else {
        bail!("No row with id {id} in {}", R::LIST_PATH);
    };
    if button.disabled {
        out.warning(format!("`{action}` is not available for {id}"));
        return Ok(());
    }

    let outcome = table.actions.click(Click::on(&button)).await;
    info!(?outcome, "action finished");
    if !report(out, toaster, &outcome) {
        std::process::exit(1);
    }

    if matches!(
        outcome,
        ActionOutcome::Patched { .. } | ActionOutcome::Reloaded { .. }
    ) {
        let body = table.loader.snapshot();
        if let Some(row) = body.row(id) {
            let mut single = TableBody::new(R::COLUMNS);
            single.set_rows([row.record.clone()]);
            out.newline();
            out.print((presenter.render)(&single));
        }
    }
    Ok(())
}
