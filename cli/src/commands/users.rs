//! `users` subcommands.

use anyhow::Result;
use lending_business::UserRecord;
use lending_business::users::TOGGLE_BLOCK;
use tracing::instrument;

use crate::cli::UsersCommand;
use crate::commands::table::{self, Presenter};
use crate::context::Session;
use crate::output::Output;
use crate::prompt::confirmer;
use crate::tables;

const PRESENTER: Presenter<UserRecord> = Presenter {
    label: "Usuarios",
    render: tables::users,
};

#[instrument(skip_all, name = "users")]
pub async fn run_users(session: &Session, command: UsersCommand) -> Result<()> {
    let out = Output::new();
    session.ensure_signed_in().await?;

    match command {
        UsersCommand::List {
            q,
            role,
            active,
            blocked,
            view,
        } => {
            let page = session.page(confirmer(false));
            for (key, value) in [("q", q), ("role", role), ("active", active), ("blocked", blocked)] {
                if let Some(value) = value {
                    page.users.filters.set(key, value);
                }
            }
            table::list(&out, &page.users, &page.toaster(), &PRESENTER, view).await
        }
        UsersCommand::ToggleBlock { id, confirm } => {
            let page = session.page(confirmer(confirm.yes));
            table::act(&out, &page.users, &page.toaster(), &PRESENTER, TOGGLE_BLOCK, id).await
        }
    }
}
