//! `login`, `logout` and `whoami`.

use anyhow::{Context as _, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use lending_business::auth;
use tracing::{error, info, instrument};

use crate::context::Session;
use crate::output::Output;

#[instrument(skip_all, name = "login")]
pub async fn run_login(mut session: Session, email: Option<String>) -> Result<()> {
    let out = Output::new();

    out.header(format!("Sign in to {}", session.business.api_base_url));
    out.newline();

    let email = match email {
        Some(email) => email,
        None => Text::new("Email:")
            .prompt()
            .context("Failed to read email")?,
    };
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read password")?;

    match auth::login(&session.client, &email, &password).await {
        Ok(identity) => {
            info!(email = ?identity.email, "signed in");
            session.save(identity.email.as_deref().or(Some(email.trim())))?;
            out.success(format!("Signed in as {}", identity.display()));
            Ok(())
        }
        Err(err) => {
            error!("Login failed: {err}");
            out.error(format!("Login failed: {}", err.message));
            std::process::exit(1);
        }
    }
}

#[instrument(skip_all, name = "logout")]
pub async fn run_logout(mut session: Session) -> Result<()> {
    let out = Output::new();
    auth::logout(&session.client).await;
    session.forget()?;
    out.success("Signed out");
    Ok(())
}

#[instrument(skip_all, name = "whoami")]
pub async fn run_whoami(session: &Session) -> Result<()> {
    let out = Output::new();
    let identity = session.ensure_signed_in().await?;

    out.print(identity.display());
    if let Some(username) = identity.username.as_deref() {
        out.labeled_indent("username", username, 2);
    }
    if let Some(id) = identity.id {
        out.labeled_indent("id", id, 2);
    }
    Ok(())
}
