//! Session setup shared by every command.

use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use lending_business::auth::{self, AuthStatus, Identity};
use lending_business::{AdminPage, BusinessConfig, Client, Confirm};
use tracing::{debug, instrument};

use crate::config::Config;

/// Resolved configuration plus a client carrying the saved session cookie.
pub struct Session {
    pub config: Config,
    pub business: BusinessConfig,
    pub client: Client,
}

impl Session {
    #[instrument(skip_all, name = "open_session")]
    pub fn open(api_url: Option<&str>) -> Result<Self> {
        let config = Config::load()?;
        let business = BusinessConfig::from_env()
            .context("Invalid LENDING_ADMIN_* environment")?
            .with_api_base_url(config.api_url(api_url));

        let client = Client::new(&business.api_base_url).context("Failed to build HTTP client")?;
        if let Some(cookies) = config.session() {
            debug!("restoring saved session");
            client.restore_session(cookies);
        }

        Ok(Self {
            config,
            business,
            client,
        })
    }

    /// Persist the client's current cookies as the saved session.
    pub fn save(&mut self, email: Option<&str>) -> Result<()> {
        let cookies = self.client.session_cookies();
        self.config.set_session(email, cookies);
        self.config.api.url = Some(self.business.api_base_url.clone());
        self.config.save()
    }

    pub fn forget(&mut self) -> Result<()> {
        self.config.clear_session();
        self.config.save()
    }

    /// Identity of the signed-in operator, or an error pointing at `login`.
    #[instrument(skip_all, name = "ensure_signed_in")]
    pub async fn ensure_signed_in(&self) -> Result<Identity> {
        match auth::status(&self.client).await {
            AuthStatus::SignedIn(identity) => Ok(identity),
            AuthStatus::SignedOut => {
                bail!("Not signed in. Run `lending-admin login` first.")
            }
        }
    }

    pub fn page(&self, confirm: Arc<dyn Confirm>) -> AdminPage {
        AdminPage::with_client(self.client.clone(), &self.business, confirm)
    }
}
