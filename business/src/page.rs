//! The admin page: one client, one toaster and the two managed tables.

use std::sync::Arc;

use crate::action::{ActionController, Confirm};
use crate::auth::{self, AuthStatus};
use crate::config::BusinessConfig;
use crate::filter::FilterController;
use crate::http::{Client, HttpResult};
use crate::list::{ListLoader, LoadOrdering};
use crate::model::{BookRequestRecord, UserRecord};
use crate::resource::Resource;
use crate::toast::Toaster;

/// Loader, filters and row actions of one table, sharing a single body.
pub struct AdminTable<R: Resource> {
    pub loader: Arc<ListLoader<R>>,
    pub filters: Arc<FilterController<R>>,
    pub actions: ActionController<R>,
}

impl<R: Resource> AdminTable<R> {
    pub fn new(
        client: Client,
        ordering: LoadOrdering,
        toaster: Arc<Toaster>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let loader = Arc::new(ListLoader::new(client, ordering));
        Self {
            filters: Arc::new(FilterController::new(Arc::clone(&loader))),
            actions: ActionController::new(Arc::clone(&loader), toaster, confirm),
            loader,
        }
    }
}

pub struct AdminPage {
    client: Client,
    toaster: Arc<Toaster>,
    pub users: AdminTable<UserRecord>,
    pub requests: AdminTable<BookRequestRecord>,
}

impl AdminPage {
    pub fn new(config: &BusinessConfig, confirm: Arc<dyn Confirm>) -> HttpResult<Self> {
        let client = Client::new(&config.api_base_url)?;
        Ok(Self::with_client(client, config, confirm))
    }

    /// Page over an existing client, e.g. one with a restored session.
    pub fn with_client(client: Client, config: &BusinessConfig, confirm: Arc<dyn Confirm>) -> Self {
        let toaster = Toaster::new(config.toast_duration);
        Self {
            users: AdminTable::new(
                client.clone(),
                config.load_ordering,
                Arc::clone(&toaster),
                Arc::clone(&confirm),
            ),
            requests: AdminTable::new(
                client.clone(),
                config.load_ordering,
                Arc::clone(&toaster),
                confirm,
            ),
            client,
            toaster,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn toaster(&self) -> Arc<Toaster> {
        Arc::clone(&self.toaster)
    }

    /// Resolve the session and, when signed in, load both tables.
    pub async fn boot(&self) -> AuthStatus {
        let status = auth::status(&self.client).await;
        if matches!(status, AuthStatus::SignedIn(_)) {
            tokio::join!(self.users.loader.load(), self.requests.loader.load());
        } else {
            log::info!("not signed in, skipping table loads");
        }
        status
    }

    pub async fn logout(&self) {
        auth::logout(&self.client).await;
    }
}
