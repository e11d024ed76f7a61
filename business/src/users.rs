//! Users table: row rendering, filters and the block toggle.
//!
//! Columns: id, email, role badge, status badge, actions.

use async_trait::async_trait;
use serde_json::Value;

use crate::action::{ActionHandler, Click};
use crate::badge;
use crate::http::{Client, HttpResult, RequestError, RequestOptions};
use crate::model::{BlockChange, BlockResponse, UserRecord};
use crate::resource::Resource;
use crate::view::{ActionButton, Cell, Render, RowView};

pub const USERS_PATH: &str = "/api/admin/users";

pub const TOGGLE_BLOCK: &str = "toggle-block";

/// `PATCH /api/admin/users/{id}/block`.
pub async fn set_blocked(client: &Client, id: i64, is_blocked: bool) -> HttpResult<Option<Value>> {
    let options = RequestOptions::patch()
        .json(&BlockChange { is_blocked })
        .map_err(|e| RequestError::transport(e.to_string()))?;
    client
        .request(&format!("{USERS_PATH}/{id}/block"), options)
        .await
}

impl Render for UserRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn render(&self) -> RowView {
        let label = if self.is_blocked {
            "Desbloquear"
        } else {
            "Bloquear"
        };

        RowView {
            id: self.id,
            cells: vec![
                Cell::text(self.id.to_string()),
                Cell::text(&self.email),
                Cell::Badge(badge::user_role(self.role.as_deref())),
                Cell::Badge(badge::user_status(self.is_blocked, self.is_active)),
            ],
            actions: vec![
                ActionButton::new(TOGGLE_BLOCK, self.id, label)
                    .data("blocked", if self.is_blocked { "1" } else { "0" }),
            ],
        }
    }
}

impl Resource for UserRecord {
    const LIST_PATH: &'static str = USERS_PATH;
    const COLUMNS: usize = 5;
    const EMPTY_TEXT: &'static str = "No hay usuarios";
    const FAILED_TEXT: &'static str = "Error cargando usuarios";
    const FILTER_KEYS: &'static [&'static str] = &["q", "role", "active", "blocked"];
    const SEARCH_KEY: Option<&'static str> = Some("q");

    fn handlers() -> Vec<Box<dyn ActionHandler<Self>>> {
        vec![Box::new(ToggleBlock)]
    }
}

/// Flips `is_blocked` to the inverse of what the clicked row showed.
pub struct ToggleBlock;

impl ToggleBlock {
    /// Value to send: the inverse of the row's `data-blocked`.
    fn next_blocked(click: &Click) -> bool {
        click.data("blocked") != Some("1")
    }
}

#[async_trait]
impl ActionHandler<UserRecord> for ToggleBlock {
    fn name(&self) -> &'static str {
        TOGGLE_BLOCK
    }

    fn prompt(&self, click: &Click) -> String {
        if Self::next_blocked(click) {
            "¿Bloquear este usuario?".to_owned()
        } else {
            "¿Desbloquear este usuario?".to_owned()
        }
    }

    async fn send(&self, client: &Client, id: i64, click: &Click) -> HttpResult<Option<Value>> {
        set_blocked(client, id, Self::next_blocked(click)).await
    }

    fn reconcile(&self, current: &UserRecord, response: Option<&Value>) -> Option<UserRecord> {
        let response: BlockResponse = serde_json::from_value(response?.clone()).ok()?;
        Some(UserRecord {
            is_blocked: response.is_blocked,
            ..current.clone()
        })
    }

    fn success_message(&self, click: &Click, updated: Option<&UserRecord>) -> String {
        let blocked = updated.map_or_else(|| Self::next_blocked(click), |user| user.is_blocked);
        if blocked {
            "Usuario bloqueado".to_owned()
        } else {
            "Usuario desbloqueado".to_owned()
        }
    }

    fn list_wide_filters(&self) -> &'static [&'static str] {
        &["blocked"]
    }
}
