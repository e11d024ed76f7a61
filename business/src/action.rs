//! Row actions: delegated click handling for one admin table.
//!
//! A single controller per table receives every click and routes it through
//! a dispatch table keyed by the button's action name. One invocation runs
//! strictly in order:
//!
//! 1. confirm with an action-specific prompt (declining ends here)
//! 2. disable the button and show the saving label
//! 3. send exactly one mutation request
//! 4. on success, read the changed field back from the response and patch
//!    the row in place, or reload the list when the change is list-wide
//! 5. on failure, show the error and restore the row as it was before the click
//!
//! The button never stays in its saving state: an in-flight guard puts the
//! row back on every exit path, including a dropped future.
//!
//! Clicks on a disabled button are dropped, including the saving button of
//! an invocation still in flight. Otherwise invocations are not serialized
//! against each other: each touches only its own row (or reloads the list).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use ustr::Ustr;

use crate::events::Subscribers;
use crate::http::{Client, HttpResult, RequestError};
use crate::list::ListLoader;
use crate::locked;
use crate::resource::Resource;
use crate::toast::Toaster;
use crate::view::{ActionButton, RowView, SharedTable};

/// Button label while a mutation is in flight.
pub const SAVING_LABEL: &str = "Guardando…";

/// Blocking yes/no prompt shown before any mutation.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way (`--yes` / scripted front-ends).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// A click on a row button, as seen by the delegated handler.
///
/// Fields mirror the button's `data-*` attributes and are untrusted: the id
/// is kept as text and validated by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub action: Ustr,
    pub id: String,
    pub data: Vec<(String, String)>,
}

impl Click {
    pub fn new(action: &str, id: impl Into<String>) -> Self {
        Self {
            action: Ustr::from(action),
            id: id.into(),
            data: Vec::new(),
        }
    }

    /// Click on a rendered button.
    pub fn on(button: &ActionButton) -> Self {
        Self {
            action: Ustr::from(button.action),
            id: button.id.to_string(),
            data: button
                .data
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
        }
    }

    pub fn with_data(mut self, name: &str, value: impl Into<String>) -> Self {
        self.data.push((name.to_owned(), value.into()));
        self
    }

    pub fn data(&self, name: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Positive or negative non-zero integer id, else `None`.
    pub fn target_id(&self) -> Option<i64> {
        self.id.trim().parse::<i64>().ok().filter(|id| *id != 0)
    }
}

/// One entry of the dispatch table.
#[async_trait]
pub trait ActionHandler<R>: Send + Sync {
    /// Action name matched against the clicked button's `data-action`.
    fn name(&self) -> &'static str;

    /// Confirmation prompt for this click.
    fn prompt(&self, click: &Click) -> String;

    /// Issue the mutation request.
    async fn send(&self, client: &Client, id: i64, click: &Click) -> HttpResult<Option<Value>>;

    /// Apply the server's response to the displayed record.
    ///
    /// `None` when the response does not carry the changed field; the
    /// controller then reloads the list instead of guessing.
    fn reconcile(&self, current: &R, response: Option<&Value>) -> Option<R>;

    fn success_message(&self, click: &Click, updated: Option<&R>) -> String;

    /// Filter keys that make a change list-wide: when one of them was active
    /// in the last load the row may leave the filtered set, so the list is
    /// reloaded.
    fn list_wide_filters(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Observable state of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Confirming {
        action: &'static str,
        id: i64,
    },
    InFlight {
        action: &'static str,
        id: i64,
    },
    Success {
        action: &'static str,
        id: i64,
        message: String,
    },
    Error {
        action: &'static str,
        id: i64,
        message: String,
    },
}

/// Result of one click.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Unknown action or invalid id; nothing happened.
    Ignored,
    /// The operator declined the prompt; nothing was sent.
    Declined,
    /// The row was updated in place from the response.
    Patched { id: i64 },
    /// The list was reloaded.
    Reloaded { id: i64 },
    Failed(RequestError),
}

/// Puts the row back unless the success path already replaced it.
struct InFlightGuard<'a, R: Resource> {
    table: &'a SharedTable<R>,
    id: i64,
    saved: Option<RowView>,
    in_flight: Option<RowView>,
}

impl<'a, R: Resource> InFlightGuard<'a, R> {
    fn engage(table: &'a SharedTable<R>, id: i64, action: &str) -> Self {
        let mut body = locked(table);
        let Some(row) = body.row_mut(id) else {
            return Self {
                table,
                id,
                saved: None,
                in_flight: None,
            };
        };

        let saved = row.view.clone();
        if let Some(button) = row.view.button_mut(action) {
            button.disabled = true;
            button.label = SAVING_LABEL.to_owned();
        }
        let in_flight = row.view.clone();

        Self {
            table,
            id,
            saved: Some(saved),
            in_flight: Some(in_flight),
        }
    }

    /// The row has been re-rendered; nothing to restore.
    fn disarm(mut self) {
        self.saved = None;
    }

    fn restore(&mut self) {
        let (Some(saved), Some(in_flight)) = (self.saved.take(), self.in_flight.as_ref()) else {
            return;
        };
        let mut body = locked(self.table);
        if let Some(row) = body.row_mut(self.id) {
            // A concurrent reload may have rendered a fresh row meanwhile.
            if &row.view == in_flight {
                row.view = saved;
            }
        }
    }
}

impl<R: Resource> Drop for InFlightGuard<'_, R> {
    fn drop(&mut self) {
        self.restore();
    }
}

pub struct ActionController<R: Resource> {
    loader: Arc<ListLoader<R>>,
    table: SharedTable<R>,
    toaster: Arc<Toaster>,
    confirm: Arc<dyn Confirm>,
    handlers: HashMap<&'static str, Box<dyn ActionHandler<R>>>,
    state: Mutex<ActionState>,
    transitions: Subscribers<ActionState>,
}

impl<R: Resource> ActionController<R> {
    /// Controller with the resource's own actions registered.
    pub fn new(loader: Arc<ListLoader<R>>, toaster: Arc<Toaster>, confirm: Arc<dyn Confirm>) -> Self {
        let mut controller = Self {
            table: loader.table(),
            loader,
            toaster,
            confirm,
            handlers: HashMap::new(),
            state: Mutex::new(ActionState::Idle),
            transitions: Subscribers::default(),
        };
        for handler in R::handlers() {
            controller.register(handler);
        }
        controller
    }

    /// Add or replace the handler for `handler.name()`.
    pub fn register(&mut self, handler: Box<dyn ActionHandler<R>>) {
        self.handlers.insert(handler.name(), handler);
    }

    pub fn actions(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self) -> ActionState {
        locked(&self.state).clone()
    }

    /// Every state transition from now on, in order.
    pub fn subscribe(&self) -> flume::Receiver<ActionState> {
        self.transitions.subscribe()
    }

    fn publish(&self, state: ActionState) {
        self.transitions.publish(&state);
        *locked(&self.state) = state;
    }

    /// Handle a click on any button of the table.
    pub async fn click(&self, click: Click) -> ActionOutcome {
        let Some(handler) = self.handlers.get(click.action.as_str()) else {
            log::debug!("ignoring click on unknown action `{}`", click.action);
            return ActionOutcome::Ignored;
        };
        let Some(id) = click.target_id() else {
            log::debug!("ignoring `{}` click with id {:?}", click.action, click.id);
            return ActionOutcome::Ignored;
        };
        let action = handler.name();

        let disabled = locked(&self.table)
            .row(id)
            .and_then(|row| row.view.button(action))
            .is_some_and(|button| button.disabled);
        if disabled {
            log::debug!("ignoring `{action}` click on {id}: button is disabled");
            return ActionOutcome::Ignored;
        }

        self.publish(ActionState::Confirming { action, id });
        if !self.confirm.confirm(&handler.prompt(&click)) {
            self.publish(ActionState::Idle);
            return ActionOutcome::Declined;
        }

        let guard = InFlightGuard::engage(&self.table, id, action);
        self.publish(ActionState::InFlight { action, id });

        let outcome = match handler.send(self.loader.client(), id, &click).await {
            Ok(response) => {
                let applied = self.loader.applied_filters();
                let list_wide = handler
                    .list_wide_filters()
                    .iter()
                    .any(|key| applied.is_active(key));
                let current = locked(&self.table).row(id).map(|row| row.record.clone());
                let updated = match current {
                    Some(record) if !list_wide => handler.reconcile(&record, response.as_ref()),
                    _ => None,
                };

                let message = handler.success_message(&click, updated.as_ref());
                match updated {
                    Some(record) => {
                        locked(&self.table).replace_record(record);
                        guard.disarm();
                        self.toaster.success(message.clone());
                        self.publish(ActionState::Success {
                            action,
                            id,
                            message,
                        });
                        ActionOutcome::Patched { id }
                    }
                    None => {
                        drop(guard);
                        self.toaster.success(message.clone());
                        self.publish(ActionState::Success {
                            action,
                            id,
                            message,
                        });
                        self.loader.load().await;
                        ActionOutcome::Reloaded { id }
                    }
                }
            }
            Err(err) => {
                log::warn!("action `{action}` on {id} failed: {err}");
                drop(guard);
                self.toaster.error(err.message.clone());
                self.publish(ActionState::Error {
                    action,
                    id,
                    message: err.message.clone(),
                });
                ActionOutcome::Failed(err)
            }
        };

        self.publish(ActionState::Idle);
        outcome
    }
}
