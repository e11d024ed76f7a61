//! Filter form state and the controller that turns it into list reloads.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use ustr::Ustr;

use crate::list::ListLoader;
use crate::resource::Resource;
use crate::locked;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub value: String,
}

/// The fixed set of named filter inputs of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    fields: Vec<FilterField>,
    search_key: Option<&'static str>,
}

pub type SharedFilters = Arc<Mutex<FilterForm>>;

impl FilterForm {
    /// `search_key` names the free-text field where Enter submits the form.
    pub fn new(keys: &[&'static str], search_key: Option<&'static str>) -> Self {
        Self {
            fields: keys
                .iter()
                .copied()
                .map(|key| FilterField {
                    key,
                    value: String::new(),
                })
                .collect(),
            search_key,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    pub fn search_key(&self) -> Option<&'static str> {
        self.search_key
    }

    /// Set an input's raw value. Unknown keys are rejected.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// True when the input holds a non-blank value.
    pub fn is_active(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Non-blank inputs as trimmed `(key, value)` pairs, in declaration order.
    pub fn snapshot(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .filter_map(|f| {
                let value = f.value.trim();
                (!value.is_empty()).then(|| (f.key, value.to_owned()))
            })
            .collect()
    }

    /// URL query (without the leading `?`); blank inputs are omitted entirely.
    pub fn build_query(&self) -> String {
        self.snapshot()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }
}

/// Keys relevant to form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Input events delivered to a wired filter controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The operator typed into an input.
    Input { field: Ustr, value: String },
    Apply,
    Clear,
    KeyDown { field: Ustr, key: Key },
}

/// Reads and writes the filter form feeding a [`ListLoader`].
pub struct FilterController<R: Resource> {
    form: SharedFilters,
    loader: Arc<ListLoader<R>>,
}

/// Handle returned by [`FilterController::wire`].
///
/// Dropping every sender stops the event task.
pub struct FilterWiring {
    pub events: flume::Sender<FilterEvent>,
    pub task: JoinHandle<()>,
}

impl<R: Resource> FilterController<R> {
    pub fn new(loader: Arc<ListLoader<R>>) -> Self {
        Self {
            form: loader.filters(),
            loader,
        }
    }

    pub fn form(&self) -> FilterForm {
        locked(&self.form).clone()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> bool {
        locked(&self.form).set(key, value)
    }

    pub fn build_query(&self) -> String {
        locked(&self.form).build_query()
    }

    /// Reset every recognized input to blank.
    pub fn clear(&self) {
        locked(&self.form).clear();
    }

    /// Apply one event. Returns true when it triggered a reload.
    pub async fn handle(&self, event: FilterEvent) -> bool {
        match event {
            FilterEvent::Input { field, value } => {
                if !self.set(field.as_str(), value) {
                    log::debug!("ignoring input for unknown filter `{field}`");
                }
                false
            }
            FilterEvent::Apply => {
                self.loader.load().await;
                true
            }
            FilterEvent::Clear => {
                self.clear();
                self.loader.load().await;
                true
            }
            FilterEvent::KeyDown { field, key } => {
                let submits = key == Key::Enter
                    && locked(&self.form).search_key() == Some(field.as_str());
                if submits {
                    self.loader.load().await;
                }
                submits
            }
        }
    }

    /// Attach the apply / clear / enter-to-submit handlers.
    ///
    /// Events are processed one at a time on a spawned task. Must be called
    /// inside a tokio runtime.
    pub fn wire(self: Arc<Self>) -> FilterWiring {
        let (events, receiver) = flume::unbounded::<FilterEvent>();
        let task = tokio::spawn(async move {
            while let Ok(event) = receiver.recv_async().await {
                self.handle(event).await;
            }
        });
        FilterWiring { events, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_form() -> FilterForm {
        FilterForm::new(&["q", "role", "active", "blocked"], Some("q"))
    }

    #[test]
    fn test_all_blank_builds_empty_query() {
        let mut form = users_form();
        assert_eq!(form.build_query(), "");

        form.set("q", "   ");
        form.set("role", "\t");
        assert_eq!(form.build_query(), "");
    }

    #[test]
    fn test_blank_keys_are_omitted() {
        let mut form = users_form();
        form.set("role", "admin");
        form.set("blocked", "true");
        assert_eq!(form.build_query(), "role=admin&blocked=true");
        assert!(!form.build_query().contains("q="));
        assert!(!form.build_query().contains("active"));
    }

    #[test]
    fn test_values_are_trimmed_and_encoded() {
        let mut form = users_form();
        form.set("q", "  ana maria & co ");
        assert_eq!(form.build_query(), "q=ana%20maria%20%26%20co");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut form = users_form();
        assert!(!form.set("status", "pending"));
        assert_eq!(form.get("status"), None);
    }

    #[test]
    fn test_clear_resets_every_input() {
        let mut form = users_form();
        form.set("q", "x");
        form.set("active", "false");
        form.clear();
        assert!(form.snapshot().is_empty());
        assert_eq!(form.get("q"), Some(""));
    }

    #[test]
    fn test_is_active() {
        let mut form = FilterForm::new(&["status", "book_id", "requester_id"], None);
        assert!(!form.is_active("status"));
        form.set("status", "pending");
        assert!(form.is_active("status"));
        assert!(!form.is_active("nope"));
        assert_eq!(form.search_key(), None);
    }
}
