//! Per-table description of an admin resource.

use serde::de::DeserializeOwned;

use crate::action::ActionHandler;
use crate::filter::FilterForm;
use crate::view::Render;

/// Placeholder shown while a list request is in flight.
pub const LOADING_TEXT: &str = "Cargando…";

/// A record type listed in an admin table.
pub trait Resource: Render + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection endpoint, without query string.
    const LIST_PATH: &'static str;

    /// Column count of the table, used as the placeholder colspan.
    const COLUMNS: usize;

    const EMPTY_TEXT: &'static str;

    const FAILED_TEXT: &'static str;

    /// Named filter inputs, in query order.
    const FILTER_KEYS: &'static [&'static str];

    /// Free-text input where Enter submits the filters.
    const SEARCH_KEY: Option<&'static str> = None;

    fn filter_form() -> FilterForm {
        FilterForm::new(Self::FILTER_KEYS, Self::SEARCH_KEY)
    }

    /// Row actions, registered in the table's dispatch table.
    fn handlers() -> Vec<Box<dyn ActionHandler<Self>>>;
}
