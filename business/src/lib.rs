//! Core of the lending admin console.
//!
//! Everything here is independent of the front-end: tables are kept as
//! in-memory bodies ([`view::TableBody`]) that a terminal or HTML renderer
//! can draw, and every server call goes through [`http::Client`].

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod action;
pub mod auth;
pub mod badge;
pub mod book_requests;
pub mod config;
pub mod dashboard;
mod events;
pub mod filter;
pub mod html;
pub mod http;
pub mod list;
pub mod listing;
pub mod model;
pub mod page;
pub mod resource;
pub mod toast;
pub mod users;
pub mod view;

pub use action::{ActionController, ActionOutcome, ActionState, AutoConfirm, Click, Confirm};
pub use auth::{AuthStatus, Identity};
pub use config::{BusinessConfig, ConfigError};
pub use dashboard::DashboardSummary;
pub use filter::{FilterController, FilterEvent, FilterForm, Key};
pub use html::escape_html;
pub use http::{Client, HttpResult, Method, RequestError, RequestOptions, Response};
pub use list::{ListLoader, LoadOrdering, LoadOutcome};
pub use listing::Listing;
pub use model::{BookRequestRecord, RequestDecision, RequestStatus, UserRecord};
pub use page::{AdminPage, AdminTable};
pub use resource::Resource;
pub use toast::{Toast, ToastEvent, ToastKind, Toaster};
pub use view::{Render, RowView, TableBody};

/// Lock shared view state, recovering the data if a holder panicked.
pub(crate) fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
