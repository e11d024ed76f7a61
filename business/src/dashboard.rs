//! Read-only landing summary.
//!
//! Three independent sources are fetched concurrently. A failed source is
//! reported as unavailable and does not affect the others.

use serde_json::Value;

use crate::http::{Client, HttpResult};
use crate::listing::Listing;

pub const BOOKS_PATH: &str = "/admin/books";
pub const AUDIT_PATH: &str = "/admin/audit";
pub const SECURITY_EVENTS_PATH: &str = "/admin/security-events";

/// Page size requested from the audit and security event feeds.
pub const RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub books: Option<u64>,
    pub audit_entries: Option<u64>,
    pub security_events: Option<u64>,
}

impl DashboardSummary {
    /// `(label, count)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<u64>); 3] {
        [
            ("Libros", self.books),
            ("Auditoría", self.audit_entries),
            ("Eventos de seguridad", self.security_events),
        ]
    }
}

async fn count(client: &Client, path: &str) -> Option<u64> {
    let result: HttpResult<Listing<Value>> = client.list(path).await;
    match result {
        Ok(listing) => Some(listing.count()),
        Err(err) => {
            log::warn!("dashboard source {path} unavailable: {err}");
            None
        }
    }
}

pub async fn load(client: &Client) -> DashboardSummary {
    let audit = format!("{AUDIT_PATH}?per_page={RECENT_LIMIT}");
    let security = format!("{SECURITY_EVENTS_PATH}?limit={RECENT_LIMIT}");

    let (books, audit_entries, security_events) = tokio::join!(
        count(client, BOOKS_PATH),
        count(client, &audit),
        count(client, &security),
    );

    DashboardSummary {
        books,
        audit_entries,
        security_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_display_order() {
        let summary = DashboardSummary {
            books: Some(3),
            audit_entries: None,
            security_events: Some(0),
        };
        let labels: Vec<&str> = summary.entries().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Libros", "Auditoría", "Eventos de seguridad"]);
        assert_eq!(summary.entries()[1].1, None);
    }
}
