//! Records returned by the admin API.
//!
//! Every record is a transient snapshot decoded on each load; the server
//! stays the source of truth.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::badge::{Badge, Tone};

fn default_true() -> bool {
    true
}

/// Row of `GET /api/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Lifecycle of a book request.
///
/// The admin API stores upper-case values while the public API uses
/// lower-case ones, so parsing ignores case. Anything unrecognized is
/// treated as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            Self::Accepted => Badge::toned("Aceptada", Tone::Green),
            Self::Rejected => Badge::toned("Rechazada", Tone::Red),
            Self::Cancelled => Badge::toned("Cancelada", Tone::Gray),
            Self::Pending => Badge::toned("Pendiente", Tone::Gray),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// The only two statuses an operator can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl From<RequestDecision> for RequestStatus {
    fn from(decision: RequestDecision) -> Self {
        match decision {
            RequestDecision::Accepted => Self::Accepted,
            RequestDecision::Rejected => Self::Rejected,
        }
    }
}

/// Row of `GET /api/admin/book-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRequestRecord {
    pub id: i64,
    #[serde(default)]
    pub book_id: i64,
    #[serde(default)]
    pub requester_id: i64,
    #[serde(default)]
    pub status: RequestStatus,
}

/// Body of `PATCH /api/admin/users/{id}/block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockChange {
    pub is_blocked: bool,
}

/// Response of `PATCH /api/admin/users/{id}/block`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub id: Option<i64>,
    #[serde(default)]
    pub old_is_blocked: Option<bool>,
    pub is_blocked: bool,
}

/// Body of `PATCH /api/admin/book-requests/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: RequestDecision,
}

/// Response of `PATCH /api/admin/book-requests/{id}/status`.
///
/// `status` is kept raw: a response without it must not read as pending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub id: Option<i64>,
    pub status: String,
}

impl StatusResponse {
    pub fn status(&self) -> RequestStatus {
        RequestStatus::parse(&self.status)
    }
}
