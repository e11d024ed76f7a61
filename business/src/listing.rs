//! Collection responses.
//!
//! List endpoints answer either with a bare JSON array or with an envelope
//! `{"items": [...], "total": N}`. Both shapes are collapsed into [`Listing`]
//! at the HTTP boundary so callers never re-check the shape.

use serde::Deserialize;

/// Wire shape of a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResult<T> {
    Bare(Vec<T>),
    Envelope {
        #[serde(default = "Vec::new")]
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
}

/// Canonical in-memory list: ordered items plus an optional server total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The server's total when it sent one, else the number of items received.
    pub fn count(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
        }
    }
}

impl<T> From<ListResult<T>> for Listing<T> {
    fn from(result: ListResult<T>) -> Self {
        match result {
            ListResult::Bare(items) => Self { items, total: None },
            ListResult::Envelope { items, total } => Self { items, total },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Listing<u32> {
        serde_json::from_value::<ListResult<u32>>(value)
            .expect("list shape")
            .into()
    }

    #[test]
    fn test_bare_array() {
        let listing = decode(json!([3, 1, 2]));
        assert_eq!(listing.items, vec![3, 1, 2]);
        assert_eq!(listing.total, None);
        assert_eq!(listing.count(), 3);
    }

    #[test]
    fn test_envelope_with_total() {
        let listing = decode(json!({"items": [7], "total": 40}));
        assert_eq!(listing.items, vec![7]);
        assert_eq!(listing.count(), 40);
    }

    #[test]
    fn test_envelope_without_items_is_empty() {
        let listing = decode(json!({"total": 0}));
        assert!(listing.is_empty());
        assert_eq!(listing.len(), 0);
    }

    #[test]
    fn test_scalar_is_rejected() {
        assert!(serde_json::from_value::<ListResult<u32>>(json!("nope")).is_err());
        assert!(serde_json::from_value::<ListResult<u32>>(json!(null)).is_err());
    }
}
